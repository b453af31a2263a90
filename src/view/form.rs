//! Form fields and values of the edit page.

use std::collections::BTreeMap;

use crate::models::{SocialMediaUpdate, Student, UpdateStudentRequest};

/// Text fields of the edit form. The department selector is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    EnrollmentNumber,
    Batch,
    ContactNumber,
    Category,
    Linkedin,
    Twitter,
    Github,
    Description,
    ProfileImage,
}

impl FormField {
    /// Every text field, in page order.
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::EnrollmentNumber,
        FormField::Batch,
        FormField::ContactNumber,
        FormField::Category,
        FormField::Linkedin,
        FormField::Twitter,
        FormField::Github,
        FormField::Description,
        FormField::ProfileImage,
    ];

    /// Form control name.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::EnrollmentNumber => "enrollmentNumber",
            FormField::Batch => "batch",
            FormField::ContactNumber => "contactNumber",
            FormField::Category => "category",
            FormField::Linkedin => "linkedin",
            FormField::Twitter => "twitter",
            FormField::Github => "github",
            FormField::Description => "description",
            FormField::ProfileImage => "profileImage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::EnrollmentNumber => "Enrollment Number",
            FormField::Batch => "Batch",
            FormField::ContactNumber => "Contact Number",
            FormField::Category => "Category",
            FormField::Linkedin => "LinkedIn",
            FormField::Twitter => "Twitter",
            FormField::Github => "GitHub",
            FormField::Description => "Description",
            FormField::ProfileImage => "Profile Image URL",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::EnrollmentNumber
                | FormField::Batch
                | FormField::ContactNumber
        )
    }
}

/// Current values of the text fields. Unset fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FormField, String>,
}

impl FormValues {
    /// Default values taken from a loaded record.
    pub fn from_student(student: &Student) -> Self {
        let social = student.social_media.clone().unwrap_or_default();
        let mut form = Self::default();

        form.set(FormField::Name, student.name.clone());
        form.set(FormField::EnrollmentNumber, student.enrollment_number.clone());
        form.set(FormField::Batch, student.batch.clone());
        form.set(FormField::ContactNumber, student.contact_number.clone());
        form.set_opt(FormField::Category, student.category.clone());
        form.set_opt(FormField::Description, student.description.clone());
        form.set_opt(FormField::ProfileImage, student.profile_image.clone());
        form.set_opt(FormField::Linkedin, social.linkedin);
        form.set_opt(FormField::Twitter, social.twitter);
        form.set_opt(FormField::Github, social.github);

        form
    }

    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    fn set_opt(&mut self, field: FormField, value: Option<String>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    /// Required fields that are currently empty, in page order.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
            .collect()
    }

    /// Serialize into the update body, using `department` for the selector.
    pub fn to_update(&self, department: &str) -> UpdateStudentRequest {
        let text = |field: FormField| self.get(field).to_string();

        UpdateStudentRequest {
            name: text(FormField::Name),
            enrollment_no: text(FormField::EnrollmentNumber),
            department: department.to_string(),
            batch: text(FormField::Batch),
            contact_number: text(FormField::ContactNumber),
            category: text(FormField::Category),
            description: text(FormField::Description),
            student_photo: text(FormField::ProfileImage),
            social_media: SocialMediaUpdate {
                linkedin: text(FormField::Linkedin),
                twitter: text(FormField::Twitter),
                github: text(FormField::Github),
            },
        }
    }
}
