//! The student edit view.
//!
//! Loads one record, keeps the form state for it, and submits the edits back to
//! the record store. Presentation is left to the caller: it reads [`ViewState`]
//! and feeds field edits in.

mod form;
mod route;

#[cfg(test)]
pub(crate) mod testing;

pub use form::*;
pub use route::*;

use crate::api::RecordStore;
use crate::errors::messages;
use crate::models::{Department, Student};

/// What the page shows right now.
#[derive(Debug, PartialEq, Eq)]
pub enum ViewState<'a> {
    Loading,
    NotFound,
    Form {
        values: &'a FormValues,
        department: &'a str,
    },
}

impl ViewState<'_> {
    /// Placeholder text for the states that have no form.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ViewState::Loading => Some(messages::LOADING),
            ViewState::NotFound => Some(messages::NOT_FOUND),
            ViewState::Form { .. } => None,
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Update accepted; the navigator was sent to the route
    Saved(Route),
    /// Update failed; the user was shown the message
    Failed(String),
    /// Required fields are empty; nothing was sent
    MissingRequired(Vec<FormField>),
    /// No record is loaded; nothing was sent
    NotReady,
}

/// Edit page for a single student record.
pub struct EditView<S, N, A> {
    store: S,
    navigator: N,
    notifier: A,
    id: String,
    settled_id: Option<String>,
    loading: bool,
    student: Option<Student>,
    department: String,
    form: FormValues,
}

impl<S, N, A> EditView<S, N, A>
where
    S: RecordStore,
    N: Navigator,
    A: Notifier,
{
    pub fn new(store: S, navigator: N, notifier: A) -> Self {
        Self {
            store,
            navigator,
            notifier,
            id: String::new(),
            settled_id: None,
            loading: true,
            student: None,
            department: String::new(),
            form: FormValues::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current department selection.
    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    /// Load the record for `id`. Runs once per distinct id.
    pub async fn load(&mut self, id: &str) {
        if self.settled_id.as_deref() == Some(id) {
            return;
        }

        self.id = id.to_string();
        self.loading = true;
        self.student = None;

        match self.store.get(id).await {
            Ok(resp) if resp.success => match resp.data {
                Some(student) => {
                    tracing::debug!("Loaded student {}", id);
                    self.department = student.department.clone();
                    self.form = FormValues::from_student(&student);
                    self.student = Some(student);
                }
                None => tracing::error!("Student {} response carried no data", id),
            },
            Ok(resp) => {
                tracing::error!(
                    "Error fetching student {}: {}",
                    id,
                    resp.message().unwrap_or("request unsuccessful")
                );
            }
            Err(e) => tracing::error!("Error fetching student {}: {}", id, e),
        }

        self.settled_id = Some(id.to_string());
        self.loading = false;
    }

    pub fn state(&self) -> ViewState<'_> {
        if self.loading {
            return ViewState::Loading;
        }
        match self.student {
            Some(_) => ViewState::Form {
                values: &self.form,
                department: &self.department,
            },
            None => ViewState::NotFound,
        }
    }

    /// Edit one text field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        tracing::debug!("Field {} changed", field.name());
        self.form.set(field, value);
    }

    /// Change the department selection.
    pub fn select_department(&mut self, department: Department) {
        self.department = department.as_str().to_string();
    }

    /// Leave without saving.
    pub fn cancel(&self) {
        self.navigator.push(Route::Listing);
    }

    /// Send the current form as an update.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            return SubmitOutcome::MissingRequired(missing);
        }

        if self.loading || self.student.is_none() {
            tracing::warn!("Submit ignored: student {} is not loaded", self.id);
            return SubmitOutcome::NotReady;
        }

        let request = self.form.to_update(&self.department);

        match self.store.update(&self.id, &request).await {
            Ok(resp) if resp.success => {
                tracing::info!("Updated student {}", self.id);
                let route = Route::Detail(self.id.clone());
                self.navigator.push(route.clone());
                SubmitOutcome::Saved(route)
            }
            Ok(resp) => {
                let message = resp.message().unwrap_or(messages::UPDATE_FAILED).to_string();
                tracing::warn!("Update of student {} rejected: {}", self.id, message);
                self.fail(message)
            }
            Err(e) => {
                tracing::error!("Error updating student {}: {}", self.id, e);
                let message = e.server_message().unwrap_or(messages::TRY_AGAIN).to_string();
                self.fail(message)
            }
        }
    }

    fn fail(&self, message: String) -> SubmitOutcome {
        self.notifier.alert(&message);
        SubmitOutcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::testing::{RecordingNavigator, RecordingNotifier};
    use super::*;
    use crate::api::{ApiResponse, UpdateResponse};
    use crate::errors::AppError;
    use crate::models::{SocialMedia, UpdateStudentRequest};

    enum GetReply {
        Found(Student),
        Unsuccessful,
        Transport,
    }

    enum UpdateReply {
        Success,
        Unsuccessful(Option<String>),
        Status(Option<String>),
        Transport,
    }

    struct MockStore {
        get_reply: GetReply,
        update_reply: UpdateReply,
        gets: Mutex<Vec<String>>,
        updates: Mutex<Vec<(String, UpdateStudentRequest)>>,
    }

    impl MockStore {
        fn new(get_reply: GetReply, update_reply: UpdateReply) -> Arc<Self> {
            Arc::new(Self {
                get_reply,
                update_reply,
                gets: Mutex::new(Vec::new()),
                updates: Mutex::new(Vec::new()),
            })
        }

        fn gets(&self) -> Vec<String> {
            self.gets.lock().unwrap().clone()
        }

        fn updates(&self) -> Vec<(String, UpdateStudentRequest)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordStore for MockStore {
        async fn get(&self, id: &str) -> Result<ApiResponse<Student>, AppError> {
            self.gets.lock().unwrap().push(id.to_string());
            match &self.get_reply {
                GetReply::Found(student) => Ok(ApiResponse::success(student.clone())),
                GetReply::Unsuccessful => Ok(ApiResponse::failure(Some("Not found".to_string()))),
                GetReply::Transport => Err(AppError::Transport("connection refused".to_string())),
            }
        }

        async fn update(
            &self,
            id: &str,
            request: &UpdateStudentRequest,
        ) -> Result<UpdateResponse, AppError> {
            self.updates
                .lock()
                .unwrap()
                .push((id.to_string(), request.clone()));
            match &self.update_reply {
                UpdateReply::Success => Ok(ApiResponse::success(serde_json::Value::Null)),
                UpdateReply::Unsuccessful(message) => Ok(ApiResponse::failure(message.clone())),
                UpdateReply::Status(message) => Err(AppError::Status {
                    status: 400,
                    message: message.clone(),
                }),
                UpdateReply::Transport => Err(AppError::Transport("connection reset".to_string())),
            }
        }
    }

    type TestView = EditView<Arc<MockStore>, RecordingNavigator, RecordingNotifier>;

    fn sample_student() -> Student {
        Student {
            id: "s1".to_string(),
            name: "Asha Rao".to_string(),
            enrollment_number: "CS2021-014".to_string(),
            department: "Computer Science".to_string(),
            batch: "2021".to_string(),
            contact_number: "9845000000".to_string(),
            category: None,
            description: Some("Robotics club lead".to_string()),
            profile_image: None,
            social_media: Some(SocialMedia {
                linkedin: Some("in/asharao".to_string()),
                twitter: None,
                github: None,
            }),
        }
    }

    fn view_with(
        store: &Arc<MockStore>,
    ) -> (TestView, RecordingNavigator, RecordingNotifier) {
        let navigator = RecordingNavigator::default();
        let notifier = RecordingNotifier::default();
        let view = EditView::new(store.clone(), navigator.clone(), notifier.clone());
        (view, navigator, notifier)
    }

    #[tokio::test]
    async fn test_loading_before_load() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (view, _, _) = view_with(&store);

        assert_eq!(view.state(), ViewState::Loading);
        assert_eq!(view.state().placeholder(), Some("Loading..."));
    }

    #[tokio::test]
    async fn test_load_seeds_form_and_department() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, _, _) = view_with(&store);

        view.load("s1").await;

        match view.state() {
            ViewState::Form { values, department } => {
                assert_eq!(department, "Computer Science");
                assert_eq!(values.get(FormField::Name), "Asha Rao");
                assert_eq!(values.get(FormField::EnrollmentNumber), "CS2021-014");
                assert_eq!(values.get(FormField::Description), "Robotics club lead");
                assert_eq!(values.get(FormField::Linkedin), "in/asharao");
                assert_eq!(values.get(FormField::Category), "");
            }
            other => panic!("expected form, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unsuccessful_load_is_not_found() {
        let store = MockStore::new(GetReply::Unsuccessful, UpdateReply::Success);
        let (mut view, _, _) = view_with(&store);

        view.load("missing").await;

        assert_eq!(view.state(), ViewState::NotFound);
        assert_eq!(view.state().placeholder(), Some("Student not found"));
    }

    #[tokio::test]
    async fn test_failed_load_is_not_found() {
        let store = MockStore::new(GetReply::Transport, UpdateReply::Success);
        let (mut view, _, _) = view_with(&store);

        view.load("s1").await;

        assert_eq!(view.state(), ViewState::NotFound);
    }

    #[tokio::test]
    async fn test_load_runs_once_per_id() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, _, _) = view_with(&store);

        view.load("s1").await;
        view.load("s1").await;
        view.load("s2").await;

        assert_eq!(store.gets(), vec!["s1", "s2"]);
        assert_eq!(view.id(), "s2");
    }

    #[tokio::test]
    async fn test_submit_sends_last_department_selection() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, navigator, notifier) = view_with(&store);

        view.load("s1").await;
        view.select_department(Department::CivilEngineering);
        view.select_department(Department::DataScience);
        let outcome = view.submit().await;

        assert_eq!(outcome, SubmitOutcome::Saved(Route::Detail("s1".to_string())));
        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        let (id, request) = &updates[0];
        assert_eq!(id, "s1");
        assert_eq!(request.department, "Data Science");
        assert_eq!(request.enrollment_no, "CS2021-014");
        assert_eq!(request.social_media.linkedin, "in/asharao");
        assert_eq!(request.social_media.twitter, "");
        assert_eq!(request.social_media.github, "");
        assert_eq!(navigator.routes(), vec![Route::Detail("s1".to_string())]);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_submit_sends_field_edits() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, _, _) = view_with(&store);

        view.load("s1").await;
        view.set_field(FormField::Batch, "2022");
        view.set_field(FormField::ProfileImage, "https://cdn.example.com/new.png");
        view.submit().await;

        let (_, request) = &store.updates()[0];
        assert_eq!(request.batch, "2022");
        assert_eq!(request.student_photo, "https://cdn.example.com/new.png");
        assert_eq!(request.department, "Computer Science");
    }

    #[tokio::test]
    async fn test_unsuccessful_update_shows_server_message() {
        let store = MockStore::new(
            GetReply::Found(sample_student()),
            UpdateReply::Unsuccessful(Some("Enrollment number already taken".to_string())),
        );
        let (mut view, navigator, notifier) = view_with(&store);

        view.load("s1").await;
        view.set_field(FormField::Name, "Asha R.");
        let outcome = view.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed("Enrollment number already taken".to_string())
        );
        assert_eq!(notifier.messages(), vec!["Enrollment number already taken"]);
        assert!(navigator.routes().is_empty());
        assert_eq!(view.form().get(FormField::Name), "Asha R.");
    }

    #[tokio::test]
    async fn test_unsuccessful_update_without_message() {
        let store = MockStore::new(
            GetReply::Found(sample_student()),
            UpdateReply::Unsuccessful(None),
        );
        let (mut view, _, notifier) = view_with(&store);

        view.load("s1").await;
        view.submit().await;

        assert_eq!(notifier.messages(), vec!["Failed to update student."]);
    }

    #[tokio::test]
    async fn test_status_error_shows_server_message() {
        let store = MockStore::new(
            GetReply::Found(sample_student()),
            UpdateReply::Status(Some("Validation failed".to_string())),
        );
        let (mut view, _, notifier) = view_with(&store);

        view.load("s1").await;
        let outcome = view.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed("Validation failed".to_string()));
        assert_eq!(notifier.messages(), vec!["Validation failed"]);
    }

    #[tokio::test]
    async fn test_transport_error_shows_generic_message() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Transport);
        let (mut view, navigator, notifier) = view_with(&store);

        view.load("s1").await;
        let outcome = view.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed("An error occurred. Please try again.".to_string())
        );
        assert_eq!(notifier.messages(), vec!["An error occurred. Please try again."]);
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_sends_nothing() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, _, notifier) = view_with(&store);

        view.load("s1").await;
        view.set_field(FormField::ContactNumber, "");
        let outcome = view.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::MissingRequired(vec![FormField::ContactNumber])
        );
        assert!(store.updates().is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_submit_before_load_sends_nothing() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, _, _) = view_with(&store);

        for field in FormField::ALL {
            view.set_field(field, "x");
        }
        let outcome = view.submit().await;

        assert_eq!(outcome, SubmitOutcome::NotReady);
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_goes_to_listing() {
        let store = MockStore::new(GetReply::Found(sample_student()), UpdateReply::Success);
        let (mut view, navigator, _) = view_with(&store);

        view.load("s1").await;
        view.cancel();

        assert_eq!(navigator.routes(), vec![Route::Listing]);
        assert!(store.updates().is_empty());
    }
}
