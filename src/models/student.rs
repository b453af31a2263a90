//! Student model matching the student directory API.
//!
//! The read schema (`Student`) and the write schema (`UpdateStudentRequest`) use
//! different JSON keys for the enrollment number and photo URL. Both are kept as
//! the API defines them.

use serde::{Deserialize, Deserializer, Serialize};

/// Read a string that the server may send as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Social media handles attached to a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// A student record as returned by `GET /{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, alias = "_id", deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enrollment_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub batch: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
}

/// Social media block of an update; blank handles are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaUpdate {
    pub linkedin: String,
    pub twitter: String,
    pub github: String,
}

/// Request body for `PATCH /{id}`. Never carries the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: String,
    pub enrollment_no: String,
    pub department: String,
    pub batch: String,
    pub contact_number: String,
    pub category: String,
    pub description: String,
    pub student_photo: String,
    pub social_media: SocialMediaUpdate,
}
