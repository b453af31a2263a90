//! REST API module.
//!
//! The record store seam between the edit view and the student directory API.

mod client;

pub use client::*;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Student, UpdateStudentRequest};

/// Response envelope used by every directory endpoint.
///
/// Absent `data`/`message` keys read as `None`; no `T: Default` is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Server message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Reply to an update; the payload, if any, is not interpreted.
pub type UpdateResponse = ApiResponse<serde_json::Value>;

/// Read/write access to student records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one record.
    async fn get(&self, id: &str) -> Result<ApiResponse<Student>, AppError>;

    /// Apply a partial update to one record.
    async fn update(
        &self,
        id: &str,
        request: &UpdateStudentRequest,
    ) -> Result<UpdateResponse, AppError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn get(&self, id: &str) -> Result<ApiResponse<Student>, AppError> {
        (**self).get(id).await
    }

    async fn update(
        &self,
        id: &str,
        request: &UpdateStudentRequest,
    ) -> Result<UpdateResponse, AppError> {
        (**self).update(id, request).await
    }
}
