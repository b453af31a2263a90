//! HTTP implementation of the record store.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{ApiResponse, RecordStore, UpdateResponse};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Student, UpdateStudentRequest};

/// Record store backed by the directory REST API.
#[derive(Clone)]
pub struct HttpRecordStore {
    client: Client,
    config: Config,
}

impl HttpRecordStore {
    pub fn new(config: Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: Config) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    /// GET /{id} - Fetch a single student.
    async fn get(&self, id: &str) -> Result<ApiResponse<Student>, AppError> {
        let url = self.config.record_url(id)?;
        tracing::debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        // A 404 carrying the envelope is an ordinary "not found" answer.
        match serde_json::from_str(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(AppError::Status {
                status: status.as_u16(),
                message: None,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// PATCH /{id} - Update a student.
    async fn update(
        &self,
        id: &str,
        request: &UpdateStudentRequest,
    ) -> Result<UpdateResponse, AppError> {
        let url = self.config.record_url(id)?;
        tracing::debug!("PATCH {}", url);

        let resp = self.client.patch(url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(update_reply(&body))
    }
}

/// Read a 2xx update reply. Only `success: true` counts as saved; any other
/// body, JSON or not, is an unsuccessful answer that may carry a `message`.
fn update_reply(body: &str) -> UpdateResponse {
    let value = serde_json::from_str::<Value>(body).unwrap_or_else(|e| {
        tracing::warn!("Update reply is not JSON: {}", e);
        Value::Null
    });

    ApiResponse {
        success: value["success"].as_bool() == Some(true),
        data: value.get("data").cloned(),
        message: value["message"].as_str().map(str::to_string),
    }
}

/// Build the error for a non-2xx reply, keeping the body's `message` if present.
fn status_error(status: StatusCode, body: &str) -> AppError {
    #[derive(Deserialize)]
    struct MessageBody {
        #[serde(default)]
        message: Option<String>,
    }

    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty());

    tracing::warn!("Update rejected with HTTP {}", status);

    AppError::Status {
        status: status.as_u16(),
        message,
    }
}
