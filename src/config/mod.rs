//! Configuration module for the student editor.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

use url::Url;

use crate::errors::AppError;

/// Default records endpoint of the student directory API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/posts";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Records endpoint; a record lives at `{api_base_url}/{id}`
    pub api_base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("STUDENT_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let log_level = env::var("STUDENT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            log_level,
        }
    }

    /// URL of a single record. The id is always one escaped path segment.
    pub fn record_url(&self, id: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.api_base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Config(format!("{} cannot hold a record path", self.api_base_url))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}
