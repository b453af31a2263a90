//! Error handling module for the student editor.
//!
//! Store failures are typed here; the edit view turns them into user-facing messages.

/// Fixed user-facing messages.
pub mod messages {
    pub const LOADING: &str = "Loading...";
    pub const NOT_FOUND: &str = "Student not found";
    pub const UPDATE_FAILED: &str = "Failed to update student.";
    pub const TRY_AGAIN: &str = "An error occurred. Please try again.";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The request never produced a response
    Transport(String),
    /// The server answered with an error status
    Status {
        status: u16,
        message: Option<String>,
    },
    /// The response body was not the expected envelope
    Malformed(String),
    /// The configured endpoint cannot address a record
    Config(String),
}

impl AppError {
    /// Message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Transport(msg) => write!(f, "transport error: {}", msg),
            AppError::Status { status, message } => match message {
                Some(message) => write!(f, "HTTP {}: {}", status, message),
                None => write!(f, "HTTP {}", status),
            },
            AppError::Malformed(msg) => write!(f, "malformed response: {}", msg),
            AppError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            AppError::Malformed(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        tracing::error!("URL error: {:?}", err);
        AppError::Config(format!("Invalid API base URL: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Malformed(format!("JSON error: {}", err))
    }
}
