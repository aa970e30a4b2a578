use serde::Deserialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Authentication error: {message}")]
    Auth {
        message: String,
        from_server: bool,
    },

    #[error("Server error {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("{0}")]
    SubmitFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A submission is already in progress")]
    Busy,

    #[error("Session storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Session storage migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl AppError {
    /// The message the backend attached to a failed response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Validation(msg) => Some(msg),
            AppError::Auth {
                message,
                from_server: true,
            } => Some(message),
            AppError::Server {
                message: Some(msg), ..
            } => Some(msg),
            _ => None,
        }
    }

    /// Message to show the user: the server's own wording when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        error!("http transport error: {}", err);
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Error body returned by the backend. Most routes use `message`, the
/// contact route uses `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message_first(self) -> Option<String> {
        non_blank(self.message).or_else(|| non_blank(self.error))
    }

    pub fn error_first(self) -> Option<String> {
        non_blank(self.error).or_else(|| non_blank(self.message))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|m| !m.trim().is_empty())
}

/// Map a non-success status and the message extracted from its body into
/// the error taxonomy.
pub fn from_status(status: u16, message: Option<String>) -> AppError {
    match status {
        401 => match message {
            Some(message) => AppError::Auth {
                message,
                from_server: true,
            },
            None => AppError::Auth {
                message: "Session expired or invalid token".to_string(),
                from_server: false,
            },
        },
        400..=499 => match message {
            Some(msg) => AppError::Validation(msg),
            None => AppError::Server { status, message },
        },
        _ => AppError::Server { status, message },
    }
}
