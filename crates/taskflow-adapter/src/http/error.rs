/*
[INPUT]:  Error sources (HTTP, API status codes, serialization, session)
[OUTPUT]: Structured error types with retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the task API adapter
#[derive(Error, Debug)]
pub enum TaskflowError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Caller is not allowed to perform the operation (401/403)
    #[error("{message}")]
    Authorization { message: String },

    /// Task or related resource does not exist (404)
    #[error("{message}")]
    NotFound { message: String },

    /// Request was rejected as malformed (400/422)
    #[error("{message}")]
    Validation { message: String },

    /// API returned any other error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// No session token is configured
    #[error("Not authenticated, no session token configured")]
    NotAuthenticated,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl TaskflowError {
    /// Check if the error is transient; the caller may retry manually
    pub fn is_retryable(&self) -> bool {
        match self {
            TaskflowError::Http(_) | TaskflowError::Timeout { .. } => true,
            TaskflowError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Check if error indicates an authorization failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            TaskflowError::Authorization { .. } | TaskflowError::NotAuthenticated
        )
    }

    /// Map an HTTP status code and server message onto an error kind
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                TaskflowError::Authorization { message }
            }
            StatusCode::NOT_FOUND => TaskflowError::NotFound { message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                TaskflowError::Validation { message }
            }
            _ => TaskflowError::Api {
                code: status.as_u16(),
                message,
            },
        }
    }
}

/// Result type alias for task API operations
pub type Result<T> = std::result::Result<T, TaskflowError>;
