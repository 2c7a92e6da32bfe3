/*
[INPUT]:  Authorization failures, repository errors, malformed input
[OUTPUT]: The four workflow error kinds surfaced to UI callers
[POS]:    Error handling layer - engine-wide error type
[UPDATE]: When adding error kinds or changing adapter error mapping
*/

use taskflow_adapter::TaskflowError;
use taskflow_adapter::types::ParseStatusError;
use thiserror::Error;

/// Errors returned by workflow operations.
///
/// Messages are user facing and shown verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Role or relationship check failed; nothing was mutated
    #[error("{0}")]
    Authorization(String),

    /// Task or related resource is missing
    #[error("{0}")]
    NotFound(String),

    /// Malformed input, e.g. an unknown status value
    #[error("{0}")]
    Validation(String),

    /// Collaborator call failed; no mutation is assumed to have happened
    #[error("{0}")]
    Network(String),
}

impl WorkflowError {
    /// Whether the caller may retry the operation manually
    pub fn is_transient(&self) -> bool {
        matches!(self, WorkflowError::Network(_))
    }
}

impl From<TaskflowError> for WorkflowError {
    fn from(err: TaskflowError) -> Self {
        let retryable = err.is_retryable();
        match err {
            TaskflowError::Authorization { message } => WorkflowError::Authorization(message),
            TaskflowError::NotAuthenticated => WorkflowError::Authorization(err.to_string()),
            TaskflowError::NotFound { message } => WorkflowError::NotFound(message),
            TaskflowError::Validation { message } => WorkflowError::Validation(message),
            TaskflowError::Api { message, .. } if retryable => WorkflowError::Network(message),
            TaskflowError::Api { message, .. } => WorkflowError::Validation(message),
            TaskflowError::Serialization(_)
            | TaskflowError::InvalidResponse(_)
            | TaskflowError::UrlParse(_)
            | TaskflowError::Config(_) => WorkflowError::Validation(err.to_string()),
            TaskflowError::Http(_) | TaskflowError::Timeout { .. } => {
                WorkflowError::Network(err.to_string())
            }
        }
    }
}

impl From<ParseStatusError> for WorkflowError {
    fn from(err: ParseStatusError) -> Self {
        WorkflowError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
