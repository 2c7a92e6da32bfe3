/*
[INPUT]:  Task API error payloads
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - non-entity response bodies
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Error body returned by the task API on non-2xx responses.
///
/// The backend uses either `message` or `error` for the human readable text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}
