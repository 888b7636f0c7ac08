//! Wire types that only exist at the HTTP boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the Goal Service.
///
/// Structured services answer `{code, message}`; FastAPI-style services answer
/// `{detail}` where `detail` may be a string or a list of field errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ApiErrorResponse {
    /// Best human-readable message in the body, if any.
    pub fn summary(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        match &self.detail {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(detail) => Some(detail.to_string()),
            None => None,
        }
    }
}
