//! Errors surfaced by remote variant operations.

use serde_json::Value;
use thiserror::Error;

/// Result type for remote operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A failed remote call.
///
/// Every variant carries a human-readable message, available through
/// [`ServiceError::detail`], suitable for an error toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },
    #[error("parse error: {0}")]
    Parse(String),
}

impl ServiceError {
    /// Build an API error from a non-success response body.
    ///
    /// The message is the body's `detail` field when the body is a JSON
    /// object carrying one, otherwise the raw body text, otherwise a generic
    /// message naming the status.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("request failed with status {status}"));

        Self::Api { status, detail }
    }

    /// Human-readable message for display.
    pub fn detail(&self) -> &str {
        match self {
            ServiceError::Network(msg) | ServiceError::Parse(msg) => msg,
            ServiceError::Api { detail, .. } => detail,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Parse(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
