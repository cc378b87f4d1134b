//! API error taxonomy.

use serde::Deserialize;
use serde_json::Value;

/// Any failure of a single API call.
///
/// There is no retry: every error is terminal for the action that raised it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Text suitable for a status message: the server's `detail` when there
    /// is one, otherwise the error description.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<gatepass_core::DomainError> for ApiError {
    fn from(err: gatepass_core::DomainError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

/// One FastAPI request-validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationError {
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationError {
    fn describe(&self) -> String {
        let loc = self
            .loc
            .iter()
            .map(|part| match part {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        if loc.is_empty() {
            self.msg.clone()
        } else {
            format!("{loc}: {}", self.msg)
        }
    }
}

/// 422 body: `{"detail": [ValidationError, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpValidationError {
    pub detail: Vec<ValidationError>,
}

/// Pull a human readable message out of an error body.
///
/// Understands `{"detail": "..."}` and FastAPI validation lists; returns
/// `None` when the body carries neither.
pub(crate) fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let errors: Vec<ValidationError> =
                serde_json::from_value(Value::Array(items.clone())).ok()?;
            let joined = errors
                .iter()
                .map(ValidationError::describe)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}
