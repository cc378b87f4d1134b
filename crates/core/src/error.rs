//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only local, deterministic failures live here (malformed identifiers,
/// unknown status names, obviously incomplete forms). Whether an action is
/// allowed is always the server's call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a blank form field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. blank pass number).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A status name outside the known set.
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_status(name: impl Into<String>) -> Self {
        Self::UnknownStatus(name.into())
    }
}
