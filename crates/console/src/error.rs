//! Page-level errors.

use gatepass_client::ApiError;
use gatepass_core::{DomainError, PassNumber};

/// Why a page action did not happen.
///
/// Every variant has already been shown to the user (flash message or error
/// banner) by the time the page returns it.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("gatepass {0} is not in the loaded list")]
    NotLoaded(PassNumber),
    #[error("gatepass {0} is not pending")]
    NotPending(PassNumber),
    #[error("no action is awaiting confirmation")]
    NothingToConfirm,
}

impl PageError {
    /// Message for the status area.
    pub fn user_message(&self) -> String {
        match self {
            PageError::Api(err) => err.user_message(),
            PageError::Domain(DomainError::InvalidId(_)) => "Please provide a gatepass number".to_string(),
            other => other.to_string(),
        }
    }
}
