use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::{GatePassId, PassNumber, PhotoId};
use crate::status::GatePassStatus;

/// One entry of the server-maintained audit log.
///
/// `status` stays a raw string: the log is append-only history and may carry
/// names the current status set no longer knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryItem {
    pub status: String,
    #[serde(with = "crate::timestamp")]
    pub changed_at: DateTime<Utc>,
    pub changed_by: String,
}

/// Gate pass record exactly as the API returns it.
///
/// Treated as an opaque DTO: the console only ever replaces a whole record
/// with the server's latest version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePass {
    pub id: GatePassId,
    pub number: PassNumber,
    pub person_name: String,
    pub description: String,
    pub created_by: String,
    pub is_returnable: bool,
    pub status: GatePassStatus,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryItem>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_photo_id: Option<PhotoId>,
    #[serde(default)]
    pub return_photo_id: Option<PhotoId>,
    #[serde(default, with = "crate::timestamp::option")]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::option")]
    pub return_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

impl GatePass {
    /// Only pending passes offer approve/reject.
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn has_photos(&self) -> bool {
        self.exit_photo_id.is_some() || self.return_photo_id.is_some()
    }
}

impl Entity for GatePass {
    type Id = GatePassId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Body of the create call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GatePassCreate {
    pub person_name: String,
    pub description: String,
    pub is_returnable: bool,
}

impl GatePassCreate {
    pub fn new(person_name: impl Into<String>, description: impl Into<String>, is_returnable: bool) -> Self {
        Self {
            person_name: person_name.into(),
            description: description.into(),
            is_returnable,
        }
    }

    /// Catch obviously incomplete forms before a round trip.
    ///
    /// The server remains the authority on what it accepts.
    pub fn validate(&self) -> DomainResult<()> {
        if self.person_name.trim().is_empty() {
            return Err(DomainError::validation("person_name cannot be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        Ok(())
    }
}
