//! Closed set of gate pass statuses.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Server-owned lifecycle status of a gate pass.
///
/// The set is closed: an unknown wire value fails deserialization instead of
/// silently falling into a catch-all, so a new server status shows up as a
/// compile-time gap in every exhaustive `match`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePassStatus {
    Pending,
    Approved,
    Rejected,
    PendingReturn,
    Returned,
    Completed,
}

impl GatePassStatus {
    /// Every status, in display order.
    pub const ALL: [GatePassStatus; 6] = [
        GatePassStatus::Pending,
        GatePassStatus::Approved,
        GatePassStatus::Rejected,
        GatePassStatus::PendingReturn,
        GatePassStatus::Returned,
        GatePassStatus::Completed,
    ];

    /// Wire name (as used in JSON bodies and the `status` query filter).
    pub fn as_str(&self) -> &'static str {
        match self {
            GatePassStatus::Pending => "pending",
            GatePassStatus::Approved => "approved",
            GatePassStatus::Rejected => "rejected",
            GatePassStatus::PendingReturn => "pending_return",
            GatePassStatus::Returned => "returned",
            GatePassStatus::Completed => "completed",
        }
    }

    /// Title-case name for selectors and KPI cards.
    pub fn title(&self) -> &'static str {
        match self {
            GatePassStatus::Pending => "Pending",
            GatePassStatus::Approved => "Approved",
            GatePassStatus::Rejected => "Rejected",
            GatePassStatus::PendingReturn => "Pending Return",
            GatePassStatus::Returned => "Returned",
            GatePassStatus::Completed => "Completed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, GatePassStatus::Pending)
    }
}

impl core::fmt::Display for GatePassStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatePassStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        GatePassStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| DomainError::unknown_status(s.trim()))
    }
}
