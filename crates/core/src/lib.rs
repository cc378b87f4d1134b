//! `gatepass-core`: gate pass records as the remote API returns them.
//!
//! This crate contains **wire-level domain types only** (no HTTP, no UI state).
//! The server owns every status transition; nothing here enforces them.

pub mod entity;
pub mod error;
pub mod gate_pass;
pub mod id;
pub mod status;
pub mod timestamp;

pub use entity::{Entity, replace_by_id};
pub use error::{DomainError, DomainResult};
pub use gate_pass::{GatePass, GatePassCreate, StatusHistoryItem};
pub use id::{GatePassId, PassNumber, PhotoId};
pub use status::GatePassStatus;
