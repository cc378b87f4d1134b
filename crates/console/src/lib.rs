//! `gatepass-console`
//!
//! **Responsibility:** everything the admin console and dashboard do between
//! "the API answered" and "the screen shows it".
//!
//! This crate provides:
//! - Page state for the admin portal ([`admin::AdminPage`]) and the
//!   dashboard ([`dashboard::Dashboard`])
//! - Derived views: KPI counts, status distribution, 14-day trend, pagination
//! - Widgets with local state: confirm modal, photo preview, flash message,
//!   count-up animation, status badge
//!
//! Rendering is left to the front end; nothing here prints.

pub mod admin;
pub mod badge;
pub mod config;
pub mod count_up;
pub mod dashboard;
pub mod error;
pub mod flash;
pub mod format;
pub mod load;
pub mod modal;
pub mod pager;
pub mod preview;
pub mod stats;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::{ActionOutcome, AdminPage};
pub use badge::{StatusBadge, Tone};
pub use config::ConsoleConfig;
pub use count_up::CountUp;
pub use dashboard::{Dashboard, Role};
pub use error::PageError;
pub use flash::{Flash, FlashKind, FlashSlot};
pub use load::LoadState;
pub use modal::{ConfirmAction, ConfirmModal};
pub use pager::Pager;
pub use preview::{ObjectUrl, ObjectUrlStore, PhotoPreview, PreviewState, TempDirStore};
pub use stats::{DistributionSlice, KpiCard, Stats};
pub use trend::{TrendPoint, daily_trend};
