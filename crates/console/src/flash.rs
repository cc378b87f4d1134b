//! Transient status messages ("toasts").

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

/// Holds at most one message; a new message replaces the old one and
/// restarts the dismissal timer.
#[derive(Debug, Clone)]
pub struct FlashSlot {
    ttl: Duration,
    current: Option<(Flash, Instant)>,
}

impl FlashSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn set(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.set_at(kind, text, Instant::now());
    }

    pub fn set_at(&mut self, kind: FlashKind, text: impl Into<String>, now: Instant) {
        let flash = Flash {
            kind,
            text: text.into(),
        };
        match flash.kind {
            FlashKind::Error => tracing::warn!(text = %flash.text, "flash"),
            _ => tracing::debug!(text = %flash.text, "flash"),
        }
        self.current = Some((flash, now));
    }

    /// The message still visible at `now`, if any.
    pub fn visible_at(&self, now: Instant) -> Option<&Flash> {
        self.current
            .as_ref()
            .filter(|(_, set_at)| now.saturating_duration_since(*set_at) < self.ttl)
            .map(|(flash, _)| flash)
    }

    pub fn visible(&self) -> Option<&Flash> {
        self.visible_at(Instant::now())
    }

    /// Most recent message regardless of expiry.
    pub fn last(&self) -> Option<&Flash> {
        self.current.as_ref().map(|(flash, _)| flash)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
