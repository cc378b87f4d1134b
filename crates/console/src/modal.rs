//! Confirmation modal: `closed → open → confirmed | cancelled → closed`.

use gatepass_core::GatePass;

/// Mutating action that needs a confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Approve,
    Reject,
    Delete,
}

impl ConfirmAction {
    pub fn verb(&self) -> &'static str {
        match self {
            ConfirmAction::Approve => "approve",
            ConfirmAction::Reject => "reject",
            ConfirmAction::Delete => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ConfirmAction::Approve => "approved",
            ConfirmAction::Reject => "rejected",
            ConfirmAction::Delete => "deleted",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            ConfirmAction::Approve => "Approve",
            ConfirmAction::Reject => "Reject",
            ConfirmAction::Delete => "Delete",
        }
    }

    /// Dashboard title, e.g. "Confirm Approval".
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::Approve => "Confirm Approval",
            ConfirmAction::Reject => "Confirm Rejection",
            ConfirmAction::Delete => "Confirm Deletion",
        }
    }

    /// Question shown in the modal body for `pass`.
    pub fn prompt(&self, pass: &GatePass) -> String {
        let mut text = format!(
            "Are you sure you want to {} gatepass {} for {}?",
            self.verb(),
            pass.number,
            pass.person_name
        );
        if matches!(self, ConfirmAction::Delete) {
            text.push_str(" This action cannot be undone.");
        }
        text
    }
}

/// A modal holding the payload it will hand back on confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmModal<T> {
    pending: Option<T>,
}

impl<T> Default for ConfirmModal<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ConfirmModal<T> {
    /// Open (or re-target) the modal.
    pub fn open(&mut self, payload: T) {
        self.pending = Some(payload);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Close and hand the payload back for execution.
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Close and drop the payload.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
