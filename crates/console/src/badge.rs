//! Status badge: label and colour tone per status.

use gatepass_core::GatePassStatus;

/// Colour family of a badge, chart slice or KPI card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Yellow,
    Emerald,
    Red,
    Blue,
    Green,
    Gray,
}

impl Tone {
    /// Chart colour.
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Yellow => "#fbbf24",
            Tone::Emerald => "#10b981",
            Tone::Red => "#ef4444",
            Tone::Blue => "#3b82f6",
            Tone::Green => "#059669",
            Tone::Gray => "#6b7280",
        }
    }

    /// ANSI SGR foreground code for terminal output.
    pub fn ansi(&self) -> &'static str {
        match self {
            Tone::Yellow => "33",
            Tone::Emerald => "32",
            Tone::Red => "31",
            Tone::Blue => "34",
            Tone::Green => "92",
            Tone::Gray => "90",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub status: GatePassStatus,
}

impl StatusBadge {
    pub fn new(status: GatePassStatus) -> Self {
        Self { status }
    }

    /// Upper-case label, underscores as spaces.
    pub fn label(&self) -> &'static str {
        match self.status {
            GatePassStatus::Pending => "PENDING",
            GatePassStatus::Approved => "APPROVED",
            GatePassStatus::Rejected => "REJECTED",
            GatePassStatus::PendingReturn => "PENDING RETURN",
            GatePassStatus::Returned => "RETURNED",
            GatePassStatus::Completed => "COMPLETED",
        }
    }

    pub fn tone(&self) -> Tone {
        match self.status {
            GatePassStatus::Pending => Tone::Yellow,
            GatePassStatus::Approved => Tone::Emerald,
            GatePassStatus::Rejected => Tone::Red,
            GatePassStatus::PendingReturn => Tone::Blue,
            GatePassStatus::Returned => Tone::Green,
            GatePassStatus::Completed => Tone::Gray,
        }
    }
}
