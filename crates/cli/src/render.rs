//! Plain-text rendering of console state.

use std::fmt::Write as _;

use gatepass_console::dashboard::NO_HISTORY;
use gatepass_console::format::{self, NOT_AVAILABLE};
use gatepass_console::{DistributionSlice, Flash, FlashKind, KpiCard, StatusBadge, Tone, TrendPoint};
use gatepass_core::{GatePass, StatusHistoryItem};

const BAR_WIDTH: usize = 30;

/// Applies ANSI colours when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{text}\x1b[0m", tone.ansi())
        } else {
            text.to_string()
        }
    }

    pub fn badge(&self, pass: &GatePass) -> String {
        let badge = StatusBadge::new(pass.status);
        self.paint(badge.tone(), &format!("[{}]", badge.label()))
    }

    pub fn flash(&self, flash: &Flash) -> String {
        let tone = match flash.kind {
            FlashKind::Error => Tone::Red,
            FlashKind::Success => Tone::Emerald,
            FlashKind::Info => Tone::Blue,
        };
        self.paint(tone, &flash.text)
    }

    /// One row per pass: number, person, badge, created date.
    pub fn table(&self, passes: &[&GatePass]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<14} {:<24} {:<18} {}", "NUMBER", "PERSON", "STATUS", "CREATED");
        for pass in passes {
            // pad by the visible width; escape codes take no columns
            let visible = StatusBadge::new(pass.status).label().len() + 2;
            let status = self.badge(pass) + &" ".repeat(18usize.saturating_sub(visible));
            let _ = writeln!(
                out,
                "{:<14} {:<24} {} {}",
                pass.number.as_str(),
                truncate(&pass.person_name, 24),
                status,
                format::date(&pass.created_at),
            );
        }
        out
    }

    pub fn detail(&self, pass: &GatePass) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Gatepass {}  {}", pass.number, self.badge(pass));
        let rows = [
            ("Person", pass.person_name.clone()),
            ("Description", pass.description.clone()),
            ("Created by", pass.created_by.clone()),
            ("Returnable", format::yes_no(pass.is_returnable).to_string()),
            ("Created", format::timestamp(&pass.created_at)),
            ("Approved", format::optional_timestamp(pass.approved_at.as_ref())),
            ("Exit time", format::optional_timestamp(pass.exit_time.as_ref())),
            ("Return time", format::optional_timestamp(pass.return_time.as_ref())),
            ("Exit photo", format::optional_text(pass.exit_photo_id.as_ref().map(|p| p.as_str()))),
            ("Return photo", format::optional_text(pass.return_photo_id.as_ref().map(|p| p.as_str()))),
            ("QR code", format::optional_text(pass.qr_code_url.as_deref())),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "  {label:<13} {value}");
        }
        out
    }

    pub fn history(&self, items: &[StatusHistoryItem]) -> String {
        if items.is_empty() {
            return format!("{NO_HISTORY}\n");
        }
        let mut out = String::new();
        for item in items {
            let status = item.status.replace('_', " ").to_uppercase();
            let _ = writeln!(
                out,
                "{}  {:<16} by {}",
                format::timestamp(&item.changed_at),
                status,
                if item.changed_by.trim().is_empty() { NOT_AVAILABLE } else { &item.changed_by },
            );
        }
        out
    }

    /// KPI tiles on one line each, showing `values` (animated or final).
    pub fn kpis(&self, cards: &[KpiCard], values: &[u64]) -> String {
        let mut out = String::new();
        for (card, value) in cards.iter().zip(values) {
            let _ = writeln!(out, "  {:<22} {}", card.title, self.paint(card.tone, &value.to_string()));
        }
        out
    }

    pub fn distribution(&self, slices: &[DistributionSlice], total: usize) -> String {
        let mut out = String::new();
        for slice in slices {
            let pct = slice.percent_of(total);
            let bar = "█".repeat((pct / 100.0 * BAR_WIDTH as f64).round() as usize);
            let _ = writeln!(
                out,
                "  {:<10} {:>5.1}% {:>5} {}",
                slice.name,
                pct,
                slice.value,
                self.paint(slice.tone, &bar)
            );
        }
        out
    }

    pub fn trend(&self, points: &[TrendPoint]) -> String {
        let max = points.iter().map(|p| p.count).max().unwrap_or(0);
        let mut out = String::new();
        for point in points {
            let width = if max == 0 { 0 } else { point.count * BAR_WIDTH / max };
            let _ = writeln!(
                out,
                "  {:<7} {:>4} {}",
                point.label,
                point.count,
                self.paint(Tone::Blue, &"▇".repeat(width))
            );
        }
        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
