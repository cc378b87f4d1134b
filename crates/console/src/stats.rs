//! KPI counts and status distribution.

use gatepass_core::{GatePass, GatePassStatus};

use crate::badge::Tone;

/// Per-status counts over one in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending_return: usize,
    pub returned: usize,
    pub completed: usize,
}

impl Stats {
    /// Single pass over the list.
    pub fn from_passes<'a>(passes: impl IntoIterator<Item = &'a GatePass>) -> Self {
        let mut stats = Stats::default();
        for pass in passes {
            stats.total += 1;
            *stats.slot_mut(pass.status) += 1;
        }
        stats
    }

    fn slot_mut(&mut self, status: GatePassStatus) -> &mut usize {
        match status {
            GatePassStatus::Pending => &mut self.pending,
            GatePassStatus::Approved => &mut self.approved,
            GatePassStatus::Rejected => &mut self.rejected,
            GatePassStatus::PendingReturn => &mut self.pending_return,
            GatePassStatus::Returned => &mut self.returned,
            GatePassStatus::Completed => &mut self.completed,
        }
    }

    pub fn count(&self, status: GatePassStatus) -> usize {
        match status {
            GatePassStatus::Pending => self.pending,
            GatePassStatus::Approved => self.approved,
            GatePassStatus::Rejected => self.rejected,
            GatePassStatus::PendingReturn => self.pending_return,
            GatePassStatus::Returned => self.returned,
            GatePassStatus::Completed => self.completed,
        }
    }

    /// Cards in dashboard order.
    pub fn kpi_cards(&self) -> Vec<KpiCard> {
        vec![
            KpiCard::new("Total", self.total, Tone::Gray),
            KpiCard::new("Pending", self.pending, Tone::Yellow),
            KpiCard::new("Approved", self.approved, Tone::Emerald),
            KpiCard::new("Rejected", self.rejected, Tone::Red),
            KpiCard::new("Completed", self.completed, Tone::Blue),
            KpiCard::new("Pending Return", self.pending_return, Tone::Red),
            KpiCard::new("Returned Gate Passes", self.returned, Tone::Green),
        ]
    }

    /// Slices of the status pie chart. Completed passes are shown as "Active".
    pub fn distribution(&self) -> Vec<DistributionSlice> {
        vec![
            DistributionSlice::new("Pending", self.pending, Tone::Yellow),
            DistributionSlice::new("Approved", self.approved, Tone::Emerald),
            DistributionSlice::new("Rejected", self.rejected, Tone::Red),
            DistributionSlice::new("Active", self.completed, Tone::Blue),
            DistributionSlice::new("Returned", self.returned, Tone::Green),
        ]
    }
}

/// One summary tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: usize,
    pub tone: Tone,
}

impl KpiCard {
    fn new(title: &'static str, value: usize, tone: Tone) -> Self {
        Self { title, value, tone }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionSlice {
    pub name: &'static str,
    pub value: usize,
    pub tone: Tone,
}

impl DistributionSlice {
    fn new(name: &'static str, value: usize, tone: Tone) -> Self {
        Self { name, value, tone }
    }

    /// Share of `whole` in percent (0 when `whole` is 0).
    pub fn percent_of(&self, whole: usize) -> f64 {
        if whole == 0 {
            0.0
        } else {
            self.value as f64 * 100.0 / whole as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::pass_with_status;
    use proptest::prelude::*;

    #[test]
    fn counts_example_list() {
        let passes = [
            pass_with_status("GP-1", GatePassStatus::Pending),
            pass_with_status("GP-2", GatePassStatus::Pending),
            pass_with_status("GP-3", GatePassStatus::Approved),
            pass_with_status("GP-4", GatePassStatus::Rejected),
        ];
        let stats = Stats::from_passes(&passes);

        assert_eq!(stats.pending, 2);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total, 4);

        let cards = stats.kpi_cards();
        assert_eq!(cards[0].title, "Total");
        assert_eq!(cards[0].value, 4);
        assert_eq!(cards[1].value, 2);
    }

    #[test]
    fn active_slice_counts_completed() {
        let passes = [
            pass_with_status("GP-1", GatePassStatus::Completed),
            pass_with_status("GP-2", GatePassStatus::PendingReturn),
        ];
        let stats = Stats::from_passes(&passes);
        let active = stats
            .distribution()
            .into_iter()
            .find(|slice| slice.name == "Active")
            .unwrap();
        assert_eq!(active.value, 1);
        assert_eq!(active.tone.hex(), "#3b82f6");
        assert_eq!(active.percent_of(stats.total), 50.0);
    }

    proptest! {
        #[test]
        fn counts_match_per_status_filter(indices in prop::collection::vec(0usize..GatePassStatus::ALL.len(), 0..200)) {
            let passes: Vec<GatePass> = indices
                .iter()
                .enumerate()
                .map(|(i, idx)| pass_with_status(&format!("GP-{i}"), GatePassStatus::ALL[*idx]))
                .collect();
            let stats = Stats::from_passes(&passes);

            prop_assert_eq!(stats.total, passes.len());
            for status in GatePassStatus::ALL {
                let expected = passes.iter().filter(|p| p.status == status).count();
                prop_assert_eq!(stats.count(status), expected);
            }
        }
    }
}
