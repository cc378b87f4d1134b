//! Client-side "load more" pagination over an in-memory list.

/// A growing window over an already-fetched, already-filtered list.
///
/// Nothing is requested from the server: the window only decides how many
/// rows of the list are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    initial: usize,
    step: usize,
    window: usize,
}

impl Pager {
    pub fn new(initial: usize, step: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            step: step.max(1),
            window: initial,
        }
    }

    /// Number of rows shown for a list of `total` rows.
    pub fn visible(&self, total: usize) -> usize {
        total.min(self.window)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible(total) < total
    }

    pub fn remaining(&self, total: usize) -> usize {
        total - self.visible(total)
    }

    /// Size of the batch the next `load_more` would reveal.
    pub fn next_batch(&self, total: usize) -> usize {
        self.step.min(self.remaining(total))
    }

    /// Reveal the next batch; returns the new visible count.
    pub fn load_more(&mut self, total: usize) -> usize {
        if !self.has_more(total) {
            return self.visible(total);
        }
        self.window = (self.visible(total) + self.step).min(total);
        self.visible(total)
    }

    /// Back to the first page (after any filter change).
    pub fn reset(&mut self) {
        self.window = self.initial;
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible(items.len())]
    }
}
