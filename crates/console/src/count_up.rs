//! Ease-out count-up animation for KPI values.

use std::time::Duration;

/// Animates a number from 0 to `target` with a cubic ease-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUp {
    pub target: u64,
    pub duration: Duration,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// Displayed value `elapsed` after the animation started.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let eased = 1.0 - (1.0 - progress).powi(3);
        (eased * self.target as f64).floor() as u64
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// `frames + 1` evenly spaced samples, ending on the target.
    pub fn frames(&self, frames: u32) -> Vec<u64> {
        let frames = frames.max(1);
        (0..=frames)
            .map(|i| self.value_at(self.duration.mul_f64(f64::from(i) / f64::from(frames))))
            .collect()
    }
}
