//! Trailing 14-day creation histogram.

use chrono::{Days, NaiveDate, TimeZone};

use gatepass_core::GatePass;

/// Number of calendar days in the trend window (today included).
pub const TREND_DAYS: u64 = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Axis label, e.g. `Mar 5`.
    pub label: String,
    pub count: usize,
}

/// Bucket passes by the calendar day (in `tz`) of `created_at`.
///
/// Returns exactly [`TREND_DAYS`] consecutive days ending on `today`. A pass
/// created on one of those days lands in exactly one bucket; older or future
/// passes land in none.
pub fn daily_trend<'a, Tz: TimeZone>(
    passes: impl IntoIterator<Item = &'a GatePass>,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<TrendPoint> {
    let start = today
        .checked_sub_days(Days::new(TREND_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);

    let mut points: Vec<TrendPoint> = start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|date| TrendPoint {
            date,
            label: date.format("%b %-d").to_string(),
            count: 0,
        })
        .collect();

    for pass in passes {
        let day = pass.created_at.with_timezone(tz).date_naive();
        if day < start || day > today {
            continue;
        }
        let idx = (day - start).num_days() as usize;
        if let Some(point) = points.get_mut(idx) {
            point.count += 1;
        }
    }

    points
}
