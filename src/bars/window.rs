//! Scan window arithmetic
//!
//! A scan operates over two nested date ranges: the report window the user
//! asked for, and the fetch window that extends further back so the volume
//! moving average has a full lookback of history. Hits are only ever shown
//! for dates inside the report window.

use chrono::{Duration, NaiveDate};

/// Date ranges for one scan run.
///
/// `fetch_start <= report_start <= end`. Predicates with no deep lookback
/// run on bars clipped to `[report_start, end]`; the volume breakout scan
/// runs on the full `[fetch_start, end]` series and its hits are filtered
/// back to the report window afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    /// Start of the extended history fetch
    pub fetch_start: NaiveDate,
    /// Start of the user-visible report range
    pub report_start: NaiveDate,
    /// Last day of both windows (the as-of date)
    pub end: NaiveDate,
}

impl ScanWindow {
    /// Anchor a window at `end`, reporting over the last `report_days`
    /// calendar days with `buffer_days` of extra history in front.
    pub fn anchored(end: NaiveDate, report_days: u32, buffer_days: u32) -> Self {
        let report_start = end - Duration::days(i64::from(report_days));
        let fetch_start = report_start - Duration::days(i64::from(buffer_days));
        Self {
            fetch_start,
            report_start,
            end,
        }
    }

    /// Whether `date` falls inside the report window
    pub fn in_report(&self, date: NaiveDate) -> bool {
        date >= self.report_start && date <= self.end
    }
}
