//! Scan hit records
//!
//! Each predicate returns an ordered vector of hit records, one per bar on
//! which its condition held. Hits carry the metric that fired and the
//! reference price or volume for display; the ticker is attached later when
//! rows are aggregated across the universe.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A single-day close-over-close surge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurgeHit {
    /// Day the surge completed
    pub date: NaiveDate,
    /// Close-over-close change in percent (6.5 = +6.5%)
    pub pct_change: Decimal,
    /// Closing price on the surge day
    pub close: Decimal,
}

/// An opening gap above the previous close
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapHit {
    /// Day that opened with the gap
    pub date: NaiveDate,
    /// Gap over the previous close in percent
    pub gap_pct: Decimal,
    /// Opening price on the gap day
    pub open: Decimal,
}

/// A day on which a close-over-close streak met the minimum length.
///
/// Streaks report every qualifying day, so a six-day run with a four-day
/// minimum produces three hits with streak lengths 4, 5 and 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UptrendHit {
    /// Last day of the streak so far
    pub date: NaiveDate,
    /// Consecutive higher closes ending on `date`
    pub streak_days: usize,
    /// Closing price on `date`
    pub close: Decimal,
}

/// A day whose volume broke out above its trailing moving average
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeHit {
    /// Day of the breakout
    pub date: NaiveDate,
    /// Shares traded that day
    pub volume: u64,
    /// Trailing simple moving average of volume, window ending on `date`
    pub avg_volume: Decimal,
}

impl VolumeHit {
    /// How far volume sits above its average, in percent
    pub fn pct_above_avg(&self) -> Decimal {
        if self.avg_volume.is_zero() {
            return Decimal::ZERO;
        }
        (Decimal::from(self.volume) - self.avg_volume) / self.avg_volume * dec!(100)
    }
}
