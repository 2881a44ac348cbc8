//! Continuous uptrend scan
//!
//! Tracks a running streak of strictly higher closes. Every day on which
//! the streak is at or past the minimum emits its own hit, so a long run
//! is reported day by day rather than once at its start. The streak
//! counter starts at the first bar of whatever slice is passed in; history
//! before the slice does not contribute.

use crate::bars::Bar;

use super::types::UptrendHit;

/// Scan for runs of `min_days` or more consecutive higher closes.
///
/// Fewer than `min_days` bars produce no hits.
pub fn continuous_uptrend(bars: &[Bar], min_days: usize) -> Vec<UptrendHit> {
    let mut hits = Vec::new();
    if bars.len() < min_days {
        return hits;
    }

    let mut streak = 1usize;
    for i in 1..bars.len() {
        if bars[i].close > bars[i - 1].close {
            streak += 1;
            if streak >= min_days {
                hits.push(UptrendHit {
                    date: bars[i].date,
                    streak_days: streak,
                    close: bars[i].close,
                });
            }
        } else {
            streak = 1;
        }
    }
    hits
}
