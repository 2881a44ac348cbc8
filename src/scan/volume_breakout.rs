//! Volume breakout scan
//!
//! Compares each day's volume against a trailing simple moving average.
//! The average needs a full window of history, so this scan must be run
//! over the extended fetch-window series and its hits filtered to the
//! report window by the caller.

use rust_decimal::Decimal;

use crate::bars::Bar;

use super::types::VolumeHit;

/// Scan for days whose volume exceeds `avg * (1 + threshold)`, where `avg`
/// is the simple moving average of volume over the `ma_period` bars ending
/// on that day.
///
/// Hits are only possible from index `ma_period` onward; series shorter
/// than `ma_period` produce no hits.
pub fn volume_breakout(bars: &[Bar], threshold: Decimal, ma_period: usize) -> Vec<VolumeHit> {
    let mut hits = Vec::new();
    if ma_period == 0 || bars.len() < ma_period {
        return hits;
    }

    let period = Decimal::from(ma_period as u64);
    let mut window_sum: Decimal = bars[..ma_period]
        .iter()
        .map(|b| Decimal::from(b.volume))
        .sum();

    for i in ma_period..bars.len() {
        // roll the window forward so it ends on bar i
        window_sum += Decimal::from(bars[i].volume) - Decimal::from(bars[i - ma_period].volume);
        let avg = window_sum / period;
        if Decimal::from(bars[i].volume) > avg * (Decimal::ONE + threshold) {
            hits.push(VolumeHit {
                date: bars[i].date,
                volume: bars[i].volume,
                avg_volume: avg,
            });
        }
    }
    hits
}
