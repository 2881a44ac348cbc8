//! Single-day price surge scan
//!
//! Flags bars whose close rose more than a threshold fraction over the
//! previous close. Raw close-to-close change only: no smoothing and no
//! adjustment for intervening corporate actions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::bars::Bar;

use super::types::SurgeHit;

/// Scan for single-day close-over-close surges above `threshold`.
///
/// `threshold` is a fraction (0.05 = 5%). The comparison is strict: a move
/// of exactly the threshold does not fire. Fewer than two bars produce no
/// hits rather than an error.
pub fn price_surge(bars: &[Bar], threshold: Decimal) -> Vec<SurgeHit> {
    let mut hits = Vec::new();
    if bars.len() < 2 {
        return hits;
    }

    let bound = threshold * dec!(100);
    for pair in bars.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if prev.close <= Decimal::ZERO {
            continue;
        }
        let pct_change = (curr.close - prev.close) / prev.close * dec!(100);
        if pct_change > bound {
            hits.push(SurgeHit {
                date: curr.date,
                pct_change,
                close: curr.close,
            });
        }
    }
    hits
}
