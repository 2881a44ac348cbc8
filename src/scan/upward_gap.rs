//! Opening gap-up scan
//!
//! Flags bars that opened above the previous close by more than a
//! threshold fraction.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::bars::Bar;

use super::types::GapHit;

/// Scan for opens strictly above `prev_close * (1 + threshold)`.
///
/// `threshold` is a fraction (0.01 = 1%). Fewer than two bars produce no
/// hits.
pub fn upward_gap(bars: &[Bar], threshold: Decimal) -> Vec<GapHit> {
    let mut hits = Vec::new();
    if bars.len() < 2 {
        return hits;
    }

    for pair in bars.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if prev.close <= Decimal::ZERO {
            continue;
        }
        if curr.open > prev.close * (Decimal::ONE + threshold) {
            let gap_pct = (curr.open - prev.close) / prev.close * dec!(100);
            hits.push(GapHit {
                date: curr.date,
                gap_pct,
                open: curr.open,
            });
        }
    }
    hits
}
