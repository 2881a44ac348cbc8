//! Per-ticker evaluation
//!
//! Runs all four scan predicates against one ticker's series and keeps the
//! hit rows plus the report-window bars, so display columns can be looked
//! up by date later without re-fetching.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::bars::{Bar, BarSeries, ScanWindow};
use crate::config::CriteriaConfig;

use super::types::{GapHit, SurgeHit, UptrendHit, VolumeHit};
use super::{continuous_uptrend, price_surge, upward_gap, volume_breakout};

/// The hits one ticker produced inside the report window.
#[derive(Debug, Clone)]
pub struct TickerSignals {
    /// Ticker the hits belong to
    pub ticker: String,
    /// Price surge hits
    pub surges: Vec<SurgeHit>,
    /// Upward gap hits
    pub gaps: Vec<GapHit>,
    /// Continuous uptrend hits
    pub uptrends: Vec<UptrendHit>,
    /// Volume breakout hits, already filtered to the report window
    pub breakouts: Vec<VolumeHit>,
    report_bars: Vec<Bar>,
}

impl TickerSignals {
    /// Volume on `date` within the report window, if a bar exists there
    pub fn volume_on(&self, date: NaiveDate) -> Option<u64> {
        self.report_bars
            .iter()
            .find(|b| b.date == date)
            .map(|b| b.volume)
    }

    /// Close on `date` within the report window, if a bar exists there
    pub fn close_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.report_bars
            .iter()
            .find(|b| b.date == date)
            .map(|b| b.close)
    }

    /// Whether any predicate fired at all
    pub fn any(&self) -> bool {
        !self.surges.is_empty()
            || !self.gaps.is_empty()
            || !self.uptrends.is_empty()
            || !self.breakouts.is_empty()
    }
}

/// Evaluate all four predicates for one ticker.
///
/// The surge, gap and uptrend scans see only bars inside the report
/// window. The volume breakout scan sees the full fetch-window series so
/// its moving average has a complete lookback, and its hits are then
/// filtered back to report-window dates.
pub fn evaluate(series: &BarSeries, window: &ScanWindow, criteria: &CriteriaConfig) -> TickerSignals {
    let report_bars = series.clipped(window.report_start, window.end);

    let surges = price_surge(&report_bars, criteria.surge_threshold);
    let gaps = upward_gap(&report_bars, criteria.gap_threshold);
    let uptrends = continuous_uptrend(&report_bars, criteria.uptrend_min_days);

    let mut breakouts = volume_breakout(
        &series.bars,
        criteria.volume_threshold,
        criteria.volume_ma_period,
    );
    breakouts.retain(|hit| window.in_report(hit.date));

    TickerSignals {
        ticker: series.ticker.clone(),
        surges,
        gaps,
        uptrends,
        breakouts,
        report_bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    fn flat_bar(n: i64, volume: u64) -> Bar {
        Bar {
            date: day(n),
            open: dec!(100),
            high: dec!(100),
            low: dec!(100),
            close: dec!(100),
            volume,
        }
    }

    fn criteria() -> CriteriaConfig {
        CriteriaConfig {
            surge_threshold: dec!(0.05),
            gap_threshold: dec!(0.01),
            uptrend_min_days: 4,
            volume_ma_period: 10,
            volume_threshold: dec!(0.10),
        }
    }

    #[test]
    fn test_short_lookback_scans_see_only_report_window() {
        // a surge before the report window must not appear in the results
        let mut bars: Vec<Bar> = (0..20).map(|n| flat_bar(n, 1_000_000)).collect();
        bars[5].close = dec!(120); // +20% on day 5, outside the window
        bars[6].close = dec!(100); // back down so nothing else fires
        let series = BarSeries::new("AAPL", bars);
        let window = ScanWindow {
            fetch_start: day(0),
            report_start: day(10),
            end: day(19),
        };

        let signals = evaluate(&series, &window, &criteria());
        assert!(signals.surges.is_empty());
        assert!(!signals.any());
    }

    #[test]
    fn test_volume_scan_uses_full_history_then_filters() {
        // the moving average only has a full window thanks to buffer bars,
        // and the early breakout outside the report window is dropped
        let mut volumes = vec![1_000_000u64; 20];
        volumes[12] = 2_000_000; // inside report window
        volumes[11] = 2_000_000; // one bar earlier, still inside
        let bars: Vec<Bar> = volumes
            .iter()
            .enumerate()
            .map(|(n, v)| flat_bar(n as i64, *v))
            .collect();
        let series = BarSeries::new("AAPL", bars);
        let window = ScanWindow {
            fetch_start: day(0),
            report_start: day(11),
            end: day(19),
        };

        let signals = evaluate(&series, &window, &criteria());
        assert_eq!(signals.breakouts.len(), 2);
        assert!(signals.breakouts.iter().all(|h| window.in_report(h.date)));

        // the report-window slice alone is too short for the average
        let clipped = BarSeries::new("AAPL", series.clipped(day(11), day(19)));
        let direct = evaluate(&clipped, &window, &criteria());
        assert!(direct.breakouts.is_empty());
    }

    #[test]
    fn test_display_lookups_restricted_to_report_window() {
        let bars: Vec<Bar> = (0..20).map(|n| flat_bar(n, 500 + n as u64)).collect();
        let series = BarSeries::new("AAPL", bars);
        let window = ScanWindow {
            fetch_start: day(0),
            report_start: day(10),
            end: day(19),
        };

        let signals = evaluate(&series, &window, &criteria());
        assert_eq!(signals.volume_on(day(12)), Some(512));
        assert_eq!(signals.close_on(day(12)), Some(dec!(100)));
        assert_eq!(signals.volume_on(day(5)), None);
        assert_eq!(signals.close_on(day(25)), None);
    }
}
