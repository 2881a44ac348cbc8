//! End-to-end scan tests with in-memory providers

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tickerscan::bars::{Bar, BarSeries, ScanWindow};
use tickerscan::cancel::CancelToken;
use tickerscan::config::CriteriaConfig;
use tickerscan::error::ScanError;
use tickerscan::fetch::BarProvider;
use tickerscan::scanner::{run_scan, ScanPlan};
use tickerscan::universe::{Market, UniverseProvider};

struct StaticUniverse(Vec<String>);

#[async_trait]
impl UniverseProvider for StaticUniverse {
    async fn tickers(&self, _market: Market) -> anyhow::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

struct FailingUniverse;

#[async_trait]
impl UniverseProvider for FailingUniverse {
    async fn tickers(&self, _market: Market) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("listing service down")
    }
}

struct StaticBars(HashMap<String, BarSeries>);

#[async_trait]
impl BarProvider for StaticBars {
    async fn daily_bars(
        &self,
        ticker: &str,
        _window: &ScanWindow,
    ) -> anyhow::Result<Option<BarSeries>> {
        Ok(self.0.get(ticker).cloned())
    }
}

fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(n)
}

fn plan() -> ScanPlan {
    ScanPlan {
        market: Market::Nasdaq,
        alpha: None,
        window: ScanWindow {
            fetch_start: day(0),
            report_start: day(52),
            end: day(57),
        },
        criteria: CriteriaConfig::default(),
        throttle: Duration::ZERO,
        min_bars: 10,
    }
}

/// 58 flat bars, then a finish that trips every one of the four criteria
/// inside the report window.
fn all_four_series(ticker: &str) -> BarSeries {
    let mut closes: Vec<Decimal> = vec![dec!(100); 53];
    closes.extend([dec!(103), dec!(110), dec!(111), dec!(112), dec!(113)]);

    let bars: Vec<Bar> = closes
        .iter()
        .enumerate()
        .map(|(n, close)| {
            let close = *close;
            let prev = if n == 0 { close } else { closes[n - 1] };
            // day 55 opens 2.27% above the prior close
            let open = if n == 55 { dec!(112.5) } else { prev };
            Bar {
                date: day(n as i64),
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: if n >= 53 { 2_000_000 } else { 1_000_000 },
            }
        })
        .collect();
    BarSeries::new(ticker, bars)
}

fn flat_series(ticker: &str, len: usize) -> BarSeries {
    let bars = (0..len)
        .map(|n| Bar {
            date: day(n as i64),
            open: dec!(100),
            high: dec!(100),
            low: dec!(100),
            close: dec!(100),
            volume: 1_000_000,
        })
        .collect();
    BarSeries::new(ticker, bars)
}

fn fixture_bars() -> StaticBars {
    let mut data = HashMap::new();
    data.insert("ALLW".to_string(), all_four_series("ALLW"));
    data.insert("NOPE".to_string(), flat_series("NOPE", 58));
    data.insert("SHRT".to_string(), flat_series("SHRT", 5));
    StaticBars(data)
}

#[tokio::test]
async fn test_full_scan_finds_all_four_ticker() {
    let universe = StaticUniverse(vec![
        "ALLW".to_string(),
        "NOPE".to_string(),
        "SHRT".to_string(),
    ]);
    let bars = fixture_bars();
    let report = run_scan(&universe, &bars, &plan(), &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(report.requested, 3);
    assert_eq!(report.completed, 2);
    assert_eq!(report.skipped, 1); // SHRT has too little history
    assert!(!report.interrupted);

    let outcome = &report.outcome;
    assert_eq!(outcome.with_surge.len(), 1);
    assert_eq!(outcome.with_gap.len(), 1);
    assert_eq!(outcome.with_uptrend.len(), 1);
    assert_eq!(outcome.with_breakout.len(), 1);

    assert_eq!(outcome.combined.len(), 1);
    let row = &outcome.combined[0];
    assert_eq!(row.ticker, "ALLW");
    // first surge row in scan order carries the display price
    assert_eq!(row.price, Some(dec!(110)));
    assert_eq!(row.volume, Some(2_000_000));

    // combined can never exceed the smallest individual hit-set
    assert!(outcome.combined.len() <= outcome.smallest_hit_set());

    // every reported hit lies inside the report window
    assert!(outcome.surge_rows.iter().all(|r| r.date >= day(52)));
    assert!(outcome.volume_rows.iter().all(|r| r.date >= day(52)));
}

#[tokio::test]
async fn test_uptrend_hits_reported_day_by_day() {
    let universe = StaticUniverse(vec!["ALLW".to_string()]);
    let report = run_scan(&universe, &fixture_bars(), &plan(), &CancelToken::new())
        .await
        .unwrap();

    let streaks: Vec<usize> = report
        .outcome
        .uptrend_rows
        .iter()
        .map(|r| r.streak_days)
        .collect();
    assert_eq!(streaks, vec![4, 5, 6]);
}

#[tokio::test]
async fn test_cancellation_yields_partial_report() {
    let universe = StaticUniverse(vec!["ALLW".to_string(), "NOPE".to_string()]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = run_scan(&universe, &fixture_bars(), &plan(), &cancel)
        .await
        .unwrap();

    assert!(report.interrupted);
    assert_eq!(report.completed, 0);
    assert!(report.outcome.combined.is_empty());
}

#[tokio::test]
async fn test_empty_universe_aborts_run() {
    let universe = StaticUniverse(Vec::new());
    let result = run_scan(&universe, &fixture_bars(), &plan(), &CancelToken::new()).await;
    assert!(matches!(result, Err(ScanError::EmptyUniverse(_))));
}

#[tokio::test]
async fn test_universe_failure_aborts_run() {
    let result = run_scan(
        &FailingUniverse,
        &fixture_bars(),
        &plan(),
        &CancelToken::new(),
    )
    .await;
    assert!(matches!(result, Err(ScanError::Universe(_))));
}

#[tokio::test]
async fn test_alpha_filter_narrows_universe() {
    let universe = StaticUniverse(
        ["AAPL", "DOW", "EBAY", "FORD", "GOOG", "ZOOM"]
            .iter()
            .map(|t| t.to_string())
            .collect(),
    );
    let mut plan = plan();
    plan.alpha = Some("D-F".parse().unwrap());

    let report = run_scan(&universe, &StaticBars(HashMap::new()), &plan, &CancelToken::new())
        .await
        .unwrap();

    // DOW, EBAY and FORD survive the filter; none have data
    assert_eq!(report.requested, 3);
    assert_eq!(report.completed, 0);
    assert_eq!(report.skipped, 3);
}
