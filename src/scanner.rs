//! Scan orchestration
//!
//! Walks the ticker universe sequentially: fetch one ticker's history,
//! evaluate it, feed the aggregator, then move on. A cancellation token is
//! polled once per ticker; a throttle delay between fetches keeps the data
//! source happy. Per-ticker problems are logged and skipped, so a single
//! bad symbol never takes down a run.

use std::time::Duration;

use uuid::Uuid;

use crate::aggregate::{Aggregator, ScanOutcome};
use crate::bars::ScanWindow;
use crate::cancel::CancelToken;
use crate::config::CriteriaConfig;
use crate::error::ScanError;
use crate::fetch::BarProvider;
use crate::scan::evaluate;
use crate::universe::{AlphaRange, Market, UniverseProvider};

/// Everything one scan run needs to know.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    /// Universe to scan
    pub market: Market,
    /// Optional first-letter filter applied after retrieval
    pub alpha: Option<AlphaRange>,
    /// Fetch and report date ranges
    pub window: ScanWindow,
    /// Predicate thresholds and periods
    pub criteria: CriteriaConfig,
    /// Delay between per-ticker fetches
    pub throttle: Duration,
    /// Minimum bars in the fetch window for a ticker to be evaluated
    pub min_bars: usize,
}

/// Result of one scan run, partial if interrupted.
#[derive(Debug)]
pub struct ScanReport {
    /// Identifier for this run, carried in logs and exports
    pub run_id: Uuid,
    pub market: Market,
    pub window: ScanWindow,
    /// Tickers in the universe after filtering
    pub requested: usize,
    /// Tickers fetched and evaluated
    pub completed: usize,
    /// Tickers dropped for missing or insufficient data
    pub skipped: usize,
    /// Whether cancellation cut the run short
    pub interrupted: bool,
    pub outcome: ScanOutcome,
}

/// Scan the universe and aggregate hits across all four criteria.
///
/// Universe retrieval failures and an empty universe abort the run; after
/// that point every error is per-ticker and the run always produces a
/// report. Cancellation is observed between tickers and yields a partial
/// report flagged `interrupted`.
pub async fn run_scan(
    universe: &dyn UniverseProvider,
    bars: &dyn BarProvider,
    plan: &ScanPlan,
    cancel: &CancelToken,
) -> Result<ScanReport, ScanError> {
    let run_id = Uuid::new_v4();

    let mut tickers = universe
        .tickers(plan.market)
        .await
        .map_err(ScanError::Universe)?;
    if tickers.is_empty() {
        return Err(ScanError::EmptyUniverse(plan.market));
    }

    if let Some(range) = &plan.alpha {
        let before = tickers.len();
        tickers.retain(|t| range.matches(t));
        tracing::info!(
            range = %range,
            before,
            after = tickers.len(),
            "alphabetical filter applied"
        );
    }

    tracing::info!(
        run_id = %run_id,
        market = %plan.market,
        tickers = tickers.len(),
        report_start = %plan.window.report_start,
        end = %plan.window.end,
        "starting scan"
    );

    let mut aggregator = Aggregator::new();
    let mut completed = 0usize;
    let mut skipped = 0usize;
    let mut interrupted = false;

    for (i, ticker) in tickers.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!(
                run_id = %run_id,
                processed = i,
                total = tickers.len(),
                "scan interrupted, reporting partial results"
            );
            interrupted = true;
            break;
        }

        let series = match bars.daily_bars(ticker, &plan.window).await {
            Ok(Some(series)) if series.len() >= plan.min_bars => series,
            Ok(Some(series)) => {
                tracing::debug!(%ticker, bars = series.len(), "insufficient history, skipping");
                skipped += 1;
                continue;
            }
            Ok(None) => {
                tracing::debug!(%ticker, "no data, skipping");
                skipped += 1;
                continue;
            }
            Err(error) => {
                tracing::debug!(%ticker, %error, "fetch failed, skipping");
                skipped += 1;
                continue;
            }
        };

        let signals = evaluate(&series, &plan.window, &plan.criteria);
        if signals.any() {
            tracing::debug!(
                %ticker,
                surges = signals.surges.len(),
                gaps = signals.gaps.len(),
                uptrends = signals.uptrends.len(),
                breakouts = signals.breakouts.len(),
                "signals found"
            );
        }
        aggregator.record(&signals);
        completed += 1;

        if !plan.throttle.is_zero() && i + 1 < tickers.len() {
            tokio::time::sleep(plan.throttle).await;
        }
    }

    let outcome = aggregator.finish();
    tracing::info!(
        run_id = %run_id,
        completed,
        skipped,
        interrupted,
        all_four = outcome.combined.len(),
        "scan finished"
    );

    Ok(ScanReport {
        run_id,
        market: plan.market,
        window: plan.window,
        requested: tickers.len(),
        completed,
        skipped,
        interrupted,
        outcome,
    })
}
