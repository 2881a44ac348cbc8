//! Cross-universe aggregation
//!
//! Collects per-ticker hits into flat row lists (natural scan order:
//! ticker, then date) and four ticker hit-sets, then intersects the sets
//! to find tickers meeting all four criteria. Rows are append-only while
//! the scan runs and read-only afterwards.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::scan::TickerSignals;

/// One price surge table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurgeRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub pct_change: Decimal,
    pub close: Decimal,
    pub volume: Option<u64>,
}

/// One upward gap table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub gap_pct: Decimal,
    pub open: Decimal,
    pub volume: Option<u64>,
}

/// One continuous uptrend table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UptrendRow {
    pub ticker: String,
    pub end_date: NaiveDate,
    pub streak_days: usize,
    pub close: Decimal,
    pub volume: Option<u64>,
}

/// One volume breakout table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub pct_above_avg: Decimal,
    pub volume: u64,
    pub close: Option<Decimal>,
}

/// One row of the all-four-criteria table.
///
/// Display price and volume are looked up from the first matching surge
/// and breakout rows in scan order; either can be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedRow {
    pub ticker: String,
    pub price: Option<Decimal>,
    pub volume: Option<u64>,
}

impl CombinedRow {
    /// Quote page link for the ticker
    pub fn quote_url(&self) -> String {
        format!("https://finance.yahoo.com/quote/{}", self.ticker)
    }
}

/// Final result of a scan pass
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub surge_rows: Vec<SurgeRow>,
    pub gap_rows: Vec<GapRow>,
    pub uptrend_rows: Vec<UptrendRow>,
    pub volume_rows: Vec<VolumeRow>,
    /// Tickers meeting all four criteria, ascending by ticker
    pub combined: Vec<CombinedRow>,
    pub with_surge: BTreeSet<String>,
    pub with_gap: BTreeSet<String>,
    pub with_uptrend: BTreeSet<String>,
    pub with_breakout: BTreeSet<String>,
}

/// Accumulates evaluated tickers and materializes the combined result.
#[derive(Debug, Default)]
pub struct Aggregator {
    surge_rows: Vec<SurgeRow>,
    gap_rows: Vec<GapRow>,
    uptrend_rows: Vec<UptrendRow>,
    volume_rows: Vec<VolumeRow>,
    with_surge: BTreeSet<String>,
    with_gap: BTreeSet<String>,
    with_uptrend: BTreeSet<String>,
    with_breakout: BTreeSet<String>,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one ticker's hits
    pub fn record(&mut self, signals: &TickerSignals) {
        let ticker = &signals.ticker;

        if !signals.surges.is_empty() {
            self.with_surge.insert(ticker.clone());
        }
        for hit in &signals.surges {
            self.surge_rows.push(SurgeRow {
                ticker: ticker.clone(),
                date: hit.date,
                pct_change: hit.pct_change,
                close: hit.close,
                volume: signals.volume_on(hit.date),
            });
        }

        if !signals.gaps.is_empty() {
            self.with_gap.insert(ticker.clone());
        }
        for hit in &signals.gaps {
            self.gap_rows.push(GapRow {
                ticker: ticker.clone(),
                date: hit.date,
                gap_pct: hit.gap_pct,
                open: hit.open,
                volume: signals.volume_on(hit.date),
            });
        }

        if !signals.uptrends.is_empty() {
            self.with_uptrend.insert(ticker.clone());
        }
        for hit in &signals.uptrends {
            self.uptrend_rows.push(UptrendRow {
                ticker: ticker.clone(),
                end_date: hit.date,
                streak_days: hit.streak_days,
                close: hit.close,
                volume: signals.volume_on(hit.date),
            });
        }

        if !signals.breakouts.is_empty() {
            self.with_breakout.insert(ticker.clone());
        }
        for hit in &signals.breakouts {
            self.volume_rows.push(VolumeRow {
                ticker: ticker.clone(),
                date: hit.date,
                pct_above_avg: hit.pct_above_avg(),
                volume: hit.volume,
                close: signals.close_on(hit.date),
            });
        }
    }

    /// Intersect the four hit-sets and build the combined table.
    pub fn finish(self) -> ScanOutcome {
        let combined = self
            .with_surge
            .iter()
            .filter(|t| {
                self.with_gap.contains(*t)
                    && self.with_uptrend.contains(*t)
                    && self.with_breakout.contains(*t)
            })
            .map(|ticker| CombinedRow {
                ticker: ticker.clone(),
                price: self
                    .surge_rows
                    .iter()
                    .find(|row| &row.ticker == ticker)
                    .map(|row| row.close),
                volume: self
                    .volume_rows
                    .iter()
                    .find(|row| &row.ticker == ticker)
                    .map(|row| row.volume),
            })
            .collect();

        ScanOutcome {
            surge_rows: self.surge_rows,
            gap_rows: self.gap_rows,
            uptrend_rows: self.uptrend_rows,
            volume_rows: self.volume_rows,
            combined,
            with_surge: self.with_surge,
            with_gap: self.with_gap,
            with_uptrend: self.with_uptrend,
            with_breakout: self.with_breakout,
        }
    }
}

impl ScanOutcome {
    /// Size of the smallest individual hit-set
    pub fn smallest_hit_set(&self) -> usize {
        self.with_surge
            .len()
            .min(self.with_gap.len())
            .min(self.with_uptrend.len())
            .min(self.with_breakout.len())
    }
}
