//! Daily bar types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day's open/high/low/close/volume for a ticker.
///
/// Dates are exchange-local calendar dates. Prices are positive; rows with
/// missing or non-positive prices are dropped at the fetch edge, so the
/// scan predicates can treat every bar as well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Exchange-local calendar date
    pub date: NaiveDate,
    /// Opening price
    pub open: Decimal,
    /// Highest price of the day
    pub high: Decimal,
    /// Lowest price of the day
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Shares traded
    pub volume: u64,
}

/// Ordered daily bars for one ticker, strictly increasing by date.
///
/// Non-trading days are simply absent; no gap filling is performed and the
/// series is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSeries {
    /// Ticker symbol the bars belong to
    pub ticker: String,
    /// Bars in ascending date order
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Create a series from bars already in ascending date order
    pub fn new(ticker: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    /// Number of bars in the series
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars whose date falls in `[start, end]`
    pub fn clipped(&self, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
        self.bars
            .iter()
            .filter(|b| b.date >= start && b.date <= end)
            .cloned()
            .collect()
    }
}
