//! Historical bar retrieval

mod yahoo;

pub use yahoo::{ChartClient, ChartConfig, CHART_API_URL};

use async_trait::async_trait;

use crate::bars::{BarSeries, ScanWindow};

/// Source of daily bars for one ticker at a time.
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Daily bars covering the fetch window.
    ///
    /// `Ok(None)` means the source has no usable data for this ticker.
    /// Callers treat both `Ok(None)` and `Err` as skip conditions for that
    /// ticker; neither aborts a scan.
    async fn daily_bars(&self, ticker: &str, window: &ScanWindow)
        -> anyhow::Result<Option<BarSeries>>;
}
