//! Scan run error types
//!
//! Only universe-level failures abort a run. Per-ticker fetch problems are
//! skip-and-continue conditions handled inside the orchestrator loop, and
//! a user interrupt is a successful partial completion, not an error.

use thiserror::Error;

use crate::universe::Market;

/// Errors that abort a scan run before or during universe retrieval
#[derive(Debug, Error)]
pub enum ScanError {
    /// Ticker list retrieval produced nothing to scan
    #[error("no tickers available for {0}")]
    EmptyUniverse(Market),

    /// Ticker list retrieval failed outright
    #[error("universe retrieval failed: {0}")]
    Universe(anyhow::Error),
}
