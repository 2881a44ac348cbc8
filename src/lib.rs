//! tickerscan: technical signal scanner for U.S.-listed equities
//!
//! This library provides the core components for:
//! - Daily OHLCV bar series with fetch/report window handling
//! - Four independent scan predicates: price surge, upward gap,
//!   continuous uptrend, volume breakout
//! - Per-ticker evaluation and cross-universe aggregation
//! - Ticker universe retrieval from exchange listing directories
//! - Historical data fetching from the Yahoo Finance chart API
//! - Result tables with terminal rendering and CSV export
//! - Sequential scan orchestration with cooperative cancellation

pub mod aggregate;
pub mod bars;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod report;
pub mod scan;
pub mod scanner;
pub mod telemetry;
pub mod universe;
