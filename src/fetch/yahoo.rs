//! Yahoo Finance chart API client
//!
//! Fetches daily OHLCV history from the v8 chart endpoint. Timestamps come
//! back as epoch seconds with the exchange's UTC offset in the metadata;
//! bars are converted to exchange-local calendar dates at the parse edge so
//! all later window comparisons are plain date comparisons.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveTime, Offset, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::bars::{Bar, BarSeries, ScanWindow};

use super::BarProvider;

/// Chart API base URL
pub const CHART_API_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = concat!("tickerscan/", env!("CARGO_PKG_VERSION"));

/// Configuration for the chart client
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: CHART_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Yahoo Finance chart API
pub struct ChartClient {
    config: ChartConfig,
    client: Client,
}

impl ChartClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self::with_config(ChartConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ChartConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for ChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BarProvider for ChartClient {
    async fn daily_bars(
        &self,
        ticker: &str,
        window: &ScanWindow,
    ) -> anyhow::Result<Option<BarSeries>> {
        let url = format!("{}/v8/finance/chart/{}", self.config.base_url, ticker);
        let period1 = window.fetch_start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // chart API treats period2 as exclusive, push it one day past the end
        let period2 = (window.end + chrono::Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        tracing::debug!(%ticker, url = %url, "fetching daily bars");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "div,split".to_string()),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("chart API error: {} - {}", status, body);
        }

        let payload: ChartResponse = response.json().await?;
        let Some(result) = payload
            .chart
            .result
            .and_then(|results| results.into_iter().next())
        else {
            return Ok(None);
        };

        let bars = convert_bars(result);
        if bars.is_empty() {
            return Ok(None);
        }
        Ok(Some(BarSeries::new(ticker, bars)))
    }
}

/// Chart API response envelope
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange UTC offset in seconds
    #[serde(default)]
    gmtoffset: i32,
    #[serde(rename = "exchangeTimezoneName")]
    #[allow(dead_code)]
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

fn field(series: &Option<Vec<Option<f64>>>, index: usize) -> Option<f64> {
    series.as_ref()?.get(index).copied().flatten()
}

fn price(value: f64) -> Option<Decimal> {
    let price = Decimal::from_f64_retain(value)?.round_dp(4);
    (price > Decimal::ZERO).then_some(price)
}

/// Flatten the parallel chart arrays into bars, dropping rows with missing
/// fields and converting timestamps to exchange-local dates.
fn convert_bars(result: ChartResult) -> Vec<Bar> {
    let offset =
        FixedOffset::east_opt(result.meta.gmtoffset).unwrap_or_else(|| Utc.fix());
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let Some(moment) = DateTime::from_timestamp(*ts, 0) else {
            continue;
        };
        let date = moment.with_timezone(&offset).date_naive();
        // intraday rows for the current session can repeat the last date
        if bars.last().is_some_and(|prev| prev.date >= date) {
            continue;
        }

        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            field(&quote.open, i),
            field(&quote.high, i),
            field(&quote.low, i),
            field(&quote.close, i),
            field(&quote.volume, i),
        ) else {
            continue;
        };
        let (Some(open), Some(high), Some(low), Some(close)) =
            (price(open), price(high), price(low), price(close))
        else {
            continue;
        };

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume: volume.max(0.0) as u64,
        });
    }
    bars
}
