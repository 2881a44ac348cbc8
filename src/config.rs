//! Configuration types for tickerscan

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::telemetry::LogFormat;
use crate::universe::Market;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub criteria: CriteriaConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Scan window and universe selection
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Trading days in the report window (5-60)
    #[serde(default = "default_scan_days")]
    pub days: u32,

    /// Universe to scan
    #[serde(default = "default_market")]
    pub market: Market,

    /// Calendar days of extra history in front of the report window, sized
    /// so the volume moving average has a full lookback of trading days
    #[serde(default = "default_buffer_days")]
    pub buffer_days: u32,

    /// Optional first-letter ticker filter, e.g. "A-C"
    #[serde(default)]
    pub alpha_range: Option<crate::universe::AlphaRange>,
}

fn default_scan_days() -> u32 {
    20
}
fn default_market() -> Market {
    Market::Sp500
}
fn default_buffer_days() -> u32 {
    80
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            days: 20,
            market: Market::Sp500,
            buffer_days: 80,
            alpha_range: None,
        }
    }
}

/// Thresholds and periods for the four scan criteria
#[derive(Debug, Clone, Deserialize)]
pub struct CriteriaConfig {
    /// Minimum single-day close-over-close change as a fraction
    #[serde(default = "default_surge_threshold")]
    pub surge_threshold: Decimal,

    /// Minimum open-over-previous-close gap as a fraction
    #[serde(default = "default_gap_threshold")]
    pub gap_threshold: Decimal,

    /// Minimum consecutive higher closes
    #[serde(default = "default_uptrend_min_days")]
    pub uptrend_min_days: usize,

    /// Minimum volume above its moving average as a fraction
    #[serde(default = "default_volume_threshold")]
    pub volume_threshold: Decimal,

    /// Volume moving average period in trading days
    #[serde(default = "default_volume_ma_period")]
    pub volume_ma_period: usize,
}

fn default_surge_threshold() -> Decimal {
    Decimal::new(5, 2) // 0.05 = 5%
}
fn default_gap_threshold() -> Decimal {
    Decimal::new(1, 2) // 0.01 = 1%
}
fn default_uptrend_min_days() -> usize {
    4
}
fn default_volume_threshold() -> Decimal {
    Decimal::new(10, 2) // 0.10 = 10%
}
fn default_volume_ma_period() -> usize {
    50
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            surge_threshold: Decimal::new(5, 2),
            gap_threshold: Decimal::new(1, 2),
            uptrend_min_days: 4,
            volume_threshold: Decimal::new(10, 2),
            volume_ma_period: 50,
        }
    }
}

/// Historical data fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Chart API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay between per-ticker fetches, purely to avoid upstream
    /// rate limiting
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Tickers with fewer bars than this in the fetch window are skipped
    #[serde(default = "default_min_bars")]
    pub min_bars: usize,
}

fn default_base_url() -> String {
    crate::fetch::CHART_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_throttle_ms() -> u64 {
    100
}
fn default_min_bars() -> usize {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: crate::fetch::CHART_API_URL.to_string(),
            timeout_secs: 10,
            throttle_ms: 100,
            min_bars: 10,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [scan]
            days = 30
            market = "nasdaq"
            buffer_days = 90
            alpha_range = "A-C"

            [criteria]
            surge_threshold = 0.07
            gap_threshold = 0.02
            uptrend_min_days = 5
            volume_threshold = 0.15
            volume_ma_period = 30

            [fetch]
            base_url = "https://chart.example.com"
            timeout_secs = 5
            throttle_ms = 250
            min_bars = 20

            [telemetry]
            log_level = "debug"
            log_format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scan.days, 30);
        assert_eq!(config.scan.market, Market::Nasdaq);
        assert!(config.scan.alpha_range.is_some());
        assert_eq!(config.criteria.surge_threshold, dec!(0.07));
        assert_eq!(config.criteria.uptrend_min_days, 5);
        assert_eq!(config.fetch.base_url, "https://chart.example.com");
        assert_eq!(config.fetch.throttle_ms, 250);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scan.days, 20);
        assert_eq!(config.scan.market, Market::Sp500);
        assert_eq!(config.scan.buffer_days, 80);
        assert!(config.scan.alpha_range.is_none());
        assert_eq!(config.criteria.surge_threshold, dec!(0.05));
        assert_eq!(config.criteria.gap_threshold, dec!(0.01));
        assert_eq!(config.criteria.uptrend_min_days, 4);
        assert_eq!(config.criteria.volume_threshold, dec!(0.10));
        assert_eq!(config.criteria.volume_ma_period, 50);
        assert_eq!(config.fetch.min_bars, 10);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_partial_section_fills_missing_fields() {
        let toml = r#"
            [criteria]
            uptrend_min_days = 6
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.criteria.uptrend_min_days, 6);
        assert_eq!(config.criteria.surge_threshold, dec!(0.05));
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
        assert_eq!(config.scan.days, 20);
        assert_eq!(config.criteria.volume_ma_period, 50);
    }
}
