//! Ticker universe selection
//!
//! A universe provider maps a market token to an ordered set of ticker
//! symbols. Retrieval can legitimately come back empty (no free source,
//! upstream outage); the orchestrator decides what that means for the run.

mod directory;

pub use directory::{DirectoryClient, DirectoryConfig};

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Market universe token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// S&P 500 constituents
    Sp500,
    /// All NASDAQ-listed stocks
    Nasdaq,
    /// NYSE and other non-NASDAQ listings
    Nyse,
    /// Curated list of major AMEX-listed ETFs
    Amex,
    /// Russell 2000 (no free comprehensive source)
    Russell2000,
    /// Dow Jones Industrial Average membership
    Dow30,
    /// Union of all US exchange listings
    #[serde(rename = "all")]
    #[value(name = "all")]
    AllUs,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Market::Sp500 => "S&P 500",
            Market::Nasdaq => "NASDAQ",
            Market::Nyse => "NYSE",
            Market::Amex => "AMEX",
            Market::Russell2000 => "Russell 2000",
            Market::Dow30 => "Dow 30",
            Market::AllUs => "All US Markets",
        };
        write!(f, "{}", name)
    }
}

/// Inclusive first-letter range filter, parsed from strings like "A-C".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaRange {
    start: char,
    end: char,
}

/// Error parsing an [`AlphaRange`]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected a letter range like A-C")]
pub struct AlphaRangeParseError;

impl AlphaRange {
    /// Build a range from two uppercase letters, start at or before end
    pub fn new(start: char, end: char) -> Result<Self, AlphaRangeParseError> {
        if start.is_ascii_uppercase() && end.is_ascii_uppercase() && start <= end {
            Ok(Self { start, end })
        } else {
            Err(AlphaRangeParseError)
        }
    }

    /// Whether `ticker` starts with a letter inside the range
    pub fn matches(&self, ticker: &str) -> bool {
        ticker
            .chars()
            .next()
            .map(|c| {
                let c = c.to_ascii_uppercase();
                c >= self.start && c <= self.end
            })
            .unwrap_or(false)
    }
}

impl FromStr for AlphaRange {
    type Err = AlphaRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AlphaRangeParseError);
        };
        let (start, end) = (start.trim(), end.trim());
        if start.chars().count() != 1 || end.chars().count() != 1 {
            return Err(AlphaRangeParseError);
        }
        let start = start.chars().next().ok_or(AlphaRangeParseError)?;
        let end = end.chars().next().ok_or(AlphaRangeParseError)?;
        Self::new(start.to_ascii_uppercase(), end.to_ascii_uppercase())
    }
}

impl fmt::Display for AlphaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl<'de> Deserialize<'de> for AlphaRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of ticker symbols for a market.
#[async_trait]
pub trait UniverseProvider: Send + Sync {
    /// Ordered, deduplicated tickers for `market`. An empty result is a
    /// valid answer, not an error.
    async fn tickers(&self, market: Market) -> anyhow::Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_display() {
        assert_eq!(Market::Sp500.to_string(), "S&P 500");
        assert_eq!(Market::AllUs.to_string(), "All US Markets");
    }

    #[test]
    fn test_market_deserialize() {
        let market: Market = serde_json::from_str("\"sp500\"").unwrap();
        assert_eq!(market, Market::Sp500);
        let market: Market = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(market, Market::AllUs);
        let market: Market = serde_json::from_str("\"dow30\"").unwrap();
        assert_eq!(market, Market::Dow30);
    }

    #[test]
    fn test_alpha_range_parse() {
        let range: AlphaRange = "A-C".parse().unwrap();
        assert_eq!(range.to_string(), "A-C");
        let range: AlphaRange = "d-f".parse().unwrap();
        assert_eq!(range.to_string(), "D-F");
    }

    #[test]
    fn test_alpha_range_parse_rejects_garbage() {
        assert!("".parse::<AlphaRange>().is_err());
        assert!("A".parse::<AlphaRange>().is_err());
        assert!("A-C-E".parse::<AlphaRange>().is_err());
        assert!("C-A".parse::<AlphaRange>().is_err());
        assert!("1-5".parse::<AlphaRange>().is_err());
    }

    #[test]
    fn test_alpha_filter_example() {
        let range: AlphaRange = "D-F".parse().unwrap();
        let tickers = ["AAPL", "DOW", "EBAY", "FORD", "GOOG", "ZOOM"];
        let kept: Vec<&str> = tickers
            .iter()
            .copied()
            .filter(|t| range.matches(t))
            .collect();
        assert_eq!(kept, vec!["DOW", "EBAY", "FORD"]);
    }

    #[test]
    fn test_alpha_range_single_letter() {
        let range: AlphaRange = "A-A".parse().unwrap();
        assert!(range.matches("AAPL"));
        assert!(!range.matches("BA"));
    }

    #[test]
    fn test_alpha_range_empty_ticker() {
        let range: AlphaRange = "A-Z".parse().unwrap();
        assert!(!range.matches(""));
    }
}
