//! Exchange listing directory client
//!
//! Comprehensive NASDAQ and NYSE coverage comes from the Nasdaq Trader
//! symbol directory files (pipe-delimited, one listing per line). The
//! S&P 500 membership comes from a published constituents CSV. AMEX and
//! Dow 30 use curated static lists; Russell 2000 has no free
//! comprehensive source and resolves to an empty universe.

use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;

use super::{Market, UniverseProvider};

/// Nasdaq Trader symbol directory base URL (HTTP mirror of the FTP files)
pub const SYMBOL_DIRECTORY_URL: &str = "https://www.nasdaqtrader.com/dynamic/SymDir";

/// Published S&P 500 constituents CSV
pub const SP500_CONSTITUENTS_URL: &str =
    "https://datahub.io/core/s-and-p-500-companies/r/constituents.csv";

/// Major AMEX-listed ETFs (curated)
const AMEX_ETFS: &[&str] = &[
    "SPY", "QQQ", "IWM", "EEM", "GLD", "SLV", "XLE", "XLF", "XLK", "XLV", "XLI", "XLP", "XLY",
    "XLU", "XLB", "XLRE", "XLC", "VXX", "EWJ", "EWZ", "FXI", "EFA", "VWO", "HYG", "LQD", "TLT",
    "IEF", "SHY", "AGG", "BND", "VNQ", "IEMG", "VEA", "VTI", "VOO", "IVV", "VTV", "VUG", "VIG",
    "VYM",
];

/// Dow Jones Industrial Average membership (curated)
const DOW_30: &[&str] = &[
    "AAPL", "AMGN", "AMZN", "AXP", "BA", "CAT", "CRM", "CSCO", "CVX", "DIS", "GS", "HD", "HON",
    "IBM", "JNJ", "JPM", "KO", "MCD", "MMM", "MRK", "MSFT", "NKE", "NVDA", "PG", "SHW", "TRV",
    "UNH", "V", "VZ", "WMT",
];

/// Configuration for the directory client
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL for the symbol directory files
    pub directory_url: String,
    /// URL of the S&P 500 constituents CSV
    pub sp500_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            directory_url: SYMBOL_DIRECTORY_URL.to_string(),
            sp500_url: SP500_CONSTITUENTS_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for retrieving ticker universes
pub struct DirectoryClient {
    config: DirectoryConfig,
    client: Client,
}

impl DirectoryClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self::with_config(DirectoryConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: DirectoryConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        tracing::debug!(url = %url, "fetching listing file");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("listing retrieval failed: {} for {}", response.status(), url);
        }
        Ok(response.text().await?)
    }

    /// All NASDAQ-listed stocks from the symbol directory
    pub async fn nasdaq_listed(&self) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/nasdaqlisted.txt", self.config.directory_url);
        let content = self.fetch_text(&url).await?;
        let tickers = parse_symbol_directory(&content);
        tracing::info!(count = tickers.len(), "fetched NASDAQ listings");
        Ok(tickers)
    }

    /// NYSE and other non-NASDAQ listings from the symbol directory
    pub async fn other_listed(&self) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/otherlisted.txt", self.config.directory_url);
        let content = self.fetch_text(&url).await?;
        let tickers = parse_symbol_directory(&content);
        tracing::info!(count = tickers.len(), "fetched NYSE/other listings");
        Ok(tickers)
    }

    /// Current S&P 500 constituents
    pub async fn sp500(&self) -> anyhow::Result<Vec<String>> {
        let content = self.fetch_text(&self.config.sp500_url).await?;
        let tickers = parse_constituents_csv(&content);
        tracing::info!(count = tickers.len(), "fetched S&P 500 constituents");
        Ok(tickers)
    }

    /// Union of NASDAQ and other exchange listings, deduplicated and sorted
    pub async fn all_us(&self) -> anyhow::Result<Vec<String>> {
        let mut combined: BTreeSet<String> = BTreeSet::new();
        combined.extend(self.nasdaq_listed().await?);
        combined.extend(self.other_listed().await?);
        tracing::info!(count = combined.len(), "combined US market listings");
        Ok(combined.into_iter().collect())
    }
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UniverseProvider for DirectoryClient {
    async fn tickers(&self, market: Market) -> anyhow::Result<Vec<String>> {
        match market {
            Market::Sp500 => self.sp500().await,
            Market::Nasdaq => self.nasdaq_listed().await,
            Market::Nyse => self.other_listed().await,
            Market::Amex => Ok(AMEX_ETFS.iter().map(|t| t.to_string()).collect()),
            Market::Dow30 => Ok(DOW_30.iter().map(|t| t.to_string()).collect()),
            Market::Russell2000 => {
                tracing::warn!("Russell 2000 has no free comprehensive source");
                Ok(Vec::new())
            }
            Market::AllUs => self.all_us().await,
        }
    }
}

/// Parse a pipe-delimited symbol directory file into clean ticker symbols.
///
/// The first line is a column header and the last line a file-creation
/// footer; both fail the symbol hygiene check and drop out.
fn parse_symbol_directory(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let symbol = line.split('|').next()?.trim();
            is_clean_symbol(symbol).then(|| symbol.to_string())
        })
        .collect()
}

/// Symbol hygiene: short, alphanumeric apart from `-`/`.`, not a test
/// issue or stray header
fn is_clean_symbol(symbol: &str) -> bool {
    if symbol.is_empty() || symbol.len() > 5 {
        return false;
    }
    if symbol.starts_with('$') || symbol == "Symbol" || symbol == "ACT Symbol" {
        return false;
    }
    let stripped: String = symbol.chars().filter(|c| *c != '-' && *c != '.').collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_alphanumeric())
}

/// First column of a constituents CSV, with class shares normalized to
/// the dash convention (BRK.B -> BRK-B)
fn parse_constituents_csv(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let symbol = line.split(',').next()?.trim();
            (!symbol.is_empty()).then(|| symbol.replace('.', "-"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NASDAQ_SAMPLE: &str = "\
Symbol|Security Name|Market Category|Test Issue|Financial Status|Round Lot Size|ETF|NextShares
AAPL|Apple Inc. - Common Stock|Q|N|N|100|N|N
GOOGL|Alphabet Inc. - Class A|Q|N|N|100|N|N
ZAZZT|Test Pilot - Common Stock|Q|Y|N|100|N|N
TOOLONG1|Overlong Symbol|Q|N|N|100|N|N
$BAD|Dollar Prefixed|Q|N|N|100|N|N
File Creation Time: 0315202422:30|||||||";

    const OTHER_SAMPLE: &str = "\
ACT Symbol|Security Name|Exchange|CQS Symbol|ETF|Round Lot Size|Test Issue|NASDAQ Symbol
BRK-B|Berkshire Hathaway Class B|N|BRK.B|N|100|N|BRK-B
GE|General Electric|N|GE|N|100|N|GE
File Creation Time: 0315202422:30|||||||";

    #[test]
    fn test_parse_nasdaq_directory() {
        let tickers = parse_symbol_directory(NASDAQ_SAMPLE);
        assert_eq!(tickers, vec!["AAPL", "GOOGL", "ZAZZT"]);
    }

    #[test]
    fn test_parse_other_directory() {
        let tickers = parse_symbol_directory(OTHER_SAMPLE);
        assert_eq!(tickers, vec!["BRK-B", "GE"]);
    }

    #[test]
    fn test_clean_symbol_rules() {
        assert!(is_clean_symbol("AAPL"));
        assert!(is_clean_symbol("BRK-B"));
        assert!(is_clean_symbol("BF.B"));
        assert!(!is_clean_symbol(""));
        assert!(!is_clean_symbol("TOOLONG"));
        assert!(!is_clean_symbol("$TEST"));
        assert!(!is_clean_symbol("Symbol"));
        assert!(!is_clean_symbol("ACT Symbol"));
        assert!(!is_clean_symbol("A B"));
        assert!(!is_clean_symbol("-."));
    }

    #[test]
    fn test_parse_constituents_csv() {
        let csv = "Symbol,Name,Sector\nMMM,3M,Industrials\nBRK.B,Berkshire Hathaway,Financials\n";
        let tickers = parse_constituents_csv(csv);
        assert_eq!(tickers, vec!["MMM", "BRK-B"]);
    }

    #[test]
    fn test_static_lists_sizes() {
        assert_eq!(DOW_30.len(), 30);
        assert_eq!(AMEX_ETFS.len(), 40);
    }

    #[tokio::test]
    async fn test_amex_and_dow_resolve_without_network() {
        let client = DirectoryClient::new();
        let amex = client.tickers(Market::Amex).await.unwrap();
        assert_eq!(amex.len(), 40);
        let dow = client.tickers(Market::Dow30).await.unwrap();
        assert_eq!(dow.len(), 30);
    }

    #[tokio::test]
    async fn test_russell2000_is_empty() {
        let client = DirectoryClient::new();
        let tickers = client.tickers(Market::Russell2000).await.unwrap();
        assert!(tickers.is_empty());
    }

    #[test]
    fn test_directory_config_default() {
        let config = DirectoryConfig::default();
        assert_eq!(config.directory_url, SYMBOL_DIRECTORY_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
