//! Universe command implementation

use clap::Args;

use crate::config::Config;
use crate::universe::{AlphaRange, DirectoryClient, Market, UniverseProvider};

#[derive(Args, Debug)]
pub struct UniverseArgs {
    /// Market to list
    #[arg(value_enum)]
    pub market: Market,

    /// First-letter ticker filter, e.g. A-C
    #[arg(long)]
    pub range: Option<AlphaRange>,
}

impl UniverseArgs {
    pub async fn execute(&self, _config: &Config) -> anyhow::Result<()> {
        let client = DirectoryClient::new();
        let mut tickers = client.tickers(self.market).await?;

        if let Some(range) = &self.range {
            tickers.retain(|t| range.matches(t));
        }

        if tickers.is_empty() {
            println!("No tickers found for {}", self.market);
            return Ok(());
        }

        println!("{}: {} tickers", self.market, tickers.len());
        for ticker in &tickers {
            println!("{}", ticker);
        }
        Ok(())
    }
}
