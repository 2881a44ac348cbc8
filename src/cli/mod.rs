//! CLI interface for tickerscan
//!
//! Provides subcommands for:
//! - `scan`: run all four scans across a market universe
//! - `universe`: list the tickers a market resolves to
//! - `config`: show the effective configuration

mod scan;
mod universe;

pub use scan::ScanArgs;
pub use universe::UniverseArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tickerscan")]
#[command(about = "Technical signal scanner for U.S.-listed equities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all four scans across a market universe
    Scan(ScanArgs),
    /// List the tickers a market resolves to
    Universe(UniverseArgs),
    /// Show the effective configuration
    Config,
}
