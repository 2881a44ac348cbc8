//! Scan command implementation

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::bars::ScanWindow;
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::fetch::{ChartClient, ChartConfig};
use crate::report::ScanTables;
use crate::scanner::{run_scan, ScanPlan};
use crate::universe::{AlphaRange, DirectoryClient, Market};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Trading days in the report window
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(5..=60))]
    pub days: Option<u32>,

    /// Market universe to scan
    #[arg(short, long, value_enum)]
    pub market: Option<Market>,

    /// End date of the scan window (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// First-letter ticker filter, e.g. A-C
    #[arg(long)]
    pub range: Option<AlphaRange>,

    /// Price surge threshold in percent
    #[arg(long)]
    pub surge_pct: Option<Decimal>,

    /// Upward gap threshold in percent
    #[arg(long)]
    pub gap_pct: Option<Decimal>,

    /// Minimum consecutive higher closes
    #[arg(long)]
    pub uptrend_days: Option<usize>,

    /// Volume breakout threshold in percent
    #[arg(long)]
    pub volume_pct: Option<Decimal>,

    /// Directory to write CSV exports into
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let plan = self.plan(config)?;

        let universe = DirectoryClient::new();
        let bars = ChartClient::with_config(ChartConfig {
            base_url: config.fetch.base_url.clone(),
            timeout: Duration::from_secs(config.fetch.timeout_secs),
        });

        let cancel = CancelToken::new();
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupt received, stopping after current ticker");
                    cancel.cancel();
                }
            });
        }

        let report = run_scan(&universe, &bars, &plan, &cancel).await?;
        let tables = ScanTables::render(&report.outcome, &plan.criteria);

        println!(
            "Scan of {}: {} to {}",
            report.market, report.window.report_start, report.window.end
        );
        println!(
            "  Tickers: {} requested, {} evaluated, {} skipped",
            report.requested, report.completed, report.skipped
        );
        println!("  Price surge hits:     {}", tables.surge.len());
        println!("  Upward gap hits:      {}", tables.gap.len());
        println!("  Uptrend hits:         {}", tables.uptrend.len());
        println!("  Volume breakout hits: {}", tables.volume.len());
        println!("  All 4 criteria:       {}", tables.combined.len());
        if report.interrupted {
            println!("  NOTE: scan was interrupted; results are partial");
        }
        println!();

        for table in tables.iter() {
            println!("{}", table.to_text());
        }

        if let Some(dir) = &self.export {
            let files = tables.export_csv(dir, plan.window.end)?;
            for file in files {
                tracing::info!(file = %file.display(), "wrote export");
            }
        }

        Ok(())
    }

    /// Resolve CLI overrides on top of the configured defaults.
    fn plan(&self, config: &Config) -> anyhow::Result<ScanPlan> {
        let days = self.days.unwrap_or(config.scan.days);
        anyhow::ensure!(
            (5..=60).contains(&days),
            "scan days must be between 5 and 60, got {}",
            days
        );

        let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        let window = ScanWindow::anchored(as_of, days, config.scan.buffer_days);

        let mut criteria = config.criteria.clone();
        if let Some(surge) = self.surge_pct {
            criteria.surge_threshold = surge / dec!(100);
        }
        if let Some(gap) = self.gap_pct {
            criteria.gap_threshold = gap / dec!(100);
        }
        if let Some(days) = self.uptrend_days {
            criteria.uptrend_min_days = days;
        }
        if let Some(volume) = self.volume_pct {
            criteria.volume_threshold = volume / dec!(100);
        }

        Ok(ScanPlan {
            market: self.market.unwrap_or(config.scan.market),
            alpha: self.range.or(config.scan.alpha_range),
            window,
            criteria,
            throttle: Duration::from_millis(config.fetch.throttle_ms),
            min_bars: config.fetch.min_bars,
        })
    }
}
