use clap::Parser;
use tickerscan::cli::{Cli, Commands};
use tickerscan::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    tickerscan::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            tracing::info!("Starting scan");
            args.execute(&config).await?;
        }
        Commands::Universe(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Market: {}", config.scan.market);
            println!("  Scan days: {}", config.scan.days);
            println!("  Buffer days: {}", config.scan.buffer_days);
            println!(
                "  Criteria: surge>{}%, gap>{}%, uptrend>={}d, volume>{}% over {}d average",
                config.criteria.surge_threshold * rust_decimal_macros::dec!(100),
                config.criteria.gap_threshold * rust_decimal_macros::dec!(100),
                config.criteria.uptrend_min_days,
                config.criteria.volume_threshold * rust_decimal_macros::dec!(100),
                config.criteria.volume_ma_period
            );
            println!("  Chart API: {}", config.fetch.base_url);
            println!("  Throttle: {}ms", config.fetch.throttle_ms);
        }
    }

    Ok(())
}
