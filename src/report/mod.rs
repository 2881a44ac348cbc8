//! Result tables and export
//!
//! Flattens the scan outcome into five display tables with fixed column
//! order, rendered as aligned text for the terminal or as
//! character-separated text with a header row for export.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::aggregate::ScanOutcome;
use crate::config::CriteriaConfig;

/// Placeholder for display fields with no captured value
const UNAVAILABLE: &str = "N/A";

/// A flat display table: title, header row, stringified cells.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as character-separated text with a header row.
    pub fn to_delimited(&self, sep: char) -> String {
        let mut out = String::new();
        out.push_str(&join_row(
            &self.columns.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            sep,
        ));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&join_row(row, sep));
            out.push('\n');
        }
        out
    }

    /// Render as padded columns for the terminal.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = format!("{}\n", self.title);
        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect();
        out.push_str(&format!("  {}\n", header.join("  ")));
        if self.rows.is_empty() {
            out.push_str("  (no hits)\n");
            return out;
        }
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .collect();
            out.push_str(&format!("  {}\n", cells.join("  ")));
        }
        out
    }
}

fn join_row(cells: &[String], sep: char) -> String {
    cells
        .iter()
        .map(|cell| quote_field(cell, sep))
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

fn quote_field(field: &str, sep: char) -> String {
    if field.contains(sep) || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn money(value: Decimal) -> String {
    format!("${:.2}", value)
}

fn pct(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn opt_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| UNAVAILABLE.to_string())
}

fn opt_volume(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// The five result tables of one scan pass.
#[derive(Debug, Clone)]
pub struct ScanTables {
    pub surge: Table,
    pub gap: Table,
    pub uptrend: Table,
    pub volume: Table,
    pub combined: Table,
}

impl ScanTables {
    /// Build display tables from a scan outcome.
    pub fn render(outcome: &ScanOutcome, criteria: &CriteriaConfig) -> Self {
        let surge = Table {
            title: format!(
                "Price Surge (>{}%)",
                pct(criteria.surge_threshold * dec!(100))
            ),
            columns: vec!["Ticker", "Date", "Price Change (%)", "Close Price", "Volume"],
            rows: outcome
                .surge_rows
                .iter()
                .map(|row| {
                    vec![
                        row.ticker.clone(),
                        row.date.to_string(),
                        pct(row.pct_change),
                        money(row.close),
                        opt_volume(row.volume),
                    ]
                })
                .collect(),
        };

        let gap = Table {
            title: format!("Upward Gap (>{}%)", pct(criteria.gap_threshold * dec!(100))),
            columns: vec!["Ticker", "Date", "Gap (%)", "Open Price", "Volume"],
            rows: outcome
                .gap_rows
                .iter()
                .map(|row| {
                    vec![
                        row.ticker.clone(),
                        row.date.to_string(),
                        pct(row.gap_pct),
                        money(row.open),
                        opt_volume(row.volume),
                    ]
                })
                .collect(),
        };

        let uptrend = Table {
            title: format!("Continuous Uptrend (>={} days)", criteria.uptrend_min_days),
            columns: vec![
                "Ticker",
                "End Date",
                "Consecutive Days",
                "Close Price",
                "Volume",
            ],
            rows: outcome
                .uptrend_rows
                .iter()
                .map(|row| {
                    vec![
                        row.ticker.clone(),
                        row.end_date.to_string(),
                        row.streak_days.to_string(),
                        money(row.close),
                        opt_volume(row.volume),
                    ]
                })
                .collect(),
        };

        let volume = Table {
            title: format!(
                "Volume Breakout (>{}% above average)",
                pct(criteria.volume_threshold * dec!(100))
            ),
            columns: vec!["Ticker", "Date", "Volume Increase (%)", "Volume", "Price"],
            rows: outcome
                .volume_rows
                .iter()
                .map(|row| {
                    vec![
                        row.ticker.clone(),
                        row.date.to_string(),
                        pct(row.pct_above_avg),
                        row.volume.to_string(),
                        opt_money(row.close),
                    ]
                })
                .collect(),
        };

        let combined = Table {
            title: "Combined: All 4 Criteria".to_string(),
            columns: vec!["Ticker", "Price", "Volume", "Criteria Met", "Yahoo Finance"],
            rows: outcome
                .combined
                .iter()
                .map(|row| {
                    vec![
                        row.ticker.clone(),
                        opt_money(row.price),
                        opt_volume(row.volume),
                        "All 4".to_string(),
                        row.quote_url(),
                    ]
                })
                .collect(),
        };

        Self {
            surge,
            gap,
            uptrend,
            volume,
            combined,
        }
    }

    /// All five tables, combined first
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        [
            &self.combined,
            &self.surge,
            &self.gap,
            &self.uptrend,
            &self.volume,
        ]
        .into_iter()
    }

    /// Write each table as a CSV file under `dir`, plus a ticker-only list
    /// of the combined results. Returns the paths written.
    pub fn export_csv(&self, dir: &Path, as_of: NaiveDate) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let files = [
            (format!("all_criteria_{}.csv", as_of), &self.combined),
            (format!("price_surge_{}.csv", as_of), &self.surge),
            (format!("upward_gap_{}.csv", as_of), &self.gap),
            (format!("continuous_uptrend_{}.csv", as_of), &self.uptrend),
            (format!("volume_breakout_{}.csv", as_of), &self.volume),
        ];

        let mut written = Vec::with_capacity(files.len() + 1);
        for (name, table) in files {
            let path = dir.join(name);
            std::fs::write(&path, table.to_delimited(','))?;
            written.push(path);
        }

        // plain ticker list of the combined picks
        let mut tickers = String::from("Ticker\n");
        for row in &self.combined.rows {
            if let Some(ticker) = row.first() {
                tickers.push_str(ticker);
                tickers.push('\n');
            }
        }
        let path = dir.join(format!("tickers_all_criteria_{}.csv", as_of));
        std::fs::write(&path, tickers)?;
        written.push(path);

        Ok(written)
    }
}
