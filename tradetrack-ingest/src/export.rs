//! Export — CSV, JSON and Markdown artifacts for a parsed dataset.
//!
//! `export_dataset` writes the full artifact set into one directory:
//! - `trades.csv`: the chronological ledger
//! - `trades.json`: the full `ParsedDataset`, loadable again
//! - `chart.csv`: the chart series, anchor first
//! - `summary.json`: headline numbers
//!
//! Non-finite values are written as empty CSV fields and JSON `null`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tradetrack_core::{ChartPoint, LedgerSummary, ParsedDataset, Trade};

/// Timestamp layout used in every exported file.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// ─── CSV export ─────────────────────────────────────────────────────

/// Columns: id, symbol, timestamp, value, accumulated_value
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["id", "symbol", "timestamp", "value", "accumulated_value"])?;

    for t in trades {
        wtr.write_record([
            &t.id.to_string(),
            &t.symbol,
            &t.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            &format_money(t.value),
            &format_money(t.accumulated_value),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Columns: kind, id, symbol, timestamp, value, accumulated_value
pub fn export_chart_csv(points: &[ChartPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "kind",
        "id",
        "symbol",
        "timestamp",
        "value",
        "accumulated_value",
    ])?;

    for p in points {
        let kind = if p.is_initial_investment() { "anchor" } else { "trade" };
        wtr.write_record([
            kind,
            &p.id().to_string(),
            p.symbol(),
            &p.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            &format_money(p.value()),
            &format_money(p.accumulated_value()),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Two-decimal rendering shared by every export and by the CLI tables.
/// Non-finite values render as an empty string.
pub fn format_money(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        String::new()
    }
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(dataset: &ParsedDataset) -> Result<String> {
    serde_json::to_string_pretty(dataset).context("failed to serialize dataset to JSON")
}

pub fn import_json(json: &str) -> Result<ParsedDataset> {
    serde_json::from_str(json).context("failed to deserialize dataset from JSON")
}

pub fn export_summary_json(summary: &LedgerSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize summary to JSON")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Paths written by [`export_dataset`].
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub trades_csv: PathBuf,
    pub trades_json: PathBuf,
    pub chart_csv: PathBuf,
    pub summary_json: PathBuf,
}

/// Write the artifact set into `output_dir`, creating it if needed.
/// Existing files with the same names are overwritten.
pub fn export_dataset(output_dir: &Path, dataset: &ParsedDataset) -> Result<ExportPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create export dir: {}", output_dir.display()))?;

    let paths = ExportPaths {
        trades_csv: output_dir.join("trades.csv"),
        trades_json: output_dir.join("trades.json"),
        chart_csv: output_dir.join("chart.csv"),
        summary_json: output_dir.join("summary.json"),
    };

    write(&paths.trades_csv, &export_trades_csv(&dataset.trades)?)?;
    write(&paths.trades_json, &export_json(dataset)?)?;
    write(&paths.chart_csv, &export_chart_csv(&dataset.chart_data)?)?;
    let summary = LedgerSummary::from_dataset(dataset);
    write(&paths.summary_json, &export_summary_json(&summary)?)?;

    log::info!(
        "exported {} trade(s) to {}",
        dataset.trades.len(),
        output_dir.display()
    );
    Ok(paths)
}

/// Load a dataset back from an export directory's `trades.json`.
pub fn load_export(dir: &Path) -> Result<ParsedDataset> {
    let path = dir.join("trades.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

// ─── Markdown report ────────────────────────────────────────────────

/// Human-readable summary plus the full ledger table.
pub fn generate_report(dataset: &ParsedDataset) -> String {
    let s = LedgerSummary::from_dataset(dataset);
    let mut md = String::with_capacity(1024 + dataset.trades.len() * 64);

    md.push_str("# Trade Ledger Report\n\n");

    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Trades | {} |\n", s.total_trades));
    md.push_str(&format!(
        "| Initial Investment | ${:.2} |\n",
        s.initial_investment
    ));
    md.push_str(&format!("| Final Value | ${:.2} |\n", s.final_value));
    md.push_str(&format!("| Net Profit | ${:.2} |\n", s.net_profit));
    md.push_str(&format!(
        "| Winners / Losers | {} / {} |\n",
        s.winning_trades, s.losing_trades
    ));
    if let Some(roi) = s.return_on_investment {
        md.push_str(&format!("| Return | {:.2}% |\n", roi * 100.0));
    }
    md.push('\n');

    md.push_str("## Trades\n\n");
    md.push_str("| # | Symbol | Date | Value | Accumulated |\n");
    md.push_str("| ---: | --- | --- | ---: | ---: |\n");
    for t in &dataset.trades {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            t.id,
            t.symbol,
            t.timestamp.format(TIMESTAMP_FORMAT),
            format_money(t.value),
            format_money(t.accumulated_value)
        ));
    }

    md
}
