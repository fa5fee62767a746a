//! TradeTrack CLI — import a trade ledger spreadsheet and inspect it.
//!
//! Commands:
//! - `import`: parse an .xlsx/.xls/.ods/.csv ledger and store it
//! - `show`: print the stored ledger, optionally sorted or a single trade
//! - `chart`: print the chart series (anchor first)
//! - `summary`: headline numbers for the stored ledger
//! - `export`: write CSV/JSON artifacts (and a Markdown report) to a directory
//! - `clear`: remove the stored ledger

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tradetrack_core::{
    sort_trades, ColumnMapping, LedgerSummary, ParsedDataset, Pipeline, SortDirection, SortField,
    Trade, ValuePolicy,
};
use tradetrack_ingest::{
    export_dataset, format_money, generate_report, import_file, import_into_store, DatasetStore,
    ImportReport, JsonFileStore, TradeTrackConfig,
};

#[derive(Parser)]
#[command(
    name = "tradetrack",
    about = "TradeTrack CLI — spreadsheet trade ledger with running portfolio value"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./tradetrack.toml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the stored dataset. Overrides the config file.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a spreadsheet ledger and replace the stored dataset.
    Import {
        /// .xlsx, .xls, .ods or .csv file.
        file: PathBuf,

        /// Starting portfolio value. Falls back to `initial_investment` in the config.
        #[arg(long, allow_hyphen_values = true)]
        initial_investment: Option<f64>,

        /// Read separate `M/D/YY` and `H:MM AM/PM` columns instead of `DateTime`.
        #[arg(long, default_value_t = false)]
        split_columns: bool,

        /// Keep non-numeric values as NaN instead of failing.
        #[arg(long, default_value_t = false)]
        lenient_values: bool,

        /// Parse and report without touching the store.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the stored ledger in chronological order.
    Show {
        /// Sort by: id, symbol, timestamp, value, accumulated.
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort descending.
        #[arg(long, default_value_t = false)]
        desc: bool,

        /// Show a single trade by id.
        #[arg(long)]
        trade: Option<usize>,
    },
    /// Print the chart series: the initial investment, then one point per trade.
    Chart {
        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print headline numbers for the stored ledger.
    Summary {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write trades.csv, trades.json, chart.csv and summary.json.
    Export {
        #[arg(long)]
        output_dir: PathBuf,

        /// Also write report.md.
        #[arg(long, default_value_t = false)]
        report: bool,
    },
    /// Remove the stored dataset.
    Clear {
        /// Actually delete (without this flag, only shows what would be removed).
        #[arg(long, default_value_t = false)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TradeTrackConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let store_dir = cli
        .store_dir
        .clone()
        .unwrap_or_else(|| config.resolved_store_dir());
    log::debug!("store directory: {}", store_dir.display());
    let mut store = JsonFileStore::new(&store_dir);

    match cli.command {
        Commands::Import {
            file,
            initial_investment,
            split_columns,
            lenient_values,
            dry_run,
        } => {
            let pipeline = build_pipeline(&config, split_columns, lenient_values);
            let amount = resolve_investment(initial_investment, &config)?;
            run_import(&mut store, &file, &pipeline, amount, dry_run)
        }
        Commands::Show { sort, desc, trade } => run_show(&store, sort, desc, trade),
        Commands::Chart { json } => run_chart(&store, json),
        Commands::Summary { json } => run_summary(&store, json),
        Commands::Export { output_dir, report } => run_export(&store, &output_dir, report),
        Commands::Clear { confirm } => run_clear(&mut store, confirm),
    }
}

/// Warn for dependencies, `verbose`-driven level for our own crates.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("tradetrack_core"), level)
        .filter(Some("tradetrack_ingest"), level)
        .filter(Some("tradetrack"), level)
        .parse_default_env()
        .init();
}

/// Command-line flags win over the config file.
fn build_pipeline(config: &TradeTrackConfig, split_columns: bool, lenient_values: bool) -> Pipeline {
    let mut pipeline = config.pipeline();
    if split_columns {
        pipeline.columns = ColumnMapping::split();
    }
    if lenient_values {
        pipeline.value_policy = ValuePolicy::Lenient;
    }
    pipeline
}

fn resolve_investment(flag: Option<f64>, config: &TradeTrackConfig) -> Result<f64> {
    match flag.or(config.initial_investment) {
        Some(amount) => Ok(amount),
        None => bail!("--initial-investment is required (or set initial_investment in the config)"),
    }
}

fn load_dataset(store: &JsonFileStore) -> Result<ParsedDataset> {
    match store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?
    {
        Some(dataset) => Ok(dataset),
        None => bail!("no ledger stored yet; run `tradetrack import <FILE>` first"),
    }
}

fn run_import(
    store: &mut JsonFileStore,
    file: &Path,
    pipeline: &Pipeline,
    initial_investment: f64,
    dry_run: bool,
) -> Result<()> {
    let outcome = if dry_run {
        import_file(file, pipeline, initial_investment)
    } else {
        import_into_store(store, file, pipeline, initial_investment)
    }
    .with_context(|| format!("failed to import {}", file.display()))?;

    print_report(&outcome.report);
    if dry_run {
        println!("Dry run: store not modified.");
    } else {
        println!("Stored in: {}", store.path().display());
    }
    Ok(())
}

fn run_show(
    store: &JsonFileStore,
    sort: Option<SortField>,
    desc: bool,
    trade: Option<usize>,
) -> Result<()> {
    let dataset = load_dataset(store)?;

    if let Some(id) = trade {
        let Some(t) = dataset.find_trade(id) else {
            bail!("no trade with id {id}");
        };
        println!("Trade #{}", t.id);
        println!("Symbol:       {}", t.symbol);
        println!("Date:         {}", t.timestamp.format("%Y-%m-%d %I:%M %p"));
        println!("Value:        {}", format_money(t.value));
        println!("Accumulated:  {}", format_money(t.accumulated_value));
        return Ok(());
    }

    let direction = if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let rows: Vec<&Trade> = match sort {
        Some(field) => sort_trades(&dataset.trades, field, direction),
        None if desc => dataset.trades.iter().rev().collect(),
        None => dataset.trades.iter().collect(),
    };

    println!(
        "{:>5} {:<10} {:<20} {:>14} {:>14}",
        "ID", "Symbol", "Date", "Value", "Accumulated"
    );
    println!("{}", "-".repeat(67));
    for t in rows {
        println!(
            "{:>5} {:<10} {:<20} {:>14} {:>14}",
            t.id,
            t.symbol,
            t.timestamp.format("%Y-%m-%d %I:%M %p"),
            format_money(t.value),
            format_money(t.accumulated_value)
        );
    }
    Ok(())
}

fn run_chart(store: &JsonFileStore, json: bool) -> Result<()> {
    let dataset = load_dataset(store)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&dataset.chart_data)?);
        return Ok(());
    }

    println!("{:<20} {:<10} {:>14}", "Date", "Symbol", "Portfolio");
    println!("{}", "-".repeat(46));
    for p in &dataset.chart_data {
        println!(
            "{:<20} {:<10} {:>14}",
            p.timestamp().format("%Y-%m-%d %I:%M %p"),
            p.symbol(),
            format_money(p.accumulated_value())
        );
    }
    Ok(())
}

fn run_summary(store: &JsonFileStore, json: bool) -> Result<()> {
    let dataset = load_dataset(store)?;
    let s = LedgerSummary::from_dataset(&dataset);
    if json {
        println!("{}", serde_json::to_string_pretty(&s)?);
        return Ok(());
    }

    println!();
    println!("=== Ledger Summary ===");
    println!("Trades:         {}", s.total_trades);
    println!("Initial:        {}", format_money(s.initial_investment));
    println!("Final Value:    {}", format_money(s.final_value));
    println!("Net Profit:     {}", format_money(s.net_profit));
    println!("Winners:        {}", s.winning_trades);
    println!("Losers:         {}", s.losing_trades);
    match s.return_on_investment {
        Some(roi) => println!("Return:         {:.2}%", roi * 100.0),
        None => println!("Return:         n/a"),
    }
    println!(
        "Outcome:        {}",
        if s.is_profitable() { "profit" } else { "no profit" }
    );
    println!();
    Ok(())
}

fn run_export(store: &JsonFileStore, output_dir: &Path, report: bool) -> Result<()> {
    let dataset = load_dataset(store)?;
    let paths = export_dataset(output_dir, &dataset)?;
    println!("Wrote {}", paths.trades_csv.display());
    println!("Wrote {}", paths.trades_json.display());
    println!("Wrote {}", paths.chart_csv.display());
    println!("Wrote {}", paths.summary_json.display());

    if report {
        let path = output_dir.join("report.md");
        std::fs::write(&path, generate_report(&dataset))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_clear(store: &mut JsonFileStore, confirm: bool) -> Result<()> {
    if !store.path().exists() {
        println!("Nothing stored at {}", store.path().display());
        return Ok(());
    }

    if !confirm {
        println!("Would remove: {}", store.path().display());
        println!();
        println!("Dry run — pass --confirm to actually delete.");
        return Ok(());
    }

    store
        .clear()
        .with_context(|| format!("failed to remove {}", store.path().display()))?;
    println!("Removed: {}", store.path().display());
    Ok(())
}

fn print_report(report: &ImportReport) {
    println!();
    println!("=== Import ===");
    println!("Source:         {}", report.source.display());
    println!("Format:         {}", report.format);
    println!("Rows:           {}", report.rows_decoded);
    println!("Trades:         {}", report.trades);
    println!("Dropped:        {}", report.rows_dropped);
    println!("Final Value:    {}", format_money(report.final_value));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let config = TradeTrackConfig::from_toml("value_policy = \"strict\"").unwrap();
        let pipeline = build_pipeline(&config, true, true);
        assert_eq!(pipeline.columns, ColumnMapping::split());
        assert_eq!(pipeline.value_policy, ValuePolicy::Lenient);

        let untouched = build_pipeline(&config, false, false);
        assert_eq!(untouched, Pipeline::default());
    }

    #[test]
    fn investment_falls_back_to_config() {
        let config = TradeTrackConfig::from_toml("initial_investment = 750.0").unwrap();
        assert_eq!(resolve_investment(None, &config).unwrap(), 750.0);
        assert_eq!(resolve_investment(Some(-20.0), &config).unwrap(), -20.0);
        assert!(resolve_investment(None, &TradeTrackConfig::default()).is_err());
    }

    #[test]
    fn parses_import_arguments() {
        let cli = Cli::try_parse_from([
            "tradetrack",
            "--store-dir",
            "/tmp/tt",
            "import",
            "ledger.xlsx",
            "--initial-investment",
            "-500",
            "--split-columns",
        ])
        .unwrap();
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/tt")));
        match cli.command {
            Commands::Import {
                file,
                initial_investment,
                split_columns,
                lenient_values,
                dry_run,
            } => {
                assert_eq!(file, PathBuf::from("ledger.xlsx"));
                assert_eq!(initial_investment, Some(-500.0));
                assert!(split_columns);
                assert!(!lenient_values);
                assert!(!dry_run);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn parses_sort_field() {
        let cli = Cli::try_parse_from(["tradetrack", "show", "--sort", "accumulated", "--desc"])
            .unwrap();
        match cli.command {
            Commands::Show { sort, desc, trade } => {
                assert_eq!(sort, Some(SortField::AccumulatedValue));
                assert!(desc);
                assert_eq!(trade, None);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn clear_without_confirm_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        std::fs::write(store.path(), "{}").unwrap();

        run_clear(&mut store, false).unwrap();
        assert!(store.path().exists());
        run_clear(&mut store, true).unwrap();
        assert!(!store.path().exists());
    }
}
