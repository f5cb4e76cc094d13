//! Climadash CLI — load the OWID CO₂ dataset and print dashboard artifacts.
//!
//! Commands:
//! - `fetch` — load the table and print a one-line summary
//! - `render` — print the four dashboard artifacts as JSON
//! - `table` — print the selected years as aligned text, newest first
//! - `export` — write the selected years, every column, as CSV

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use climadash_core::config::ViewConfig;
use climadash_core::data::{open_cache, SourceChoice, Table};
use climadash_core::view::{render_range, DataView, YearRange};
use climadash_core::DashboardConfig;

const DEFAULT_LOG_FILTER: &str = "climadash_core=info,climadash=info";

#[derive(Parser)]
#[command(
    name = "climadash",
    about = "Climadash CLI — global CO₂ emissions and temperature change"
)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the dataset from a local CSV instead of downloading it.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Use the deterministic synthetic dataset (offline).
    #[arg(long, global = true, default_value_t = false)]
    synthetic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct RangeArgs {
    /// First year, inclusive. Defaults to the configured start.
    #[arg(long)]
    start: Option<i32>,

    /// Last year, inclusive. Defaults to the configured end.
    #[arg(long)]
    end: Option<i32>,
}

impl RangeArgs {
    /// Unset ends fall back to config. Explicit years are passed through unclamped.
    fn resolve(self, view: &ViewConfig) -> YearRange {
        let default = view.default_range();
        YearRange::new(
            self.start.unwrap_or(default.start),
            self.end.unwrap_or(default.end),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and print a one-line summary.
    Fetch,
    /// Print the dashboard artifacts for a year range as JSON.
    Render {
        #[command(flatten)]
        range: RangeArgs,

        /// Pretty-print the JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the selected years as aligned text, newest first.
    Table {
        #[command(flatten)]
        range: RangeArgs,

        /// Print at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the selected years, every column, as CSV.
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Output CSV path.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = DashboardConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let choice = SourceChoice::from_flags(cli.file, cli.synthetic);
    let cache = open_cache(&choice, &config.source).context("failed to build dataset source")?;

    info!(source = cache.source_name(), "loading dataset");
    let table = cache
        .get_table()
        .with_context(|| format!("failed to load dataset from {}", cache.source_name()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Fetch => writeln!(out, "{}", summary(&table))?,
        Commands::Render { range, pretty } => {
            run_render(&mut out, &table, range.resolve(&config.view), pretty)?
        }
        Commands::Table { range, limit } => {
            let rendered = render_range(&table, range.resolve(&config.view));
            write_text_table(&mut out, &rendered.data_view, limit)?;
        }
        Commands::Export { range, output } => {
            let range = range.resolve(&config.view);
            let rows = run_export(&table, range, &output)?;
            writeln!(out, "Wrote {rows} rows ({range}) to {}", output.display())?;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn summary(table: &Table) -> String {
    let report = table.report();
    let span = table
        .year_span()
        .map(|(a, b)| format!("{a}–{b}"))
        .unwrap_or_else(|| "no years".into());
    format!(
        "{} rows for {} ({span}), {} columns; {} source rows, {} skipped, {} cells nulled; blake3 {}",
        table.len(),
        table.category(),
        table.columns().len(),
        report.source_rows,
        report.skipped_rows + report.duplicate_rows,
        report.coerced_cells,
        report.fingerprint,
    )
}

fn run_render<W: Write>(out: &mut W, table: &Table, range: YearRange, pretty: bool) -> Result<()> {
    let rendered = render_range(table, range);
    debug!(rows = rendered.data_view.len(), %range, "rendered");
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &rendered)?;
    } else {
        serde_json::to_writer(&mut *out, &rendered)?;
    }
    writeln!(out)?;
    Ok(())
}

fn fmt_value(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".into())
}

fn write_text_table<W: Write>(out: &mut W, view: &DataView, limit: Option<usize>) -> Result<()> {
    writeln!(out, "{:<12} {:>14} {:>18}", "Year", "CO₂ (mt)", "Temp Change (°C)")?;
    let take = limit.unwrap_or(usize::MAX);
    for row in view.rows.iter().take(take) {
        writeln!(
            out,
            "{:<12} {:>14} {:>18}",
            row.year.format("%Y-%m-%d"),
            fmt_value(row.co2),
            fmt_value(row.temperature_change_from_co2),
        )?;
    }
    if view.len() > take {
        writeln!(out, "... {} more rows", view.len() - take)?;
    }
    Ok(())
}

/// Header labels come from the source columns so the file re-imports cleanly.
fn write_csv<W: Write>(writer: W, view: &DataView) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(view.columns.iter().map(|c| c.name.as_str()))?;
    for row in &view.rows {
        wtr.write_record(&row.cells)?;
    }
    wtr.flush()?;
    Ok(view.len())
}

fn run_export(table: &Table, range: YearRange, output: &Path) -> Result<usize> {
    let rendered = render_range(table, range);
    let file = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let rows = write_csv(file, &rendered.data_view)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(rows, path = %output.display(), "exported");
    Ok(rows)
}
