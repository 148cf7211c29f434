//! CLI entry point for the bike sharing dashboard.
//!
//! Loads the daily and hourly rental datasets once, then recomputes the
//! dashboard for the requested date range and prints or exports it.

use anyhow::{Context, Result};
use bike_sharing_dashboard::{
    analyzers::dashboard::Dashboard,
    config::DataPaths,
    filter::DateRange,
    loader::Dataset,
    output::{export_csv, highlighted, render_json, render_text},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_sharing_dashboard")]
#[command(about = "Bike sharing rental statistics by day, season, weather and hour", long_about = None)]
struct Cli {
    /// Daily dataset CSV (falls back to DAY_CSV_PATH, then data/day.csv)
    #[arg(long, global = true, value_name = "PATH")]
    day_csv: Option<PathBuf>,

    /// Hourly dataset CSV (falls back to HOUR_CSV_PATH, then data/hour.csv)
    #[arg(long, global = true, value_name = "PATH")]
    hour_csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard for a date range
    Report {
        /// First date to include (YYYY-MM-DD); defaults to the earliest loaded date
        #[arg(short, long)]
        start: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD); defaults to the latest loaded date
        #[arg(short, long)]
        end: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write every aggregate table for a date range to CSV files
    Export {
        #[arg(short, long)]
        start: Option<NaiveDate>,

        #[arg(short, long)]
        end: Option<NaiveDate>,

        /// Directory to write the CSV files into
        #[arg(short, long, default_value = "dashboard")]
        output_dir: PathBuf,

        /// Gzip compress each CSV file
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Show the first and last date in the daily dataset
    Range,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_sharing_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_sharing_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let paths = DataPaths::resolve(cli.day_csv, cli.hour_csv);
    let data = Dataset::load(&paths.day, &paths.hour)?;
    let bounds = data.date_bounds();

    match cli.command {
        Commands::Report { start, end, format } => {
            let dashboard = recompute(&data, start, end)?;

            let rendered = match format {
                Format::Text => render_text(&dashboard)?,
                Format::Json => render_json(&dashboard)?,
            };
            println!("{rendered}");
        }
        Commands::Export {
            start,
            end,
            output_dir,
            gzip,
        } => {
            let dashboard = recompute(&data, start, end)?;
            let written = export_csv(&dashboard, &output_dir, gzip)?;

            for path in &written {
                println!("{}", path.display());
            }
        }
        Commands::Range => match bounds {
            Some(range) => println!("{} {}", range.start, range.end),
            None => warn!(path = %paths.day.display(), "Daily dataset has no rows"),
        },
    }

    Ok(())
}

/// Resolves the requested range against the loaded data and rebuilds the dashboard.
fn recompute(
    data: &Dataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Dashboard> {
    let range = DateRange::requested(start, end, data.date_bounds())
        .context("daily dataset is empty; pass both --start and --end")?;

    if range.is_empty() {
        warn!(range = %range, "Start date is after end date, nothing selected");
    }

    let dashboard = Dashboard::compute(data, range);

    if let Some(top) = highlighted(&dashboard.by_season) {
        info!(season = %top.season, total = top.total_customers, "Busiest season");
    }
    if let Some(top) = highlighted(&dashboard.by_hour) {
        info!(hour = %top.label(), total = top.total_customers, "Busiest hour");
    }

    Ok(dashboard)
}
