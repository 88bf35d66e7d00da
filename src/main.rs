//! CLI entry point for the housing-market analysis tool.
//!
//! Loads the Zillow ZIP-code rent and home-value tables, derives per-ZIP
//! metrics, and writes the resulting report.

use anyhow::Result;
use clap::Parser;
use house_analysis::metrics::pipeline::Pipeline;
use house_analysis::output::{print_pretty, write_report, write_summary_csv};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "house_analysis")]
#[command(about = "Analyze Zillow ZIP-code housing time series", long_about = None)]
struct Cli {
    /// Directory containing the Zillow CSV exports
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Path for the JSON report
    #[arg(short, long, default_value = "report.json")]
    output: PathBuf,

    /// Optional path for a flat per-ZIP CSV summary
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/house_analysis.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("house_analysis.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let report = Pipeline::new(&cli.data_dir).run()?;
    print_pretty(&report);

    write_report(&cli.output, &report)?;
    if let Some(csv_path) = &cli.csv {
        write_summary_csv(csv_path, &report)?;
    }

    info!(
        regions = report.regions.len(),
        failures = report.failures.len(),
        "Run finished"
    );

    Ok(())
}
