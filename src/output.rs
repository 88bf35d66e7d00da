//! Output formatting and persistence for analysis reports.
//!
//! Supports pretty-printing, JSON serialization, and a flat CSV summary.

use anyhow::Result;
use tracing::{debug, info};

use crate::metrics::types::{
    AVERAGE_HOME_VALUE, AVERAGE_RENT, AnalysisReport, MetricValue, RENT_GROWTH,
};
use crate::schema::{DESCRIPTIVE_COUNT, DESCRIPTIVE_START, LEADING_COLUMNS};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AnalysisReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &AnalysisReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes the full report as a JSON document.
pub fn write_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    info!(path = %path.display(), regions = report.regions.len(), "Report written");
    Ok(())
}

/// One flat row of the summary CSV export.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    region: &'a str,
    city: Option<&'a str>,
    state: Option<&'a str>,
    metro: Option<&'a str>,
    county: Option<&'a str>,
    size_rank: Option<&'a str>,
    average_rent: Option<f64>,
    rent_growth: Option<f64>,
    average_home_value: Option<f64>,
}

/// Writes one summary row per region: the descriptive fields plus the three
/// derived metrics. A region missing a metric leaves that cell empty.
pub fn write_summary_csv(path: &Path, report: &AnalysisReport) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    let labels = &LEADING_COLUMNS[DESCRIPTIVE_START..DESCRIPTIVE_START + DESCRIPTIVE_COUNT];

    for (region, record) in &report.regions {
        let text = |label: &str| record.get(label).and_then(MetricValue::as_text);
        let number = |name: &str| record.get(name).and_then(MetricValue::as_number);

        writer.serialize(SummaryRow {
            region,
            city: text(labels[0]),
            state: text(labels[1]),
            metro: text(labels[2]),
            county: text(labels[3]),
            size_rank: text(labels[4]),
            average_rent: number(AVERAGE_RENT),
            rent_growth: number(RENT_GROWTH),
            average_home_value: number(AVERAGE_HOME_VALUE),
        })?;
    }

    writer.flush()?;
    info!(path = %path.display(), regions = report.regions.len(), "Summary CSV written");
    Ok(())
}
