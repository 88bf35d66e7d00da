//! Error types for the analysis pipeline.
//!
//! [`LoadError`] covers everything that can go wrong while reading a source
//! table; every variant aborts the run. [`MetricError`] covers per-region
//! metric failures; the pipeline records those in the report and keeps going.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a tabular source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source {} has no header row", path.display())]
    MissingHeader { path: PathBuf },

    #[error(
        "schema mismatch in {}: expected column {expected:?} at position {position}, found {found:?}",
        path.display()
    )]
    SchemaMismatch {
        path: PathBuf,
        position: usize,
        expected: String,
        found: String,
    },

    #[error(
        "malformed row {line} in {}: expected at least {min} columns, found {found}",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: u64,
        min: usize,
        found: usize,
    },

    #[error(
        "non-numeric value {value:?} for region {region} in {} (column {column})",
        path.display()
    )]
    NonNumericCell {
        path: PathBuf,
        region: String,
        column: String,
        value: String,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Per-region errors raised while computing a metric.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("no time series data for region {region}")]
    NoSeriesData { region: String },

    #[error("insufficient data for region {region}: {periods} periods, need at least {needed}")]
    InsufficientData {
        region: String,
        periods: usize,
        needed: usize,
    },

    #[error("zero denominator computing growth for region {region} at period {period}")]
    ZeroDenominator { region: String, period: String },
}
