//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Latest rent level, from the ZRI series (already a trailing average
/// upstream).
pub const AVERAGE_RENT: &str = "AverageRent";

/// Trailing moving average of month-over-month rent growth, in percent.
pub const RENT_GROWTH: &str = "RentGrowth";

/// Latest home value, from the ZHVI series.
pub const AVERAGE_HOME_VALUE: &str = "AverageHomeValue";

/// A single aggregate-record value: either a descriptive string copied from
/// a source row or a computed numeric metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Number(f64),
}

impl MetricValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            MetricValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

/// Per-region merged output: descriptive fields and derived metrics, keyed
/// by field name.
pub type AggregateRecord = BTreeMap<String, MetricValue>;

/// A metric that could not be computed for one region. Recorded in the
/// report instead of aborting the run.
#[derive(Debug, Clone, Serialize)]
pub struct RegionFailure {
    pub region: String,
    pub metric: String,
    pub reason: String,
}

/// Complete result of one pipeline run.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub regions: BTreeMap<String, AggregateRecord>,
    pub failures: Vec<RegionFailure>,
}
