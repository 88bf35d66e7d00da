//! Ensure-aggregate-entry: the shared metadata merge.

use crate::loader::TimeSeriesRecord;
use crate::metrics::types::{AggregateRecord, MetricValue};
use crate::schema::HeaderRegistry;
use std::collections::BTreeMap;

/// Ensures an aggregate record exists for `region` and returns it.
///
/// When the record is first created, the five descriptive fields are copied
/// in verbatim, labeled with the header registry's column names. Fields that
/// are already set are never overwritten, so merging the same region from a
/// second source only adds what is missing. Every metric pass goes through
/// this one routine.
pub fn ensure_entry<'a>(
    aggregates: &'a mut BTreeMap<String, AggregateRecord>,
    registry: &HeaderRegistry,
    region: &str,
    record: &TimeSeriesRecord,
) -> &'a mut AggregateRecord {
    let entry = aggregates.entry(region.to_string()).or_default();
    for (label, value) in registry.descriptive_labels().iter().zip(&record.descriptive) {
        entry
            .entry(label.clone())
            .or_insert_with(|| MetricValue::Text(value.clone()));
    }
    entry
}
