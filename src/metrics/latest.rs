//! Latest-value metric.

use crate::error::MetricError;
use crate::loader::TimeSeriesRecord;

/// Returns the most recent value of a region's series.
///
/// ZRI and ZHVI are smoothed upstream, so the last observation is the
/// published trailing average for the region.
///
/// # Errors
///
/// [`MetricError::NoSeriesData`] if the series is empty.
pub fn latest_value(region: &str, record: &TimeSeriesRecord) -> Result<f64, MetricError> {
    record
        .values
        .last()
        .copied()
        .ok_or_else(|| MetricError::NoSeriesData {
            region: region.to_string(),
        })
}
