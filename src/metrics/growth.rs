//! Trailing rent-growth moving average.

use crate::error::MetricError;
use crate::loader::TimeSeriesRecord;
use crate::metrics::utility::mean;

/// Number of most recent periods considered.
pub const GROWTH_WINDOW: usize = 30;

/// Width of the trailing moving average over percent changes.
const MOVING_AVERAGE_WIDTH: usize = 3;

/// Fewest periods that still yield one complete moving-average triple.
pub const MIN_PERIODS: usize = MOVING_AVERAGE_WIDTH + 1;

/// Computes the trailing rent-growth moving average for one region.
///
/// Over the last [`GROWTH_WINDOW`] values: each value is truncated to an
/// integer (the indices are published as integers; truncation keeps results
/// reproducible against them), adjacent percent changes are computed in
/// `f64`, each trailing triple of percent changes is averaged, and the
/// result is the mean of those averages. A window of `n` values yields
/// `n - 1` percent changes and `n - 3` moving-average points.
///
/// # Errors
///
/// [`MetricError::InsufficientData`] if the window holds fewer than
/// [`MIN_PERIODS`] values; [`MetricError::ZeroDenominator`] if a truncated
/// predecessor value is zero.
pub fn rent_growth(region: &str, record: &TimeSeriesRecord) -> Result<f64, MetricError> {
    let start = record.values.len().saturating_sub(GROWTH_WINDOW);
    let window = &record.values[start..];
    let labels = &record.periods[start..];

    if window.len() < MIN_PERIODS {
        return Err(MetricError::InsufficientData {
            region: region.to_string(),
            periods: window.len(),
            needed: MIN_PERIODS,
        });
    }

    let mut changes = Vec::with_capacity(window.len() - 1);
    for (offset, pair) in window.windows(2).enumerate() {
        let prev = pair[0].trunc();
        let curr = pair[1].trunc();
        if prev == 0.0 {
            return Err(MetricError::ZeroDenominator {
                region: region.to_string(),
                period: labels.get(offset).cloned().unwrap_or_default(),
            });
        }
        changes.push((curr - prev) / prev * 100.0);
    }

    let averages: Vec<f64> = changes.windows(MOVING_AVERAGE_WIDTH).map(mean).collect();
    Ok(mean(&averages))
}
