//! Pipeline driver: loads the configured sources and derives per-region
//! metrics into a single report.

use crate::error::MetricError;
use crate::loader::{SeriesTable, TimeSeriesRecord, load_source};
use crate::metrics::growth::rent_growth;
use crate::metrics::latest::latest_value;
use crate::metrics::merge::ensure_entry;
use crate::metrics::types::{
    AVERAGE_HOME_VALUE, AVERAGE_RENT, AggregateRecord, AnalysisReport, MetricValue, RENT_GROWTH,
    RegionFailure,
};
use crate::schema::{HeaderRegistry, TableSchema};
use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A named CSV source within the data directory.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub name: &'static str,
    pub file_name: &'static str,
}

impl SourceSpec {
    /// ZRI rent index for single-family residences.
    pub fn rent_index() -> Self {
        Self {
            name: "zri_sfr_rental",
            file_name: "Zip_Zri_SingleFamilyResidenceRental.csv",
        }
    }

    /// ZHVI home value index for single-family residences.
    pub fn home_value_index() -> Self {
        Self {
            name: "zhvi_sfr",
            file_name: "Zip_Zhvi_SingleFamilyResidence.csv",
        }
    }

    /// Share of listings with a price cut, seasonally adjusted. Loads through
    /// the same reader but is not part of the default run; no metric consumes
    /// it yet.
    pub fn listing_price_cuts() -> Self {
        Self {
            name: "listings_price_cut_seas_adj_sfr",
            file_name: "Zip_Listings_PriceCut_SeasAdj_SingleFamilyResidence.csv",
        }
    }

    pub fn path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name)
    }
}

/// One full extract-transform-aggregate run.
///
/// Owns every piece of state the run touches: the schema, the header
/// registry, the loaded series tables, and the aggregate map. Nothing is
/// shared across runs.
pub struct Pipeline {
    data_dir: PathBuf,
    schema: TableSchema,
    registry: HeaderRegistry,
    rents: SeriesTable,
    home_values: SeriesTable,
    aggregates: BTreeMap<String, AggregateRecord>,
    failures: Vec<RegionFailure>,
}

impl Pipeline {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            schema: TableSchema::default(),
            registry: HeaderRegistry::default(),
            rents: SeriesTable::new(),
            home_values: SeriesTable::new(),
            aggregates: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    /// Runs the pipeline to completion.
    ///
    /// Loads the rent and home-value sources in fixed order, then derives
    /// the metrics: latest rent, rent growth, latest home value. A load
    /// failure aborts the run; a per-region metric failure is recorded in
    /// the report and the remaining regions proceed.
    pub fn run(mut self) -> Result<AnalysisReport> {
        let rent_source = SourceSpec::rent_index();
        let home_source = SourceSpec::home_value_index();

        info!(source = rent_source.name, "Loading rent index");
        self.rents = load_source(
            &rent_source.path(&self.data_dir),
            &self.schema,
            &mut self.registry,
        )?;

        info!(source = home_source.name, "Loading home value index");
        self.home_values = load_source(
            &home_source.path(&self.data_dir),
            &self.schema,
            &mut self.registry,
        )?;

        apply_metric(
            &self.rents,
            AVERAGE_RENT,
            &mut self.aggregates,
            &self.registry,
            &mut self.failures,
            latest_value,
        );
        apply_metric(
            &self.rents,
            RENT_GROWTH,
            &mut self.aggregates,
            &self.registry,
            &mut self.failures,
            rent_growth,
        );
        apply_metric(
            &self.home_values,
            AVERAGE_HOME_VALUE,
            &mut self.aggregates,
            &self.registry,
            &mut self.failures,
            latest_value,
        );

        info!(
            regions = self.aggregates.len(),
            failures = self.failures.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            generated_at: Utc::now(),
            regions: self.aggregates,
            failures: self.failures,
        })
    }
}

/// Runs one metric over every region of a series table, merging metadata and
/// inserting the computed value. A region whose computation fails is logged,
/// recorded, and skipped.
fn apply_metric<F>(
    table: &SeriesTable,
    metric: &'static str,
    aggregates: &mut BTreeMap<String, AggregateRecord>,
    registry: &HeaderRegistry,
    failures: &mut Vec<RegionFailure>,
    compute: F,
) where
    F: Fn(&str, &TimeSeriesRecord) -> Result<f64, MetricError>,
{
    for (region, record) in table {
        match compute(region, record) {
            Ok(value) => {
                let entry = ensure_entry(aggregates, registry, region, record);
                entry.insert(metric.to_string(), MetricValue::Number(value));
            }
            Err(err) => {
                warn!(region = %region, metric, error = %err, "Metric skipped");
                failures.push(RegionFailure {
                    region: region.clone(),
                    metric: metric.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }
}
