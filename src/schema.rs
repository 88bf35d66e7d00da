//! Column layout for the Zillow ZIP-code tables.
//!
//! Every source shares the same seven leading columns; everything after them
//! is the chronological period labels. The expected layout is validated
//! against each source's header at load time, so a layout change fails fast
//! instead of silently misreading columns.

use crate::error::LoadError;
use std::path::Path;

/// Leading columns shared by all Zillow ZIP-code tables, in order.
pub const LEADING_COLUMNS: [&str; 7] = [
    "RegionID",
    "RegionName",
    "City",
    "State",
    "Metro",
    "CountyName",
    "SizeRank",
];

/// Index of the identifying key (the ZIP code) within a row.
pub const KEY_COLUMN: usize = 1;

/// First descriptive column copied into aggregate records.
pub const DESCRIPTIVE_START: usize = 2;

/// Number of descriptive columns copied into aggregate records.
pub const DESCRIPTIVE_COUNT: usize = 5;

/// First time-series column.
pub const SERIES_START: usize = 7;

/// Ordered expected leading columns for one table layout.
#[derive(Debug, Clone)]
pub struct TableSchema {
    leading: Vec<String>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            leading: LEADING_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TableSchema {
    /// Validates a source header against the expected leading columns.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SchemaMismatch`] naming the first position where
    /// the header disagrees with the schema. A header shorter than the schema
    /// mismatches at its first missing position.
    pub fn validate(&self, path: &Path, header: &[String]) -> Result<(), LoadError> {
        for (position, expected) in self.leading.iter().enumerate() {
            let found = header.get(position).map(String::as_str).unwrap_or("");
            if found != expected {
                return Err(LoadError::SchemaMismatch {
                    path: path.to_path_buf(),
                    position,
                    expected: expected.clone(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered column names captured from the first-loaded source.
///
/// Used to label the descriptive fields copied into aggregate records. Later
/// loads do not re-derive it; they are held to the same [`TableSchema`]
/// instead, so the labels cannot silently diverge between sources.
#[derive(Debug, Default)]
pub struct HeaderRegistry {
    columns: Option<Vec<String>>,
}

impl HeaderRegistry {
    /// Records the header of the first-loaded source; later calls are no-ops.
    pub fn record_once(&mut self, header: &[String]) {
        if self.columns.is_none() {
            self.columns = Some(header.to_vec());
        }
    }

    pub fn is_populated(&self) -> bool {
        self.columns.is_some()
    }

    /// Full ordered header of the first-loaded source.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Labels for the five descriptive columns.
    ///
    /// Panics if no source has been loaded yet; the pipeline always loads
    /// before merging.
    pub fn descriptive_labels(&self) -> &[String] {
        let columns = self
            .columns
            .as_ref()
            .expect("header registry populated by first load");
        &columns[DESCRIPTIVE_START..DESCRIPTIVE_START + DESCRIPTIVE_COUNT]
    }
}
