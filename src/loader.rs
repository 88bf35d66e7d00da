//! CSV loader for ZIP-code time-series tables.

use crate::error::LoadError;
use crate::schema::{
    DESCRIPTIVE_COUNT, DESCRIPTIVE_START, HeaderRegistry, KEY_COLUMN, SERIES_START, TableSchema,
};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// One region's descriptive fields plus its chronological value series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRecord {
    /// City, state, metro, county, size rank — verbatim from the source row.
    pub descriptive: Vec<String>,
    /// Period labels from the header, parallel to `values`.
    pub periods: Vec<String>,
    /// Parsed series values, time ascending.
    pub values: Vec<f64>,
}

/// All records loaded from one source, keyed by ZIP code.
pub type SeriesTable = HashMap<String, TimeSeriesRecord>;

/// Loads a CSV source into a [`SeriesTable`].
///
/// The header is validated against `schema` before any row is read, and the
/// first successful load populates `registry`. Series cells are parsed to
/// `f64` here, at the boundary, so the metric passes never see raw text.
/// A ZIP code appearing on more than one row keeps the last row's fields and
/// series.
///
/// # Errors
///
/// [`LoadError::SourceUnavailable`] if the file cannot be opened,
/// [`LoadError::MissingHeader`] / [`LoadError::SchemaMismatch`] for a bad
/// header, [`LoadError::MalformedRow`] for a row with fewer than
/// [`SERIES_START`] columns, and [`LoadError::NonNumericCell`] for a series
/// cell that does not parse.
pub fn load_source(
    path: &Path,
    schema: &TableSchema,
    registry: &mut HeaderRegistry,
) -> Result<SeriesTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let header: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(str::to_string).collect(),
        Err(source) => {
            return Err(LoadError::Csv {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if header.is_empty() {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    schema.validate(path, &header)?;
    registry.record_once(&header);

    let mut table = SeriesTable::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // Header occupies line 1.
        let line = row_index as u64 + 2;

        if record.len() < SERIES_START {
            return Err(LoadError::MalformedRow {
                path: path.to_path_buf(),
                line,
                min: SERIES_START,
                found: record.len(),
            });
        }

        let zip = record[KEY_COLUMN].to_string();
        let descriptive: Vec<String> = (DESCRIPTIVE_START..DESCRIPTIVE_START + DESCRIPTIVE_COUNT)
            .map(|column| record[column].to_string())
            .collect();

        let mut periods = Vec::with_capacity(record.len() - SERIES_START);
        let mut values = Vec::with_capacity(record.len() - SERIES_START);
        for column in SERIES_START..record.len() {
            let label = header
                .get(column)
                .cloned()
                .unwrap_or_else(|| format!("column {column}"));
            let raw = record[column].trim();
            let value: f64 = raw.parse().map_err(|_| LoadError::NonNumericCell {
                path: path.to_path_buf(),
                region: zip.clone(),
                column: label.clone(),
                value: raw.to_string(),
            })?;
            periods.push(label);
            values.push(value);
        }

        // Last write wins for duplicate ZIP codes.
        table.insert(
            zip,
            TimeSeriesRecord {
                descriptive,
                periods,
                values,
            },
        );
    }

    info!(path = %path.display(), regions = table.len(), "Source loaded");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    const HEADER: &str =
        "RegionID,RegionName,City,State,Metro,CountyName,SizeRank,2019-01,2019-02,2019-03";

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn load(path: &Path) -> Result<SeriesTable, LoadError> {
        let schema = TableSchema::default();
        let mut registry = HeaderRegistry::default();
        load_source(path, &schema, &mut registry)
    }

    #[test]
    fn test_load_splits_row_into_fields_and_series() {
        let path = temp_csv(
            "house_analysis_load_basic.csv",
            &format!("{HEADER}\n61639,10025,New York,NY,New York-Newark,New York County,1,1200,1225,1250\n"),
        );

        let table = load(&path).unwrap();
        assert_eq!(table.len(), 1);

        let record = &table["10025"];
        assert_eq!(
            record.descriptive,
            vec!["New York", "NY", "New York-Newark", "New York County", "1"]
        );
        assert_eq!(record.periods, vec!["2019-01", "2019-02", "2019-03"]);
        assert_eq!(record.values, vec![1200.0, 1225.0, 1250.0]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_duplicate_zip_last_row_wins() {
        let path = temp_csv(
            "house_analysis_load_dup.csv",
            &format!(
                "{HEADER}\n\
                 61639,10025,New York,NY,New York-Newark,New York County,1,1200,1225,1250\n\
                 99999,10025,Albany,NY,Albany-Schenectady,Albany County,9,900,910,920\n"
            ),
        );

        let table = load(&path).unwrap();
        assert_eq!(table.len(), 1);

        let record = &table["10025"];
        assert_eq!(record.descriptive[0], "Albany");
        assert_eq!(record.values, vec![900.0, 910.0, 920.0]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_schema_mismatch() {
        let path = temp_csv(
            "house_analysis_load_schema.csv",
            "RegionID,ZipCode,City,State,Metro,CountyName,SizeRank,2019-01\n\
             61639,10025,New York,NY,New York-Newark,New York County,1,1200\n",
        );

        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::SchemaMismatch { position: 1, .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_short_row() {
        let path = temp_csv(
            "house_analysis_load_short.csv",
            &format!("{HEADER}\n61639,10025,New York,NY\n"),
        );

        let err = load(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedRow {
                line: 2,
                min: SERIES_START,
                found: 4,
                ..
            }
        ));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_non_numeric_cell() {
        let path = temp_csv(
            "house_analysis_load_nan.csv",
            &format!("{HEADER}\n61639,10025,New York,NY,New York-Newark,New York County,1,1200,n/a,1250\n"),
        );

        let err = load(&path).unwrap_err();
        match err {
            LoadError::NonNumericCell {
                region,
                column,
                value,
                ..
            } => {
                assert_eq!(region, "10025");
                assert_eq!(column, "2019-02");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_source_is_fatal() {
        let err = load(Path::new("/nonexistent/house_analysis.csv")).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_populates_registry_once() {
        let first = temp_csv(
            "house_analysis_load_reg1.csv",
            &format!("{HEADER}\n61639,10025,New York,NY,New York-Newark,New York County,1,1200,1225,1250\n"),
        );
        let second = temp_csv(
            "house_analysis_load_reg2.csv",
            "RegionID,RegionName,City,State,Metro,CountyName,SizeRank,2020-01\n\
             61639,10025,New York,NY,New York-Newark,New York County,1,640000\n",
        );

        let schema = TableSchema::default();
        let mut registry = HeaderRegistry::default();
        load_source(&first, &schema, &mut registry).unwrap();
        load_source(&second, &schema, &mut registry).unwrap();

        // Registry keeps the first source's header.
        assert_eq!(registry.columns().unwrap().len(), 10);
        assert_eq!(registry.columns().unwrap()[7], "2019-01");

        fs::remove_file(&first).unwrap();
        fs::remove_file(&second).unwrap();
    }

    #[test]
    fn test_load_tolerates_short_series_rows() {
        // Rows may carry fewer periods than the header; the series is
        // truncated to what the row provides.
        let path = temp_csv(
            "house_analysis_load_ragged.csv",
            &format!("{HEADER}\n61639,10025,New York,NY,New York-Newark,New York County,1,1200\n"),
        );

        let table = load(&path).unwrap();
        let record = &table["10025"];
        assert_eq!(record.periods, vec!["2019-01"]);
        assert_eq!(record.values, vec![1200.0]);

        fs::remove_file(&path).unwrap();
    }
}
