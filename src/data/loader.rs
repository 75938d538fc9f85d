use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::fallback::fallback_dataset;
use super::model::{CountryRecord, Dataset, REQUIRED_COLUMNS};
use super::DataError;
use crate::config::SUPPORTED_REGIONS;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Where the active dataset came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    /// Built-in table; carries the reason no file was used.
    Fallback { reason: String },
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Fallback { .. } => write!(f, "built-in dataset (10 countries)"),
        }
    }
}

/// Result of [`load_or_fallback`]: always a usable dataset.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub source: DataSource,
}

/// Try each candidate path in order and return the first dataset that loads.
/// When none does, return the built-in fallback table. Never fails.
pub fn load_or_fallback(candidates: &[PathBuf]) -> LoadOutcome {
    let mut reasons = Vec::new();

    for path in candidates {
        if !path.exists() {
            reasons.push(format!("{}: not found", path.display()));
            continue;
        }
        match load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} countries from {}", dataset.len(), path.display());
                return LoadOutcome {
                    dataset,
                    source: DataSource::File(path.clone()),
                };
            }
            Err(e) => {
                log::warn!("Failed to load {}: {e:#}", path.display());
                reasons.push(format!("{}: {e:#}", path.display()));
            }
        }
    }

    let reason = if reasons.is_empty() {
        "no data file configured".to_string()
    } else {
        reasons.join("; ")
    };
    log::warn!("Using built-in dataset ({reason})");
    LoadOutcome {
        dataset: fallback_dataset(),
        source: DataSource::Fallback { reason },
    }
}

/// Load a tower dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one country per row
/// * `.json`    – `[{ "country": "...", "total_cells": 123, ... }, ...]`
/// * `.parquet` – one column per field (written by Pandas, Polars or
///   the `generate_sample` binary)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string()).into()),
    };

    let dataset = Dataset::from_records(records)?;
    for region in &dataset.regions {
        if !SUPPORTED_REGIONS.contains(&region.as_str()) {
            log::warn!("{}: unknown region '{region}'", path.display());
        }
    }
    Ok(dataset)
}

fn check_required(columns: &[String]) -> Result<(), DataError> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(DataError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with (at least) the required column names.
/// Optional columns may be absent or left empty; extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<CountryRecord>> {
    let file = File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text from any reader.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Vec<CountryRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    check_required(&headers)?;

    reader
        .deserialize::<CountryRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "country": "Chile", "total_cells": 208660, "gsm": 32244, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<CountryRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse records-oriented JSON text.
pub fn parse_json(text: &str) -> Result<Vec<CountryRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let keys: Vec<String> = obj.keys().cloned().collect();
        check_required(&keys)?;

        // Pandas writes missing values as null; serde maps them to None.
        let record: CountryRecord = serde_json::from_value(row.clone())
            .with_context(|| format!("Row {i}: invalid record"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per record field.
///
/// Count columns may be any integer type; float columns Float32/Float64;
/// text columns Utf8/LargeUtf8. Nulls in optional columns become `None`.
fn load_parquet(path: &Path) -> Result<Vec<CountryRecord>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(batch_to_records(&batch)?);
    }
    Ok(records)
}

fn batch_to_records(batch: &RecordBatch) -> Result<Vec<CountryRecord>> {
    let schema = batch.schema();
    let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    check_required(&names)?;

    let country = to_strings(required(batch, "country")?)?;
    let total_cells = to_counts(required(batch, "total_cells")?, "total_cells")?;
    let gsm = to_counts(required(batch, "gsm")?, "gsm")?;
    let umts = to_counts(required(batch, "umts")?, "umts")?;
    let lte = to_counts(required(batch, "lte")?, "lte")?;
    let nr = to_counts(required(batch, "nr")?, "nr")?;
    let population = column(batch, "population_millions").map(to_floats).transpose()?;
    let latitude = column(batch, "latitude").map(to_floats).transpose()?;
    let longitude = column(batch, "longitude").map(to_floats).transpose()?;
    let region = column(batch, "region").map(to_strings).transpose()?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let country = country[row]
            .clone()
            .with_context(|| format!("Row {row}: null country"))?;
        records.push(CountryRecord {
            country,
            total_cells: total_cells[row],
            gsm: gsm[row],
            umts: umts[row],
            lte: lte[row],
            nr: nr[row],
            population_millions: population.as_ref().and_then(|c| c[row]),
            latitude: latitude.as_ref().and_then(|c| c[row]),
            longitude: longitude.as_ref().and_then(|c| c[row]),
            region: region.as_ref().and_then(|c| c[row].clone()),
        });
    }
    Ok(records)
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    batch.schema_ref().index_of(name).ok().map(|i| batch.column(i))
}

fn required<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    column(batch, name).with_context(|| format!("missing column '{name}'"))
}

/// Read a non-null, non-negative integer column.
fn to_counts(col: &ArrayRef, name: &str) -> Result<Vec<u64>> {
    let casted = arrow::compute::cast(col, &DataType::Int64)
        .with_context(|| format!("column '{name}' is not numeric ({:?})", col.data_type()))?;
    let ints = casted.as_primitive::<Int64Type>();
    (0..ints.len())
        .map(|row| {
            if ints.is_null(row) {
                bail!("Row {row}: null value in '{name}'");
            }
            u64::try_from(ints.value(row))
                .with_context(|| format!("Row {row}: negative value in '{name}'"))
        })
        .collect()
}

fn to_floats(col: &ArrayRef) -> Result<Vec<Option<f64>>> {
    let casted = arrow::compute::cast(col, &DataType::Float64)
        .with_context(|| format!("expected a float column, got {:?}", col.data_type()))?;
    let floats = casted.as_primitive::<Float64Type>();
    Ok(floats.iter().collect())
}

fn to_strings(col: &ArrayRef) -> Result<Vec<Option<String>>> {
    let casted = arrow::compute::cast(col, &DataType::Utf8)
        .with_context(|| format!("expected a text column, got {:?}", col.data_type()))?;
    let strings = casted.as_string::<i32>();
    Ok(strings.iter().map(|s| s.map(str::to_string)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
country,total_cells,gsm,umts,lte,nr,population_millions,latitude,longitude,region
Chile,208660,32244,140895,35521,0,19.1,-35.6751,-71.5430,South America
Cuba,5000,3000,1500,500,0,,,,Caribbean
";

    #[test]
    fn csv_with_empty_optional_fields() {
        let records = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].population_millions, Some(19.1));
        assert_eq!(records[1].population_millions, None);
        assert_eq!(records[1].coordinates(), None);
        assert_eq!(records[1].region.as_deref(), Some("Caribbean"));
    }

    #[test]
    fn csv_without_optional_columns_and_with_extras() {
        let text = "country,total_cells,gsm,umts,lte,nr,operator_count\nChile,10,1,2,3,4,7\n";
        let records = read_csv(text.as_bytes()).unwrap();
        assert_eq!(records[0].nr, 4);
        assert_eq!(records[0].region, None);
    }

    #[test]
    fn csv_missing_required_column_is_a_schema_error() {
        let text = "country,total_cells,gsm,umts,lte\nChile,10,1,2,3\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        let schema = err.downcast_ref::<DataError>().unwrap();
        assert!(matches!(schema, DataError::MissingColumn(c) if c == "nr"));
    }

    #[test]
    fn csv_negative_count_fails_with_row_context() {
        let text = "country,total_cells,gsm,umts,lte,nr\nChile,10,1,2,3,4\nPeru,-1,0,0,0,0\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn json_records_with_nulls() {
        let text = r#"[
            {"country": "Chile", "total_cells": 10, "gsm": 1, "umts": 2, "lte": 3, "nr": 4,
             "population_millions": null, "region": "South America"}
        ]"#;
        let records = parse_json(text).unwrap();
        assert_eq!(records[0].population_millions, None);
        assert_eq!(records[0].region.as_deref(), Some("South America"));
    }

    #[test]
    fn json_missing_required_key() {
        let text = r#"[{"country": "Chile", "total_cells": 10}]"#;
        assert!(parse_json(text).is_err());
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("towers.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_candidates_fall_back() {
        let outcome = load_or_fallback(&[PathBuf::from("does/not/exist.csv")]);
        assert_eq!(outcome.dataset.len(), 10);
        match outcome.source {
            DataSource::Fallback { reason } => assert!(reason.contains("not found")),
            other => panic!("unexpected source {other:?}"),
        }
    }
}
