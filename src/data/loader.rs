use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// Columns every input file must provide. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("the file contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load launch records from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the four required columns
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – one column per required field
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    LaunchDataset::from_records(records).ok_or(LoadError::Empty)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject payloads the range filter cannot reason about.
fn check_payload(row: usize, payload: f64) -> Result<f64, LoadError> {
    if payload.is_finite() && payload >= 0.0 {
        Ok(payload)
    } else {
        Err(LoadError::InvalidValue {
            row,
            column: COL_PAYLOAD.to_string(),
            value: payload.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// The required columns may appear in any position among other columns.
pub fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    read_csv(open(path)?)
}

pub fn read_csv(reader: impl std::io::Read) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let record: LaunchRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| invalid_csv_cell(row_no, &headers, &row, e))?;
        check_payload(row_no, record.payload_mass_kg)?;
        records.push(record);
    }
    Ok(records)
}

fn invalid_csv_cell(
    row_no: usize,
    headers: &csv::StringRecord,
    row: &csv::StringRecord,
    err: csv::Error,
) -> LoadError {
    if !matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) {
        return LoadError::Csv(err);
    }
    let field = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => de.field().map(|i| i as usize),
        _ => None,
    };
    LoadError::InvalidValue {
        row: row_no,
        column: field
            .and_then(|i| headers.get(i))
            .unwrap_or_default()
            .to_string(),
        value: field
            .and_then(|i| row.get(i))
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 1,
///     "Booster Version Category": "v1.1"
///   },
///   ...
/// ]
/// ```
pub fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Vec<LaunchRecord>, LoadError> {
    let rows: Vec<JsonValue> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let Some(obj) = row.as_object() else {
            return Err(LoadError::InvalidValue {
                row: i,
                column: String::new(),
                value: row.to_string(),
            });
        };
        if let Some(col) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
            return Err(LoadError::MissingColumn(col.to_string()));
        }
        let record: LaunchRecord = serde_json::from_value(row)?;
        check_payload(i, record.payload_mass_kg)?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Numeric columns may use any integer or float type, string columns Utf8 or
/// LargeUtf8. Files written by Pandas (`df.to_parquet()`) and Polars both
/// work.
pub fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = records.len();
        records.extend(records_from_batch(&batch, offset)?);
    }
    Ok(records)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn records_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<LaunchRecord>, LoadError> {
    let sites = string_column(column(batch, COL_SITE)?)?;
    let boosters = string_column(column(batch, COL_BOOSTER)?)?;
    let payloads = float_column(column(batch, COL_PAYLOAD)?)?;
    let classes = float_column(column(batch, COL_CLASS)?)?;

    let null_cell = |row: usize, col: &str| LoadError::InvalidValue {
        row: offset + row,
        column: col.to_string(),
        value: "null".to_string(),
    };

    (0..batch.num_rows())
        .map(|row| {
            let site = sites[row].clone().ok_or_else(|| null_cell(row, COL_SITE))?;
            let booster = boosters[row]
                .clone()
                .ok_or_else(|| null_cell(row, COL_BOOSTER))?;
            if payloads.is_null(row) {
                return Err(null_cell(row, COL_PAYLOAD));
            }
            if classes.is_null(row) {
                return Err(null_cell(row, COL_CLASS));
            }
            let class = classes.value(row);
            let outcome = Outcome::from_f64(class).ok_or_else(|| LoadError::InvalidValue {
                row: offset + row,
                column: COL_CLASS.to_string(),
                value: class.to_string(),
            })?;

            Ok(LaunchRecord {
                launch_site: site,
                payload_mass_kg: check_payload(offset + row, payloads.value(row))?,
                outcome,
                booster_category: booster,
            })
        })
        .collect()
}

// -- Arrow helpers --

fn float_column(col: &ArrayRef) -> Result<Float64Array, LoadError> {
    let casted = cast(col, &DataType::Float64)?;
    Ok(casted.as_primitive::<Float64Type>().clone())
}

fn string_column(col: &ArrayRef) -> Result<Vec<Option<String>>, LoadError> {
    let casted = cast(col, &DataType::Utf8)?;
    Ok(casted
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const CSV_TEXT: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,17,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
3,19,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_load_csv_with_extra_columns() {
        let file = write_temp(".csv", CSV_TEXT.as_bytes());
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[2].launch_site, "VAFB SLC-4E");
        assert_eq!(ds.records[2].outcome, Outcome::Success);
        assert_eq!(ds.records[2].booster_category, "FT");
        assert_eq!(ds.payload_bounds.min, 0.0);
        assert_eq!(ds.payload_bounds.max, 9600.0);
        assert_eq!(ds.sites.len(), 3);
    }

    #[test]
    fn test_missing_column() {
        let err = read_csv("Launch Site,class,Booster Version Category\nA,1,FT\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == COL_PAYLOAD));
    }

    #[test]
    fn test_invalid_class_value() {
        let text = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,100,7,FT\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn test_negative_payload_rejected() {
        let text = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-5,1,FT\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { ref column, .. } if column == COL_PAYLOAD));
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", b"");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let file = write_temp(
            ".csv",
            b"Launch Site,Payload Mass (kg),class,Booster Version Category\n",
        );
        assert!(matches!(load_file(file.path()), Err(LoadError::Empty)));
    }

    #[test]
    fn test_parse_json_records() {
        let text = r#"[
            {"Launch Site": "A", "Payload Mass (kg)": 500.0, "class": 1, "Booster Version Category": "v1", "Flight Number": 3},
            {"Launch Site": "B", "Payload Mass (kg)": 3000, "class": 0, "Booster Version Category": "v2"}
        ]"#;
        let records = parse_json(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].payload_mass_kg, 3000.0);
        assert_eq!(records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn test_parse_json_missing_key() {
        let text = r#"[{"Launch Site": "A", "class": 1, "Booster Version Category": "v1"}]"#;
        let err = parse_json(text).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == COL_PAYLOAD));
    }

    #[test]
    fn test_load_parquet() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![500.0, 3000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1", "v2"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].launch_site, "A");
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].payload_mass_kg, 3000.0);
        assert_eq!(ds.booster_categories, vec!["v1", "v2"]);
    }

    #[test]
    fn test_parquet_missing_column() {
        let schema = Arc::new(Schema::new(vec![Field::new(COL_SITE, DataType::Utf8, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(StringArray::from(vec!["A"]))],
        )
        .unwrap();
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn(_))
        ));
    }
}
