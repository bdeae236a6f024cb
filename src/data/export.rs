use std::borrow::Borrow;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::loader::REQUIRED_COLUMNS;
use super::model::LaunchRecord;

/// Write launches with the input column names. The header row is written
/// even when there are no launches.
pub fn write_csv<R: Borrow<LaunchRecord>>(writer: impl Write, records: &[R]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(REQUIRED_COLUMNS)?;
    }
    for r in records {
        let record: &LaunchRecord = r.borrow();
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(Into::into)
}

pub fn write_json<T: Serialize>(writer: impl Write, records: &[T]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, records)
}

/// Save launch records to `path`: `.json` writes a records array, `.csv` uses
/// the input column names. Other extensions are rejected.
pub fn save_records(path: &Path, records: &[&LaunchRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "json" && ext != "csv" {
        bail!("Unsupported export extension: .{ext}");
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    if ext == "json" {
        write_json(file, records).context("writing JSON")?;
    } else {
        write_csv(file, records).context("writing CSV")?;
    }
    Ok(())
}
