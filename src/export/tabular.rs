use std::path::Path;

use csv::Writer;
use tracing::info;

use super::ensure_parent;
use crate::error::ExportError;
use crate::frequency::FrequencyTable;
use crate::posting::FlatRecord;

fn open(path: &Path) -> Result<Writer<std::fs::File>, ExportError> {
    ensure_parent(path)?;
    Writer::from_path(path).map_err(|source| csv_err(path, source))
}

fn csv_err(path: &Path, source: csv::Error) -> ExportError {
    ExportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn finish(path: &Path, mut wtr: Writer<std::fs::File>, rows: usize) -> Result<usize, ExportError> {
    wtr.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Data successfully saved to {:?} ({} rows)", path, rows);
    Ok(rows)
}

/// One row per record; columns `companyName,location,jobCategory,skill`.
pub fn write_records(path: &Path, records: &[FlatRecord]) -> Result<usize, ExportError> {
    let mut wtr = open(path)?;
    if records.is_empty() {
        wtr.write_record(["companyName", "location", "jobCategory", "skill"])
            .map_err(|e| csv_err(path, e))?;
    }
    for record in records {
        wtr.serialize(record).map_err(|e| csv_err(path, e))?;
    }
    finish(path, wtr, records.len())
}

/// One row per ranked skill; columns `tech,freq`.
pub fn write_frequency(path: &Path, table: &FrequencyTable) -> Result<usize, ExportError> {
    let mut wtr = open(path)?;
    wtr.write_record(["tech", "freq"])
        .map_err(|e| csv_err(path, e))?;
    for (tech, freq) in table.iter() {
        wtr.write_record([tech, freq.to_string().as_str()])
            .map_err(|e| csv_err(path, e))?;
    }
    finish(path, wtr, table.len())
}
