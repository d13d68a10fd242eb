//! Sinks for finished record lists and frequency tables.

pub mod json;
pub mod sqlite;
pub mod tabular;

use std::fs;
use std::path::Path;

use crate::error::ExportError;

/// Create the parent directory of an output file if it is missing.
fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
