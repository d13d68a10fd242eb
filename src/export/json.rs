use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::ensure_parent;
use crate::error::{ExportError, LoadError};
use crate::posting::FlatRecord;

/// Pretty-printed UTF-8 JSON. Non-ASCII text is written as-is, not `\u` escaped.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)?;

    info!("Data successfully saved to {:?}", path);
    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<FlatRecord>, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FlatRecord> {
        vec![
            FlatRecord {
                company_name: "토스".to_string(),
                location: "서울 강남구".to_string(),
                job_category: "서버/백엔드 개발자".to_string(),
                skill: "Kotlin, Spring".to_string(),
            },
            FlatRecord {
                company_name: "Acme".to_string(),
                location: "Busan".to_string(),
                job_category: "DevOps".to_string(),
                skill: String::new(),
            },
        ]
    }

    #[test]
    fn writes_pretty_unescaped_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/tech_info.json");
        write_json(&path, &sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"companyName\": \"토스\""));
        assert!(!text.contains("\\u"));
        assert!(text.contains('\n'));
    }

    #[test]
    fn records_read_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tech_info.json");
        write_json(&path, &sample()).unwrap();
        assert_eq!(read_records(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"tech\": [").unwrap();
        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
