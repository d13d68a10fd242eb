use std::path::PathBuf;

use thiserror::Error;

/// Failures while walking the listing endpoint. All of them abort the fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for page {page} failed: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("page {page} is not a valid listing response: {source}")]
    Parse {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("page {page}: {source}")]
    Normalize {
        page: u32,
        #[source]
        source: NormalizeError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("posting from {company:?} has no locations")]
    EmptyLocations { company: String },
}

/// Failures reading a previously exported records file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0:?} not found")]
    NotFound(PathBuf),
    #[error("{path:?} is not valid records JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv export to {path:?} failed: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("json export to {path:?} failed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
}
