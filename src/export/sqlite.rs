use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{error, info};

use crate::error::DbError;
use crate::frequency::FrequencyTable;
use crate::posting::FlatRecord;

pub fn connect(path: &Path) -> Result<Connection, DbError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tech_frequency (
            id         INTEGER PRIMARY KEY,
            skill      TEXT NOT NULL,
            frequency  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS job_postings (
            id            INTEGER PRIMARY KEY,
            company_name  TEXT NOT NULL,
            location      TEXT NOT NULL,
            job_category  TEXT NOT NULL,
            skill         TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Insert every ranked skill, one statement per row, committed once at the end.
pub fn insert_frequency(conn: &Connection, table: &FrequencyTable) -> Result<usize, DbError> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt =
            tx.prepare("INSERT INTO tech_frequency (skill, frequency) VALUES (?1, ?2)")?;
        for (skill, freq) in table.iter() {
            count += stmt.execute(params![skill, freq as i64])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn insert_postings(conn: &Connection, records: &[FlatRecord]) -> Result<usize, DbError> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO job_postings (company_name, location, job_category, skill)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for r in records {
            count += stmt.execute(params![r.company_name, r.location, r.job_category, r.skill])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Open the database, ensure the schema and run one insert batch.
///
/// Errors stop here: they are logged and `None` is returned. The connection
/// is closed on every path when it goes out of scope.
fn store<F>(path: &Path, what: &str, insert: F) -> Option<usize>
where
    F: FnOnce(&Connection) -> Result<usize, DbError>,
{
    let result = connect(path).and_then(|conn| {
        init_schema(&conn)?;
        insert(&conn)
    });

    match result {
        Ok(n) => {
            info!("Stored {} {} rows in {:?}", n, what, path);
            Some(n)
        }
        Err(e) => {
            error!("Failed to store {} in {:?}: {}", what, path, e);
            None
        }
    }
}

pub fn store_frequency(path: &Path, table: &FrequencyTable) -> Option<usize> {
    store(path, "tech_frequency", |conn| insert_frequency(conn, table))
}

pub fn store_postings(path: &Path, records: &[FlatRecord]) -> Option<usize> {
    store(path, "job_postings", |conn| insert_postings(conn, records))
}
