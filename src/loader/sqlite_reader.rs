//! SQLite ride table reader
//!
//! Reads the `rides` table (same column names as the CSV layout) in one
//! read-only pass. Cells are cast to text so validation is shared with the
//! CSV backend.

use super::backend::{check_columns, LoadError, RawRide, RideSource};
use crate::record::RideRecord;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

const RIDES_TABLE: &str = "rides";

pub struct SqliteRideReader {
    path: PathBuf,
}

impl SqliteRideReader {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            path: db_path.as_ref().to_path_buf(),
        }
    }

    fn open(&self) -> Result<Connection, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.path.clone()));
        }
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(conn)
    }

    fn table_columns(conn: &Connection) -> Result<Vec<String>, LoadError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", RIDES_TABLE))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }
}

impl RideSource for SqliteRideReader {
    fn read_all(&mut self) -> Result<Vec<RideRecord>, LoadError> {
        let conn = self.open()?;

        let columns = Self::table_columns(&conn)?;
        check_columns(&columns)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT CAST(dteday AS TEXT), CAST(hr AS TEXT), CAST(mnth AS TEXT),
                    CAST(season AS TEXT), CAST(yr AS TEXT), CAST(casual AS TEXT),
                    CAST(registered AS TEXT), CAST(cnt AS TEXT)
             FROM {}
             ORDER BY rowid ASC",
            RIDES_TABLE
        ))?;

        let raw_iter = stmt.query_map([], |row| {
            Ok(RawRide {
                dteday: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                hr: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                mnth: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                season: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                yr: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                casual: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                registered: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                cnt: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            })
        })?;

        let mut records = Vec::new();
        for (idx, raw) in raw_iter.enumerate() {
            records.push(raw?.into_record(idx + 1)?);
        }

        log::debug!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}
