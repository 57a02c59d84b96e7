//! Loader - reads the ride table once at startup
//!
//! ```text
//! CSV file / SQLite rides table → RideSource backend → RawRide rows
//!     ↓
//! validation (dates, hours, categories, counts)
//!     ↓
//! Vec<RideRecord> → Dataset
//! ```
//!
//! Any validation failure is a `LoadError` and aborts startup.

pub mod backend;
pub mod csv_reader;
pub mod sqlite_reader;

pub use backend::{LoadError, RawRide, RideSource, REQUIRED_COLUMNS};
pub use csv_reader::CsvRideReader;
pub use sqlite_reader::SqliteRideReader;

use crate::config::BackendType;
use crate::record::RideRecord;
use std::path::Path;

/// Unified reader that routes to either the CSV or SQLite backend
pub enum RideReader {
    Csv(CsvRideReader),
    Sqlite(SqliteRideReader),
}

impl RideReader {
    /// Create a reader based on backend type
    pub fn new(backend: BackendType, path: impl AsRef<Path>) -> Self {
        match backend {
            BackendType::Csv => RideReader::Csv(CsvRideReader::new(path)),
            BackendType::Sqlite => RideReader::Sqlite(SqliteRideReader::new(path)),
        }
    }
}

impl RideSource for RideReader {
    fn read_all(&mut self) -> Result<Vec<RideRecord>, LoadError> {
        match self {
            RideReader::Csv(r) => r.read_all(),
            RideReader::Sqlite(r) => r.read_all(),
        }
    }

    fn backend_type(&self) -> &'static str {
        match self {
            RideReader::Csv(r) => r.backend_type(),
            RideReader::Sqlite(r) => r.backend_type(),
        }
    }
}

/// Read every record from `source`, rejecting an empty table
///
/// Rows violating `cnt == casual + registered` are kept as-is and only
/// counted in a warning.
pub fn load_records(source: &mut dyn RideSource) -> Result<Vec<RideRecord>, LoadError> {
    let records = source.read_all()?;
    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let inconsistent = records.iter().filter(|r| !r.is_consistent()).count();
    if inconsistent > 0 {
        log::warn!(
            "⚠️  {} of {} rows have cnt != casual + registered",
            inconsistent,
            records.len()
        );
    }

    log::info!("📥 Loaded {} rows via {} backend", records.len(), source.backend_type());
    Ok(records)
}
