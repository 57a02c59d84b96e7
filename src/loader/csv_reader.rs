//! CSV ride table reader
//!
//! Header-driven: columns are matched by name, in any order, and extra
//! columns (weather, temperature, ...) are ignored.

use super::backend::{check_columns, LoadError, RawRide, RideSource};
use crate::record::RideRecord;
use std::path::{Path, PathBuf};

pub struct CsvRideReader {
    path: PathBuf,
}

impl CsvRideReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RideSource for CsvRideReader {
    fn read_all(&mut self) -> Result<Vec<RideRecord>, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        check_columns(&headers)?;

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<RawRide>().enumerate() {
            let raw = result?;
            records.push(raw.into_record(idx + 1)?);
        }

        log::debug!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}
