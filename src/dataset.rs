//! Loaded ride table and date range validation
//!
//! Lifecycle: loaded once at startup, then only read. Every filter change
//! recomputes its views from this table; nothing here is ever mutated.

use crate::config::BackendType;
use crate::loader::{load_records, LoadError, RideReader};
use crate::record::RideRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Unchecked range; the filter treats `start > end` as empty
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range validated against the dataset's min/max dates
    pub fn within(start: NaiveDate, end: NaiveDate, dataset: &Dataset) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        let bounds = dataset.full_range();
        for date in [start, end] {
            if date < bounds.start || date > bounds.end {
                return Err(RangeError::OutOfBounds { date, bounds });
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered (0 when inverted)
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeError {
    Inverted { start: NaiveDate, end: NaiveDate },
    OutOfBounds { date: NaiveDate, bounds: DateRange },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::Inverted { start, end } => {
                write!(f, "Start date {} is after end date {}", start, end)
            }
            RangeError::OutOfBounds { date, bounds } => {
                write!(f, "Date {} is outside the dataset range {}", date, bounds)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// In-memory ride table plus its date bounds
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<RideRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl Dataset {
    /// Build from already validated records; `None` if there are none
    pub fn from_records(records: Vec<RideRecord>) -> Option<Self> {
        let min_date = records.iter().map(|r| r.date).min()?;
        let max_date = records.iter().map(|r| r.date).max()?;
        Some(Self {
            records,
            min_date,
            max_date,
        })
    }

    /// Load from a CSV file or SQLite database
    pub fn load(backend: BackendType, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut reader = RideReader::new(backend, path);
        let records = load_records(&mut reader)?;
        Self::from_records(records).ok_or(LoadError::Empty)
    }

    pub fn records(&self) -> &[RideRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// `[min_date, max_date]`, the default filter
    pub fn full_range(&self) -> DateRange {
        DateRange::new(self.min_date, self.max_date)
    }

    /// Clamp a date into the dataset bounds
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min_date, self.max_date)
    }
}
