//! Reader backend trait and shared row validation
//!
//! Both backends hand rows over as raw text cells; validation into a typed
//! `RideRecord` happens here so every backend reports the same errors.

use crate::record::{Month, RideRecord, Season};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::PathBuf;

/// Columns every ride table must carry (extra columns are ignored)
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "dteday",
    "hr",
    "mnth",
    "season",
    "yr",
    "casual",
    "registered",
    "cnt",
];

#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Io(std::io::Error),
    Csv(csv::Error),
    Database(rusqlite::Error),
    MissingColumn(String),
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    Empty,
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        LoadError::Database(err)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "Dataset file not found: {}", path.display()),
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Csv(e) => write!(f, "CSV error: {}", e),
            LoadError::Database(e) => write!(f, "Database error: {}", e),
            LoadError::MissingColumn(col) => write!(f, "Missing required column: {}", col),
            LoadError::InvalidValue { row, column, value } => {
                write!(f, "Invalid value '{}' in column '{}' at row {}", value, column, row)
            }
            LoadError::Empty => write!(f, "Dataset contains no rows"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Backend trait for reading the ride table
pub trait RideSource {
    /// Read and validate every row of the table
    fn read_all(&mut self) -> Result<Vec<RideRecord>, LoadError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}

/// Fail with the first required column absent from `columns`
pub fn check_columns<S: AsRef<str>>(columns: &[S]) -> Result<(), LoadError> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c.as_ref().trim() == required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

/// One row as text cells, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawRide {
    pub dteday: String,
    pub hr: String,
    pub mnth: String,
    pub season: String,
    pub yr: String,
    pub casual: String,
    pub registered: String,
    pub cnt: String,
}

impl RawRide {
    /// Validate into a typed record; `row` is the 1-based data row number
    pub fn into_record(self, row: usize) -> Result<RideRecord, LoadError> {
        let invalid = |column: &'static str, value: &str| LoadError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        };

        let date = parse_date(&self.dteday).ok_or_else(|| invalid("dteday", &self.dteday))?;

        let hour = parse_count(&self.hr)
            .filter(|h| *h <= 23)
            .ok_or_else(|| invalid("hr", &self.hr))? as u8;

        let month = Month::from_str(&self.mnth).ok_or_else(|| invalid("mnth", &self.mnth))?;
        let season = Season::from_str(&self.season).ok_or_else(|| invalid("season", &self.season))?;

        let year = parse_count(&self.yr)
            .and_then(|y| u16::try_from(y).ok())
            .ok_or_else(|| invalid("yr", &self.yr))?;

        let casual = parse_count(&self.casual).ok_or_else(|| invalid("casual", &self.casual))?;
        let registered =
            parse_count(&self.registered).ok_or_else(|| invalid("registered", &self.registered))?;
        let total = parse_count(&self.cnt).ok_or_else(|| invalid("cnt", &self.cnt))?;

        Ok(RideRecord {
            date,
            hour,
            month,
            season,
            year,
            casual,
            registered,
            total,
        })
    }
}

/// Parse a calendar day from `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `MM/DD/YYYY`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

/// Largest accepted cell value; sums over a table are accumulated in `u64`
pub const MAX_COUNT: u64 = u32::MAX as u64;

/// Parse a non-negative integer count up to `MAX_COUNT`, accepting integral floats like `12.0`
fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    let n = match s.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            let f = s.parse::<f64>().ok()?;
            if !(f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= MAX_COUNT as f64) {
                return None;
            }
            f as u64
        }
    };
    (n <= MAX_COUNT).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(dteday: &str, hr: &str) -> RawRide {
        RawRide {
            dteday: dteday.to_string(),
            hr: hr.to_string(),
            mnth: "January".to_string(),
            season: "Winter".to_string(),
            yr: "0".to_string(),
            casual: "3".to_string(),
            registered: "13".to_string(),
            cnt: "16".to_string(),
        }
    }

    #[test]
    fn test_valid_row() {
        let record = raw("2011-01-01", "0").into_record(1).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(record.hour, 0);
        assert_eq!(record.month, Month::January);
        assert_eq!(record.season, Season::Winter);
        assert_eq!(record.year, 0);
        assert_eq!(record.total, 16);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2012, 3, 7);
        assert_eq!(parse_date("2012-03-07"), expected);
        assert_eq!(parse_date("2012-03-07 00:00:00"), expected);
        assert_eq!(parse_date("03/07/2012"), expected);
        assert_eq!(parse_date("7 March 2012"), None);
    }

    #[test]
    fn test_invalid_date_reports_row_and_column() {
        let err = raw("2011-13-01", "0").into_record(42).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 42);
                assert_eq!(column, "dteday");
                assert_eq!(value, "2011-13-01");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_hour_out_of_range() {
        let err = raw("2011-01-01", "24").into_record(1).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { column: "hr", .. }));
    }

    #[test]
    fn test_integral_float_counts() {
        let mut row = raw("2011-01-01", "5.0");
        row.casual = "3.0".to_string();
        let record = row.into_record(1).unwrap();
        assert_eq!(record.hour, 5);
        assert_eq!(record.casual, 3);

        let mut row = raw("2011-01-01", "5");
        row.registered = "1.5".to_string();
        assert!(row.into_record(1).is_err());
    }

    #[test]
    fn test_check_columns() {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push("temp".to_string());
        assert!(check_columns(&columns).is_ok());

        columns.retain(|c| c != "registered");
        match check_columns(&columns) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "registered"),
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn test_count_upper_bound() {
        let mut row = raw("2011-01-01", "0");
        row.casual = MAX_COUNT.to_string();
        assert_eq!(row.into_record(1).unwrap().casual, MAX_COUNT);

        let mut row = raw("2011-01-01", "0");
        row.casual = (MAX_COUNT + 1).to_string();
        assert!(matches!(
            row.into_record(1),
            Err(LoadError::InvalidValue { column: "casual", .. })
        ));
    }
}
