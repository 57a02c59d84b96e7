//! Ride record model and the canonical category enumerations

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meteorological season, declared in canonical presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }

    /// Parse a season name (case-insensitive) or a numeric code 1-4
    ///
    /// Numeric codes follow the canonical order: 1 = Winter ... 4 = Fall.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "winter" | "1" => Some(Season::Winter),
            "spring" | "2" => Some(Season::Spring),
            "summer" | "3" => Some(Season::Summer),
            "fall" | "autumn" | "4" => Some(Season::Fall),
            _ => None,
        }
    }

    pub fn all() -> [Season; 4] {
        [Season::Winter, Season::Spring, Season::Summer, Season::Fall]
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month, declared in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter label used for chart axes
    pub fn short(&self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Month from its 1-based calendar number
    pub fn from_number(n: u32) -> Option<Self> {
        Self::all().get(n.checked_sub(1)? as usize).copied()
    }

    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Parse a full month name, a three-letter abbreviation, or a number 1-12
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Self::from_number(n);
        }
        let lower = s.to_lowercase();
        Self::all().into_iter().find(|m| {
            let name = m.as_str().to_lowercase();
            name == lower || (lower.len() == 3 && name.starts_with(&lower))
        })
    }

    pub fn all() -> [Month; 12] {
        [
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Year/month bucket derived from a date truncated to its month
///
/// Field order makes the derived `Ord` chronological, which is also the
/// lexicographic order of the `YYYY-MM` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the source table: rider counts for a single date and hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub month: Month,
    pub season: Season,
    /// Raw year indicator from the dataset (0/1 offsets or a calendar year)
    pub year: u16,
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

impl RideRecord {
    /// Whether `total == casual + registered` holds for this row
    pub fn is_consistent(&self) -> bool {
        self.casual
            .checked_add(self.registered)
            .is_some_and(|riders| riders == self.total)
    }
}
