//! The six aggregate views over a filtered set of ride records
//!
//! All functions take any iterator of record references, so they run the
//! same over the filtered subset or the whole table. Zero input rows give
//! zero sums and empty grouped views.

use super::ordering::CategoryTotals;
use crate::record::{Month, RideRecord, Season, YearMonth};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single-row sums of casual, registered and total counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub casual: u64,
    pub registered: u64,
    /// Sum of the `cnt` column
    pub total: u64,
}

impl UserSummary {
    /// Casual + registered, independent of the stored `cnt` column
    pub fn riders(&self) -> u64 {
        self.casual + self.registered
    }

    pub fn share(&self) -> UserShare {
        let riders = self.riders();
        if riders == 0 {
            return UserShare::default();
        }
        UserShare {
            casual: self.casual as f64 / riders as f64,
            registered: self.registered as f64 / riders as f64,
        }
    }
}

/// Fractions of casual vs registered riders (both 0 without riders)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserShare {
    pub casual: f64,
    pub registered: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotals {
    /// Raw year indicator as stored in the dataset
    pub year: u16,
    pub casual: u64,
    pub registered: u64,
}

impl YearTotals {
    /// Calendar year, treating indicators below 1000 as offsets from `base_year`
    pub fn calendar_year(&self, base_year: i32) -> i32 {
        if self.year < 1000 {
            base_year + self.year as i32
        } else {
            self.year as i32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month_year: YearMonth,
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

/// Per-hour average riders across every day in the range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourStat {
    pub hour: u8,
    pub casual_mean: f64,
    pub registered_mean: f64,
    /// `casual_mean + registered_mean`, not the mean of `cnt`
    pub total: f64,
    /// Rows that contributed to this hour
    pub samples: usize,
}

pub fn user_summary<'a, I>(rows: I) -> UserSummary
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    rows.into_iter().fold(UserSummary::default(), |mut acc, r| {
        acc.casual += r.casual;
        acc.registered += r.registered;
        acc.total += r.total;
        acc
    })
}

/// Casual and registered sums per distinct year indicator, ascending
pub fn users_by_year<'a, I>(rows: I) -> Vec<YearTotals>
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    let mut groups: BTreeMap<u16, (u64, u64)> = BTreeMap::new();
    for r in rows {
        let entry = groups.entry(r.year).or_default();
        entry.0 += r.casual;
        entry.1 += r.registered;
    }

    groups
        .into_iter()
        .map(|(year, (casual, registered))| YearTotals {
            year,
            casual,
            registered,
        })
        .collect()
}

/// Sums per year-month of each record's date, in chronological order
pub fn monthly_trend<'a, I>(rows: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    let mut groups: BTreeMap<YearMonth, UserSummary> = BTreeMap::new();
    for r in rows {
        let entry = groups.entry(YearMonth::from_date(r.date)).or_default();
        entry.casual += r.casual;
        entry.registered += r.registered;
        entry.total += r.total;
    }

    groups
        .into_iter()
        .map(|(month_year, sums)| TrendPoint {
            month_year,
            casual: sums.casual,
            registered: sums.registered,
            total: sums.total,
        })
        .collect()
}

/// Total count per season (unordered; see `CategoryTotals::ordered`)
pub fn users_by_season<'a, I>(rows: I) -> CategoryTotals<Season>
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    rows.into_iter().map(|r| (r.season, r.total)).collect()
}

/// Total count per month name (unordered; see `CategoryTotals::ordered`)
pub fn users_by_month<'a, I>(rows: I) -> CategoryTotals<Month>
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    rows.into_iter().map(|r| (r.month, r.total)).collect()
}

/// Mean casual and registered riders per observed hour, ascending hour
pub fn hourly_profile<'a, I>(rows: I) -> Vec<HourStat>
where
    I: IntoIterator<Item = &'a RideRecord>,
{
    // hour → (casual sum, registered sum, rows)
    let mut groups: BTreeMap<u8, (u64, u64, usize)> = BTreeMap::new();
    for r in rows {
        let entry = groups.entry(r.hour).or_default();
        entry.0 += r.casual;
        entry.1 += r.registered;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(hour, (casual, registered, samples))| {
            let casual_mean = casual as f64 / samples as f64;
            let registered_mean = registered as f64 / samples as f64;
            HourStat {
                hour,
                casual_mean,
                registered_mean,
                total: casual_mean + registered_mean,
                samples,
            }
        })
        .collect()
}
