//! Inclusive date filter over the loaded table

use crate::dataset::DateRange;
use crate::record::RideRecord;

/// Rows whose date falls within `range` (both ends inclusive)
///
/// An inverted range (`start > end`) yields no rows; it is not an error.
pub fn filter_by_date<'a>(records: &'a [RideRecord], range: &DateRange) -> Vec<&'a RideRecord> {
    if range.start > range.end {
        return Vec::new();
    }
    records.iter().filter(|r| range.contains(r.date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Month, Season};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 2, d).unwrap()
    }

    fn records() -> Vec<RideRecord> {
        (1..=10)
            .flat_map(|d| {
                (0..3).map(move |hour| RideRecord {
                    date: day(d),
                    hour,
                    month: Month::February,
                    season: Season::Winter,
                    year: 0,
                    casual: 1,
                    registered: 1,
                    total: 2,
                })
            })
            .collect()
    }

    #[test]
    fn test_filter_count_matches_rows_in_range() {
        let records = records();
        for (start, end) in [(1, 10), (3, 5), (7, 7), (10, 10)] {
            let range = DateRange::new(day(start), day(end));
            let expected = records.iter().filter(|r| r.date >= day(start) && r.date <= day(end)).count();
            let filtered = filter_by_date(&records, &range);
            assert_eq!(filtered.len(), expected);
            assert_eq!(filtered.len(), ((end - start + 1) * 3) as usize);
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let records = records();
        let filtered = filter_by_date(&records, &DateRange::new(day(4), day(5)));
        assert!(filtered.iter().any(|r| r.date == day(4)));
        assert!(filtered.iter().any(|r| r.date == day(5)));
        assert!(filtered.iter().all(|r| r.date >= day(4) && r.date <= day(5)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let records = records();
        assert!(filter_by_date(&records, &DateRange::new(day(6), day(2))).is_empty());
    }

    #[test]
    fn test_range_outside_data_is_empty() {
        let records = records();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2013, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2013, 12, 31).unwrap(),
        );
        assert!(filter_by_date(&records, &range).is_empty());
    }
}
