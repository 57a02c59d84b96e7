#[cfg(test)]
mod tests {
    use {
        crate::{
            dataset::{DateRange, Dataset},
            pipeline::{filter_by_date, Report},
            record::{Month, RideRecord, Season},
        },
        chrono::{Datelike, NaiveDate},
    };

    fn season_for(month: u32) -> Season {
        match month {
            1..=3 => Season::Winter,
            4..=6 => Season::Spring,
            7..=9 => Season::Summer,
            _ => Season::Fall,
        }
    }

    fn ride(date: NaiveDate, hour: u8, casual: u64, registered: u64) -> RideRecord {
        RideRecord {
            date,
            hour,
            month: Month::from_number(date.month()).unwrap(),
            season: season_for(date.month()),
            year: (date.year() - 2011) as u16,
            casual,
            registered,
            total: casual + registered,
        }
    }

    /// Two years of four readings a day with deterministic counts
    fn synthetic_table() -> Vec<RideRecord> {
        let mut records = Vec::new();
        let mut day = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2012, 12, 31).unwrap();
        let mut i: u64 = 0;
        while day <= last {
            for hour in [3u8, 8, 12, 17] {
                i += 1;
                let casual = (i * 7) % 41;
                let registered = (i * 13) % 97 + if hour == 8 || hour == 17 { 200 } else { 0 };
                records.push(ride(day, hour, casual, registered));
            }
            day = day.succ_opt().unwrap();
        }
        records
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Three-row walkthrough: filter to day 1, then summarize and profile
    #[test]
    fn test_three_row_walkthrough() {
        let day1 = d(2011, 1, 1);
        let day2 = d(2011, 1, 2);
        let records = vec![ride(day1, 5, 10, 20), ride(day1, 5, 5, 5), ride(day2, 6, 1, 1)];

        let report = Report::build(&records, DateRange::new(day1, day1));

        assert_eq!(report.row_count, 2);
        assert_eq!(report.summary.casual, 15);
        assert_eq!(report.summary.registered, 25);
        assert_eq!(report.summary.total, 40);

        assert_eq!(report.hourly.len(), 1);
        let hour5 = report.hourly[0];
        assert_eq!(hour5.hour, 5);
        assert!((hour5.casual_mean - 7.5).abs() < 1e-9);
        assert!((hour5.registered_mean - 12.5).abs() < 1e-9);
        assert!((hour5.total - 20.0).abs() < 1e-9);
    }

    /// Filtered row count matches a direct count for a spread of ranges
    #[test]
    fn test_filter_count_matches_direct_count() {
        let records = synthetic_table();
        let ranges = [
            (d(2011, 1, 1), d(2012, 12, 31)),
            (d(2011, 2, 28), d(2011, 3, 1)),
            (d(2011, 12, 31), d(2012, 1, 1)),
            (d(2012, 2, 29), d(2012, 2, 29)),
            (d(2012, 6, 1), d(2012, 5, 1)),
        ];

        for (start, end) in ranges {
            let range = DateRange::new(start, end);
            let expected = records.iter().filter(|r| r.date >= start && r.date <= end).count();
            assert_eq!(filter_by_date(&records, &range).len(), expected, "range {}", range);
        }
    }

    /// Cross-view totals agree for the same filtered range
    #[test]
    fn test_views_are_consistent() {
        let records = synthetic_table();
        let dataset = Dataset::from_records(records).unwrap();
        let range = DateRange::within(d(2011, 10, 15), d(2012, 4, 20), &dataset).unwrap();
        let report = Report::build(dataset.records(), range);

        // Summary invariant
        assert_eq!(report.summary.casual + report.summary.registered, report.summary.total);

        // Yearly totals add back up to the summary
        assert_eq!(report.yearly.len(), 2);
        let yearly_casual: u64 = report.yearly.iter().map(|y| y.casual).sum();
        let yearly_registered: u64 = report.yearly.iter().map(|y| y.registered).sum();
        assert_eq!(yearly_casual, report.summary.casual);
        assert_eq!(yearly_registered, report.summary.registered);

        // Trend keys strictly increasing, lexicographically too
        let keys: Vec<String> = report.trend.iter().map(|p| p.month_year.to_string()).collect();
        assert_eq!(keys.first().map(String::as_str), Some("2011-10"));
        assert_eq!(keys.last().map(String::as_str), Some("2012-04"));
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let trend_total: u64 = report.trend.iter().map(|p| p.total).sum();
        assert_eq!(trend_total, report.summary.total);

        // Seasonal and monthly totals partition the range
        let seasonal: u64 = report.seasonal.ordered().iter().map(|c| c.total).sum();
        let monthly: u64 = report.monthly.ordered().iter().map(|c| c.total).sum();
        assert_eq!(seasonal, report.summary.total);
        assert_eq!(monthly, report.summary.total);

        // Oct..Apr spans three seasons and seven months
        assert_eq!(report.seasonal.ordered().len(), 3);
        assert_eq!(report.monthly.ordered().len(), 7);
        assert_eq!(report.seasonal.zero_filled().len(), 4);
        assert_eq!(report.monthly.zero_filled().len(), 12);
        assert_eq!(report.monthly.zero_filled()[6].category, Month::July);
        assert_eq!(report.monthly.zero_filled()[6].total, 0);
    }

    #[test]
    fn test_hourly_profile_and_peaks() {
        let records = synthetic_table();
        let range = DateRange::new(d(2011, 1, 1), d(2012, 12, 31));
        let report = Report::build(&records, range);

        let hours: Vec<u8> = report.hourly.iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![3, 8, 12, 17]);
        for h in &report.hourly {
            assert!(h.hour <= 23);
            assert!((h.total - (h.casual_mean + h.registered_mean)).abs() < 1e-9);
        }
        let samples: usize = report.hourly.iter().map(|h| h.samples).sum();
        assert_eq!(samples, report.row_count);

        // Commute hours carry +200 registered riders; only the busier one clears Q3
        assert_eq!(report.peak_hours, vec![17]);
    }

    #[test]
    fn test_rebuilding_does_not_touch_source() {
        let records = synthetic_table();
        let before = records.clone();
        let _ = Report::build(&records, DateRange::new(d(2011, 5, 1), d(2011, 5, 31)));
        let _ = Report::build(&records, DateRange::new(d(2012, 1, 1), d(2011, 1, 1)));
        assert_eq!(records, before);
    }
}
