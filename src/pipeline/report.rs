//! Report - every aggregate view for one date range

use super::aggregations::{
    hourly_profile, monthly_trend, user_summary, users_by_month, users_by_season, users_by_year,
    HourStat, TrendPoint, UserShare, UserSummary, YearTotals,
};
use super::filter::filter_by_date;
use super::ordering::CategoryTotals;
use super::peaks::peak_hours;
use crate::dataset::DateRange;
use crate::record::{Month, RideRecord, Season};
use serde_json::json;

/// Aggregate views computed from one filtered subset
///
/// Ephemeral: rebuilt from the source table on every range change and owned
/// by whichever renderer consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub range: DateRange,
    /// Rows that passed the date filter
    pub row_count: usize,
    pub summary: UserSummary,
    pub yearly: Vec<YearTotals>,
    pub trend: Vec<TrendPoint>,
    pub seasonal: CategoryTotals<Season>,
    pub monthly: CategoryTotals<Month>,
    pub hourly: Vec<HourStat>,
    pub peak_hours: Vec<u8>,
}

impl Report {
    /// Filter `records` to `range`, then run every aggregation
    pub fn build(records: &[RideRecord], range: DateRange) -> Self {
        let filtered = filter_by_date(records, &range);
        let rows = || filtered.iter().copied();

        let hourly = hourly_profile(rows());
        let peak_hours = peak_hours(&hourly);

        Self {
            range,
            row_count: filtered.len(),
            summary: user_summary(rows()),
            yearly: users_by_year(rows()),
            trend: monthly_trend(rows()),
            seasonal: users_by_season(rows()),
            monthly: users_by_month(rows()),
            hourly,
            peak_hours,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn share(&self) -> UserShare {
        self.summary.share()
    }

    /// JSON document for the headless report
    pub fn to_json(&self, zero_fill: bool, base_year: i32) -> serde_json::Value {
        let yearly: Vec<_> = self
            .yearly
            .iter()
            .map(|y| {
                json!({
                    "year": y.calendar_year(base_year),
                    "casual": y.casual,
                    "registered": y.registered,
                })
            })
            .collect();

        let trend: Vec<_> = self
            .trend
            .iter()
            .map(|p| {
                json!({
                    "month_year": p.month_year.to_string(),
                    "casual": p.casual,
                    "registered": p.registered,
                    "cnt": p.total,
                })
            })
            .collect();

        json!({
            "range": self.range,
            "rows": self.row_count,
            "summary": {
                "casual": self.summary.casual,
                "registered": self.summary.registered,
                "cnt": self.summary.total,
            },
            "share": self.share(),
            "by_year": yearly,
            "trend": trend,
            "by_season": self.seasonal.arrange(zero_fill),
            "by_month": self.monthly.arrange(zero_fill),
            "by_hour": self.hourly,
            "peak_hours": self.peak_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ride(day: u32, hour: u8, casual: u64, registered: u64) -> RideRecord {
        RideRecord {
            date: NaiveDate::from_ymd_opt(2011, 4, day).unwrap(),
            hour,
            month: Month::April,
            season: Season::Spring,
            year: 0,
            casual,
            registered,
            total: casual + registered,
        }
    }

    #[test]
    fn test_report_for_empty_range() {
        let records = vec![ride(1, 5, 10, 20)];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2011, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2011, 5, 2).unwrap(),
        );
        let report = Report::build(&records, range);

        assert!(report.is_empty());
        assert_eq!(report.summary, UserSummary::default());
        assert!(report.yearly.is_empty());
        assert!(report.trend.is_empty());
        assert!(report.seasonal.is_empty());
        assert!(report.monthly.is_empty());
        assert!(report.hourly.is_empty());
        assert!(report.peak_hours.is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let records = vec![ride(1, 5, 10, 20), ride(2, 5, 4, 4), ride(3, 6, 1, 1)];
        let day2 = NaiveDate::from_ymd_opt(2011, 4, 2).unwrap();
        let report = Report::build(&records, DateRange::new(day2, day2));

        assert_eq!(report.row_count, 1);
        assert_eq!(report.summary.total, 8);
        assert_eq!(report.hourly.len(), 1);
        assert_eq!(report.seasonal.get(Season::Spring), 8);
    }

    #[test]
    fn test_json_document() {
        let records = vec![ride(1, 5, 10, 20), ride(1, 6, 1, 1)];
        let day1 = NaiveDate::from_ymd_opt(2011, 4, 1).unwrap();
        let report = Report::build(&records, DateRange::new(day1, day1));

        let doc = report.to_json(true, 2011);
        assert_eq!(doc["rows"], 2);
        assert_eq!(doc["summary"]["cnt"], 32);
        assert_eq!(doc["by_year"][0]["year"], 2011);
        assert_eq!(doc["trend"][0]["month_year"], "2011-04");
        assert_eq!(doc["by_season"].as_array().unwrap().len(), 4);
        assert_eq!(doc["by_season"][1]["category"], "Spring");
        assert_eq!(doc["by_month"].as_array().unwrap().len(), 12);
        assert_eq!(doc["by_hour"][0]["hour"], 5);
        assert_eq!(doc["range"]["start"], "2011-04-01");

        let doc = report.to_json(false, 2011);
        assert_eq!(doc["by_season"].as_array().unwrap().len(), 1);
        assert_eq!(doc["by_month"][0]["category"], "April");
    }
}
