//! Aggregation Pipeline - date filter plus the dashboard's aggregate views
//!
//! Every view is a pure function of the filtered rows. Nothing is cached:
//! a new date range means a new `Report` built from the original table.
//!
//! # Architecture
//!
//! ```text
//! Dataset records + DateRange → filter_by_date
//!     ↓
//! user_summary   (casual / registered / total sums)
//! users_by_year  (per year indicator)
//! monthly_trend  (per YYYY-MM, chronological)
//! users_by_season, users_by_month  (unordered → canonical order step)
//! hourly_profile (per-hour means) → peak_hours (> 75th percentile)
//!     ↓
//! Report → ui / rideflow_report
//! ```

pub mod aggregations;
pub mod filter;
pub mod ordering;
pub mod peaks;
pub mod report;

pub use aggregations::{
    hourly_profile, monthly_trend, user_summary, users_by_month, users_by_season, users_by_year,
    HourStat, TrendPoint, UserShare, UserSummary, YearTotals,
};
pub use filter::filter_by_date;
pub use ordering::{Canonical, CategoryTotal, CategoryTotals};
pub use peaks::{peak_hours, PEAK_PERCENTILE};
pub use report::Report;
