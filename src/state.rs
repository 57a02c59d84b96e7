use {
    crate::{
        dataset::{DateRange, Dataset, RangeError},
        pipeline::Report,
    },
    chrono::{Days, Months, NaiveDate},
    std::sync::Arc,
};

/// Which end of the date range keyboard input moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBound {
    Start,
    End,
}

impl ActiveBound {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveBound::Start => "start",
            ActiveBound::End => "end",
        }
    }
}

/// Dashboard state: the loaded table, the selected range, and its report
///
/// The dataset is shared read-only. Every range change rebuilds the report
/// from the full table.
pub struct DashboardState {
    dataset: Arc<Dataset>,
    range: DateRange,
    active: ActiveBound,
    report: Report,
    /// Number of report rebuilds (for the status bar)
    recomputations: u64,
}

impl DashboardState {
    /// Start with the full `[min_date, max_date]` range selected
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let range = dataset.full_range();
        let report = Report::build(dataset.records(), range);
        Self {
            dataset,
            range,
            active: ActiveBound::Start,
            report,
            recomputations: 1,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn active_bound(&self) -> ActiveBound {
        self.active
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Select a range validated against the dataset bounds
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), RangeError> {
        let range = DateRange::within(start, end, &self.dataset)?;
        self.apply(range);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.apply(self.dataset.full_range());
    }

    pub fn toggle_bound(&mut self) {
        self.active = match self.active {
            ActiveBound::Start => ActiveBound::End,
            ActiveBound::End => ActiveBound::Start,
        };
    }

    /// Move the active bound by `days` (negative = earlier)
    pub fn shift_days(&mut self, days: i64) {
        let current = self.active_date();
        let moved = if days >= 0 {
            current.checked_add_days(Days::new(days as u64))
        } else {
            current.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        self.move_active(moved.unwrap_or(current));
    }

    /// Move the active bound by `months` (negative = earlier)
    pub fn shift_months(&mut self, months: i32) {
        let current = self.active_date();
        let moved = if months >= 0 {
            current.checked_add_months(Months::new(months as u32))
        } else {
            current.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        self.move_active(moved.unwrap_or(current));
    }

    /// Jump the active bound to the dataset's first (`to_end == false`) or last date
    pub fn jump(&mut self, to_end: bool) {
        let target = if to_end {
            self.dataset.max_date()
        } else {
            self.dataset.min_date()
        };
        self.move_active(target);
    }

    fn active_date(&self) -> NaiveDate {
        match self.active {
            ActiveBound::Start => self.range.start,
            ActiveBound::End => self.range.end,
        }
    }

    /// Clamp to the dataset bounds and keep `start <= end`
    fn move_active(&mut self, date: NaiveDate) {
        let date = self.dataset.clamp(date);
        let range = match self.active {
            ActiveBound::Start => DateRange::new(date.min(self.range.end), self.range.end),
            ActiveBound::End => DateRange::new(self.range.start, date.max(self.range.start)),
        };
        if range != self.range {
            self.apply(range);
        }
    }

    fn apply(&mut self, range: DateRange) {
        self.range = range;
        self.report = Report::build(self.dataset.records(), range);
        self.recomputations += 1;
        log::debug!(
            "Recomputed report for {} ({} rows)",
            range,
            self.report.row_count
        );
    }
}
