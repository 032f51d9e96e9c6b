use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days per year used for elapsed-duration classification.
///
/// Durations are measured with a fixed 365-day year, so two calendar years
/// containing a leap day classify as slightly more than two years.
pub const DAYS_PER_DURATION_YEAR: f64 = 365.0;

/// Calendar span displayed on the vertical axis.
///
/// `end` is expected to be on or after `start`; the data source owns that
/// precondition. Elapsed durations use the absolute distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn elapsed_days(self) -> i64 {
        (self.end - self.start).num_days()
    }

    #[must_use]
    pub fn elapsed_years(self) -> f64 {
        self.elapsed_days().unsigned_abs() as f64 / DAYS_PER_DURATION_YEAR
    }

    #[must_use]
    pub fn elapsed_months(self) -> f64 {
        self.elapsed_years() * 12.0
    }

    /// Zero-based month of `start`, as used by period alignment.
    #[must_use]
    pub fn start_month0(self) -> u32 {
        self.start.month0()
    }

    #[must_use]
    pub fn axis_mode(self) -> AxisMode {
        select_axis_mode(self)
    }
}

/// Vertical-axis granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisMode {
    HalfYear,
    Quarter,
    Month,
}

impl AxisMode {
    /// Classifies an elapsed duration. Both thresholds are strict lower
    /// bounds: exactly 2 years is `Month`, exactly 5 years is `Quarter`.
    #[must_use]
    pub fn from_elapsed_years(years: f64) -> Self {
        if years > 5.0 {
            Self::HalfYear
        } else if years > 2.0 {
            Self::Quarter
        } else {
            Self::Month
        }
    }

    #[must_use]
    pub const fn period_months(self) -> u32 {
        match self {
            Self::HalfYear => 6,
            Self::Quarter => 3,
            Self::Month => 1,
        }
    }

    /// Days represented by one vertical pixel when this mode is first shown.
    #[must_use]
    pub const fn default_one_px_value_y(self) -> f64 {
        match self {
            Self::HalfYear => 6.0,
            Self::Quarter => 3.0,
            Self::Month => 1.0,
        }
    }
}

#[must_use]
pub fn select_axis_mode(range: DateRange) -> AxisMode {
    AxisMode::from_elapsed_years(range.elapsed_years())
}
