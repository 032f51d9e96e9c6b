//! Calendar (vertical) axis layout.
//!
//! Half-year, quarter and month granularities share one generation loop and
//! differ only through their `PeriodStrategy`. Time grows upward: each period
//! adds `period_days / one_px_value_y` pixels above the baseline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis_mode::{AxisMode, DateRange};
use crate::core::calendar::{
    SECOND_HALF_DAYS, add_days, add_months, add_years, day_count_before_quarter, day_of_year,
    days_in_month, days_in_year, first_half_days, format_month, format_year, is_leap_date,
    quarter_label, quarter_length, quarter_of_day, start_of_month, subtract_months,
};
use crate::core::types::AxisTick;

/// Left edge of the period gutter is `out_x_offset_px`; the year gutter is
/// this fixed strip at the far left.
pub const YEAR_GUTTER: (f64, f64) = (0.0, 30.0);

/// Display window of the month granularity.
pub const MONTH_WINDOW_PERIODS: usize = 24;
pub const MONTH_WINDOW_YEARS: usize = 3;

/// Pixel inputs of the calendar axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisInput {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub out_x_offset_px: f64,
    pub bottom_inset_px: f64,
    pub y_offset_px: f64,
    pub one_px_value_y: f64,
}

impl YAxisInput {
    #[must_use]
    pub fn baseline_px(&self) -> f64 {
        self.canvas_height - self.bottom_inset_px + self.y_offset_px
    }

    /// Pixel height of `days`; zero when the scale is degenerate.
    #[must_use]
    pub fn days_to_px(&self, days: u32) -> f64 {
        if self.one_px_value_y.is_finite() && self.one_px_value_y > 0.0 {
            f64::from(days) / self.one_px_value_y
        } else {
            0.0
        }
    }
}

/// Per-granularity rules of the calendar axis.
pub trait PeriodStrategy {
    fn mode(&self) -> AxisMode;

    /// Number of period gridlines needed to cover `range`.
    fn period_count(&self, range: DateRange) -> usize;

    /// Number of year-boundary gridlines needed to cover `range`.
    fn year_count(&self, range: DateRange) -> usize;

    fn period_days(&self, period_start: NaiveDate) -> u32;

    fn period_label(&self, period_start: NaiveDate) -> String;

    /// Days of the origin's year that lie before the origin.
    fn first_year_offset_days(&self, origin: NaiveDate) -> u32;

    /// Start of the period enclosing `start`.
    fn align(&self, start: NaiveDate) -> NaiveDate {
        let months_into_period = start.month0() % self.mode().period_months();
        start_of_month(subtract_months(start, months_into_period))
    }

    fn next_period(&self, period_start: NaiveDate) -> NaiveDate {
        add_months(period_start, self.mode().period_months())
    }
}

fn covering_count(months: f64, start_month0: u32, months_per_unit: f64) -> usize {
    let covered = (months + f64::from(start_month0) + 1.0) / months_per_unit;
    if covered.is_finite() && covered > 0.0 {
        covered.ceil() as usize
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HalfYearPeriods;

impl PeriodStrategy for HalfYearPeriods {
    fn mode(&self) -> AxisMode {
        AxisMode::HalfYear
    }

    fn period_count(&self, range: DateRange) -> usize {
        covering_count(range.elapsed_months(), range.start_month0(), 6.0)
    }

    fn year_count(&self, range: DateRange) -> usize {
        covering_count(range.elapsed_months(), range.start_month0(), 12.0)
    }

    fn period_days(&self, period_start: NaiveDate) -> u32 {
        let first_half = first_half_days(is_leap_date(period_start));
        if day_of_year(period_start) <= first_half {
            first_half
        } else {
            SECOND_HALF_DAYS
        }
    }

    fn period_label(&self, period_start: NaiveDate) -> String {
        let first_half = first_half_days(is_leap_date(period_start));
        if day_of_year(period_start) <= first_half {
            "上".to_owned()
        } else {
            "下".to_owned()
        }
    }

    fn first_year_offset_days(&self, origin: NaiveDate) -> u32 {
        let first_half = first_half_days(is_leap_date(origin));
        if day_of_year(origin) <= first_half {
            0
        } else {
            first_half
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterPeriods;

impl PeriodStrategy for QuarterPeriods {
    fn mode(&self) -> AxisMode {
        AxisMode::Quarter
    }

    fn period_count(&self, range: DateRange) -> usize {
        covering_count(range.elapsed_months().floor(), range.start_month0(), 3.0)
    }

    fn year_count(&self, range: DateRange) -> usize {
        covering_count(range.elapsed_months().floor(), range.start_month0(), 12.0)
    }

    fn period_days(&self, period_start: NaiveDate) -> u32 {
        let is_leap = is_leap_date(period_start);
        quarter_length(quarter_of_day(day_of_year(period_start), is_leap), is_leap)
    }

    fn period_label(&self, period_start: NaiveDate) -> String {
        let is_leap = is_leap_date(period_start);
        quarter_label(quarter_of_day(day_of_year(period_start), is_leap)).to_owned()
    }

    fn first_year_offset_days(&self, origin: NaiveDate) -> u32 {
        let is_leap = is_leap_date(origin);
        day_count_before_quarter(quarter_of_day(day_of_year(origin), is_leap), is_leap)
    }
}

/// Month granularity shows a fixed window starting at the aligned start
/// instead of scaling to the whole range.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthPeriods;

impl PeriodStrategy for MonthPeriods {
    fn mode(&self) -> AxisMode {
        AxisMode::Month
    }

    fn period_count(&self, _range: DateRange) -> usize {
        MONTH_WINDOW_PERIODS
    }

    fn year_count(&self, _range: DateRange) -> usize {
        MONTH_WINDOW_YEARS
    }

    fn period_days(&self, period_start: NaiveDate) -> u32 {
        days_in_month(period_start)
    }

    fn period_label(&self, period_start: NaiveDate) -> String {
        format_month(period_start)
    }

    fn first_year_offset_days(&self, origin: NaiveDate) -> u32 {
        day_of_year(origin) - 1
    }
}

#[must_use]
pub fn period_strategy(mode: AxisMode) -> &'static dyn PeriodStrategy {
    match mode {
        AxisMode::HalfYear => &HalfYearPeriods,
        AxisMode::Quarter => &QuarterPeriods,
        AxisMode::Month => &MonthPeriods,
    }
}

/// Calendar axis output for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLayout {
    pub mode: AxisMode,
    /// Aligned generation start; data-space `y` counts days from here.
    pub origin: NaiveDate,
    pub baseline_px: f64,
    /// Days covered by all period bands.
    pub span_days: u32,
    pub period_ticks: Vec<AxisTick>,
    pub year_ticks: Vec<AxisTick>,
    pub period_gutter: (f64, f64),
    pub year_gutter: (f64, f64),
}

impl YAxisLayout {
    /// Data-space `y` of `date`.
    #[must_use]
    pub fn day_offset(&self, date: NaiveDate) -> f64 {
        (date - self.origin).num_days() as f64
    }

    /// Calendar date `days` after the origin; `None` before the origin or for
    /// non-finite input.
    #[must_use]
    pub fn date_at(&self, days: f64) -> Option<NaiveDate> {
        date_at_offset(self.origin, days)
    }
}

/// Calendar date `days` after `origin`, flooring fractional days.
#[must_use]
pub fn date_at_offset(origin: NaiveDate, days: f64) -> Option<NaiveDate> {
    if !days.is_finite() || days < 0.0 {
        return None;
    }
    Some(add_days(origin, days.floor() as u64))
}

/// Aligned origin for `range` under `mode`.
#[must_use]
pub fn axis_origin(range: DateRange, mode: AxisMode) -> NaiveDate {
    period_strategy(mode).align(range.start)
}

#[must_use]
pub fn generate_y_axis(input: &YAxisInput, range: DateRange, mode: AxisMode) -> YAxisLayout {
    let strategy = period_strategy(mode);
    let origin = strategy.align(range.start);
    let baseline_px = input.baseline_px();

    let period_count = strategy.period_count(range);
    let mut period_ticks = Vec::with_capacity(period_count);
    let mut period_start = origin;
    let mut cumulative_px = 0.0;
    let mut span_days = 0_u32;
    for _ in 0..period_count {
        let period_days = strategy.period_days(period_start);
        span_days = span_days.saturating_add(period_days);
        let band_px = input.days_to_px(period_days);
        cumulative_px += band_px;
        period_ticks.push(AxisTick::new(
            baseline_px - cumulative_px,
            strategy.period_label(period_start),
            false,
            band_px,
        ));
        period_start = strategy.next_period(period_start);
    }

    let year_count = strategy.year_count(range);
    let mut year_ticks = Vec::with_capacity(year_count);
    let mut year_start = origin;
    let mut cumulative_px = 0.0;
    for index in 0..year_count {
        let mut year_days = days_in_year(year_start.year());
        if index == 0 {
            year_days -= strategy.first_year_offset_days(origin);
        }
        let band_px = input.days_to_px(year_days);
        cumulative_px += band_px;
        year_ticks.push(AxisTick::new(
            baseline_px - cumulative_px,
            format_year(year_start),
            true,
            band_px,
        ));
        year_start = add_years(year_start, 1);
    }

    trace!(
        ?mode,
        %origin,
        period_ticks = period_ticks.len(),
        year_ticks = year_ticks.len(),
        "generated calendar axis"
    );

    YAxisLayout {
        mode,
        origin,
        baseline_px,
        span_days,
        period_ticks,
        year_ticks,
        period_gutter: (input.out_x_offset_px, input.canvas_width),
        year_gutter: YEAR_GUTTER,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{MonthPeriods, PeriodStrategy, QuarterPeriods, covering_count};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn covering_count_rounds_up_partial_periods() {
        assert_eq!(covering_count(0.0, 0, 6.0), 1);
        assert_eq!(covering_count(5.0, 0, 6.0), 1);
        assert_eq!(covering_count(5.5, 0, 6.0), 2);
        assert_eq!(covering_count(f64::NAN, 0, 6.0), 0);
    }

    #[test]
    fn quarter_alignment_snaps_to_quarter_start() {
        assert_eq!(QuarterPeriods.align(date(2022, 8, 31)), date(2022, 7, 1));
        assert_eq!(QuarterPeriods.align(date(2022, 1, 15)), date(2022, 1, 1));
    }

    #[test]
    fn month_first_year_offset_counts_elapsed_days() {
        assert_eq!(MonthPeriods.first_year_offset_days(date(2023, 1, 1)), 0);
        assert_eq!(MonthPeriods.first_year_offset_days(date(2023, 3, 1)), 59);
    }
}
