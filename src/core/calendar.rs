//! Calendar arithmetic used by the vertical (time) axis.
//!
//! All functions are total over valid `NaiveDate` values. Month arithmetic
//! clamps the day to the target month length and saturates at the chrono
//! date bounds.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Day count of each quarter in a common year. The leap day belongs to Q1.
pub const QUARTER_DAYS: [u32; 4] = [90, 91, 92, 92];
pub const QUARTER_LABELS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Days in the second half of any year (July through December).
pub const SECOND_HALF_DAYS: u32 = 184;

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[must_use]
pub fn is_leap_date(date: NaiveDate) -> bool {
    is_leap_year(date.year())
}

/// 1-based ordinal of `date` within its year.
#[must_use]
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_date(date) => 29,
        _ => 28,
    }
}

#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

#[must_use]
pub fn subtract_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

#[must_use]
pub fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    add_months(date, years.saturating_mul(12))
}

#[must_use]
pub fn subtract_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

#[must_use]
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    subtract_days(date, u64::from(date.day() - 1))
}

#[must_use]
pub fn format_year(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

#[must_use]
pub fn format_month(date: NaiveDate) -> String {
    date.format("%m").to_string()
}

#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Days from January 1st through June 30th.
#[must_use]
pub fn first_half_days(is_leap: bool) -> u32 {
    if is_leap { 182 } else { 181 }
}

/// Quarter (1..=4) containing the given 1-based day of year.
#[must_use]
pub fn quarter_of_day(day_of_year: u32, is_leap: bool) -> u32 {
    let leap_shift = u32::from(is_leap);
    if day_of_year <= 90 + leap_shift {
        1
    } else if day_of_year <= 181 + leap_shift {
        2
    } else if day_of_year <= 273 + leap_shift {
        3
    } else {
        4
    }
}

/// Length of a 1-based quarter; out-of-range quarters clamp to Q1/Q4.
#[must_use]
pub fn quarter_length(quarter: u32, is_leap: bool) -> u32 {
    let index = quarter.clamp(1, 4) as usize - 1;
    QUARTER_DAYS[index] + u32::from(index == 0 && is_leap)
}

#[must_use]
pub fn quarter_label(quarter: u32) -> &'static str {
    QUARTER_LABELS[quarter.clamp(1, 4) as usize - 1]
}

/// Days in the full quarters strictly before the 1-based `quarter`.
#[must_use]
pub fn day_count_before_quarter(quarter: u32, is_leap: bool) -> u32 {
    let full_quarters = quarter.saturating_sub(1).min(4) as usize;
    let summary: u32 = QUARTER_DAYS[..full_quarters].iter().sum();
    summary + u32::from(is_leap && quarter > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn start_of_month_keeps_year_and_month() {
        assert_eq!(start_of_month(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(start_of_month(date(2021, 1, 1)), date(2021, 1, 1));
    }

    #[test]
    fn quarter_lengths_cover_the_year() {
        for leap in [false, true] {
            let total: u32 = (1..=4).map(|q| quarter_length(q, leap)).sum();
            assert_eq!(total, if leap { 366 } else { 365 });
        }
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
    }
}
