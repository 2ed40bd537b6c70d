//! Week numbers, day-of-year counts and Gregorian month lengths.

use chrono::{Datelike, NaiveDate};

/// Returns `true` for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in the given month, or 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// 1-based ordinal day of `day` in `month` of `year`.
///
/// The count is purely arithmetic, so a `day` before the 1st or past the
/// end of the month extends linearly into the neighbouring months
/// (`day_of_year(2024, 1, 0) == 0`). For real dates it agrees with
/// [`Datelike::ordinal`].
pub fn day_of_year(year: i32, month: u32, day: i32) -> i32 {
    let m = month as i32;
    let k = if is_leap_year(year) { 1 } else { 2 };
    275 * m / 9 - k * ((m + 9) / 12) + day - 30
}

/// ISO-8601 week number of `date` (1..=53).
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}
