//! Date grid for one month: which date sits in which (row, column) cell.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CalendarError;
use crate::options::WeekStart;

/// Rows in a month grid.
pub const LINES: usize = 6;
/// Columns in a month grid, one per weekday.
pub const COLUMNS: usize = 7;

/// Day number (relative to the 1st, so `1` is the 1st and `0` the last day
/// of the previous month) shown in the top-left cell of the grid.
///
/// The result is always in `-6..=0`: a month that starts on the first
/// weekday of the week still gets a full leading row of the previous
/// month.
pub fn grid_start_day(first_of_month: NaiveDate, week_start: WeekStart) -> i32 {
    let offset = week_start.column_of(first_of_month.weekday()) as i32;
    let day = 1 - offset;
    if day > 0 { day - 7 } else { day }
}

/// The 42 consecutive dates displayed for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGrid {
    year: i32,
    month: u32,
    start_day: i32,
    dates: [[NaiveDate; COLUMNS]; LINES],
}

impl DateGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Relative day number of the first cell, see [`grid_start_day`].
    pub fn start_day(&self) -> i32 {
        self.start_day
    }

    /// Date in the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row >= LINES` or `col >= COLUMNS`.
    pub fn date(&self, row: usize, col: usize) -> NaiveDate {
        self.dates[row][col]
    }

    /// Whether `date` belongs to a neighbouring month.
    pub fn is_outside(&self, date: NaiveDate) -> bool {
        date.month() != self.month || date.year() != self.year
    }

    /// Cells in reading order as `(row, col, date)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, NaiveDate)> + '_ {
        self.dates.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, date)| (row, col, *date))
        })
    }
}

/// Lays out `month` of `year` on a 6×7 grid.
///
/// Dates advance one calendar day per cell from the grid start, rolling
/// over month and year boundaries.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn build_grid(
    year: i32,
    month: u32,
    week_start: WeekStart,
) -> Result<DateGrid, CalendarError> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { month })?;
    let start_day = grid_start_day(first, week_start);

    let mut dates = [[first; COLUMNS]; LINES];
    let mut current = first + Duration::days((start_day - 1) as i64);
    for line in &mut dates {
        for slot in line.iter_mut() {
            *slot = current;
            current += Duration::days(1);
        }
    }

    Ok(DateGrid {
        year,
        month,
        start_day,
        dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn february_2024_starts_in_january() {
        let grid = build_grid(2024, 2, WeekStart::Monday).unwrap();
        assert_eq!(grid.start_day(), -2);
        assert_eq!(grid.date(0, 0), ymd(2024, 1, 29));
        assert_eq!(grid.date(0, 3), ymd(2024, 2, 1));
        assert_eq!(grid.date(5, 6), ymd(2024, 3, 10));
    }

    #[test]
    fn month_starting_on_week_start_gets_leading_row() {
        // April 2024 begins on a Monday.
        let grid = build_grid(2024, 4, WeekStart::Monday).unwrap();
        assert_eq!(grid.start_day(), -6);
        assert_eq!(grid.date(0, 0), ymd(2024, 3, 25));
        assert_eq!(grid.date(1, 0), ymd(2024, 4, 1));

        // September 2024 begins on a Sunday.
        let grid = build_grid(2024, 9, WeekStart::Sunday).unwrap();
        assert_eq!(grid.date(0, 0), ymd(2024, 8, 25));
        assert_eq!(grid.date(1, 0), ymd(2024, 9, 1));
    }

    #[test]
    fn sunday_start_shifts_columns() {
        let grid = build_grid(2024, 2, WeekStart::Sunday).unwrap();
        assert_eq!(grid.date(0, 0), ymd(2024, 1, 28));
        assert_eq!(grid.date(0, 4), ymd(2024, 2, 1));
    }

    #[test]
    fn rolls_over_year_end() {
        let grid = build_grid(2023, 12, WeekStart::Monday).unwrap();
        let last = grid.date(LINES - 1, COLUMNS - 1);
        assert_eq!(last.year(), 2024);
        assert!(grid.is_outside(last));
        let grid = build_grid(2024, 1, WeekStart::Monday).unwrap();
        assert_eq!(grid.date(0, 0), ymd(2023, 12, 25));
    }

    #[test]
    fn start_day_is_always_in_leading_row() {
        for week_start in [WeekStart::Monday, WeekStart::Sunday] {
            for month in 1..=12 {
                let first = ymd(2025, month, 1);
                let start = grid_start_day(first, week_start);
                assert!((-6..=0).contains(&start), "month {month}: {start}");
            }
        }
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(matches!(
            build_grid(2024, 13, WeekStart::Monday),
            Err(CalendarError::InvalidMonth { month: 13 })
        ));
        assert!(matches!(
            build_grid(2024, 0, WeekStart::Monday),
            Err(CalendarError::InvalidMonth { month: 0 })
        ));
    }
}
