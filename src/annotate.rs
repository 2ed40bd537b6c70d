//! Per-day annotation records for the month and year layouts.
//!
//! Every layout derives from the same per-day model: [`annotate_day`]
//! decorates one date with weekend, moon, week, ordinal, event and fill
//! information; the layouts only decide which date sits at which
//! (row, column).

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::error::CalendarError;
use crate::events::{Event, match_events};
use crate::grid::{COLUMNS, LINES, build_grid, grid_start_day};
use crate::moon::{MoonPhase, MoonPhases, locate_moon_phases};
use crate::options::CalendarOptions;
use crate::ordinal::{days_in_month, iso_week};

/// Most days any month can have; year layouts reserve this many slots.
pub const MAX_DAYS: usize = 31;

/// Everything shown for one date in one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell<'e> {
    pub date: NaiveDate,
    /// The date belongs to a neighbouring month.
    pub outside_month: bool,
    /// Render as an empty cell (neighbour day with `hide_other_months`).
    pub blank: bool,
    pub weekend: bool,
    pub moon_phase: Option<MoonPhase>,
    /// Present on Mondays only.
    pub iso_week: Option<u32>,
    pub day_of_year: Option<u32>,
    pub events: Vec<&'e Event>,
    pub fill: bool,
}

impl DayCell<'_> {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Position and context of a day inside some layout.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'m> {
    pub row: usize,
    pub col: usize,
    pub outside_month: bool,
    /// Phases of the displayed month; `None` when moon phases are off.
    pub moon: Option<&'m MoonPhases>,
}

/// Decorates `date` for a cell at `placement`.
pub fn annotate_day<'e>(
    date: NaiveDate,
    placement: Placement<'_>,
    options: &CalendarOptions,
    events: &'e [Event],
) -> DayCell<'e> {
    if placement.outside_month && options.hide_other_months {
        return DayCell {
            date,
            outside_month: true,
            blank: true,
            weekend: false,
            moon_phase: None,
            iso_week: None,
            day_of_year: None,
            events: Vec::new(),
            fill: false,
        };
    }

    let weekday = date.weekday();
    let weekend = !options.no_color && matches!(weekday, Weekday::Sat | Weekday::Sun);
    let moon_phase = placement
        .moon
        .filter(|_| options.show_moon() && !placement.outside_month)
        .and_then(|moon| moon.get(date.day()));
    let iso_week =
        (options.show_week_number() && weekday == Weekday::Mon).then(|| iso_week(date));
    let day_of_year =
        (options.show_day_of_year() && !placement.outside_month).then(|| date.ordinal());
    let events = if options.show_events() {
        match_events(date, events)
    } else {
        Vec::new()
    };
    let fill = options
        .fill_pattern
        .should_fill(placement.row, placement.col, weekday);

    DayCell {
        date,
        outside_month: placement.outside_month,
        blank: false,
        weekend,
        moon_phase,
        iso_week,
        day_of_year,
        events,
        fill,
    }
}

/// A fully annotated 6×7 month grid.
#[derive(Debug, Clone)]
pub struct MonthGrid<'e> {
    year: i32,
    month: u32,
    cells: [[DayCell<'e>; COLUMNS]; LINES],
}

impl<'e> MonthGrid<'e> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row >= LINES` or `col >= COLUMNS`.
    pub fn cell(&self, row: usize, col: usize) -> &DayCell<'e> {
        assert!(row < LINES && col < COLUMNS, "cell ({row}, {col}) outside grid");
        &self.cells[row][col]
    }

    /// Grid rows, each exactly [`COLUMNS`] cells.
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell<'e>; COLUMNS]> {
        self.cells.iter()
    }

    /// All 42 cells in reading order.
    pub fn cells(&self) -> &[DayCell<'e>] {
        self.cells.as_flattened()
    }
}

/// Builds and annotates the grid for `month` of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn month_grid<'e>(
    year: i32,
    month: u32,
    options: &CalendarOptions,
    events: &'e [Event],
) -> Result<MonthGrid<'e>, CalendarError> {
    let grid = build_grid(year, month, options.week_start)?;
    let moon = options
        .show_moon()
        .then(|| locate_moon_phases(year, month, grid.start_day()));

    let cells = std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            let date = grid.date(row, col);
            let placement = Placement {
                row,
                col,
                outside_month: grid.is_outside(date),
                moon: moon.as_ref(),
            };
            annotate_day(date, placement, options, events)
        })
    });

    debug!(year, month, "month grid annotated");
    Ok(MonthGrid { year, month, cells })
}

/// Arrangement of a year page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOrientation {
    /// One row per month, one column per day of month.
    MonthRows,
    /// One row per day of month, one column per month.
    DayRows,
}

/// Months of one page laid out as a day-of-month table.
///
/// Slots for days a month does not have (Feb 30, Apr 31, ...) are `None`.
#[derive(Debug, Clone)]
pub struct YearPage<'e> {
    year: i32,
    months: RangeInclusive<u32>,
    orientation: YearOrientation,
    rows: Vec<Vec<Option<DayCell<'e>>>>,
}

impl<'e> YearPage<'e> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> RangeInclusive<u32> {
        self.months.clone()
    }

    pub fn orientation(&self) -> YearOrientation {
        self.orientation
    }

    pub fn rows(&self) -> &[Vec<Option<DayCell<'e>>>] {
        &self.rows
    }

    /// Cell for `day` of `month`, if that date exists and is on the page.
    pub fn day(&self, month: u32, day: u32) -> Option<&DayCell<'e>> {
        if !self.months.contains(&month) || day == 0 {
            return None;
        }
        let m = (month - self.months.start()) as usize;
        let d = day as usize - 1;
        let (row, col) = match self.orientation {
            YearOrientation::MonthRows => (m, d),
            YearOrientation::DayRows => (d, m),
        };
        self.rows.get(row)?.get(col)?.as_ref()
    }
}

/// Annotates `months` of `year` as a year page.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if the range leaves 1..=12.
pub fn year_page<'e>(
    year: i32,
    months: RangeInclusive<u32>,
    orientation: YearOrientation,
    options: &CalendarOptions,
    events: &'e [Event],
) -> Result<YearPage<'e>, CalendarError> {
    let month_count = months.clone().count();
    let (row_count, col_count) = match orientation {
        YearOrientation::MonthRows => (month_count, MAX_DAYS),
        YearOrientation::DayRows => (MAX_DAYS, month_count),
    };
    let mut rows: Vec<Vec<Option<DayCell<'e>>>> = (0..row_count)
        .map(|_| (0..col_count).map(|_| None).collect())
        .collect();

    for (m, month) in months.clone().enumerate() {
        let first =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { month })?;
        let moon = options
            .show_moon()
            .then(|| locate_moon_phases(year, month, grid_start_day(first, options.week_start)));

        for day in 1..=days_in_month(year, month) {
            let Some(date) = first.with_day(day) else {
                continue;
            };
            let d = day as usize - 1;
            let (row, col) = match orientation {
                YearOrientation::MonthRows => (m, d),
                YearOrientation::DayRows => (d, m),
            };
            let placement = Placement {
                row,
                col,
                outside_month: false,
                moon: moon.as_ref(),
            };
            rows[row][col] = Some(annotate_day(date, placement, options, events));
        }
    }

    debug!(year, ?months, ?orientation, "year page annotated");
    Ok(YearPage {
        year,
        months,
        orientation,
        rows,
    })
}
