//! Calendar request and display toggles.

use std::ops::RangeInclusive;

use chrono::Weekday;

use crate::error::CalendarError;
use crate::fill::FillPattern;
use crate::spread::YearSpread;

/// First column of the weekly grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Weekday shown in the first column.
    pub fn first_day(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Column index (0..7) of `weekday` in a grid starting on `self`.
    pub fn column_of(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Monday => weekday.num_days_from_monday(),
            WeekStart::Sunday => weekday.num_days_from_sunday(),
        }
    }

    /// The seven weekdays in column order.
    pub fn weekdays(self) -> [Weekday; 7] {
        let mut days = [Weekday::Mon; 7];
        let mut day = self.first_day();
        for slot in &mut days {
            *slot = day;
            day = day.succ();
        }
        days
    }
}

/// Display toggles shared by every month and page of one render pass.
///
/// Built once (CLI, config file) and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Leave cells outside the requested month blank.
    pub hide_other_months: bool,
    pub hide_moon: bool,
    pub hide_week_number: bool,
    pub hide_day_of_year: bool,
    pub hide_events: bool,
    /// Shorthand for hiding moon, week numbers, day of year and events.
    pub plain: bool,
    /// Disable weekend highlighting.
    pub no_color: bool,
    pub year_spread: YearSpread,
    pub fill_pattern: FillPattern,
    pub week_start: WeekStart,
}

impl CalendarOptions {
    /// Sets the year spread, ignoring page counts that do not divide 12.
    pub fn set_year_spread(&mut self, pages: u32) {
        self.year_spread.update(pages);
    }

    pub fn show_moon(&self) -> bool {
        !(self.hide_moon || self.plain)
    }

    pub fn show_week_number(&self) -> bool {
        !(self.hide_week_number || self.plain)
    }

    pub fn show_day_of_year(&self) -> bool {
        !(self.hide_day_of_year || self.plain)
    }

    pub fn show_events(&self) -> bool {
        !(self.hide_events || self.plain)
    }
}

/// Which months of which year to render, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    begin_month: u32,
    end_month: u32,
    year: i32,
    pub options: CalendarOptions,
}

impl CalendarRequest {
    /// A request for months `begin_month..=end_month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] for a month outside 1..=12
    /// and [`CalendarError::InvalidRange`] when `begin_month > end_month`.
    pub fn new(
        begin_month: u32,
        end_month: u32,
        year: i32,
        options: CalendarOptions,
    ) -> Result<Self, CalendarError> {
        for month in [begin_month, end_month] {
            if !(1..=12).contains(&month) {
                return Err(CalendarError::InvalidMonth { month });
            }
        }
        if begin_month > end_month {
            return Err(CalendarError::InvalidRange {
                begin: begin_month,
                end: end_month,
            });
        }
        Ok(Self {
            begin_month,
            end_month,
            year,
            options,
        })
    }

    /// The whole of `year`.
    pub fn full_year(year: i32, options: CalendarOptions) -> Self {
        Self {
            begin_month: 1,
            end_month: 12,
            year,
            options,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn begin_month(&self) -> u32 {
        self.begin_month
    }

    pub fn end_month(&self) -> u32 {
        self.end_month
    }

    /// Requested months in order.
    pub fn months(&self) -> RangeInclusive<u32> {
        self.begin_month..=self.end_month
    }
}
