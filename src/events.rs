//! User events and per-day matching.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::ordinal::days_in_month;

/// Two-character marker that breaks event text into lines.
pub const LINE_BREAK: &str = "\\n";

/// An annotation for one (month, day).
///
/// Without a year the event repeats every year; rules that resolve to a
/// concrete date (Easter, fixed dates, nth weekdays) pin it to one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    month: u32,
    day: u32,
    year: Option<i32>,
    text: String,
    image: Option<PathBuf>,
}

impl Event {
    /// Creates an event after checking that `day` exists in `month` in at
    /// least one year (so Feb 29 is accepted).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidEvent`] for an impossible date.
    pub fn new(
        month: u32,
        day: u32,
        text: impl Into<String>,
        image: Option<PathBuf>,
    ) -> Result<Self, CalendarError> {
        // 2000 is a leap year, so this is the widest month length.
        if day == 0 || day > days_in_month(2000, month) {
            return Err(CalendarError::InvalidEvent { month, day });
        }
        Ok(Self {
            month,
            day,
            year: None,
            text: text.into(),
            image,
        })
    }

    /// Restricts the event to `year`.
    pub fn in_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Expands a wildcard-month entry (`*/day`) into one event per month
    /// in which `day` exists.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidEvent`] if `day` is outside 1..=31.
    pub fn every_month(
        day: u32,
        text: &str,
        image: Option<PathBuf>,
    ) -> Result<Vec<Self>, CalendarError> {
        if !(1..=31).contains(&day) {
            return Err(CalendarError::InvalidEvent { month: 0, day });
        }
        Ok((1..=12)
            .filter_map(|month| Self::new(month, day, text, image.clone()).ok())
            .collect())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The only year the event applies to, if pinned.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Raw text, line-break markers included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&PathBuf> {
        self.image.as_ref()
    }

    /// Whether the event falls on `date`.
    pub fn applies_to(&self, date: NaiveDate) -> bool {
        self.month == date.month()
            && self.day == date.day()
            && self.year.is_none_or(|year| year == date.year())
    }
}

/// All events for `date`, in input order.
pub fn match_events<'a>(date: NaiveDate, events: &'a [Event]) -> Vec<&'a Event> {
    events.iter().filter(|e| e.applies_to(date)).collect()
}

/// Splits event text into display lines on [`LINE_BREAK`] or real newlines.
pub fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LINE_BREAK).flat_map(str::lines)
}
