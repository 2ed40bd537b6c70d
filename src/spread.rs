//! Splitting a year across pages for the year-grid layouts.

use std::ops::RangeInclusive;

use tracing::warn;

use crate::error::CalendarError;

/// Number of pages a full-year layout is split across.
///
/// Only divisors of 12 are representable, so every page holds the same
/// number of months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearSpread(u32);

impl YearSpread {
    /// Page counts that divide a year evenly.
    pub const ALLOWED: [u32; 6] = [1, 2, 3, 4, 6, 12];

    /// Returns `None` unless `pages` is one of [`YearSpread::ALLOWED`].
    pub fn new(pages: u32) -> Option<Self> {
        Self::ALLOWED.contains(&pages).then_some(Self(pages))
    }

    /// Number of pages.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Replaces `self` with `pages` when it is allowed; otherwise keeps the
    /// current value.
    pub fn update(&mut self, pages: u32) {
        match Self::new(pages) {
            Some(spread) => *self = spread,
            None => warn!(
                requested = pages,
                kept = self.0,
                "ignoring year spread that does not divide 12"
            ),
        }
    }
}

impl Default for YearSpread {
    fn default() -> Self {
        Self(1)
    }
}

/// Which months land on which page of a year layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpreadPlan {
    pages: u32,
    months_per_page: u32,
}

impl YearSpreadPlan {
    /// Number of pages in the plan.
    pub fn pages_count(&self) -> u32 {
        self.pages
    }

    /// Months shown on each page.
    pub fn months_per_page(&self) -> u32 {
        self.months_per_page
    }

    /// Contiguous months (1-based) covered by page `page` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] naming the first month the
    /// page would start at when `page` is past the last page.
    pub fn months_on_page(&self, page: u32) -> Result<RangeInclusive<u32>, CalendarError> {
        if page >= self.pages {
            return Err(CalendarError::InvalidMonth {
                month: page * self.months_per_page + 1,
            });
        }
        let first = page * self.months_per_page + 1;
        Ok(first..=first + self.months_per_page - 1)
    }

    /// All pages in order.
    pub fn iter(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_ {
        (0..self.pages).map(|p| {
            let first = p * self.months_per_page + 1;
            first..=first + self.months_per_page - 1
        })
    }
}

/// Builds the page plan for `spread`.
pub fn partition(spread: YearSpread) -> YearSpreadPlan {
    YearSpreadPlan {
        pages: spread.get(),
        months_per_page: 12 / spread.get(),
    }
}
