//! Cell shading rules.
//!
//! A pattern is a string of single-character rule codes. A cell is filled
//! when any enabled rule matches it:
//!
//! | Code | Fills |
//! |------|-------|
//! | `S`  | Sundays |
//! | `s`  | Saturdays |
//! | `Y`  | even rows |
//! | `y`  | odd rows |
//! | `X`  | even columns |
//! | `x`  | odd columns |
//! | `c`  | cells where row + column is even |
//! | `C`  | cells where row + column is odd |
//!
//! Other characters are ignored.

use chrono::Weekday;

/// A set of shading rules, kept in the user's original spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillPattern(String);

impl FillPattern {
    /// Wraps a pattern string; unknown characters are kept but never match.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the cell at (`row`, `col`) showing a day on `weekday` is filled.
    pub fn should_fill(&self, row: usize, col: usize, weekday: Weekday) -> bool {
        should_fill(row, col, weekday, &self.0)
    }
}

impl From<&str> for FillPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

/// Evaluates `pattern` for one cell.
pub fn should_fill(row: usize, col: usize, weekday: Weekday, pattern: &str) -> bool {
    pattern.chars().any(|code| match code {
        'S' => weekday == Weekday::Sun,
        's' => weekday == Weekday::Sat,
        'Y' => row % 2 == 0,
        'y' => row % 2 == 1,
        'X' => col % 2 == 0,
        'x' => col % 2 == 1,
        'c' => (row + col) % 2 == 0,
        'C' => (row + col) % 2 == 1,
        _ => false,
    })
}
