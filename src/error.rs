//! Error types for the calgrid crate.

use std::path::PathBuf;

/// Error type for the few hard failures of the calendar engine.
///
/// Everything else (unknown locales, out-of-range year spreads, moon
/// scans without a hit, unparseable event rules) degrades to "omit the
/// annotation" and never reaches this type.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when an event names a day that never exists in its month.
    #[error("invalid event date: {month}/{day}")]
    InvalidEvent {
        /// Month of the rejected event.
        month: u32,
        /// Day of the rejected event.
        day: u32,
    },

    /// Returned when a month range starts after it ends.
    #[error("invalid month range: {begin}..{end} (begin must not exceed end)")]
    InvalidRange {
        /// First month of the range.
        begin: u32,
        /// Last month of the range.
        end: u32,
    },

    /// Returned when an existing event file cannot be read.
    #[error("failed to read event file {}", path.display())]
    EventFile {
        /// Path of the event file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the drawing surface fails to write.
    #[error("failed to write calendar output")]
    Output(#[from] std::io::Error),
}
