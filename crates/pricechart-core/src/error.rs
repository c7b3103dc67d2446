//! Argument and time-range errors.

use thiserror::Error;

/// Errors raised while turning CLI time parameters into a [`TimeWindow`].
///
/// All of these are detected before any network traffic.
///
/// [`TimeWindow`]: crate::TimeWindow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Cannot use --last together with --start or --end")]
    ArgumentConflict,
    #[error("Must provide either --start or --last option")]
    ArgumentMissing,
    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),
    #[error("Start timestamp {start} must be before end timestamp {end}")]
    InvalidRange { start: i64, end: i64 },
}
