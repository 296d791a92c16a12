//! Error types for the jalali_date crate.

/// Error type for all fallible operations in the crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateError {
    /// The date string was empty or only whitespace.
    #[error("Empty date string")]
    EmptyInput,

    /// The date string did not have the expected shape.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// A one-based month outside `1..=12`.
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(i64),

    /// A day that does not exist in the given month.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i64, month: i64, day: i64 },

    /// The date falls outside the span the calendar conversion supports.
    #[error("Date out of supported range (year {year})")]
    OutOfRange { year: i64 },

    /// A scale name that is neither a singular nor a plural unit name.
    #[error("Unknown scale: {0}")]
    UnknownScale(String),

    /// The configured time separator is not a valid pattern.
    #[error("Invalid time separator pattern: {0}")]
    InvalidSeparator(#[from] regex::Error),
}
