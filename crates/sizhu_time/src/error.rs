//! Error types for birth moments and solar-term stores.

use thiserror::Error;

/// Errors from building a [`BirthMoment`](crate::BirthMoment).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// UTC offset outside ±14 hours.
    #[error("utc offset {0} minutes is outside ±840")]
    OffsetOutOfRange(i32),
    /// Latitude or longitude outside its valid range.
    #[error("coordinates out of range: lat {lat}, lon {lon}")]
    CoordinatesOutOfRange { lat: f64, lon: f64 },
}

/// Errors from reading solar-term data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A data row could not be parsed.
    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },
    /// A year is missing one or more of its 24 terms.
    #[error("year {year}: missing {missing} term(s)")]
    IncompleteYear { year: i32, missing: usize },
    /// A year's term instants are not strictly increasing.
    #[error("year {year}: {term} is not after the preceding term")]
    NotIncreasing { year: i32, term: &'static str },
    /// The backing store is unavailable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
