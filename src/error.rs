//! Error types surfaced by the crate.
//!
//! Every failure here reflects a caller-supplied invalid value, never a
//! transient condition, so all errors are surfaced synchronously with no
//! retries and no silent defaults.

use chrono::NaiveDateTime;
use thiserror::Error;

/// An era/year combination out of range, or an instant outside the era
/// system entirely.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateValueError {
    /// The instant precedes the start of the earliest known era.
    #[error("no era is defined at {0}")]
    BeforeFirstEra(NaiveDateTime),
    /// No era matches the given name or code.
    #[error("no era matches {0:?}")]
    UnknownEra(String),
    /// The year-within-era is outside the era's valid span.
    #[error("invalid era year {nen} for {gengo}")]
    NenOutOfRange { gengo: &'static str, nen: i32 },
    /// The year/month/day triple is not a calendar date.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// A value that cannot be rendered as, or read from, Japanese numerals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumeralError {
    /// Negative numbers have no Japanese numeral form.
    #[error("cannot format negative number {0}")]
    Negative(i64),
    /// The empty string is not a numeral.
    #[error("empty numeral text")]
    Empty,
    /// A character that is neither a digit glyph nor a place marker.
    #[error("unrecognized numeral character {0:?}")]
    UnknownChar(char),
    /// The numeral denotes a value too large to represent.
    #[error("numeral out of range: {0:?}")]
    OutOfRange(String),
}

/// Failure to parse text against a compiled date/time pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input text was empty.
    #[error("empty input text")]
    Empty,
    /// The input text does not match the compiled pattern.
    #[error("text {text:?} does not match pattern {pattern:?}")]
    NoMatch { pattern: String, text: String },
    /// The matched fields do not form a real calendar date or time.
    #[error("matched fields do not form a valid date")]
    InvalidDate,
    #[error(transparent)]
    Numeral(#[from] NumeralError),
    #[error(transparent)]
    DateValue(#[from] DateValueError),
}

/// Failure to parse an ISO-8601-like duration text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("text cannot be parsed to a period: {0:?}")]
pub struct PeriodParseError(pub String);
