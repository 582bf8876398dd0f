//! Utilities for the Japanese calendar: era (元号) resolution, 和暦
//! era-year conversion, national holiday determination, Japanese numeral
//! text, and an era-aware pattern formatter/parser.
//!
//! All date/time values are naive local times in Japan Standard Time
//! (UTC+9, no daylight saving); callers normalize instants with [`jst`]
//! before handing them in.
//!
//! # Examples
//!
//! Era-year conversion with [`Wareki`]:
//!
//! ```
//! use chrono::NaiveDate;
//! use wareki::{Gengo, Wareki};
//!
//! let date = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let wareki = Wareki::from_date(date).unwrap();
//!
//! assert_eq!(Gengo::reiwa(), wareki.gengo());
//! assert_eq!(1, wareki.nen());
//! ```
//!
//! National holidays, including the derived substitute and citizen's
//! holidays:
//!
//! ```
//! use chrono::NaiveDate;
//! use wareki::holiday;
//!
//! let date = NaiveDate::from_ymd_opt(2000, 1, 10).unwrap();
//! assert_eq!(Some("成人の日"), holiday::holiday(date));
//! ```
//!
//! Era-aware formatting:
//!
//! ```
//! use chrono::NaiveDate;
//! use wareki::DateTimeFormatter;
//!
//! let formatter = DateTimeFormatter::new("GGGGyyyy年M月d日");
//! let date = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! assert_eq!("令和元年5月1日", formatter.format(date).unwrap());
//! ```

pub mod error;
pub mod fmt;
pub mod gengo;
pub mod holiday;
pub mod numeral;
pub mod period;
pub mod wareki;

pub use error::{DateValueError, NumeralError, ParseError, PeriodParseError};
pub use fmt::DateTimeFormatter;
pub use gengo::Gengo;
pub use period::Period;
pub use wareki::Wareki;

use chrono::FixedOffset;

/// The fixed Japan Standard Time offset (UTC+9).
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wareki::jst;
///
/// let utc = Utc.with_ymd_and_hms(2019, 4, 30, 15, 0, 0).unwrap();
/// let local = utc.with_timezone(&jst()).naive_local();
/// assert_eq!("2019-05-01 00:00:00", local.to_string());
/// ```
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is in range")
}
