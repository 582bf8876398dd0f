//! Calendar durations of years, months, and days.

use chrono::{Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PeriodParseError;

/// A signed calendar duration.
///
/// Components may be negative independently. Adding a period to a date
/// applies the total months first (with end-of-month clamping, so
/// January 31 plus one month is the last day of February) and the days
/// afterward.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use wareki::Period;
///
/// let period = Period::parse("P1Y2M3D").unwrap();
/// assert_eq!(Period::of(1, 2, 3), period);
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let next = Period::of_months(1).add_to(date).unwrap();
/// assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), next);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

/// ISO-8601-like duration text restricted to years/months/weeks/days.
static PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([-+]?)P(?:([-+]?[0-9]+)Y)?(?:([-+]?[0-9]+)M)?(?:([-+]?[0-9]+)W)?(?:([-+]?[0-9]+)D)?$")
        .expect("period pattern is a valid regular expression")
});

impl Period {
    /// A period of zero length.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
    };

    fn create(years: i32, months: i32, days: i32) -> Self {
        if years == 0 && months == 0 && days == 0 {
            Self::ZERO
        } else {
            Self { years, months, days }
        }
    }

    /// A period of the given years, months, and days.
    pub fn of(years: i32, months: i32, days: i32) -> Self {
        Self::create(years, months, days)
    }
    /// A period of whole years.
    pub fn of_years(years: i32) -> Self {
        Self::create(years, 0, 0)
    }
    /// A period of whole months.
    pub fn of_months(months: i32) -> Self {
        Self::create(0, months, 0)
    }
    /// A period of whole weeks, stored as 7×`weeks` days.
    pub fn of_weeks(weeks: i32) -> Self {
        Self::create(0, 0, weeks * 7)
    }
    /// A period of whole days.
    pub fn of_days(days: i32) -> Self {
        Self::create(0, 0, days)
    }

    /// Parses text such as `P1Y2M3D`, `P2W`, or `-P1D`.
    ///
    /// Weeks are folded into the day component. A leading sign negates
    /// every component; each component may also carry its own sign. At
    /// least one component is required.
    ///
    /// # Examples
    ///
    /// ```
    /// use wareki::Period;
    ///
    /// assert_eq!(Period::of_days(14), Period::parse("P2W").unwrap());
    /// assert_eq!(Period::of_days(-1), Period::parse("-P1D").unwrap());
    /// assert!(Period::parse("P").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PeriodParseError> {
        let caps = PATTERN
            .captures(text)
            .ok_or_else(|| PeriodParseError(text.to_owned()))?;
        if (2..=5).all(|i| caps.get(i).is_none()) {
            return Err(PeriodParseError(text.to_owned()));
        }
        let negate = if &caps[1] == "-" { -1 } else { 1 };
        let component = |i: usize| -> Result<i32, PeriodParseError> {
            match caps.get(i) {
                Some(m) => m
                    .as_str()
                    .parse::<i32>()
                    .map(|v| v * negate)
                    .map_err(|_| PeriodParseError(text.to_owned())),
                None => Ok(0),
            }
        };
        let years = component(2)?;
        let months = component(3)?;
        let weeks = component(4)?;
        let days = component(5)?;
        Ok(Self::create(years, months, days + weeks * 7))
    }

    /// The years component.
    pub fn years(&self) -> i32 {
        self.years
    }
    /// The months component.
    pub fn months(&self) -> i32 {
        self.months
    }
    /// The days component.
    pub fn days(&self) -> i32 {
        self.days
    }
    /// The year and month components folded into total months.
    pub fn total_months(&self) -> i64 {
        i64::from(self.years) * 12 + i64::from(self.months)
    }
    /// `true` when all components are zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
    /// `true` when any component is negative.
    pub fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Adds this period to a date.
    ///
    /// Returns `None` only when the result falls outside chrono's
    /// representable date range.
    pub fn add_to(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut date = date;
        let total_months = self.total_months();
        if total_months > 0 {
            date = date.checked_add_months(Months::new(total_months as u32))?;
        } else if total_months < 0 {
            date = date.checked_sub_months(Months::new(-total_months as u32))?;
        }
        if self.days > 0 {
            date = date.checked_add_days(Days::new(self.days as u64))?;
        } else if self.days < 0 {
            date = date.checked_sub_days(Days::new(-(self.days as i64) as u64))?;
        }
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_dataset() {
        let dataset = [
            ("P1Y2M3D", Period::of(1, 2, 3)),
            ("P1Y", Period::of_years(1)),
            ("P3M", Period::of_months(3)),
            ("P2W", Period::of_days(14)),
            ("P5D", Period::of_days(5)),
            ("P1W1D", Period::of_days(8)),
            ("-P1D", Period::of_days(-1)),
            ("P-1D", Period::of_days(-1)),
            ("-P1Y-2M", Period::of(-1, 2, 0)),
            ("p1y2m", Period::of(1, 2, 0)),
            ("P0D", Period::ZERO),
        ];
        for (text, std) in dataset {
            assert_eq!(Ok(std), Period::parse(text), "{text}");
        }
    }

    #[test]
    fn parse_errors() {
        for text in ["", "P", "1Y", "P1S", "x", "P1Y2X"] {
            assert_eq!(Err(PeriodParseError(text.to_owned())), Period::parse(text), "{text}");
        }
    }

    #[test]
    fn zero_is_canonical() {
        assert!(Period::of(0, 0, 0).is_zero());
        assert_eq!(Period::ZERO, Period::of_days(0));
        assert!(!Period::of_days(1).is_zero());
    }

    #[test]
    fn negativity() {
        assert!(Period::of(1, -1, 0).is_negative());
        assert!(!Period::of(1, 2, 3).is_negative());
        assert!(!Period::ZERO.is_negative());
    }

    #[test]
    fn total_months() {
        assert_eq!(14, Period::of(1, 2, 3).total_months());
        assert_eq!(-10, Period::of(-1, 2, 0).total_months());
    }

    #[test]
    fn add_to_dataset() {
        let dataset = [
            (Period::of_days(1), (2023, 12, 31), (2024, 1, 1)),
            (Period::of_days(-1), (2024, 3, 1), (2024, 2, 29)),
            (Period::of_months(1), (2024, 1, 31), (2024, 2, 29)),
            (Period::of_months(1), (2023, 1, 31), (2023, 2, 28)),
            (Period::of_years(1), (2024, 2, 29), (2025, 2, 28)),
            (Period::of(1, 2, 3), (2020, 1, 1), (2021, 3, 4)),
            (Period::of_months(-13), (2024, 3, 31), (2023, 2, 28)),
            (Period::ZERO, (2021, 9, 8), (2021, 9, 8)),
        ];
        for (period, (y, m, d), std) in dataset {
            assert_eq!(
                Some(date(std.0, std.1, std.2)),
                period.add_to(date(y, m, d)),
                "{period:?} + {y:04}-{m:02}-{d:02}"
            );
        }
    }
}
