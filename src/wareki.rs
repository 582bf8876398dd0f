//! 和暦 (wareki), a year expressed as an era plus a year-within-era.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Utc};

use crate::error::DateValueError;
use crate::gengo::Gengo;

/// A year in the Japanese era calendar.
///
/// Holds the era, the 1-based year within the era (年, "nen"), and the
/// derived Gregorian year. Year 1 of an era is idiomatically rendered 元
/// ("gan") in formatted text; `Display` here uses the plain decimal form.
///
/// # Examples
///
/// ```
/// use wareki::{Gengo, Wareki};
///
/// let wareki = Wareki::new(Gengo::heisei(), 4).unwrap();
/// assert_eq!(1992, wareki.year());
/// assert_eq!("平成4", wareki.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wareki {
    gengo: &'static Gengo,
    nen: i32,
    year: i32,
}

impl Wareki {
    /// Creates a `Wareki` from an era and a year within that era.
    ///
    /// Fails with [`DateValueError::NenOutOfRange`] when the combination is
    /// not valid per [`is_valid`](Self::is_valid).
    pub fn new(gengo: &'static Gengo, nen: i32) -> Result<Self, DateValueError> {
        if !Self::is_valid(gengo, nen) {
            return Err(DateValueError::NenOutOfRange {
                gengo: gengo.name(),
                nen,
            });
        }
        Ok(Self {
            gengo,
            nen,
            year: Self::to_year(gengo, nen),
        })
    }

    /// Converts an era and year-within-era to a Gregorian year.
    ///
    /// Pure arithmetic, no validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use wareki::{Gengo, Wareki};
    ///
    /// assert_eq!(1868, Wareki::to_year(Gengo::meiji(), 1));
    /// assert_eq!(2028, Wareki::to_year(Gengo::reiwa(), 10));
    /// ```
    pub fn to_year(gengo: &Gengo, nen: i32) -> i32 {
        gengo.since().year() + nen - 1
    }

    /// Checks whether `nen` is a valid year within the given era.
    ///
    /// The last valid year of an era runs up to and including the Gregorian
    /// year in which the next era begins (昭和64 and 平成1 are both 1989);
    /// the latest era is capped at 99.
    ///
    /// # Panics
    ///
    /// Panics if `gengo` is not an era from the registry, which cannot
    /// happen for references obtained through [`Gengo`]'s API.
    pub fn is_valid(gengo: &Gengo, nen: i32) -> bool {
        if nen < 1 {
            return false;
        }
        let list = Gengo::list();
        let idx = list
            .iter()
            .position(|g| g == gengo)
            .expect("gengo comes from the registry");
        let last_nen = match list.get(idx + 1) {
            Some(next) => next.since().year() - gengo.since().year() + 1,
            None => 99,
        };
        nen <= last_nen
    }

    /// Converts a JST instant to its era-calendar year.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use wareki::{Gengo, Wareki};
    ///
    /// let date = NaiveDate::from_ymd_opt(2019, 4, 30).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let wareki = Wareki::from_date(date).unwrap();
    /// assert_eq!(Gengo::heisei(), wareki.gengo());
    /// assert_eq!(31, wareki.nen());
    /// ```
    pub fn from_date(date: NaiveDateTime) -> Result<Self, DateValueError> {
        let gengo = Gengo::from_date(date)?;
        Self::new(gengo, date.year() - gengo.since().year() + 1)
    }

    /// The era-calendar year of the current instant in Japan Standard Time.
    pub fn now() -> Self {
        Self::from_date(Utc::now().with_timezone(&crate::jst()).naive_local())
            .expect("the current instant is within the era range")
    }

    /// The era.
    pub fn gengo(&self) -> &'static Gengo {
        self.gengo
    }
    /// The 1-based year within the era.
    pub fn nen(&self) -> i32 {
        self.nen
    }
    /// The Gregorian year.
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for Wareki {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.gengo, self.nen)
    }
}
