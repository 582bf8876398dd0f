//! 元号 (gengo), the named era periods of the Japanese calendar.
//!
//! The five modern eras are process-wide constants, ordered by their start
//! instant. All instants are naive local times in Japan Standard Time
//! (UTC+9, no DST); see [`crate::jst`] for the offset.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;

use crate::error::DateValueError;

/// A Japanese era.
///
/// Instances are only ever obtained from the registry ([`Gengo::list`] and
/// the per-era accessors), so every `&Gengo` in the crate is `'static`.
///
/// # Examples
///
/// ```
/// use wareki::Gengo;
///
/// let gengo = Gengo::of("Heisei").unwrap();
/// assert_eq!("平成", gengo.name());
/// assert_eq!("H", gengo.abbr_roman_name());
/// ```
#[derive(Debug)]
pub struct Gengo {
    name: &'static str,
    abbr_name: &'static str,
    roman_name: &'static str,
    abbr_roman_name: &'static str,
    since: NaiveDateTime,
}

static LIST: Lazy<[Gengo; 5]> = Lazy::new(|| {
    [
        Gengo::new("明治", "明", "Meiji", "M", 1868, 1, 25),
        Gengo::new("大正", "大", "Taisho", "T", 1912, 7, 30),
        Gengo::new("昭和", "昭", "Showa", "S", 1926, 12, 25),
        Gengo::new("平成", "平", "Heisei", "H", 1989, 1, 8),
        Gengo::new("令和", "令", "Reiwa", "R", 2019, 5, 1),
    ]
});

impl Gengo {
    fn new(
        name: &'static str,
        abbr_name: &'static str,
        roman_name: &'static str,
        abbr_roman_name: &'static str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Self {
        let since = NaiveDate::from_ymd_opt(year, month, day)
            .expect("era start dates are valid")
            .and_time(NaiveTime::MIN);
        Self {
            name,
            abbr_name,
            roman_name,
            abbr_roman_name,
            since,
        }
    }

    /// All known eras, in strictly increasing order of [`since`](Self::since).
    pub fn list() -> &'static [Gengo; 5] {
        &LIST
    }

    /// 明治 (1868–1912)
    pub fn meiji() -> &'static Gengo {
        &Self::list()[0]
    }
    /// 大正 (1912–1926)
    pub fn taisho() -> &'static Gengo {
        &Self::list()[1]
    }
    /// 昭和 (1926–1989)
    pub fn showa() -> &'static Gengo {
        &Self::list()[2]
    }
    /// 平成 (1989–2019)
    pub fn heisei() -> &'static Gengo {
        &Self::list()[3]
    }
    /// 令和 (2019–)
    pub fn reiwa() -> &'static Gengo {
        &Self::list()[4]
    }

    /// The era name in native script, e.g. 平成.
    pub fn name(&self) -> &'static str {
        self.name
    }
    /// The one-character native abbreviation, e.g. 平.
    pub fn abbr_name(&self) -> &'static str {
        self.abbr_name
    }
    /// The Latin transliteration, e.g. Heisei.
    pub fn roman_name(&self) -> &'static str {
        self.roman_name
    }
    /// The one-letter Latin code, e.g. H.
    pub fn abbr_roman_name(&self) -> &'static str {
        self.abbr_roman_name
    }
    /// The first instant of the era, as a JST local time.
    pub fn since(&self) -> NaiveDateTime {
        self.since
    }

    /// The era of the current instant in Japan Standard Time.
    pub fn now() -> &'static Gengo {
        Self::from_date(Utc::now().with_timezone(&crate::jst()).naive_local())
            .expect("the current instant is within the era range")
    }

    /// Looks up the era in effect at the given JST instant.
    ///
    /// Scans from the most recent era backward and returns the first era
    /// whose start is at or before `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use wareki::Gengo;
    ///
    /// let date = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// assert_eq!(Gengo::reiwa(), Gengo::from_date(date).unwrap());
    /// ```
    pub fn from_date(date: NaiveDateTime) -> Result<&'static Gengo, DateValueError> {
        Self::list()
            .iter()
            .rev()
            .find(|gengo| gengo.since <= date)
            .ok_or(DateValueError::BeforeFirstEra(date))
    }

    /// Looks up the era in effect at midnight JST of the given calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<&'static Gengo, DateValueError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateValueError::InvalidDate { year, month, day })?;
        Self::from_date(date.and_time(NaiveTime::MIN))
    }

    /// Looks up an era by any of its four name forms, case-insensitively.
    ///
    /// The scan runs from the most recent era backward, so if two forms ever
    /// collided the most recent era would win.
    ///
    /// # Examples
    ///
    /// ```
    /// use wareki::Gengo;
    ///
    /// assert_eq!(Gengo::heisei(), Gengo::of("平成").unwrap());
    /// assert_eq!(Gengo::heisei(), Gengo::of("h").unwrap());
    /// assert!(Gengo::of("").is_err());
    /// ```
    pub fn of(name_or_code: &str) -> Result<&'static Gengo, DateValueError> {
        let needle = name_or_code.to_lowercase();
        Self::list()
            .iter()
            .rev()
            .find(|gengo| {
                gengo.name.to_lowercase() == needle
                    || gengo.abbr_name.to_lowercase() == needle
                    || gengo.roman_name.to_lowercase() == needle
                    || gengo.abbr_roman_name.to_lowercase() == needle
            })
            .ok_or_else(|| DateValueError::UnknownEra(name_or_code.to_owned()))
    }

    /// Returns `true` if the text matches any name form of any era.
    pub fn is_valid(name_or_code: &str) -> bool {
        Self::is_valid_name(name_or_code)
            || Self::is_valid_abbr_name(name_or_code)
            || Self::is_valid_roman_name(name_or_code)
            || Self::is_valid_abbr_roman_name(name_or_code)
    }

    /// Returns `true` if the text matches a native era name (e.g. 平成).
    pub fn is_valid_name(name: &str) -> bool {
        let needle = name.to_lowercase();
        Self::list().iter().any(|g| g.name.to_lowercase() == needle)
    }

    /// Returns `true` if the text matches a native abbreviation (e.g. 平).
    pub fn is_valid_abbr_name(abbr_name: &str) -> bool {
        let needle = abbr_name.to_lowercase();
        Self::list().iter().any(|g| g.abbr_name.to_lowercase() == needle)
    }

    /// Returns `true` if the text matches a Roman era name (e.g. Heisei).
    pub fn is_valid_roman_name(roman_name: &str) -> bool {
        let needle = roman_name.to_lowercase();
        Self::list().iter().any(|g| g.roman_name.to_lowercase() == needle)
    }

    /// Returns `true` if the text matches a one-letter Roman code (e.g. H).
    pub fn is_valid_abbr_roman_name(abbr_roman_name: &str) -> bool {
        let needle = abbr_roman_name.to_lowercase();
        Self::list()
            .iter()
            .any(|g| g.abbr_roman_name.to_lowercase() == needle)
    }
}

impl PartialEq for Gengo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.since == other.since
    }
}
impl Eq for Gengo {}

impl Hash for Gengo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.since.hash(state);
    }
}

impl fmt::Display for Gengo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn list_is_ordered() {
        for pair in Gengo::list().windows(2) {
            assert!(pair[0].since() < pair[1].since());
        }
    }

    #[test]
    fn from_date_boundaries() {
        let dataset = [
            ((1868, 1, 25), Gengo::meiji()),
            ((1912, 7, 29), Gengo::meiji()),
            ((1912, 7, 30), Gengo::taisho()),
            ((1926, 12, 24), Gengo::taisho()),
            ((1926, 12, 25), Gengo::showa()),
            ((1989, 1, 7), Gengo::showa()),
            ((1989, 1, 8), Gengo::heisei()),
            ((2019, 4, 30), Gengo::heisei()),
            ((2019, 5, 1), Gengo::reiwa()),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(Ok(std), Gengo::from_date(at(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn from_date_before_meiji() {
        let date = at(1868, 1, 24);
        assert_eq!(Err(DateValueError::BeforeFirstEra(date)), Gengo::from_date(date));
    }

    #[test]
    fn from_date_at_each_since() {
        for gengo in Gengo::list() {
            assert_eq!(Ok(gengo), Gengo::from_date(gengo.since()));
        }
    }

    #[test]
    fn from_date_just_before_each_since() {
        let millisecond = chrono::Duration::milliseconds(1);
        for pair in Gengo::list().windows(2) {
            assert_eq!(Ok(&pair[0]), Gengo::from_date(pair[1].since() - millisecond));
        }
        assert!(Gengo::from_date(Gengo::meiji().since() - millisecond).is_err());
    }

    #[test]
    fn from_ymd_rejects_invalid_dates() {
        assert!(Gengo::from_ymd(2000, 1, 1).is_ok());
        assert_eq!(
            Err(DateValueError::InvalidDate { year: 2000, month: 2, day: 30 }),
            Gengo::from_ymd(2000, 2, 30)
        );
    }

    #[test]
    fn of_matches_every_form() {
        let dataset = [
            ("平成", Gengo::heisei()),
            ("昭和", Gengo::showa()),
            ("平", Gengo::heisei()),
            ("昭", Gengo::showa()),
            ("Heisei", Gengo::heisei()),
            ("HEISEI", Gengo::heisei()),
            ("showa", Gengo::showa()),
            ("H", Gengo::heisei()),
            ("h", Gengo::heisei()),
            ("s", Gengo::showa()),
            ("令和", Gengo::reiwa()),
            ("reiwa", Gengo::reiwa()),
            ("明治", Gengo::meiji()),
            ("t", Gengo::taisho()),
        ];
        for (text, std) in dataset {
            assert_eq!(Ok(std), Gengo::of(text), "{text}");
        }
    }

    #[test]
    fn of_unknown_text() {
        for text in ["", "元禄", "X", "Heise"] {
            assert_eq!(Err(DateValueError::UnknownEra(text.to_owned())), Gengo::of(text));
        }
    }

    #[test]
    fn validity_per_form() {
        // (text, name, abbr, roman, abbr_roman)
        let dataset = [
            ("平成", true, false, false, false),
            ("平", false, true, false, false),
            ("Heisei", false, false, true, false),
            ("HEISEI", false, false, true, false),
            ("H", false, false, false, true),
            ("h", false, false, false, true),
            ("", false, false, false, false),
        ];
        for (text, name, abbr, roman, abbr_roman) in dataset {
            assert_eq!(name, Gengo::is_valid_name(text), "{text}");
            assert_eq!(abbr, Gengo::is_valid_abbr_name(text), "{text}");
            assert_eq!(roman, Gengo::is_valid_roman_name(text), "{text}");
            assert_eq!(abbr_roman, Gengo::is_valid_abbr_roman_name(text), "{text}");
            assert_eq!(
                name || abbr || roman || abbr_roman,
                Gengo::is_valid(text),
                "{text}"
            );
        }
    }

    #[test]
    fn display_is_native_name() {
        assert_eq!("令和", Gengo::reiwa().to_string());
        assert_eq!("明治", Gengo::meiji().to_string());
    }

    #[test]
    fn equality_by_name_and_since() {
        assert_eq!(Gengo::meiji(), &Gengo::list()[0]);
        assert_ne!(Gengo::meiji(), Gengo::taisho());
    }
}
