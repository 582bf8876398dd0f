//! Japanese national holiday determination.
//!
//! Holidays are determined by a fixed, priority-ordered table of rules,
//! each a pure predicate over one calendar date. On top of the table,
//! [`holiday`] layers the two derived kinds: substitute holidays
//! (振替休日, a Monday-onward weekday standing in for a holiday that fell
//! on a Sunday) and citizen's holidays (国民の休日, a weekday sandwiched
//! between two holidays). Both derived kinds only exist from the day
//! their amendment took effect.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use wareki::holiday;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! assert_eq!(Some("元日"), holiday::holiday(date));
//!
//! // 2024-02-11 was a Sunday, so the following Monday stands in.
//! let date = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
//! assert_eq!(Some("振替休日"), holiday::holiday(date));
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;

use crate::period::Period;

/// The calendar fields a holiday rule may look at.
struct DateParts {
    year: i32,
    month: u32,
    day: u32,
    weekday: Weekday,
    /// 1-based: days 1–7 are week 1, days 8–14 week 2, and so on.
    week_of_month: u32,
}

impl DateParts {
    fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday(),
            week_of_month: (date.day() - 1) / 7 + 1,
        }
    }
}

/// A single holiday rule: the matching holiday name, or `None`.
type Rule = fn(&DateParts) -> Option<&'static str>;

/// All fixed and rule-based holidays, in evaluation priority order.
static RULES: &[Rule] = &[
    new_years_day,
    coming_of_age_day,
    vernal_equinox,
    april_29_observances,
    constitution_memorial_day,
    childrens_day,
    autumnal_equinox,
    culture_day,
    labour_thanksgiving_day,
    akihito_wedding,
    national_foundation_day,
    respect_for_the_aged_day,
    sports_day,
    showa_state_funeral,
    akihito_birthday,
    akihito_enthronement_ceremony,
    naruhito_wedding,
    marine_day,
    greenery_day,
    mountain_day,
    naruhito_accession,
    naruhito_enthronement_ceremony,
    naruhito_birthday,
];

fn new_years_day(p: &DateParts) -> Option<&'static str> {
    (p.year > 1948 && p.month == 1 && p.day == 1).then_some("元日")
}

fn coming_of_age_day(p: &DateParts) -> Option<&'static str> {
    // Moved to the second Monday by the 2000 Happy Monday amendment.
    (p.year > 1948 && p.year < 2000 && p.month == 1 && p.day == 15
        || p.year >= 2000 && p.month == 1 && p.week_of_month == 2 && p.weekday == Weekday::Mon)
        .then_some("成人の日")
}

fn vernal_equinox(p: &DateParts) -> Option<&'static str> {
    (p.year > 1948 && p.month == 3 && p.day == vernal_equinox_day(p.year)).then_some("春分の日")
}

fn april_29_observances(p: &DateParts) -> Option<&'static str> {
    // The same date changed occasion twice: the Showa emperor's birthday,
    // then Greenery Day from 1989, then Showa Day from 2007.
    if p.year > 1948 && p.month == 4 && p.day == 29 {
        Some(if p.year <= 1988 {
            "天皇誕生日"
        } else if p.year < 2007 {
            "みどりの日"
        } else {
            "昭和の日"
        })
    } else {
        None
    }
}

fn constitution_memorial_day(p: &DateParts) -> Option<&'static str> {
    (p.year > 1948 && p.month == 5 && p.day == 3).then_some("憲法記念日")
}

fn childrens_day(p: &DateParts) -> Option<&'static str> {
    (p.year > 1948 && p.month == 5 && p.day == 5).then_some("こどもの日")
}

fn autumnal_equinox(p: &DateParts) -> Option<&'static str> {
    (p.year >= 1948 && p.month == 9 && p.day == autumnal_equinox_day(p.year)).then_some("秋分の日")
}

fn culture_day(p: &DateParts) -> Option<&'static str> {
    (p.year >= 1948 && p.month == 11 && p.day == 3).then_some("文化の日")
}

fn labour_thanksgiving_day(p: &DateParts) -> Option<&'static str> {
    (p.year >= 1948 && p.month == 11 && p.day == 23).then_some("勤労感謝の日")
}

fn akihito_wedding(p: &DateParts) -> Option<&'static str> {
    (p.year == 1959 && p.month == 4 && p.day == 10).then_some("皇太子・明仁親王の結婚の儀")
}

fn national_foundation_day(p: &DateParts) -> Option<&'static str> {
    (p.year > 1966 && p.month == 2 && p.day == 11).then_some("建国記念の日")
}

fn respect_for_the_aged_day(p: &DateParts) -> Option<&'static str> {
    // Moved to the third Monday by the 2003 Happy Monday amendment.
    (p.year >= 1966 && p.year < 2003 && p.month == 9 && p.day == 15
        || p.year >= 2003 && p.month == 9 && p.week_of_month == 3 && p.weekday == Weekday::Mon)
        .then_some("敬老の日")
}

fn sports_day(p: &DateParts) -> Option<&'static str> {
    // Fixed 10/10 until 1999, second Monday of October from 2000, moved
    // next to the Tokyo Olympics opening in 2020 and 2021, and renamed
    // from 体育の日 in 2020.
    (p.year >= 1966 && p.year < 2000 && p.month == 10 && p.day == 10
        || p.year >= 2000
            && p.month == 10
            && p.week_of_month == 2
            && p.weekday == Weekday::Mon
            && p.year != 2020
            && p.year != 2021
        || p.year == 2020 && p.month == 7 && p.day == 24
        || p.year == 2021 && p.month == 7 && p.day == 23)
        .then(|| if p.year >= 2020 { "スポーツの日" } else { "体育の日" })
}

fn showa_state_funeral(p: &DateParts) -> Option<&'static str> {
    (p.year == 1989 && p.month == 2 && p.day == 24).then_some("昭和天皇の大喪の礼")
}

fn akihito_birthday(p: &DateParts) -> Option<&'static str> {
    (p.year >= 1989 && p.year < 2019 && p.month == 12 && p.day == 23).then_some("天皇誕生日")
}

fn akihito_enthronement_ceremony(p: &DateParts) -> Option<&'static str> {
    (p.year == 1990 && p.month == 11 && p.day == 12).then_some("即位礼正殿の儀")
}

fn naruhito_wedding(p: &DateParts) -> Option<&'static str> {
    (p.year == 1993 && p.month == 6 && p.day == 9).then_some("皇太子・徳仁親王の結婚の儀")
}

fn marine_day(p: &DateParts) -> Option<&'static str> {
    // Fixed 7/20 until 2002, third Monday of July from 2003, moved to the
    // Olympics opening eve in 2020 and 2021.
    (p.year >= 1996 && p.year < 2003 && p.month == 7 && p.day == 20
        || p.year >= 2003
            && p.month == 7
            && p.week_of_month == 3
            && p.weekday == Weekday::Mon
            && p.year != 2020
            && p.year != 2021
        || p.year == 2020 && p.month == 7 && p.day == 23
        || p.year == 2021 && p.month == 7 && p.day == 22)
        .then_some("海の日")
}

fn greenery_day(p: &DateParts) -> Option<&'static str> {
    // On 5/4 since 2007, when 4/29 became Showa Day.
    (p.year >= 2007 && p.month == 5 && p.day == 4).then_some("みどりの日")
}

fn mountain_day(p: &DateParts) -> Option<&'static str> {
    (p.year >= 2016 && p.month == 8 && p.day == 11 && p.year != 2020 && p.year != 2021
        || p.year == 2020 && p.month == 8 && p.day == 10
        || p.year == 2021 && p.month == 8 && p.day == 8)
        .then_some("山の日")
}

fn naruhito_accession(p: &DateParts) -> Option<&'static str> {
    (p.year == 2019 && p.month == 5 && p.day == 1).then_some("天皇の即位の日")
}

fn naruhito_enthronement_ceremony(p: &DateParts) -> Option<&'static str> {
    (p.year == 2019 && p.month == 10 && p.day == 22).then_some("即位礼正殿の儀")
}

fn naruhito_birthday(p: &DateParts) -> Option<&'static str> {
    (p.year >= 2020 && p.month == 2 && p.day == 23).then_some("天皇誕生日")
}

/// The day of March on which the vernal equinox falls, by the linear
/// approximation matching the官報-published dates for 1900–2099.
pub fn vernal_equinox_day(year: i32) -> u32 {
    equinox_day(year, 0.242385544201545, 20.9150411785049)
}

/// The day of September on which the autumnal equinox falls, by the
/// parallel approximation to [`vernal_equinox_day`].
pub fn autumnal_equinox_day(year: i32) -> u32 {
    equinox_day(year, 0.242035499172366, 24.0227494548387)
}

fn equinox_day(year: i32, rate: f64, offset: f64) -> u32 {
    let leap_days = year / 4 - year / 100 + year / 400;
    (rate * f64::from(year) - f64::from(leap_days) + offset).floor() as u32
}

/// Effective date of the substitute holiday amendment.
static SUBSTITUTE_HOLIDAYS_SINCE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1973, 4, 12).expect("valid date"));
/// Effective date of the citizen's holiday amendment.
static CITIZENS_HOLIDAYS_SINCE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1985, 12, 27).expect("valid date"));

/// Returns the name of the fixed or rule-based holiday on `date`, if any.
///
/// Substitute and citizen's holidays are not considered; see [`holiday`].
pub fn const_holiday(date: NaiveDate) -> Option<&'static str> {
    let parts = DateParts::of(date);
    RULES.iter().find_map(|rule| rule(&parts))
}

/// Returns `true` if a fixed or rule-based holiday falls on `date`.
pub fn is_const_holiday(date: NaiveDate) -> bool {
    const_holiday(date).is_some()
}

/// Returns the name of the holiday on `date`, if any, including substitute
/// and citizen's holidays.
///
/// A substitute holiday is found by walking backward while every visited
/// day is a fixed holiday; if one of those days is a Sunday, `date` stands
/// in for it. A citizen's holiday is a non-Sunday squeezed directly
/// between two fixed holidays.
pub fn holiday(date: NaiveDate) -> Option<&'static str> {
    if let Some(name) = const_holiday(date) {
        return Some(name);
    }
    let yesterday = Period::of_days(-1);
    let tomorrow = Period::of_days(1);
    if date >= *SUBSTITUTE_HOLIDAYS_SINCE {
        let mut visited = yesterday.add_to(date).expect("date arithmetic in range");
        while is_const_holiday(visited) {
            if visited.weekday() == Weekday::Sun {
                return Some("振替休日");
            }
            visited = yesterday.add_to(visited).expect("date arithmetic in range");
        }
    }
    if date >= *CITIZENS_HOLIDAYS_SINCE {
        let prev = yesterday.add_to(date).expect("date arithmetic in range");
        let next = tomorrow.add_to(date).expect("date arithmetic in range");
        if is_const_holiday(prev) && is_const_holiday(next) && date.weekday() != Weekday::Sun {
            return Some("国民の休日");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn equinox_days() {
        let vernal = [
            (1948, 21),
            (1989, 21),
            (2000, 20),
            (2021, 20),
            (2024, 20),
            (2025, 20),
            (2026, 20),
        ];
        for (year, std) in vernal {
            assert_eq!(std, vernal_equinox_day(year), "vernal {year}");
        }
        let autumnal = [
            (1948, 23),
            (2000, 23),
            (2012, 22),
            (2015, 23),
            (2024, 22),
            (2026, 23),
        ];
        for (year, std) in autumnal {
            assert_eq!(std, autumnal_equinox_day(year), "autumnal {year}");
        }
    }

    #[test]
    fn fixed_holidays() {
        let dataset = [
            ((2024, 1, 1), Some("元日")),
            ((1949, 1, 1), Some("元日")),
            ((1948, 1, 1), None),
            ((2024, 2, 11), Some("建国記念の日")),
            ((1966, 2, 11), None),
            ((1967, 2, 11), Some("建国記念の日")),
            ((2024, 3, 20), Some("春分の日")),
            ((1989, 3, 21), Some("春分の日")),
            ((2024, 5, 3), Some("憲法記念日")),
            ((2024, 5, 5), Some("こどもの日")),
            ((2024, 9, 22), Some("秋分の日")),
            ((1948, 9, 23), Some("秋分の日")),
            ((2024, 11, 3), Some("文化の日")),
            ((1948, 11, 3), Some("文化の日")),
            ((2024, 11, 23), Some("勤労感謝の日")),
            ((2016, 8, 11), Some("山の日")),
            ((2015, 8, 11), None),
            ((2024, 6, 12), None),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, const_holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn happy_monday_transitions() {
        let dataset = [
            // Coming of Age Day: fixed 1/15 through 1999, 2nd Monday after.
            ((1999, 1, 15), Some("成人の日")),
            ((2000, 1, 15), None),
            ((2000, 1, 10), Some("成人の日")),
            ((2024, 1, 8), Some("成人の日")),
            // Respect for the Aged Day: fixed 9/15 through 2002.
            ((2002, 9, 15), Some("敬老の日")),
            ((2003, 9, 15), Some("敬老の日")), // 3rd Monday in 2003
            ((2015, 9, 21), Some("敬老の日")),
            // Sports Day: fixed 10/10 through 1999.
            ((1999, 10, 10), Some("体育の日")),
            ((2000, 10, 9), Some("体育の日")),
            ((2019, 10, 14), Some("体育の日")),
            ((2022, 10, 10), Some("スポーツの日")),
            // Marine Day: fixed 7/20 through 2002.
            ((1995, 7, 20), None),
            ((1996, 7, 20), Some("海の日")),
            ((2003, 7, 21), Some("海の日")),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, const_holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn april_29_changes_name_over_time() {
        let dataset = [
            ((1988, 4, 29), Some("天皇誕生日")),
            ((1989, 4, 29), Some("みどりの日")),
            ((2006, 4, 29), Some("みどりの日")),
            ((2007, 4, 29), Some("昭和の日")),
            ((2006, 5, 4), None),
            ((2007, 5, 4), Some("みどりの日")),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, const_holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn emperors_birthday_moves_between_reigns() {
        let dataset = [
            ((1988, 12, 23), None),
            ((1989, 12, 23), Some("天皇誕生日")),
            ((2018, 12, 23), Some("天皇誕生日")),
            ((2019, 12, 23), None),
            ((2019, 2, 23), None),
            ((2020, 2, 23), Some("天皇誕生日")),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, const_holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn imperial_one_off_observances() {
        let dataset = [
            ((1959, 4, 10), Some("皇太子・明仁親王の結婚の儀")),
            ((1989, 2, 24), Some("昭和天皇の大喪の礼")),
            ((1990, 11, 12), Some("即位礼正殿の儀")),
            ((1993, 6, 9), Some("皇太子・徳仁親王の結婚の儀")),
            ((2019, 5, 1), Some("天皇の即位の日")),
            ((2019, 10, 22), Some("即位礼正殿の儀")),
            ((2018, 5, 1), None),
            ((2020, 10, 22), None),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, const_holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn olympic_reschedulings() {
        let dataset = [
            ((2020, 7, 23), Some("海の日")),
            ((2020, 7, 24), Some("スポーツの日")),
            ((2020, 8, 10), Some("山の日")),
            ((2020, 8, 11), None),
            ((2020, 10, 12), None), // would be the 2nd Monday
            ((2021, 7, 22), Some("海の日")),
            ((2021, 7, 23), Some("スポーツの日")),
            ((2021, 8, 8), Some("山の日")),
            ((2021, 8, 11), None),
            ((2021, 7, 19), None), // would be the 3rd Monday
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, const_holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn substitute_holidays() {
        let dataset = [
            // 1973-04-30 follows the first Sunday holiday after the
            // amendment took effect.
            ((1973, 4, 30), Some("振替休日")),
            // 1970-05-03 was also a Sunday, but predates the amendment.
            ((1970, 5, 4), None),
            ((2024, 2, 12), Some("振替休日")),
            ((2024, 5, 6), Some("振替休日")),
            ((2019, 5, 6), Some("振替休日")),
            ((2020, 2, 24), Some("振替休日")),
            // 2021-08-08 (Mountain Day) was a Sunday.
            ((2021, 8, 9), Some("振替休日")),
            // An ordinary Monday.
            ((2024, 6, 10), None),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn citizens_holidays() {
        let dataset = [
            // Golden Week: 5/4 between Constitution Memorial Day and
            // Children's Day, before it became Greenery Day in 2007.
            ((1988, 5, 4), Some("国民の休日")),
            // A Sunday between two holidays does not qualify.
            ((1986, 5, 4), None),
            // Before the amendment took effect.
            ((1985, 5, 4), None),
            // Silver Week: between Respect for the Aged Day and the
            // autumnal equinox.
            ((2015, 9, 22), Some("国民の休日")),
            // The 2019 accession bridged two citizen's holidays.
            ((2019, 4, 30), Some("国民の休日")),
            ((2019, 5, 2), Some("国民の休日")),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, holiday(date(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn holiday_prefers_const_name() {
        assert_eq!(Some("こどもの日"), holiday(date(2024, 5, 5)));
        assert_eq!(None, holiday(date(2024, 5, 7)));
    }

    #[test]
    fn is_const_holiday_matches_const_holiday() {
        for (y, m, d) in [(2024, 1, 1), (2024, 1, 2), (2019, 5, 1), (1948, 1, 1)] {
            assert_eq!(
                const_holiday(date(y, m, d)).is_some(),
                is_const_holiday(date(y, m, d))
            );
        }
    }
}
