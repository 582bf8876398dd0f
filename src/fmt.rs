//! Era-aware, pattern-driven date/time formatting and parsing.
//!
//! A pattern is compiled into a sequence of field tokens and literals,
//! matched greedily longest-token-first. Era tokens render any of the four
//! era name forms, and the era-relative year can be rendered as Japanese
//! numerals with year 1 written 元.
//!
//! | Symbol | Meaning                         | Examples        |
//! |--------|---------------------------------|-----------------|
//! | G..GGGG| era (code/abbr/roman/name)      | R; 令; Reiwa; 令和 |
//! | y..yyyy| year-of-era                     | 4; 04; 元; 十一 |
//! | u..uuuu| proleptic year                  | 2024; 24        |
//! | M, MM  | month-of-year                   | 7; 07           |
//! | d, dd  | day-of-month                    | 10              |
//! | H, HH  | hour-of-day (0–23)              | 0               |
//! | m, mm  | minute-of-hour                  | 30              |
//! | s, ss  | second-of-minute                | 55              |
//! | S..SSS | milli-of-second                 | 978             |
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use wareki::DateTimeFormatter;
//!
//! let formatter = DateTimeFormatter::new("GGGGyyyy年M月d日");
//! let date = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! assert_eq!("令和元年5月1日", formatter.format(date).unwrap());
//! assert_eq!(date, formatter.parse("令和元年5月1日").unwrap());
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DateValueError, ParseError};
use crate::gengo::Gengo;
use crate::numeral;
use crate::wareki::Wareki;

/// Scratch record populated during formatting and parsing.
#[derive(Debug)]
struct DateFields {
    gengo: Option<&'static Gengo>,
    nen: i32,
    year: i32,
    month: u32,
    day_of_month: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl DateFields {
    fn new() -> Self {
        Self {
            gengo: None,
            nen: 0,
            year: 0,
            month: 1,
            day_of_month: 1,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    fn from_datetime(date: NaiveDateTime) -> Result<Self, DateValueError> {
        let wareki = Wareki::from_date(date)?;
        Ok(Self {
            gengo: Some(wareki.gengo()),
            nen: wareki.nen(),
            year: date.year(),
            month: date.month(),
            day_of_month: date.day(),
            hour: date.hour(),
            minute: date.minute(),
            second: date.second(),
            millisecond: date.nanosecond() / 1_000_000,
        })
    }

    /// Converts the populated fields to a date. An era plus a positive nen
    /// takes precedence over a parsed proleptic year.
    fn into_datetime(mut self) -> Result<NaiveDateTime, ParseError> {
        if let Some(gengo) = self.gengo {
            if self.nen > 0 {
                self.year = Wareki::new(gengo, self.nen)?.year();
            }
        }
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day_of_month)
            .ok_or(ParseError::InvalidDate)?;
        let time = NaiveTime::from_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
            .ok_or(ParseError::InvalidDate)?;
        Ok(date.and_time(time))
    }
}

/// The field a non-literal token reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    EraName,
    EraRomanName,
    EraAbbrName,
    EraAbbrRomanName,
    /// Nen as Japanese numerals, 1 written 元.
    NenKanji,
    /// Nen as 1–2 decimal digits, 1 written 元.
    NenOrGan,
    /// Nen modulo 100, parsed from exactly two digits.
    NenTwoDigit,
    Nen,
    Year,
    /// Year modulo 100, parsed as 2000 + the two digits.
    YearTwoDigit,
    Month,
    DayOfMonth,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// One entry of the static token table.
struct TokenSpec {
    text: &'static str,
    field: Field,
    sub_pattern: String,
    min_width: usize,
}

/// Token table in matching priority order: longer and more specific
/// tokens come before their prefixes.
static TOKENS: Lazy<Vec<TokenSpec>> = Lazy::new(|| {
    fn join(form: fn(&Gengo) -> &'static str) -> String {
        let forms: Vec<&str> = Gengo::list().iter().map(form).collect();
        forms.join("|")
    }
    let spec = |text, field, sub_pattern: &str, min_width| TokenSpec {
        text,
        field,
        sub_pattern: sub_pattern.to_owned(),
        min_width,
    };
    vec![
        TokenSpec { text: "GGGG", field: Field::EraName, sub_pattern: join(Gengo::name), min_width: 0 },
        TokenSpec { text: "GGG", field: Field::EraRomanName, sub_pattern: join(Gengo::roman_name), min_width: 0 },
        TokenSpec { text: "GG", field: Field::EraAbbrName, sub_pattern: join(Gengo::abbr_name), min_width: 0 },
        TokenSpec { text: "G", field: Field::EraAbbrRomanName, sub_pattern: join(Gengo::abbr_roman_name), min_width: 0 },
        spec("yyyy", Field::NenKanji, "元|[一二三四五六七八九十]{1,3}", 0),
        spec("yyy", Field::NenOrGan, "元|[2-9]|[1-9][0-9]", 0),
        spec("yy", Field::NenTwoDigit, "[0-9]{2}", 0),
        spec("y", Field::Nen, "[0-9]{1,2}", 0),
        spec("uuuu", Field::Year, "[0-9]{4}", 4),
        spec("uuu", Field::Year, "[0-9]{3,4}", 3),
        spec("uu", Field::YearTwoDigit, "[0-9]{2}", 2),
        spec("u", Field::Year, "[0-9]{1,4}", 1),
        spec("MM", Field::Month, "0[1-9]|1[012]", 2),
        spec("M", Field::Month, "[1-9]|1[012]", 1),
        spec("dd", Field::DayOfMonth, "0[1-9]|[1-2][0-9]|30|31", 2),
        spec("d", Field::DayOfMonth, "[1-9]|[1-2][0-9]|30|31", 1),
        spec("HH", Field::Hour, "[01][0-9]|2[0123]", 2),
        spec("H", Field::Hour, "1?[0-9]|2[0123]", 1),
        spec("mm", Field::Minute, "[0-5][0-9]", 2),
        spec("m", Field::Minute, "[1-5]?[0-9]", 1),
        spec("ss", Field::Second, "[0-5][0-9]", 2),
        spec("s", Field::Second, "[1-5]?[0-9]", 1),
        spec("SSS", Field::Millisecond, "[0-9]{3}", 3),
        spec("SS", Field::Millisecond, "[0-9]{2,3}", 2),
        spec("S", Field::Millisecond, "[0-9]{1,3}", 1),
    ]
});

enum Token {
    Field(&'static TokenSpec),
    Literal(String),
}

/// Formats dates to era-aware text and parses such text back.
pub struct DateTimeFormatter {
    pattern: String,
    tokens: Vec<Token>,
    expression: Regex,
}

impl DateTimeFormatter {
    /// Compiles a pattern. Characters that start no known token become
    /// literals, so a pattern itself never fails to compile.
    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut rest = pattern;
        'scan: while !rest.is_empty() {
            for spec in TOKENS.iter() {
                if let Some(tail) = rest.strip_prefix(spec.text) {
                    tokens.push(Token::Field(spec));
                    rest = tail;
                    continue 'scan;
                }
            }
            let c = rest.chars().next().expect("rest is non-empty");
            tokens.push(Token::Literal(c.to_string()));
            rest = &rest[c.len_utf8()..];
        }
        let mut expression = String::from("^");
        for token in &tokens {
            expression.push('(');
            match token {
                Token::Field(spec) => expression.push_str(&spec.sub_pattern),
                Token::Literal(text) => expression.push_str(&regex::escape(text)),
            }
            expression.push(')');
        }
        let expression =
            Regex::new(&expression).expect("token sub-patterns are valid regular expressions");
        Self {
            pattern: pattern.to_owned(),
            tokens,
            expression,
        }
    }

    /// Formats a JST instant according to the pattern.
    ///
    /// Fails only when the instant has no era, i.e. predates Meiji.
    pub fn format(&self, date: NaiveDateTime) -> Result<String, DateValueError> {
        let fields = DateFields::from_datetime(date)?;
        let mut text = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(literal) => text.push_str(literal),
                Token::Field(spec) => {
                    let value = get_field(&fields, spec.field);
                    for _ in value.chars().count()..spec.min_width {
                        text.push('0');
                    }
                    text.push_str(&value);
                }
            }
        }
        Ok(text)
    }

    /// Parses text according to the pattern.
    ///
    /// When the text carries both an era-relative year and a proleptic
    /// year, the era-relative one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use wareki::DateTimeFormatter;
    ///
    /// let formatter = DateTimeFormatter::new("Gy/uuuu");
    /// let date = formatter.parse("R3/1999").unwrap();
    /// assert_eq!(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), date.date());
    /// ```
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }
        let captures = self.expression.captures(text).ok_or_else(|| ParseError::NoMatch {
            pattern: self.pattern.clone(),
            text: text.to_owned(),
        })?;
        let mut fields = DateFields::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if let Token::Field(spec) = token {
                let value = captures
                    .get(i + 1)
                    .expect("every token contributes one capture group")
                    .as_str();
                set_field(&mut fields, spec.field, value)?;
            }
        }
        fields.into_datetime()
    }
}

impl fmt::Display for DateTimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn get_field(fields: &DateFields, field: Field) -> String {
    let gengo = || fields.gengo.expect("fields derived from a date carry an era");
    match field {
        Field::EraName => gengo().name().to_owned(),
        Field::EraRomanName => gengo().roman_name().to_owned(),
        Field::EraAbbrName => gengo().abbr_name().to_owned(),
        Field::EraAbbrRomanName => gengo().abbr_roman_name().to_owned(),
        Field::NenKanji => {
            if fields.nen == 1 {
                "元".to_owned()
            } else {
                numeral::format(i64::from(fields.nen)).expect("nen is never negative")
            }
        }
        Field::NenOrGan => {
            if fields.nen == 1 {
                "元".to_owned()
            } else {
                fields.nen.to_string()
            }
        }
        Field::NenTwoDigit => (fields.nen % 100).to_string(),
        Field::Nen => fields.nen.to_string(),
        Field::Year => fields.year.to_string(),
        Field::YearTwoDigit => fields.year.rem_euclid(100).to_string(),
        Field::Month => fields.month.to_string(),
        Field::DayOfMonth => fields.day_of_month.to_string(),
        Field::Hour => fields.hour.to_string(),
        Field::Minute => fields.minute.to_string(),
        Field::Second => fields.second.to_string(),
        Field::Millisecond => fields.millisecond.to_string(),
    }
}

fn set_field(fields: &mut DateFields, field: Field, value: &str) -> Result<(), ParseError> {
    // Numeric captures are digit-only by construction of the sub-patterns.
    fn digits<T: std::str::FromStr>(value: &str) -> T
    where
        T::Err: fmt::Debug,
    {
        value.parse().expect("sub-pattern guarantees digits")
    }
    match field {
        Field::EraName | Field::EraRomanName | Field::EraAbbrName | Field::EraAbbrRomanName => {
            fields.gengo = Some(Gengo::of(value)?);
        }
        Field::NenKanji => {
            fields.nen = if value == "元" {
                1
            } else {
                numeral::parse(value)? as i32
            };
        }
        Field::NenOrGan => {
            fields.nen = if value == "元" { 1 } else { digits(value) };
        }
        Field::NenTwoDigit | Field::Nen => fields.nen = digits(value),
        Field::Year => fields.year = digits(value),
        Field::YearTwoDigit => fields.year = 2000 + digits::<i32>(value),
        Field::Month => fields.month = digits(value),
        Field::DayOfMonth => fields.day_of_month = digits(value),
        Field::Hour => fields.hour = digits(value),
        Field::Minute => fields.minute = digits(value),
        Field::Second => fields.second = digits(value),
        Field::Millisecond => fields.millisecond = digits(value),
    }
    Ok(())
}
