use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::normalize::NormalizeError;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Date notations accepted by [`normalize_date`], listed in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    YearMonthDay = 0,
    MonthDaySlashYear = 1,
    MonthNameDayYear = 2,
    DayMonthShortYear = 3,
    DayMonthNameShortYear = 4,
    DayMonthNameYear = 5,
    MonthNameOrdinalShortYear = 6,
}

impl DateFormat {
    pub const PRIORITY: [Self; 7] = [
        Self::YearMonthDay,
        Self::MonthDaySlashYear,
        Self::MonthNameDayYear,
        Self::DayMonthShortYear,
        Self::DayMonthNameShortYear,
        Self::DayMonthNameYear,
        Self::MonthNameOrdinalShortYear,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YearMonthDay => "YYYY-M-D",
            Self::MonthDaySlashYear => "M/D/YYYY",
            Self::MonthNameDayYear => "Mon D YYYY",
            Self::DayMonthShortYear => "D-M-YY",
            Self::DayMonthNameShortYear => "D Mon YY",
            Self::DayMonthNameYear => "D Mon YYYY",
            Self::MonthNameOrdinalShortYear => "Mon Dth YY",
        }
    }

    const fn grammar_source(self) -> &'static str {
        match self {
            Self::YearMonthDay => {
                r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})$"
            }
            Self::MonthDaySlashYear => {
                r"^(?P<month>[0-9]{1,2})/(?P<day>[0-9]{1,2})/(?P<year>[0-9]{4})$"
            }
            Self::MonthNameDayYear => {
                r"^(?P<mon>[A-Za-z]{3})\s+(?P<day>[0-9]{1,2})\s+(?P<year>[0-9]{4})$"
            }
            Self::DayMonthShortYear => {
                r"^(?P<day>[0-9]{1,2})-(?P<month>[0-9]{1,2})-(?P<year>[0-9]{2})$"
            }
            Self::DayMonthNameShortYear => {
                r"^(?P<day>[0-9]{1,2})\s+(?P<mon>[A-Za-z]{3})\s+(?P<year>[0-9]{2})$"
            }
            Self::DayMonthNameYear => {
                r"^(?P<day>[0-9]{1,2})\s+(?P<mon>[A-Za-z]{3})\s+(?P<year>[0-9]{4})$"
            }
            // The ordinal suffix is not checked against the day ("2th" is accepted).
            Self::MonthNameOrdinalShortYear => {
                r"^(?P<mon>[A-Za-z]{3})\s+(?P<day>[0-9]{1,2})(?:st|nd|rd|th)\s+(?P<year>[0-9]{2})$"
            }
        }
    }

    const fn has_short_year(self) -> bool {
        matches!(
            self,
            Self::DayMonthShortYear | Self::DayMonthNameShortYear | Self::MonthNameOrdinalShortYear
        )
    }

    fn grammar(self) -> &'static Regex {
        static GRAMMARS: OnceLock<[Regex; 7]> = OnceLock::new();
        let grammars = GRAMMARS.get_or_init(|| {
            Self::PRIORITY.map(|format| {
                Regex::new(format.grammar_source()).expect("invalid date grammar")
            })
        });
        &grammars[self as usize]
    }

    /// Structural match followed by calendar validation.
    /// `None` lets the caller try the next format.
    fn interpret(self, text: &str) -> Option<NaiveDate> {
        let captures = self.grammar().captures(text)?;
        let year = captured_year(&captures, self.has_short_year())?;
        let month = match captures.name("month") {
            Some(value) => value.as_str().parse::<u32>().ok()?,
            None => month_from_abbreviation(captures.name("mon")?.as_str())?,
        };
        let day = captures.name("day")?.as_str().parse::<u32>().ok()?;
        calendar_date(year, month, day)
    }
}

pub fn normalize_date(text: &str) -> Result<NaiveDate, NormalizeError> {
    detect_date(text).map(|(date, _)| date)
}

/// Like [`normalize_date`], also reporting which notation matched.
pub fn detect_date(text: &str) -> Result<(NaiveDate, DateFormat), NormalizeError> {
    let candidate = text.trim();
    DateFormat::PRIORITY
        .iter()
        .find_map(|format| format.interpret(candidate).map(|date| (date, *format)))
        .ok_or_else(|| NormalizeError::InvalidDate {
            input: text.to_string(),
        })
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn captured_year(captures: &Captures<'_>, short_year: bool) -> Option<i32> {
    let raw = captures.name("year")?.as_str().parse::<i32>().ok()?;
    if short_year {
        return Some(2000 + raw);
    }
    Some(raw)
}

fn month_from_abbreviation(token: &str) -> Option<u32> {
    let lowered = token.to_ascii_lowercase();
    let index = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbreviation| *abbreviation == lowered)?;
    u32::try_from(index + 1).ok()
}

fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
