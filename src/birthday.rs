use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::DateError;
use crate::consts::DATE_SEPARATOR;
use crate::occurrence::{Age, Occurrence, ReferenceDate, age_on, next_occurrence, occurrence_in};
use crate::types::{BirthYear, Day, Month};

/// A validated birthday: month and day, plus the birth year when known.
///
/// The day is valid for the month in a leap-year context, and for the birth
/// year itself when one is given. Ordering is calendar order (month, then
/// day), with unknown years first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Birthday {
    month: Month,
    day: Day,
    year: Option<BirthYear>,
}

/// Error type for parsing a birthday from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty birthday string")]
    EmptyInput,

    /// Not `MM-DD` or `YYYY-MM-DD`.
    #[error("Invalid birthday format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Date(#[from] DateError),
}

impl Birthday {
    /// # Errors
    /// `InvalidMonth`, `InvalidYear` or `InvalidDay` for out-of-range components.
    /// A known `year` is checked too, so Feb 29th of a common year is rejected.
    pub fn new(month: u8, day: u8, year: Option<i32>) -> Result<Self, DateError> {
        let month = Month::new(month)?;
        let year = year.map(BirthYear::new).transpose()?;
        let day = Day::new(day, month, year.map(BirthYear::get))?;
        Ok(Self { month, day, year })
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    pub const fn year(&self) -> Option<BirthYear> {
        self.year
    }

    pub const fn is_leap_day(&self) -> bool {
        self.day.is_leap_day(self.month)
    }

    /// The date this birthday is observed in `year` (Feb 29th falls back to
    /// Feb 28th in common years).
    ///
    /// # Errors
    /// `YearOutOfRange` if `year` cannot be represented.
    pub fn occurrence_in(&self, year: i32) -> Result<NaiveDate, DateError> {
        occurrence_in(self.month, self.day, year)
    }

    /// Whether this birthday is observed on `date`.
    ///
    /// # Errors
    /// `YearOutOfRange` if `date`'s year cannot be represented.
    pub fn falls_on(&self, date: NaiveDate) -> Result<bool, DateError> {
        Ok(self.occurrence_in(date.year())? == date)
    }

    /// # Errors
    /// `YearOutOfRange` if the next occurrence cannot be represented.
    pub fn next_occurrence(&self, today: &impl ReferenceDate) -> Result<Occurrence, DateError> {
        next_occurrence(self.month, self.day, today.calendar_day())
    }

    /// `None` when the birth year is unknown.
    ///
    /// # Errors
    /// `NotYetBorn` if the birth date is after `today`.
    pub fn age(&self, today: &impl ReferenceDate) -> Result<Option<Age>, DateError> {
        self.year
            .map(|year| age_on(year, self.month, self.day, today.calendar_day()))
            .transpose()
    }

    /// Converts to contact columns: (month, day, year)
    pub fn to_columns(&self) -> (u8, u8, Option<i32>) {
        (self.month.get(), self.day.get(), self.year.map(BirthYear::get))
    }

    fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
        s.trim()
            .parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(u8, u8, Option<i32>)> for Birthday {
    type Error = DateError;

    fn try_from(value: (u8, u8, Option<i32>)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(year) = self.year {
            write!(f, "{:04}{DATE_SEPARATOR}", year.get())?;
        }
        write!(f, "{:02}{DATE_SEPARATOR}{:02}", self.month.get(), self.day.get())
    }
}

impl FromStr for Birthday {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        match parts.as_slice() {
            [month, day] => Ok(Self::new(
                Self::parse_component(month)?,
                Self::parse_component(day)?,
                None,
            )?),
            [year, month, day] => Ok(Self::new(
                Self::parse_component(month)?,
                Self::parse_component(day)?,
                Some(Self::parse_component(year)?),
            )?),
            _ => Err(ParseError::InvalidFormat(format!(
                "expected MM{DATE_SEPARATOR}DD or YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {s}"
            ))),
        }
    }
}

impl Serialize for Birthday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Birthday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_cases() {
        struct TestCase {
            month: u8,
            day: u8,
            year: Option<i32>,
            should_succeed: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                month: 6,
                day: 15,
                year: None,
                should_succeed: true,
                description: "plain date without year",
            },
            TestCase {
                month: 2,
                day: 29,
                year: None,
                should_succeed: true,
                description: "leap day without year",
            },
            TestCase {
                month: 2,
                day: 29,
                year: Some(2000),
                should_succeed: true,
                description: "leap day in a leap year",
            },
            TestCase {
                month: 2,
                day: 29,
                year: Some(1999),
                should_succeed: false,
                description: "leap day in a common year",
            },
            TestCase {
                month: 4,
                day: 31,
                year: None,
                should_succeed: false,
                description: "April 31st",
            },
            TestCase {
                month: 13,
                day: 1,
                year: None,
                should_succeed: false,
                description: "month 13",
            },
            TestCase {
                month: 1,
                day: 1,
                year: Some(1850),
                should_succeed: false,
                description: "year before 1900",
            },
        ];

        for case in &cases {
            let birthday = Birthday::new(case.month, case.day, case.year);
            if case.should_succeed {
                assert!(birthday.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(birthday.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_new_reports_first_invalid_component() {
        assert_eq!(Birthday::new(13, 40, Some(1800)), Err(DateError::InvalidMonth(13)));
        assert_eq!(Birthday::new(2, 29, Some(1800)), Err(DateError::InvalidYear(1800)));
        assert_eq!(
            Birthday::new(2, 29, Some(2001)),
            Err(DateError::InvalidDay {
                month: 2,
                day: 29,
                year: Some(2001),
            })
        );
    }

    #[test]
    fn test_accessors() {
        let birthday = Birthday::new(8, 15, Some(1991)).expect("valid birthday");
        assert_eq!(birthday.month().get(), 8);
        assert_eq!(birthday.day().get(), 15);
        assert_eq!(birthday.year().map(BirthYear::get), Some(1991));
        assert_eq!(birthday.to_columns(), (8, 15, Some(1991)));
        assert!(!birthday.is_leap_day());
        assert!(Birthday::new(2, 29, None).expect("valid birthday").is_leap_day());
    }

    #[test]
    fn test_occurrence_in_and_falls_on() {
        let leap = Birthday::new(2, 29, Some(2004)).expect("valid birthday");
        assert_eq!(leap.occurrence_in(2025).expect("representable"), date(2025, 2, 28));
        assert_eq!(leap.occurrence_in(2028).expect("representable"), date(2028, 2, 29));

        assert!(leap.falls_on(date(2025, 2, 28)).expect("representable"));
        assert!(!leap.falls_on(date(2024, 2, 28)).expect("representable"));
        assert!(leap.falls_on(date(2024, 2, 29)).expect("representable"));
    }

    #[test]
    fn test_next_occurrence_and_age() {
        let today = date(2025, 6, 15);

        let known = Birthday::new(6, 14, Some(1990)).expect("valid birthday");
        let occurrence = known.next_occurrence(&today).expect("representable");
        assert_eq!(occurrence.occurrence_date(), date(2026, 6, 14));
        let age = known.age(&today).expect("born before today").expect("year is known");
        assert_eq!(age.current(), 35);
        assert_eq!(age.turning(), 36);

        let unknown = Birthday::new(6, 15, None).expect("valid birthday");
        assert!(unknown.next_occurrence(&today).expect("representable").is_today());
        assert_eq!(unknown.age(&today), Ok(None));
    }

    #[test]
    fn test_age_not_yet_born() {
        let birthday = Birthday::new(12, 1, Some(2025)).expect("valid birthday");
        assert!(matches!(
            birthday.age(&date(2025, 6, 15)),
            Err(DateError::NotYetBorn { birth_year: 2025, .. })
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let birthday: Birthday = "06-15".parse().expect("month-day form");
        assert_eq!(birthday, Birthday::new(6, 15, None).expect("valid birthday"));
        assert_eq!(birthday.to_string(), "06-15");

        let birthday: Birthday = " 1990-06-14 ".parse().expect("full form");
        assert_eq!(birthday, Birthday::new(6, 14, Some(1990)).expect("valid birthday"));
        assert_eq!(birthday.to_string(), "1990-06-14");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Birthday>(), Err(ParseError::EmptyInput));
        assert!(matches!("06".parse::<Birthday>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("1990-06-14-01".parse::<Birthday>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("AB-14".parse::<Birthday>(), Err(ParseError::InvalidFormat(_))));
        assert_eq!(
            "13-01".parse::<Birthday>(),
            Err(ParseError::Date(DateError::InvalidMonth(13)))
        );
        assert!(matches!(
            "2023-02-29".parse::<Birthday>(),
            Err(ParseError::Date(DateError::InvalidDay { .. }))
        ));
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let mut birthdays = [
            Birthday::new(12, 1, None).expect("valid birthday"),
            Birthday::new(2, 29, None).expect("valid birthday"),
            Birthday::new(2, 3, Some(1980)).expect("valid birthday"),
            Birthday::new(2, 3, None).expect("valid birthday"),
        ];
        birthdays.sort();
        let rendered: Vec<String> = birthdays.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["02-03", "1980-02-03", "02-29", "12-01"]);
    }

    #[test]
    fn test_serde_string_format() {
        let birthday = Birthday::new(2, 29, Some(2000)).expect("valid birthday");
        let json = serde_json::to_string(&birthday).expect("serialize");
        assert_eq!(json, r#""2000-02-29""#);
        let parsed: Birthday = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, birthday);

        let result: Result<Birthday, _> = serde_json::from_str(r#""2001-02-29""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_try_from_tuple() {
        let birthday: Birthday = (3, 1, None).try_into().expect("valid birthday");
        assert_eq!(birthday.to_columns(), (3, 1, None));
        assert!(Birthday::try_from((0, 1, None)).is_err());
    }
}
