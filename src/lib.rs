//! Birthday date engine.
//!
//! Turns birthdays (month, day, optional birth year) and a caller-supplied
//! reference date into scheduling facts: the effective date of a birthday in a
//! given year, the next occurrence with a whole-day countdown, and ages.
//!
//! February 29th birthdays are observed on February 28th in common years.
//! [`effective_occurrence_date`] is the only place that remap happens; every
//! other computation in the crate goes through it.
//!
//! Nothing here reads the system clock. "Today" is always a parameter, given as
//! anything implementing [`ReferenceDate`].

mod agenda;
mod birthday;
mod calendar;
mod consts;
mod contact;
mod occurrence;
mod prelude;
#[cfg(test)]
mod test_utils;
mod types;

pub use agenda::{Agenda, AgendaConfig, UpcomingBirthday, upcoming_birthdays};
pub use birthday::{Birthday, ParseError};
pub use calendar::{
    MonthSummary, birthdays_in_month, birthdays_on, format_month_day, month_name, month_overview,
};
pub use consts::*;
pub use contact::{Contact, ContactDraft, NewContact, ValidationError};
pub use occurrence::{
    Age, Occurrence, Proximity, ReferenceDate, age, current_age, days_until_next_occurrence,
    effective_occurrence_date, turning_age,
};
pub use types::{BirthYear, Day, Month, is_leap_year, max_day_in_month};

use chrono::NaiveDate;

/// Invalid input to the date engine.
///
/// Every variant is a caller contract violation; the engine never clamps or
/// wraps a bad value into a valid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    #[error("Invalid day {day} for month {month:02}{}", year_suffix(.year))]
    InvalidDay { month: u8, day: u8, year: Option<i32> },

    #[error(
        "Invalid birth year: {0} (must be {min}-{max})",
        min = MIN_BIRTH_YEAR,
        max = MAX_BIRTH_YEAR
    )]
    InvalidYear(i32),

    /// The calendar year cannot be represented as a date.
    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),

    /// An age was requested for someone born after the reference date.
    #[error("Birthday in {birth_year} is after the reference date {today}")]
    NotYetBorn { birth_year: i32, today: NaiveDate },
}

impl DateError {
    /// All engine errors are invalid arguments; there is no recoverable
    /// runtime failure mode.
    pub const fn is_invalid_argument(&self) -> bool {
        true
    }
}

fn year_suffix(year: &Option<i32>) -> String {
    year.map(|year| format!(" in {year}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_error_messages() {
        assert_eq!(DateError::InvalidMonth(13).to_string(), "Invalid month: 13 (must be 1-12)");
        assert_eq!(
            DateError::InvalidDay {
                month: 2,
                day: 29,
                year: Some(2023)
            }
            .to_string(),
            "Invalid day 29 for month 02 in 2023"
        );
        assert_eq!(
            DateError::InvalidDay {
                month: 4,
                day: 31,
                year: None
            }
            .to_string(),
            "Invalid day 31 for month 04"
        );
        assert_eq!(
            DateError::InvalidYear(1800).to_string(),
            "Invalid birth year: 1800 (must be 1900-9999)"
        );
        assert_eq!(
            DateError::NotYetBorn {
                birth_year: 2030,
                today: date(2025, 6, 15)
            }
            .to_string(),
            "Birthday in 2030 is after the reference date 2025-06-15"
        );
    }

    #[test]
    fn test_every_error_is_invalid_argument() {
        let errors = [
            DateError::InvalidMonth(0),
            DateError::InvalidDay {
                month: 1,
                day: 0,
                year: None,
            },
            DateError::InvalidYear(-1),
            DateError::YearOutOfRange(i32::MAX),
            DateError::NotYetBorn {
                birth_year: 2030,
                today: date(2025, 1, 1),
            },
        ];
        assert!(errors.iter().all(DateError::is_invalid_argument));
    }

    #[test]
    fn test_constants() {
        assert_eq!(MAX_MONTH, 12);
        assert_eq!(MIN_BIRTH_YEAR, 1900);
        assert_eq!(SOON_WITHIN_DAYS, 7);
    }
}
