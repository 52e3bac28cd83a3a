use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use tracing::trace;

use crate::DateError;
use crate::consts::{FEBRUARY_LAST_COMMON_DAY, SOON_WITHIN_DAYS};
use crate::prelude::*;
use crate::types::{BirthYear, Day, Month, is_leap_year};

/// A point in time that can be reduced to a calendar day.
///
/// The engine only compares at day granularity, so any time-of-day part is
/// dropped before comparing.
pub trait ReferenceDate {
    fn calendar_day(&self) -> NaiveDate;
}

impl ReferenceDate for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl ReferenceDate for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// The local calendar day in the value's own time zone.
impl<Tz: TimeZone> ReferenceDate for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// How close an occurrence is to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Today,
    Tomorrow,
    Soon,
    Later,
}

impl Proximity {
    /// `Soon` covers `2..=soon_within_days`.
    pub const fn classify(days_until: u32, soon_within_days: u32) -> Self {
        match days_until {
            0 => Self::Today,
            1 => Self::Tomorrow,
            n if n <= soon_within_days => Self::Soon,
            _ => Self::Later,
        }
    }
}

/// The next time a birthday is observed, relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display(fmt = "{occurrence_date} (in {days_until} days)")]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    occurrence_date: NaiveDate,
    days_until: u32,
}

impl Occurrence {
    pub const fn occurrence_date(&self) -> NaiveDate {
        self.occurrence_date
    }

    /// Whole days from the reference date to the occurrence; 0 means today.
    pub const fn days_until(&self) -> u32 {
        self.days_until
    }

    pub const fn is_today(&self) -> bool {
        self.days_until == 0
    }

    pub const fn is_tomorrow(&self) -> bool {
        self.days_until == 1
    }

    /// `Soon` under the default `SOON_WITHIN_DAYS` window. For a custom window
    /// use [`Occurrence::proximity`].
    pub const fn is_soon(&self) -> bool {
        matches!(self.proximity(SOON_WITHIN_DAYS), Proximity::Soon)
    }

    pub const fn proximity(&self, soon_within_days: u32) -> Proximity {
        Proximity::classify(self.days_until, soon_within_days)
    }
}

/// Age of a person with a known birth year, as of a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Age {
    current: u32,
    turning: u32,
}

impl Age {
    /// Completed years.
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// The age reached at the next occurrence (equal to `current` on the day itself).
    pub const fn turning(&self) -> u32 {
        self.turning
    }
}

// --- typed core, shared with Birthday ---

pub(crate) fn occurrence_in(month: Month, day: Day, year: i32) -> Result<NaiveDate, DateError> {
    let observed_day = if day.is_leap_day(month) && !is_leap_year(year) {
        FEBRUARY_LAST_COMMON_DAY
    } else {
        day.get()
    };
    NaiveDate::from_ymd_opt(year, month.into(), u32::from(observed_day))
        .ok_or(DateError::YearOutOfRange(year))
}

pub(crate) fn next_occurrence(
    month: Month,
    day: Day,
    today: NaiveDate,
) -> Result<Occurrence, DateError> {
    let this_year = today.year();
    let this_years = occurrence_in(month, day, this_year)?;

    // Only a strictly past occurrence rolls over; today's stays at 0 days.
    let occurrence_date = if this_years < today {
        let next_year = this_year.checked_add(1).ok_or(DateError::YearOutOfRange(this_year))?;
        trace!(%month, %day, %today, next_year, "birthday already passed, rolling to next year");
        occurrence_in(month, day, next_year)?
    } else {
        this_years
    };

    let days = occurrence_date.signed_duration_since(today).num_days();
    let days_until =
        u32::try_from(days).map_err(|_| DateError::YearOutOfRange(occurrence_date.year()))?;

    Ok(Occurrence {
        occurrence_date,
        days_until,
    })
}

pub(crate) fn age_on(
    birth_year: BirthYear,
    month: Month,
    day: Day,
    today: NaiveDate,
) -> Result<Age, DateError> {
    // The birthday itself must exist in the birth year.
    Day::new(day.get(), month, Some(birth_year.get()))?;

    let this_years = occurrence_in(month, day, today.year())?;
    let years = today.year() - birth_year.get();
    let completed = if this_years > today { years - 1 } else { years };
    let current = u32::try_from(completed).map_err(|_| DateError::NotYetBorn {
        birth_year: birth_year.get(),
        today,
    })?;
    let turning = if this_years == today { current } else { current + 1 };

    Ok(Age { current, turning })
}

fn validate(month: u8, day: u8) -> Result<(Month, Day), DateError> {
    let month = Month::new(month)?;
    let day = Day::new(day, month, None)?;
    Ok((month, day))
}

// --- public operations on raw components ---

/// The date a birthday is observed in `target_year`.
///
/// February 29th maps to February 28th when `target_year` is not a leap year;
/// every other birthday is returned as-is.
///
/// # Errors
/// `InvalidMonth` / `InvalidDay` for components that can never form a
/// birthday, `YearOutOfRange` if `target_year` cannot be represented.
pub fn effective_occurrence_date(
    month: u8,
    day: u8,
    target_year: i32,
) -> Result<NaiveDate, DateError> {
    let (month, day) = validate(month, day)?;
    occurrence_in(month, day, target_year)
}

/// The next occurrence of a birthday on or after `today`, with the day count.
///
/// A birthday falling on `today` yields `days_until == 0`; the following
/// year's date is used only once this year's has strictly passed.
///
/// # Errors
/// Same as [`effective_occurrence_date`].
pub fn days_until_next_occurrence(
    month: u8,
    day: u8,
    today: &impl ReferenceDate,
) -> Result<Occurrence, DateError> {
    let (month, day) = validate(month, day)?;
    next_occurrence(month, day, today.calendar_day())
}

/// Current and turning age for a birthday with a known year.
///
/// # Errors
/// `InvalidYear` for a birth year outside the accepted range, `InvalidDay` if
/// the birthday doesn't exist in that year (Feb 29th of a common year), and
/// `NotYetBorn` if the birth date is after `today`.
pub fn age(
    birth_year: i32,
    month: u8,
    day: u8,
    today: &impl ReferenceDate,
) -> Result<Age, DateError> {
    let birth_year = BirthYear::new(birth_year)?;
    let (month, day) = validate(month, day)?;
    age_on(birth_year, month, day, today.calendar_day())
}

/// Completed years as of `today`. See [`age`] for errors.
///
/// # Errors
/// See [`age`].
pub fn current_age(
    birth_year: i32,
    month: u8,
    day: u8,
    today: &impl ReferenceDate,
) -> Result<u32, DateError> {
    age(birth_year, month, day, today).map(|age| age.current)
}

/// The age reached at the next occurrence; equals [`current_age`] on the day itself.
///
/// # Errors
/// See [`age`].
pub fn turning_age(
    birth_year: i32,
    month: u8,
    day: u8,
    today: &impl ReferenceDate,
) -> Result<u32, DateError> {
    age(birth_year, month, day, today).map(|age| age.turning)
}
