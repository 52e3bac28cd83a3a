use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, GREGORIAN_CYCLE, LEAP_DAY, LEAP_YEAR_CYCLE,
    MAX_BIRTH_YEAR, MAX_MONTH, MIN_BIRTH_YEAR,
};
use crate::prelude::*;
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Whether this is February, the only month whose length depends on the year
    #[inline]
    pub const fn is_february(self) -> bool {
        self.get() == FEBRUARY
    }

    /// Last valid day of this month.
    ///
    /// With no year the maximal length is returned (29 for February), so a
    /// leap-day birthday is accepted before a birth year is known.
    pub const fn max_day(self, year: Option<i32>) -> u8 {
        match year {
            Some(year) => days_in_month(year, self),
            None if self.is_february() => LEAP_DAY,
            None => DAYS_IN_MONTH[self.get() as usize],
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        Self::from(month.0.get())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of month, validated against its month (and year, when one is known).
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against `month` and the optional `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or exceeds
    /// [`Month::max_day`] for the given year.
    pub fn new(value: u8, month: Month, year: Option<i32>) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDay {
            month: month.get(),
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or(invalid)?;
        if value > month.max_day(year) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[inline]
    pub(crate) const fn is_leap_day(self, month: Month) -> bool {
        month.is_february() && self.get() == LEAP_DAY
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl From<Day> for u32 {
    fn from(day: Day) -> Self {
        Self::from(day.0.get())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A known birth year in `MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR`.
///
/// "Not in the future" depends on the reference date and is checked where one
/// is available, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into)]
#[display(fmt = "{}", _0)]
pub struct BirthYear(i32);

impl BirthYear {
    /// # Errors
    /// Returns `DateError::InvalidYear` outside `MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR`.
    pub const fn new(value: i32) -> Result<Self, DateError> {
        if value < MIN_BIRTH_YEAR || value > MAX_BIRTH_YEAR {
            return Err(DateError::InvalidYear(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for BirthYear {
    type Error = DateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// Helper functions

/// Gregorian leap-year rule. Total over every `i32`, including negative years.
pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: Month) -> u8 {
    if month.is_february() && is_leap_year(year) {
        LEAP_DAY
    } else {
        DAYS_IN_MONTH[month.get() as usize]
    }
}

/// Maximum valid day for `month`, optionally in a specific `year`.
///
/// February yields 29 when `year` is `None`.
///
/// # Errors
/// Returns `DateError::InvalidMonth` when `month` is outside `1..=12`.
pub fn max_day_in_month(month: u8, year: Option<i32>) -> Result<u8, DateError> {
    Ok(Month::new(month)?.max_day(year))
}
