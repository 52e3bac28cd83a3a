//! Shared fixtures for unit tests.

use chrono::{Datelike, Days, NaiveDate};

use crate::Contact;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test date should be valid")
}

/// Every calendar day of `year`, January 1st first.
pub fn every_day_of(year: i32) -> impl Iterator<Item = NaiveDate> {
    let first = date(year, 1, 1);
    (0..)
        .map_while(move |offset| first.checked_add_days(Days::new(offset)))
        .take_while(move |d| d.year() == year)
}

pub fn contact(id: &str, name: &str, month: u8, day: u8, year: Option<i32>) -> Contact {
    Contact {
        id: id.to_owned(),
        name: name.to_owned(),
        birthday_month: month,
        birthday_day: day,
        birthday_year: year,
        notes: None,
    }
}
