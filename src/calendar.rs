//! Month-grid lookups for a calendar view.
//!
//! Matching always goes through the effective occurrence date, so a Feb 29th
//! birthday shows up on Feb 28th in common years.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::DateError;
use crate::consts::{DISPLAY_LEAP_YEAR, MAX_MONTH};
use crate::contact::Contact;
use crate::types::{Day, Month};

/// Number of birthdays observed in one month of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: u8,
    pub count: usize,
}

fn observed_in(contact: &Contact, year: i32) -> Result<NaiveDate, DateError> {
    contact
        .birthday()
        .and_then(|birthday| birthday.occurrence_in(year))
        .inspect_err(|err| {
            warn!(contact_id = %contact.id, error = %err, "contact has an invalid birthday");
        })
}

fn filter_contacts<'a>(
    contacts: &'a [Contact],
    year: i32,
    mut keep: impl FnMut(NaiveDate) -> bool,
) -> Result<Vec<&'a Contact>, DateError> {
    let mut matched = Vec::new();
    for contact in contacts {
        if keep(observed_in(contact, year)?) {
            matched.push(contact);
        }
    }
    Ok(matched)
}

/// Contacts whose birthday is observed on `date`.
///
/// # Errors
/// The first contact with an invalid stored birthday.
pub fn birthdays_on(contacts: &[Contact], date: NaiveDate) -> Result<Vec<&Contact>, DateError> {
    filter_contacts(contacts, date.year(), |observed| observed == date)
}

/// Contacts whose birthday is observed during `month` of `year`.
///
/// # Errors
/// `InvalidMonth` for a month outside `1..=12`, or the first contact with an
/// invalid stored birthday.
pub fn birthdays_in_month(
    contacts: &[Contact],
    year: i32,
    month: u8,
) -> Result<Vec<&Contact>, DateError> {
    let month = u32::from(Month::new(month)?);
    filter_contacts(contacts, year, |observed| observed.month() == month)
}

/// Birthday counts for every month of `year`, January first.
///
/// # Errors
/// The first contact with an invalid stored birthday.
pub fn month_overview(contacts: &[Contact], year: i32) -> Result<Vec<MonthSummary>, DateError> {
    let mut counts = [0usize; MAX_MONTH as usize];
    for contact in contacts {
        let observed = observed_in(contact, year)?;
        if let Some(count) = counts.get_mut(observed.month0() as usize) {
            *count += 1;
        }
    }

    debug!(year, contacts = contacts.len(), "built month overview");

    Ok((1..=MAX_MONTH)
        .zip(counts)
        .map(|(month, count)| MonthSummary { month, count })
        .collect())
}

/// English name of a month, e.g. "June".
///
/// # Errors
/// `InvalidMonth` for a month outside `1..=12`.
pub fn month_name(month: u8) -> Result<&'static str, DateError> {
    chrono::Month::try_from(month)
        .map(|month| month.name())
        .map_err(|_| DateError::InvalidMonth(month))
}

/// Renders a birthday without its year, e.g. "June 15" or "February 29".
///
/// # Errors
/// `InvalidMonth` / `InvalidDay` for components that can never form a birthday.
pub fn format_month_day(month: u8, day: u8) -> Result<String, DateError> {
    let typed_month = Month::new(month)?;
    let typed_day = Day::new(day, typed_month, Some(DISPLAY_LEAP_YEAR))?;
    Ok(format!("{} {}", month_name(month)?, typed_day))
}
