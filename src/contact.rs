use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DateError;
use crate::birthday::Birthday;
use crate::consts::{MAX_NAME_LEN, MAX_NOTES_LEN, MIN_BIRTH_YEAR, YEAR_DIGITS};
use crate::occurrence::ReferenceDate;

/// A contact as returned by the contacts API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub birthday_month: u8,
    pub birthday_day: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Contact {
    /// Validates the stored birthday columns.
    ///
    /// # Errors
    /// Any `DateError` from [`Birthday::new`]; records from the store are not
    /// trusted to be well-formed.
    pub fn birthday(&self) -> Result<Birthday, DateError> {
        Birthday::new(self.birthday_month, self.birthday_day, self.birthday_year)
    }
}

/// Contact form input, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub month: u8,
    pub day: u8,
    pub year: Option<i32>,
    pub notes: String,
}

/// Payload for creating a contact, produced by [`ContactDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub birthday_month: u8,
    pub birthday_day: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Error type for contact form validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name is too long ({len} characters, at most {max})", max = MAX_NAME_LEN)]
    NameTooLong { len: usize },

    #[error("Notes are too long ({len} characters, at most {max})", max = MAX_NOTES_LEN)]
    NotesTooLong { len: usize },

    /// Not four digits, before 1900, or after the reference year.
    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Invalid date - this day does not exist for the selected month")]
    InvalidDate(#[from] DateError),
}

impl ValidationError {
    /// The form field this error belongs to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameRequired | Self::NameTooLong { .. } => "name",
            Self::NotesTooLong { .. } => "notes",
            Self::InvalidYear(_) => "year",
            Self::InvalidDate(DateError::InvalidMonth(_)) => "month",
            Self::InvalidDate(_) => "day",
        }
    }
}

impl ContactDraft {
    /// Pre-fills a draft for editing an existing contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            month: contact.birthday_month,
            day: contact.birthday_day,
            year: contact.birthday_year,
            notes: contact.notes.clone().unwrap_or_default(),
        }
    }

    /// Parses the free-text year input: empty means unknown, otherwise exactly
    /// four digits.
    ///
    /// # Errors
    /// `ValidationError::InvalidYear` for anything that isn't empty or four digits.
    pub fn parse_year(input: &str) -> Result<Option<i32>, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.len() != YEAR_DIGITS || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidYear(trimmed.to_owned()));
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidYear(trimmed.to_owned()))
    }

    /// Checks the draft against the form rules and builds the create payload.
    ///
    /// The birth year may not be after `today`'s year.
    ///
    /// # Errors
    /// The first failing rule, in field order: name, year, date, notes.
    pub fn validate(&self, today: &impl ReferenceDate) -> Result<NewContact, ValidationError> {
        self.check(today.calendar_day().year()).inspect_err(|err| {
            debug!(field = err.field(), error = %err, "contact draft rejected");
        })
    }

    fn check(&self, current_year: i32) -> Result<NewContact, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        let name_len = name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong { len: name_len });
        }

        let out_of_range = |year: &i32| !(MIN_BIRTH_YEAR..=current_year).contains(year);
        if let Some(year) = self.year.filter(out_of_range) {
            return Err(ValidationError::InvalidYear(year.to_string()));
        }

        let (birthday_month, birthday_day, birthday_year) =
            Birthday::new(self.month, self.day, self.year)?.to_columns();

        let notes_len = self.notes.chars().count();
        if notes_len > MAX_NOTES_LEN {
            return Err(ValidationError::NotesTooLong { len: notes_len });
        }
        let notes = Some(self.notes.trim()).filter(|notes| !notes.is_empty()).map(str::to_owned);

        Ok(NewContact {
            name: name.to_owned(),
            birthday_month,
            birthday_day,
            birthday_year,
            notes,
        })
    }
}
