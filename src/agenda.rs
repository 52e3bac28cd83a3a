use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::DateError;
use crate::consts::SOON_WITHIN_DAYS;
use crate::contact::Contact;
use crate::occurrence::{Age, Occurrence, Proximity, ReferenceDate};

/// Tuning for [`Agenda::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgendaConfig {
    /// Upper bound (inclusive) of the "soon" window, in days
    pub soon_within_days: u32,
    /// Cap on upcoming entries; today's birthdays are never cut
    pub limit: Option<usize>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            soon_within_days: SOON_WITHIN_DAYS,
            limit: None,
        }
    }
}

/// A contact's next birthday, relative to the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBirthday<'a> {
    pub contact: &'a Contact,
    pub occurrence: Occurrence,
    pub proximity: Proximity,
    /// `None` when the birth year is unknown or the birth date is still ahead.
    pub age: Option<Age>,
}

impl<'a> UpcomingBirthday<'a> {
    fn compute(
        contact: &'a Contact,
        today: &impl ReferenceDate,
        soon_within_days: u32,
    ) -> Result<Self, DateError> {
        let birthday = contact.birthday().inspect_err(|err| {
            warn!(contact_id = %contact.id, error = %err, "contact has an invalid birthday");
        })?;
        let occurrence = birthday.next_occurrence(today)?;
        let age = match birthday.age(today) {
            Ok(age) => age,
            // Born later this year: listed, but with no age yet.
            Err(DateError::NotYetBorn { .. }) => {
                debug!(contact_id = %contact.id, "contact is not born yet, omitting age");
                None
            }
            Err(err) => {
                warn!(contact_id = %contact.id, error = %err, "cannot compute age for contact");
                return Err(err);
            }
        };

        Ok(Self {
            contact,
            occurrence,
            proximity: occurrence.proximity(soon_within_days),
            age,
        })
    }
}

fn compute_all<'a>(
    contacts: &'a [Contact],
    today: &impl ReferenceDate,
    soon_within_days: u32,
) -> Result<Vec<UpcomingBirthday<'a>>, DateError> {
    let mut entries = contacts
        .iter()
        .map(|contact| UpcomingBirthday::compute(contact, today, soon_within_days))
        .collect::<Result<Vec<_>, _>>()?;
    // Stable: contacts sharing a day keep their input order.
    entries.sort_by_key(|entry| entry.occurrence.days_until());
    Ok(entries)
}

/// Every contact's next birthday, soonest first.
///
/// # Errors
/// The first contact whose stored birthday is invalid. A contact born after
/// `today` is listed with `age: None`.
pub fn upcoming_birthdays<'a>(
    contacts: &'a [Contact],
    today: &impl ReferenceDate,
) -> Result<Vec<UpcomingBirthday<'a>>, DateError> {
    compute_all(contacts, today, SOON_WITHIN_DAYS)
}

/// Birthdays split into today's celebrations and what comes after.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Agenda<'a> {
    today: Vec<UpcomingBirthday<'a>>,
    upcoming: Vec<UpcomingBirthday<'a>>,
}

impl<'a> Agenda<'a> {
    /// # Errors
    /// Same as [`upcoming_birthdays`].
    pub fn build(
        contacts: &'a [Contact],
        today: &impl ReferenceDate,
        config: &AgendaConfig,
    ) -> Result<Self, DateError> {
        let (todays, mut upcoming): (Vec<_>, Vec<_>) =
            compute_all(contacts, today, config.soon_within_days)?
                .into_iter()
                .partition(|entry| entry.occurrence.is_today());
        if let Some(limit) = config.limit {
            upcoming.truncate(limit);
        }

        debug!(
            contacts = contacts.len(),
            today = todays.len(),
            upcoming = upcoming.len(),
            reference = %today.calendar_day(),
            "built birthday agenda"
        );

        Ok(Self {
            today: todays,
            upcoming,
        })
    }

    /// Birthdays falling on the reference date.
    pub fn today(&self) -> &[UpcomingBirthday<'a>] {
        &self.today
    }

    /// Later birthdays, soonest first.
    pub fn upcoming(&self) -> &[UpcomingBirthday<'a>] {
        &self.upcoming
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.upcoming.is_empty()
    }
}
