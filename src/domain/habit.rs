//! Habit entity and related functionality
//!
//! A habit is registered by the user with a description, a cadence, an
//! optional schedule, a start date and a colour hint for the UI.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Cadence, DomainError, HabitId, Schedule};

const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_COLOUR_LEN: usize = 32;

/// The user-editable fields of a habit
///
/// Creation and update both go through a draft so the same validation
/// applies; an update replaces every field, schedule included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub description: String,
    pub cadence: Cadence,
    #[serde(default)]
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub colour: String,
}

impl HabitDraft {
    /// Build a draft and validate it
    pub fn new(
        description: impl Into<String>,
        cadence: Cadence,
        schedule: Schedule,
        start_date: NaiveDate,
        colour: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self {
            description: description.into(),
            cadence,
            schedule,
            start_date,
            colour: colour.into(),
        }
        .validated()
    }

    /// Validate every field and normalise the schedule for the cadence
    pub fn validated(self) -> Result<Self, DomainError> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(DomainError::InvalidDescription(
                "Description cannot be empty".to_string(),
            ));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::InvalidDescription(format!(
                "Description cannot be longer than {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }

        let colour = self.colour.trim().to_string();
        if colour.is_empty() || colour.chars().count() > MAX_COLOUR_LEN {
            return Err(DomainError::Validation {
                message: format!("Colour must be 1-{} characters", MAX_COLOUR_LEN),
            });
        }

        let schedule = self.schedule.normalized_for(self.cadence)?;

        Ok(Self {
            description,
            cadence: self.cadence,
            schedule,
            start_date: self.start_date,
            colour,
        })
    }
}

/// A habit as persisted by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub description: String,
    pub cadence: Cadence,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub colour: String,
    /// Assigned by the store on insert
    pub created_at: NaiveDateTime,
}

impl Habit {
    /// Whether `date` is one of the habit's scheduled days
    ///
    /// Advisory only: completions are accepted on any day.
    pub fn is_valid_for_date(&self, date: NaiveDate) -> bool {
        match self.cadence {
            Cadence::Daily => true,
            Cadence::Weekly => {
                self.schedule.days_of_week.is_empty()
                    || self
                        .schedule
                        .days_of_week
                        .contains(&(date.weekday().num_days_from_sunday() as u8))
            }
            Cadence::Monthly => {
                self.schedule.days_of_month.is_empty()
                    || self.schedule.days_of_month.contains(&(date.day() as u8))
            }
        }
    }
}

/// A habit annotated for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitSummary {
    #[serde(flatten)]
    pub habit: Habit,
    pub completed_today: bool,
}
