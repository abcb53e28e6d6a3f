//! MCP tools for habit management
//!
//! Each tool deserializes its JSON arguments, calls the service façade and
//! renders a plain-text reply for the client.

pub mod contribution;
pub mod create;
pub mod delete;
pub mod list;
pub mod mark;
pub mod streak;
pub mod update;
pub mod view;

pub use contribution::*;
pub use create::*;
pub use delete::*;
pub use list::*;
pub use mark::*;
pub use streak::*;
pub use update::*;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{parse_civil_date, Cadence, HabitId, Schedule};
use crate::service::ServiceError;

/// Colour used when a client does not pick one
pub const DEFAULT_COLOUR: &str = "#40c463";

/// Arguments naming a single habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitRef {
    /// Numeric id of the habit
    pub habit_id: i64,
}

impl HabitRef {
    pub fn id(&self) -> Result<HabitId, ServiceError> {
        parse_habit_id(self.habit_id)
    }
}

/// Editable habit fields as sent by a client
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitFields {
    /// What the habit is, e.g. "Read 20 pages"
    pub description: String,
    /// One of daily, weekly, monthly
    pub cadence: String,
    /// Weekly habits: qualifying weekdays, 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// Monthly habits: qualifying days of the month, 1..31
    #[serde(default)]
    pub days_of_month: Vec<u8>,
    /// First day of the habit (YYYY-MM-DD), defaults to today
    pub start_date: Option<String>,
    /// Colour hint for the grid, defaults to green
    pub colour: Option<String>,
}

/// Parsed form of [`HabitFields`]
#[derive(Debug)]
pub struct ParsedFields {
    pub cadence: Cadence,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub colour: String,
}

impl HabitFields {
    /// Parse the string-typed fields; `today` fills a missing start date
    pub fn parse(&self, today: NaiveDate) -> Result<ParsedFields, ServiceError> {
        let cadence: Cadence = self.cadence.parse()?;
        let schedule = Schedule {
            days_of_week: self.days_of_week.iter().copied().collect(),
            days_of_month: self.days_of_month.iter().copied().collect(),
        };
        let start_date = match &self.start_date {
            Some(s) => parse_civil_date(s)?,
            None => today,
        };
        let colour = self
            .colour
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOUR.to_string());

        Ok(ParsedFields {
            cadence,
            schedule,
            start_date,
            colour,
        })
    }
}

pub fn parse_habit_id(raw: i64) -> Result<HabitId, ServiceError> {
    Ok(HabitId::new(raw)?)
}

/// Parse an optional date argument
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, ServiceError> {
    value.map(parse_civil_date).transpose().map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
    }

    fn fields(cadence: &str) -> HabitFields {
        HabitFields {
            description: "Read".to_string(),
            cadence: cadence.to_string(),
            days_of_week: vec![1, 1, 3],
            days_of_month: Vec::new(),
            start_date: None,
            colour: None,
        }
    }

    #[test]
    fn test_parse_fills_defaults() {
        let parsed = fields("weekly").parse(today()).unwrap();
        assert_eq!(parsed.cadence, Cadence::Weekly);
        assert_eq!(parsed.start_date, today());
        assert_eq!(parsed.colour, DEFAULT_COLOUR);
        assert_eq!(parsed.schedule, Schedule::weekly([1, 3]));
    }

    #[test]
    fn test_parse_rejects_unknown_cadence() {
        let err = fields("yearly").parse(today()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(DomainError::InvalidCadence(_))));
    }

    #[test]
    fn test_parse_rejects_bad_start_date() {
        let mut f = fields("daily");
        f.start_date = Some("tomorrow".to_string());
        assert!(matches!(f.parse(today()), Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn test_habit_ref_rejects_non_positive() {
        assert!(HabitRef { habit_id: 0 }.id().is_err());
        assert_eq!(HabitRef { habit_id: 3 }.id().unwrap(), HabitId(3));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("2025-01-09")).unwrap(), Some(today()));
        assert!(parse_optional_date(Some("01/09/2025")).is_err());
    }
}
