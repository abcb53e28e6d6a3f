//! Core types shared by habits, completions and streaks
//!
//! Defines the habit identifier, the cadence a habit is tracked at, the
//! per-cadence schedule refinement and the civil date formats used at every
//! boundary of the system.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Civil dates cross every boundary in ISO 8601 form
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamps are local wall-clock time without an offset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `YYYY-MM-DD` civil date
pub fn parse_civil_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("expected YYYY-MM-DD, got '{}'", s)))
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, DomainError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("expected YYYY-MM-DD HH:MM:SS, got '{}'", s)))
}

/// Unique identifier for a habit
///
/// Assigned by the store on creation and stable for the lifetime of the
/// habit. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Wrap a raw id, rejecting zero and negative values
    pub fn new(raw: i64) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::Validation {
                message: format!("Habit id must be positive, got {}", raw),
            });
        }
        Ok(Self(raw))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit is expected to be performed
///
/// The cadence decides how completions are grouped into periods when the
/// current streak is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    /// Storage and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        }
    }

    /// Exact storage representation, no case folding or trimming
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Cadence::Daily),
            "weekly" => Some(Cadence::Weekly),
            "monthly" => Some(Cadence::Monthly),
            _ => None,
        }
    }

    /// Human-readable name of one period at this cadence
    pub fn period_name(&self) -> &'static str {
        match self {
            Cadence::Daily => "day",
            Cadence::Weekly => "week",
            Cadence::Monthly => "month",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            other => Err(DomainError::InvalidCadence(other.to_string())),
        }
    }
}

/// Which days qualify for a habit, refined per cadence
///
/// Weekday ordinals run 0..=6 with 0 = Sunday; month-day ordinals run
/// 1..=31. An empty set means every day of the period qualifies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub days_of_week: BTreeSet<u8>,
    #[serde(default)]
    pub days_of_month: BTreeSet<u8>,
}

impl Schedule {
    /// Schedule where every day qualifies
    pub fn every_day() -> Self {
        Self::default()
    }

    pub fn weekly<I: IntoIterator<Item = u8>>(days: I) -> Self {
        Self {
            days_of_week: days.into_iter().collect(),
            days_of_month: BTreeSet::new(),
        }
    }

    pub fn monthly<I: IntoIterator<Item = u8>>(days: I) -> Self {
        Self {
            days_of_week: BTreeSet::new(),
            days_of_month: days.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days_of_week.is_empty() && self.days_of_month.is_empty()
    }

    /// Check the schedule against a cadence and return its canonical form
    ///
    /// Daily habits ignore any schedule, so it is cleared. Weekly habits may
    /// only carry weekdays and monthly habits only month days.
    pub fn normalized_for(self, cadence: Cadence) -> Result<Self, DomainError> {
        if let Some(day) = self.days_of_week.iter().find(|d| **d > 6) {
            return Err(DomainError::InvalidSchedule(format!(
                "day of week must be 0-6 (0 = Sunday), got {}",
                day
            )));
        }
        if let Some(day) = self.days_of_month.iter().find(|d| **d == 0 || **d > 31) {
            return Err(DomainError::InvalidSchedule(format!(
                "day of month must be 1-31, got {}",
                day
            )));
        }

        match cadence {
            Cadence::Daily => Ok(Self::every_day()),
            Cadence::Weekly if !self.days_of_month.is_empty() => Err(DomainError::InvalidSchedule(
                "weekly habits cannot be scheduled on days of the month".to_string(),
            )),
            Cadence::Monthly if !self.days_of_week.is_empty() => Err(DomainError::InvalidSchedule(
                "monthly habits cannot be scheduled on days of the week".to_string(),
            )),
            _ => Ok(self),
        }
    }
}
