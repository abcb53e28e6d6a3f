//! Completion records and the dense per-day view built from them

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;

/// A record that a habit was done on a civil date
///
/// At most one record exists per `(habit_id, record_date)`; marking the same
/// day again only refreshes `completed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub habit_id: HabitId,
    /// The day the habit was marked done
    pub record_date: NaiveDate,
    /// When the mark was last made
    pub completed_at: NaiveDateTime,
}

/// One cell of the contribution grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub completed: bool,
}
