//! Tool for marking a habit done today
//!
//! This module implements the habit_done_today MCP tool. Marking the same
//! habit twice on one day keeps a single completion.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{HabitId, Streak};
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::HabitRef;

/// Response from marking a habit done
#[derive(Debug, Serialize)]
pub struct MarkDoneResponse {
    pub habit_id: HabitId,
    pub completed_on: NaiveDate,
    pub streak: Streak,
    pub message: String,
}

/// Record today's completion and report the resulting streak
pub fn mark_done_today<S>(service: &HabitService<S>, params: HabitRef) -> Result<MarkDoneResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habit_id = params.id()?;
    let completed_on = service.mark_done_today(habit_id)?;
    let habit = service.get_habit(habit_id)?;
    let streak = service.get_streak_at(habit_id, completed_on)?;

    let message = format!(
        "✅ Marked '{}' as done today ({})\n🔥 {}",
        habit.habit.description,
        completed_on,
        streak.label(habit.habit.cadence)
    );

    Ok(MarkDoneResponse {
        habit_id,
        completed_on,
        streak,
        message,
    })
}
