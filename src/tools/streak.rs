//! Tool for reading a habit's current streak

use serde::Serialize;

use crate::domain::{Cadence, HabitId};
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::HabitRef;

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub habit_id: HabitId,
    pub cadence: Cadence,
    pub current_count: u32,
    pub message: String,
}

pub fn get_streak<S>(service: &HabitService<S>, params: HabitRef) -> Result<StreakResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habit_id = params.id()?;
    let habit = service.get_habit(habit_id)?;
    let streak = service.get_streak(habit_id)?;
    let cadence = habit.habit.cadence;

    let message = if streak.current_count == 0 {
        format!("'{}' has no current streak", habit.habit.description)
    } else {
        format!("🔥 '{}': {}", habit.habit.description, streak.label(cadence))
    };

    Ok(StreakResponse {
        habit_id,
        cadence,
        current_count: streak.current_count,
        message,
    })
}
