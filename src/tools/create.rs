//! Tool for creating new habits
//!
//! This module implements the habit_create MCP tool.

use serde::Serialize;

use crate::domain::HabitId;
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::HabitFields;

/// Parameters for creating a new habit
pub type CreateHabitParams = HabitFields;

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit_id: HabitId,
    pub message: String,
}

/// Create a new habit through the service
pub fn create_habit<S>(
    service: &HabitService<S>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let fields = params.parse(service.today())?;
    let habit_id = service.create_habit(
        &params.description,
        fields.cadence,
        fields.schedule,
        fields.start_date,
        &fields.colour,
    )?;

    Ok(CreateHabitResponse {
        habit_id,
        message: format!(
            "✨ Created {} habit '{}'\nHabit ID: {}",
            fields.cadence,
            params.description.trim(),
            habit_id
        ),
    })
}
