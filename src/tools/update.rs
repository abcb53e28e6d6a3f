//! Tool for updating existing habits
//!
//! This module implements the habit_update MCP tool. An update replaces
//! every editable field, so omitted schedule lists clear the schedule.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::{parse_habit_id, HabitFields};

/// Parameters for updating a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// Numeric id of the habit to update
    pub habit_id: i64,
    #[serde(flatten)]
    pub fields: HabitFields,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub habit_id: HabitId,
    pub message: String,
}

/// Replace a habit's fields through the service
pub fn update_habit<S>(
    service: &HabitService<S>,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habit_id = parse_habit_id(params.habit_id)?;
    let fields = params.fields.parse(service.today())?;

    service.update_habit(
        habit_id,
        &params.fields.description,
        fields.cadence,
        fields.schedule,
        fields.start_date,
        &fields.colour,
    )?;

    Ok(UpdateHabitResponse {
        habit_id,
        message: format!("✏️ Updated habit {}", habit_id),
    })
}
