//! Tool for deleting habits together with their completions

use serde::Serialize;

use crate::domain::HabitId;
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::HabitRef;

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub habit_id: HabitId,
    pub message: String,
}

pub fn delete_habit<S>(service: &HabitService<S>, params: HabitRef) -> Result<DeleteHabitResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habit_id = params.id()?;
    service.delete_habit(habit_id)?;

    Ok(DeleteHabitResponse {
        habit_id,
        message: format!("🗑️ Deleted habit {} and all its data", habit_id),
    })
}
