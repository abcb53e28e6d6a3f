//! Tools for reading habits back
//!
//! This module implements the habit_list and habit_get MCP tools.

use serde::Serialize;

use crate::domain::HabitSummary;
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::view::{render_habit_card, EMPTY_STATE};
use crate::tools::HabitRef;

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

/// List every habit, newest first
pub fn list_habits<S>(service: &HabitService<S>) -> Result<ListHabitsResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habits = service.list_habits()?;

    let message = if habits.is_empty() {
        EMPTY_STATE.to_string()
    } else {
        let done = habits.iter().filter(|h| h.completed_today).count();
        let cards: Vec<String> = habits.iter().map(|h| render_habit_card(h, None)).collect();
        format!(
            "📋 {} habits, {} done today\n\n{}",
            habits.len(),
            done,
            cards.join("\n\n")
        )
    };

    Ok(ListHabitsResponse { habits, message })
}

/// Response from fetching one habit
#[derive(Debug, Serialize)]
pub struct GetHabitResponse {
    pub habit: HabitSummary,
    pub scheduled_today: bool,
    pub message: String,
}

/// Fetch one habit with its current streak
pub fn get_habit<S>(service: &HabitService<S>, params: HabitRef) -> Result<GetHabitResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habit_id = params.id()?;
    let today = service.today();

    let habit = service.get_habit_on(habit_id, today)?;
    let streak = service.get_streak_at(habit_id, today)?;
    let scheduled_today = habit.habit.is_valid_for_date(today);

    let mut message = render_habit_card(&habit, Some(&streak));
    if !scheduled_today {
        message.push_str("\n   💤 Not scheduled today");
    }

    Ok(GetHabitResponse {
        habit,
        scheduled_today,
        message,
    })
}
