//! Tool for the day-by-day completion grid
//!
//! This module implements the habit_contribution MCP tool. Without explicit
//! bounds the window covers the year ending today.

use chrono::{Months, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{ContributionDay, DomainError, HabitId};
use crate::service::{HabitService, ServiceError};
use crate::storage::{CompletionStore, HabitRegistry};
use crate::tools::view::render_contribution_grid;
use crate::tools::{parse_habit_id, parse_optional_date};

/// Parameters for the contribution grid
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContributionParams {
    /// Numeric id of the habit
    pub habit_id: i64,
    /// First day of the window (YYYY-MM-DD), defaults to one year before `to`
    pub from: Option<String>,
    /// Last day of the window (YYYY-MM-DD), defaults to today
    pub to: Option<String>,
}

/// Response carrying the grid
#[derive(Debug, Serialize)]
pub struct ContributionResponse {
    pub habit_id: HabitId,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<ContributionDay>,
    pub message: String,
}

/// Longest window a single request may span
pub const MAX_WINDOW_DAYS: i64 = 5 * 366;

/// One year before `to`, clamped to the last valid day of the month
pub fn default_window_start(to: NaiveDate) -> NaiveDate {
    to.checked_sub_months(Months::new(12)).unwrap_or(to)
}

pub fn get_contribution<S>(
    service: &HabitService<S>,
    params: ContributionParams,
) -> Result<ContributionResponse, ServiceError>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    let habit_id = parse_habit_id(params.habit_id)?;
    let to = parse_optional_date(params.to.as_deref())?.unwrap_or_else(|| service.today());
    let from = parse_optional_date(params.from.as_deref())?.unwrap_or_else(|| default_window_start(to));

    let span = (to - from).num_days();
    if span >= MAX_WINDOW_DAYS {
        return Err(DomainError::Validation {
            message: format!("window {} to {} exceeds {} days", from, to, MAX_WINDOW_DAYS),
        }
        .into());
    }

    let days = service.get_contribution(habit_id, from, to)?;
    let completed = days.iter().filter(|d| d.completed).count();

    let message = if days.is_empty() {
        format!("No days between {} and {}", from, to)
    } else {
        format!(
            "📊 {} to {}\n\n{}\n\n{} of {} days completed",
            from,
            to,
            render_contribution_grid(&days),
            completed,
            days.len()
        )
    };

    Ok(ContributionResponse {
        habit_id,
        from,
        to,
        days,
        message,
    })
}
