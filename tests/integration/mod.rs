/// Integration tests driving the service and the MCP server against
/// file-backed databases

mod mcp_session;
mod persistence;
mod scenarios;

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use habit_streaks::{HabitService, ManualClock, SqliteStorage};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Service over the database at `path` with a hand-driven clock
pub fn service_at(path: &Path, today: NaiveDate) -> (HabitService<SqliteStorage>, Arc<ManualClock>) {
    let storage = Arc::new(SqliteStorage::new(path).expect("Failed to open storage"));
    let clock = Arc::new(ManualClock::new(today));
    (HabitService::new(storage, clock.clone()), clock)
}
