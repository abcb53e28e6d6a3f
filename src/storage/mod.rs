//! Storage layer for persisting habit data
//!
//! This module defines the two persistence contracts the rest of the crate
//! depends on, the habit registry and the completion store, plus the SQLite
//! implementation of both.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Completion, Habit, HabitDraft, HabitId};

/// How many recent completion dates the streak calculator is given
pub const DEFAULT_DATES_LIMIT: u32 = 100;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },

    #[error("Corrupt {column} value '{value}' in stored row")]
    Corrupt { column: &'static str, value: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Persistence of habit metadata and schedules
///
/// Deleting a habit removes its completions in the same logical step.
pub trait HabitRegistry {
    /// Insert a habit and its schedule, returning the assigned id
    fn create(&self, draft: &HabitDraft) -> Result<HabitId, StorageError>;

    /// Replace every editable field of a habit, schedule included
    fn update(&self, id: HabitId, draft: &HabitDraft) -> Result<(), StorageError>;

    /// Fetch a habit, failing with `HabitNotFound` when absent
    fn get_by_id(&self, id: HabitId) -> Result<Habit, StorageError>;

    /// All habits, newest first
    fn get_all(&self) -> Result<Vec<Habit>, StorageError>;

    /// Remove a habit together with its schedule and completions
    fn delete(&self, id: HabitId) -> Result<(), StorageError>;
}

/// Persistence of completion events, unique per habit and civil date
pub trait CompletionStore {
    /// Insert or refresh the completion of `habit_id` on `date`
    fn record(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError>;

    /// Up to `limit` most recent completion dates, newest first
    fn list_dates_desc(&self, habit_id: HabitId, limit: u32) -> Result<Vec<NaiveDate>, StorageError>;

    /// Completions with `from <= record_date <= to`, newest first
    fn list_in_range(
        &self,
        habit_id: HabitId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Completion>, StorageError>;
}
