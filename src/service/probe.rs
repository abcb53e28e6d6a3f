//! Capability used to annotate listed habits with "completed today"

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::HabitId;
use crate::storage::{CompletionStore, StorageError};

pub trait CompletedTodayProbe: Send + Sync {
    /// Whether a completion exists for `habit_id` on `today`
    fn is_completed_on(&self, habit_id: HabitId, today: NaiveDate) -> Result<bool, StorageError>;
}

/// Probe that never reports a completion
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProbe;

impl CompletedTodayProbe for NoopProbe {
    fn is_completed_on(&self, _habit_id: HabitId, _today: NaiveDate) -> Result<bool, StorageError> {
        Ok(false)
    }
}

/// Probe backed by a completion store
pub struct StoreProbe<S> {
    store: Arc<S>,
}

impl<S> StoreProbe<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> CompletedTodayProbe for StoreProbe<S>
where
    S: CompletionStore + Send + Sync,
{
    fn is_completed_on(&self, habit_id: HabitId, today: NaiveDate) -> Result<bool, StorageError> {
        Ok(!self.store.list_in_range(habit_id, today, today)?.is_empty())
    }
}
