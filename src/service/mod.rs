//! Service façade binding the registry, the completion store and the pure
//! contribution and streak computations together
//!
//! The façade is stateless apart from shared handles, so the outer layer may
//! call it from any number of handlers at once. "Today" is read from the
//! clock once per operation.

pub mod clock;
pub mod probe;

pub use clock::*;
pub use probe::*;

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    build_contribution, Cadence, ContributionDay, DomainError, HabitDraft, HabitId, HabitSummary,
    Schedule, Streak,
};
use crate::storage::{CompletionStore, HabitRegistry, StorageError, DEFAULT_DATES_LIMIT};

/// Error kinds surfaced to callers of the façade
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Habit not found: {habit_id}")]
    NotFound { habit_id: HabitId },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::HabitNotFound { habit_id } => ServiceError::NotFound { habit_id },
            StorageError::Corrupt { .. } => ServiceError::Internal(err.to_string()),
            other => ServiceError::Storage(other),
        }
    }
}

/// Operations the outer layer calls
pub struct HabitService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    probe: Arc<dyn CompletedTodayProbe>,
}

impl<S> HabitService<S>
where
    S: HabitRegistry + CompletionStore + Send + Sync + 'static,
{
    /// Build a façade whose "completed today" probe reads the same store
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        let probe: Arc<dyn CompletedTodayProbe> = Arc::new(StoreProbe::new(Arc::clone(&store)));
        Self { store, clock, probe }
    }

    /// Replace the probe used by `list_habits` and `get_habit`
    pub fn with_probe(mut self, probe: Arc<dyn CompletedTodayProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn create_habit(
        &self,
        description: &str,
        cadence: Cadence,
        schedule: Schedule,
        start_date: NaiveDate,
        colour: &str,
    ) -> Result<HabitId, ServiceError> {
        let draft = HabitDraft::new(description, cadence, schedule, start_date, colour)?;
        let id = self.store.create(&draft)?;
        tracing::info!("Created {} habit {}: {}", cadence, id, draft.description);
        Ok(id)
    }

    /// Replace every editable field of a habit, schedule included
    pub fn update_habit(
        &self,
        id: HabitId,
        description: &str,
        cadence: Cadence,
        schedule: Schedule,
        start_date: NaiveDate,
        colour: &str,
    ) -> Result<(), ServiceError> {
        let draft = HabitDraft::new(description, cadence, schedule, start_date, colour)?;
        self.store.update(id, &draft)?;
        tracing::info!("Updated habit {}", id);
        Ok(())
    }

    pub fn delete_habit(&self, id: HabitId) -> Result<(), ServiceError> {
        self.store.delete(id)?;
        tracing::info!("Deleted habit {}", id);
        Ok(())
    }

    /// A single habit annotated with whether it was done today
    pub fn get_habit(&self, id: HabitId) -> Result<HabitSummary, ServiceError> {
        let today = self.clock.today();
        self.get_habit_on(id, today)
    }

    /// A single habit annotated with whether it was done on `today`
    pub fn get_habit_on(&self, id: HabitId, today: NaiveDate) -> Result<HabitSummary, ServiceError> {
        let habit = self.store.get_by_id(id)?;
        let completed_today = self.completed_on(id, today);
        Ok(HabitSummary {
            habit,
            completed_today,
        })
    }

    /// Every habit, newest first, annotated with whether it was done today
    ///
    /// A failing probe only clears the flag for that habit.
    pub fn list_habits(&self) -> Result<Vec<HabitSummary>, ServiceError> {
        let today = self.clock.today();
        let habits = self.store.get_all()?;

        Ok(habits
            .into_iter()
            .map(|habit| {
                let completed_today = self.completed_on(habit.id, today);
                HabitSummary {
                    habit,
                    completed_today,
                }
            })
            .collect())
    }

    /// Record a completion for today; repeating it the same day is a no-op
    pub fn mark_done_today(&self, id: HabitId) -> Result<NaiveDate, ServiceError> {
        let today = self.clock.today();
        self.mark_done_on(id, today)?;
        Ok(today)
    }

    pub fn mark_done_on(&self, id: HabitId, date: NaiveDate) -> Result<(), ServiceError> {
        self.store.record(id, date)?;
        tracing::debug!("Habit {} marked done on {}", id, date);
        Ok(())
    }

    /// Dense completion grid over the inclusive window `[from, to]`
    pub fn get_contribution(
        &self,
        id: HabitId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ContributionDay>, ServiceError> {
        self.store.get_by_id(id)?;
        if from > to {
            return Ok(Vec::new());
        }

        let records = self.store.list_in_range(id, from, to)?;
        Ok(build_contribution(
            from,
            to,
            records.into_iter().map(|r| r.record_date),
        ))
    }

    /// Current streak as of the clock's today
    pub fn get_streak(&self, id: HabitId) -> Result<Streak, ServiceError> {
        let today = self.clock.today();
        self.get_streak_at(id, today)
    }

    /// Current streak as of `today`
    ///
    /// A failure to load completions yields a zero streak; only a missing
    /// or unreadable habit is reported.
    pub fn get_streak_at(&self, id: HabitId, today: NaiveDate) -> Result<Streak, ServiceError> {
        let habit = self.store.get_by_id(id)?;

        match self.store.list_dates_desc(id, DEFAULT_DATES_LIMIT) {
            Ok(dates) => Ok(Streak::calculate(id, habit.cadence, today, &dates)),
            Err(e) => {
                tracing::warn!("Could not load completions for habit {}: {}", id, e);
                Ok(Streak::zero(id))
            }
        }
    }

    /// Whether `date` is one of the habit's scheduled days
    pub fn is_scheduled(&self, id: HabitId, date: NaiveDate) -> Result<bool, ServiceError> {
        Ok(self.store.get_by_id(id)?.is_valid_for_date(date))
    }

    fn completed_on(&self, id: HabitId, today: NaiveDate) -> bool {
        self.probe.is_completed_on(id, today).unwrap_or_else(|e| {
            tracing::warn!("Could not check today's completion for habit {}: {}", id, e);
            false
        })
    }
}
