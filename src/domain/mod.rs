//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (Habit, Completion, Streak), the
//! pure contribution and streak computations, and their validation rules.
//! Nothing in here touches persistence.

pub mod completion;
pub mod contribution;
pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use completion::*;
pub use contribution::*;
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    #[error("Unknown cadence: {0}")]
    InvalidCadence(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
