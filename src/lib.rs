/// Public library interface for the Habit Streaks MCP server
///
/// This module exports the server, the service façade and the domain and
/// storage types that other applications or tests build on.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub mod domain;
pub mod mcp;
pub mod service;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use domain::*;
pub use service::{Clock, HabitService, ManualClock, ServiceError, SystemClock};
pub use storage::{CompletionStore, HabitRegistry, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit streak server that speaks MCP over stdin/stdout
///
/// Habits and completions live in a SQLite database; every tool call goes
/// through a [`HabitService`] built on that database.
pub struct HabitStreakServer {
    service: HabitService<SqliteStorage>,
}

impl HabitStreakServer {
    /// Create a server backed by the database at `db_path`
    ///
    /// The schema is created or migrated if needed. "Today" follows the
    /// local clock.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Streaks server with database: {:?}", db_path);

        let storage = Arc::new(SqliteStorage::new(&db_path)?);
        let service = HabitService::new(storage, Arc::new(SystemClock));

        Ok(Self { service })
    }

    /// Wrap an already built service (useful for testing)
    pub fn from_service(service: HabitService<SqliteStorage>) -> Self {
        Self { service }
    }

    /// Run the MCP server until stdin closes
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let habits = self.service.list_habits()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await
    }

    pub fn service(&self) -> &HabitService<SqliteStorage> {
        &self.service
    }
}
