/// Main entry point for the Habit Streaks MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use habit_streaks::HabitStreakServer;

const DATA_DIR: &str = ".habit_streaks";
const DATA_DIR_PLAIN: &str = "habit_streaks";
const DB_FILE: &str = "habits.db";

/// First writable location for the database, falling back to the temp dir
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(DATA_DIR)),
        dirs::data_dir().map(|p| p.join(DATA_DIR_PLAIN)),
        dirs::config_dir().map(|p| p.join(DATA_DIR_PLAIN)),
        std::env::current_dir().ok().map(|p| p.join(DATA_DIR)),
    ];

    for dir in candidates.iter().flatten() {
        if std::fs::create_dir_all(dir).is_err() {
            continue;
        }
        let probe = dir.join(".test_write");
        if std::fs::write(&probe, "test").is_ok() {
            let _ = std::fs::remove_file(&probe);
            return Ok(dir.join(DB_FILE));
        }
    }

    let temp_dir = std::env::temp_dir().join(DATA_DIR_PLAIN);
    std::fs::create_dir_all(&temp_dir)?;
    let db_path = temp_dir.join(DB_FILE);

    tracing::warn!("Using temporary directory for database: {}", db_path.display());
    Ok(db_path)
}

/// Command line arguments for the Habit Streaks MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.debug {
            "info"
        } else {
            "warn"
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // RUST_LOG wins over the command line flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("habit_streaks={}", args.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Habit Streaks MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = HabitStreakServer::new(db_path).await?;
    server.run().await?;

    info!("Habit Streaks MCP server shutdown complete");
    Ok(())
}
