//! SQLite implementation of the habit registry and completion store
//!
//! Both contracts live on one database file. The connection is guarded by a
//! mutex so the storage can be shared between request handlers; all
//! consistency guarantees come from SQLite constraints and transactions.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{ffi, params, Connection, OptionalExtension};

use crate::domain::{
    parse_civil_date, parse_timestamp, Cadence, Completion, Habit, HabitDraft, HabitId, Schedule,
    DATE_FORMAT,
};
use crate::storage::{migrations, CompletionStore, HabitRegistry, StorageError};

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

/// Raw habit columns as read from the database
struct HabitRow {
    id: i64,
    description: String,
    cadence: String,
    start_date: String,
    colour: String,
    created_at: String,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring the schema up to date
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {}", db_path.display());
        Ok(storage)
    }

    /// Private in-memory database, mainly for tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("connection lock poisoned".to_string()))
    }

    fn read_habit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitRow> {
        Ok(HabitRow {
            id: row.get(0)?,
            description: row.get(1)?,
            cadence: row.get(2)?,
            start_date: row.get(3)?,
            colour: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    /// Turn a raw row into a habit, rejecting values no writer could produce
    fn habit_from_row(conn: &Connection, row: HabitRow) -> Result<Habit, StorageError> {
        let id = HabitId::new(row.id).map_err(|_| StorageError::Corrupt {
            column: "id",
            value: row.id.to_string(),
        })?;
        let cadence = Cadence::from_stored(&row.cadence).ok_or_else(|| StorageError::Corrupt {
            column: "cadence",
            value: row.cadence.clone(),
        })?;
        let start_date = parse_date_column("start_date", &row.start_date)?;
        let created_at = parse_timestamp_column("created_at", &row.created_at)?;
        let schedule = Self::load_schedule(conn, id)?;

        Ok(Habit {
            id,
            description: row.description,
            cadence,
            schedule,
            start_date,
            colour: row.colour,
            created_at,
        })
    }

    fn load_schedule(conn: &Connection, id: HabitId) -> Result<Schedule, StorageError> {
        let mut stmt = conn.prepare(
            "SELECT day_of_week, day_of_month FROM habit_schedule WHERE habit_id = ?1",
        )?;
        let rows = stmt.query_map(params![id.value()], |row| {
            Ok((row.get::<_, Option<i64>>(0)?, row.get::<_, Option<i64>>(1)?))
        })?;

        let mut schedule = Schedule::every_day();
        for row in rows {
            let (day_of_week, day_of_month) = row?;
            if let Some(day) = day_of_week {
                schedule.days_of_week.insert(ordinal_column("day_of_week", day)?);
            }
            if let Some(day) = day_of_month {
                schedule.days_of_month.insert(ordinal_column("day_of_month", day)?);
            }
        }

        Ok(schedule)
    }

    fn insert_schedule(conn: &Connection, id: HabitId, schedule: &Schedule) -> Result<(), StorageError> {
        let mut stmt = conn.prepare(
            "INSERT INTO habit_schedule (habit_id, day_of_week, day_of_month) VALUES (?1, ?2, ?3)",
        )?;
        for day in &schedule.days_of_week {
            stmt.execute(params![id.value(), Some(*day as i64), None::<i64>])?;
        }
        for day in &schedule.days_of_month {
            stmt.execute(params![id.value(), None::<i64>, Some(*day as i64)])?;
        }
        Ok(())
    }
}

fn parse_date_column(column: &'static str, value: &str) -> Result<NaiveDate, StorageError> {
    parse_civil_date(value).map_err(|_| StorageError::Corrupt {
        column,
        value: value.to_string(),
    })
}

fn parse_timestamp_column(column: &'static str, value: &str) -> Result<NaiveDateTime, StorageError> {
    parse_timestamp(value).map_err(|_| StorageError::Corrupt {
        column,
        value: value.to_string(),
    })
}

fn ordinal_column(column: &'static str, value: i64) -> Result<u8, StorageError> {
    u8::try_from(value).map_err(|_| StorageError::Corrupt {
        column,
        value: value.to_string(),
    })
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

impl HabitRegistry for SqliteStorage {
    fn create(&self, draft: &HabitDraft) -> Result<HabitId, StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO habits (description, cadence, start_date, colour) VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.description,
                draft.cadence.as_str(),
                draft.start_date.format(DATE_FORMAT).to_string(),
                draft.colour
            ],
        )?;
        let id = HabitId(tx.last_insert_rowid());
        Self::insert_schedule(&tx, id, &draft.schedule)?;
        tx.commit()?;

        tracing::debug!("Created habit {} ({})", id, draft.description);
        Ok(id)
    }

    fn update(&self, id: HabitId, draft: &HabitDraft) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE habits SET
                description = ?2,
                cadence = ?3,
                start_date = ?4,
                colour = ?5
             WHERE id = ?1",
            params![
                id.value(),
                draft.description,
                draft.cadence.as_str(),
                draft.start_date.format(DATE_FORMAT).to_string(),
                draft.colour
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { habit_id: id });
        }

        tx.execute("DELETE FROM habit_schedule WHERE habit_id = ?1", params![id.value()])?;
        Self::insert_schedule(&tx, id, &draft.schedule)?;
        tx.commit()?;

        tracing::debug!("Updated habit {} ({})", id, draft.description);
        Ok(())
    }

    fn get_by_id(&self, id: HabitId) -> Result<Habit, StorageError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, description, cadence, start_date, colour, created_at
                 FROM habits WHERE id = ?1",
                params![id.value()],
                Self::read_habit_row,
            )
            .optional()?
            .ok_or(StorageError::HabitNotFound { habit_id: id })?;

        Self::habit_from_row(&conn, row)
    }

    fn get_all(&self) -> Result<Vec<Habit>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, description, cadence, start_date, colour, created_at
             FROM habits ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], Self::read_habit_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| Self::habit_from_row(&conn, row))
            .collect()
    }

    fn delete(&self, id: HabitId) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let records = tx.execute("DELETE FROM records WHERE habit_id = ?1", params![id.value()])?;
        tx.execute("DELETE FROM habit_schedule WHERE habit_id = ?1", params![id.value()])?;
        let rows_affected = tx.execute("DELETE FROM habits WHERE id = ?1", params![id.value()])?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { habit_id: id });
        }
        tx.commit()?;

        tracing::debug!("Deleted habit {} and {} completion(s)", id, records);
        Ok(())
    }
}

impl CompletionStore for SqliteStorage {
    fn record(&self, habit_id: HabitId, date: NaiveDate) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO records (habit_id, record_date, completed_at)
             VALUES (?1, ?2, datetime('now', 'localtime'))
             ON CONFLICT (habit_id, record_date)
             DO UPDATE SET completed_at = excluded.completed_at",
            params![habit_id.value(), date.format(DATE_FORMAT).to_string()],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Recorded completion of habit {} on {}", habit_id, date);
                Ok(())
            }
            Err(e) if is_foreign_key_violation(&e) => Err(StorageError::HabitNotFound { habit_id }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn list_dates_desc(&self, habit_id: HabitId, limit: u32) -> Result<Vec<NaiveDate>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT record_date FROM records
             WHERE habit_id = ?1
             ORDER BY record_date DESC
             LIMIT ?2",
        )?;

        let raw = stmt
            .query_map(params![habit_id.value(), limit], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        raw.iter()
            .map(|value| parse_date_column("record_date", value))
            .collect()
    }

    fn list_in_range(
        &self,
        habit_id: HabitId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Completion>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT record_date, completed_at FROM records
             WHERE habit_id = ?1 AND record_date BETWEEN ?2 AND ?3
             ORDER BY record_date DESC",
        )?;

        let raw = stmt
            .query_map(
                params![
                    habit_id.value(),
                    from.format(DATE_FORMAT).to_string(),
                    to.format(DATE_FORMAT).to_string()
                ],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(record_date, completed_at)| {
                Ok(Completion {
                    habit_id,
                    record_date: parse_date_column("record_date", &record_date)?,
                    completed_at: parse_timestamp_column("completed_at", &completed_at)?,
                })
            })
            .collect()
    }
}
