//! SQLite telemetry backend.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::{RetryPolicy, TelemetryStore, TIMESTAMP_FORMAT};
use crate::biomodel::BioState;
use crate::error::{DatabaseError, Result};

/// SQLite database of bio-state samples.
pub struct SqliteTelemetryStore {
    conn: Mutex<Connection>,
}

impl SqliteTelemetryStore {
    /// Open (and migrate) the database at `path`, retrying per `policy`.
    ///
    /// # Errors
    /// Returns [`DatabaseError::OpenFailed`] once every attempt has failed.
    pub fn open_with_retry(path: &Path, policy: RetryPolicy) -> Result<Self> {
        let attempts = policy.attempts.max(1);
        let mut attempt = 1;
        loop {
            match Self::try_open(path) {
                Ok(store) => {
                    tracing::debug!(path = %path.display(), attempt, "telemetry store opened");
                    return Ok(store);
                }
                Err(source) if attempt >= attempts => {
                    return Err(DatabaseError::OpenFailed {
                        path: path.to_path_buf(),
                        attempts,
                        source,
                    }
                    .into());
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "database not ready yet, retrying ({attempt}/{attempts})"
                    );
                    std::thread::sleep(policy.delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Open the database at `path` with a single attempt.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_retry(path, RetryPolicy::once())
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn try_open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS bio_telemetry (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                recorded_at      TEXT NOT NULL,
                user_id          TEXT NOT NULL,
                process_s        REAL NOT NULL,
                process_c        REAL NOT NULL,
                overall_capacity REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_bio_telemetry_user_time
                ON bio_telemetry(user_id, recorded_at);",
        )
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of samples stored for `user_id`.
    pub fn count(&self, user_id: &str) -> Result<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM bio_telemetry WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

impl TelemetryStore for SqliteTelemetryStore {
    fn save(&self, user_id: &str, timestamp: NaiveDateTime, state: &BioState) -> Result<()> {
        self.conn().execute(
            "INSERT INTO bio_telemetry (recorded_at, user_id, process_s, process_c, overall_capacity)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                user_id,
                state.freshness,
                state.circadian,
                state.total_capacity,
            ],
        )?;
        Ok(())
    }

    fn load_latest(&self, user_id: &str) -> Result<Option<BioState>> {
        let state = self
            .conn()
            .query_row(
                "SELECT process_s, process_c, overall_capacity
                 FROM bio_telemetry
                 WHERE user_id = ?1
                 ORDER BY recorded_at DESC, id DESC
                 LIMIT 1",
                params![user_id],
                |row| {
                    Ok(BioState {
                        freshness: row.get(0)?,
                        circadian: row.get(1)?,
                        total_capacity: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }
}
