//! SQLite-backed meeting store.
//!
//! Every operation opens its own connection and relies on autocommit.

use super::Meeting;
use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS meetings (id INTEGER PRIMARY KEY, title TEXT, time TEXT)";

/// Meeting store bound to a database file.
#[derive(Debug, Clone)]
pub struct MeetingStore {
    path: PathBuf,
}

impl MeetingStore {
    /// Bind a store to a database path. Nothing is touched on disk until
    /// [`MeetingStore::initialize`] or another operation runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the meetings table if it does not exist. Safe to call on every start.
    #[instrument(skip(self))]
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized meeting store at {:?}", self.path);
        Ok(())
    }

    /// Insert a meeting and return it with its assigned id.
    #[instrument(skip(self))]
    pub fn add(&self, title: Option<&str>, time: Option<&str>) -> Result<Meeting> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO meetings (title, time) VALUES (?1, ?2)",
            params![title, time],
        )?;
        let id = conn.last_insert_rowid();

        debug!("Saved meeting {}", id);
        Ok(Meeting {
            id,
            title: title.map(str::to_string),
            time: time.map(str::to_string),
        })
    }

    /// Every stored meeting in insertion order.
    #[instrument(skip(self))]
    pub fn view(&self) -> Result<Vec<Meeting>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, title, time FROM meetings ORDER BY id")?;
        let meetings = stmt
            .query_map([], |row| {
                Ok(Meeting {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    time: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} meetings", meetings.len());
        Ok(meetings)
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}
