//! SQLite storage backend.
//!
//! A connection is opened for each operation and dropped when it returns;
//! no connection or transaction outlives a call. Each insert is atomic on
//! its own.

use crate::error::Result;
use crate::storage::records::{
    AgentInteractionRecord, NewInteraction, NewResumeLog, ResumeLogRecord,
};
use crate::storage::traits::HistoryBackend;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS resume_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT,
        name TEXT,
        skills TEXT,
        education TEXT,
        experience TEXT,
        match_percent INTEGER,
        job_title TEXT,
        feedback_summary TEXT,
        suggested_jobs TEXT
    );

    CREATE TABLE IF NOT EXISTS agent_interactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT,
        agent_name TEXT,
        action TEXT,
        input_data TEXT,
        output_data TEXT
    );
";

const RESUME_COLUMNS: &str = "id, timestamp, name, skills, education, experience, \
     match_percent, job_title, feedback_summary, suggested_jobs";

const INTERACTION_COLUMNS: &str = "id, timestamp, agent_name, action, input_data, output_data";

/// File-backed SQLite history.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    /// Create a backend for the database at `path`.
    ///
    /// Nothing is touched on disk until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Connection::open(&self.path)?)
    }
}

/// Clamp a caller limit to what SQLite's `LIMIT` accepts.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

// Columns are nullable so rows written by older tools still load.
fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn row_to_resume_log(row: &Row<'_>) -> rusqlite::Result<ResumeLogRecord> {
    Ok(ResumeLogRecord {
        id: row.get(0)?,
        timestamp: text(row, 1)?,
        name: text(row, 2)?,
        skills: text(row, 3)?,
        education: text(row, 4)?,
        experience: text(row, 5)?,
        match_percent: row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
        job_title: text(row, 7)?,
        feedback_summary: text(row, 8)?,
        suggested_jobs: text(row, 9)?,
    })
}

fn row_to_interaction(row: &Row<'_>) -> rusqlite::Result<AgentInteractionRecord> {
    Ok(AgentInteractionRecord {
        id: row.get(0)?,
        timestamp: text(row, 1)?,
        agent_name: text(row, 2)?,
        action: text(row, 3)?,
        input_data: text(row, 4)?,
        output_data: text(row, 5)?,
    })
}

impl HistoryBackend for SqliteBackend {
    fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn insert_analysis(&self, entry: &NewResumeLog, timestamp: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO resume_logs
             (timestamp, name, skills, education, experience, match_percent,
              job_title, feedback_summary, suggested_jobs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                timestamp,
                entry.name,
                entry.skills,
                entry.education,
                entry.experience,
                entry.match_percent,
                entry.job_title,
                entry.feedback_summary,
                entry.suggested_jobs,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn recent_analyses(&self, limit: usize) -> Result<Vec<ResumeLogRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESUME_COLUMNS} FROM resume_logs ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![sql_limit(limit)], row_to_resume_log)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn get_analysis(&self, id: i64) -> Result<Option<ResumeLogRecord>> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                &format!("SELECT {RESUME_COLUMNS} FROM resume_logs WHERE id = ?1"),
                params![id],
                row_to_resume_log,
            )
            .optional()?;
        Ok(record)
    }

    fn insert_interaction(&self, entry: &NewInteraction, timestamp: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO agent_interactions
             (timestamp, agent_name, action, input_data, output_data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                timestamp,
                entry.agent_name,
                entry.action,
                entry.input_data,
                entry.output_data,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn recent_interactions(&self, limit: usize) -> Result<Vec<AgentInteractionRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {INTERACTION_COLUMNS} FROM agent_interactions ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt
            .query_map(params![sql_limit(limit)], row_to_interaction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
