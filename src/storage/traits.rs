//! Storage trait definitions.

use crate::error::Result;
use crate::storage::records::{
    AgentInteractionRecord, NewInteraction, NewResumeLog, ResumeLogRecord,
};

/// Storage backend for analysis history.
///
/// Ids are assigned by the backend and increase monotonically per table.
/// Timestamps are assigned by the caller ([`HistoryStore`]) at insert time.
///
/// [`HistoryStore`]: crate::storage::HistoryStore
pub trait HistoryBackend: Send + Sync {
    /// Create tables if they don't exist. Must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn init(&self) -> Result<()>;

    /// Insert one resume analysis row and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn insert_analysis(&self, entry: &NewResumeLog, timestamp: &str) -> Result<i64>;

    /// Most recent analyses, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn recent_analyses(&self, limit: usize) -> Result<Vec<ResumeLogRecord>>;

    /// One analysis by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get_analysis(&self, id: i64) -> Result<Option<ResumeLogRecord>>;

    /// Insert one agent interaction row and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn insert_interaction(&self, entry: &NewInteraction, timestamp: &str) -> Result<i64>;

    /// Most recent agent interactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn recent_interactions(&self, limit: usize) -> Result<Vec<AgentInteractionRecord>>;
}
