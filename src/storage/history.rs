//! Best-effort history store.
//!
//! History logging is auxiliary to the analysis flow, so nothing here
//! returns an error. A failed write is logged and reported as `None`; a
//! failed read is logged and reported as empty.

use crate::storage::records::{
    AgentInteractionRecord, AnalysisReport, MatchResult, NewInteraction, NewResumeLog,
    ParsedResume, ResumeLogRecord,
};
use crate::storage::sqlite::SqliteBackend;
use crate::storage::traits::HistoryBackend;
use chrono::{SecondsFormat, Utc};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Default number of rows returned by history listings.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Analysis history with a best-effort contract.
#[derive(Debug)]
pub struct HistoryStore<B> {
    backend: B,
}

impl HistoryStore<SqliteBackend> {
    /// Open the SQLite history at `path`, creating the schema if needed.
    #[must_use]
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self::new(SqliteBackend::new(path))
    }
}

impl<B: HistoryBackend> HistoryStore<B> {
    /// Wrap a backend and make sure its schema exists.
    #[must_use]
    pub fn new(backend: B) -> Self {
        let store = Self { backend };
        store.init();
        store
    }

    /// The wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create the history tables if absent.
    ///
    /// Safe to call repeatedly. Returns whether the schema is ready; a
    /// failure is logged and callers may carry on regardless.
    pub fn init(&self) -> bool {
        match self.backend.init() {
            Ok(()) => {
                debug!("history schema ready");
                true
            }
            Err(e) => {
                error!("history database initialization failed: {e}");
                false
            }
        }
    }

    /// Record one resume analysis.
    ///
    /// Missing fields are filled with defaults. Returns the new row id, or
    /// `None` if the write failed.
    pub fn save_analysis(
        &self,
        parsed: &ParsedResume,
        match_result: Option<&MatchResult>,
    ) -> Option<i64> {
        let entry = NewResumeLog::from_analysis(parsed, match_result);
        match self.backend.insert_analysis(&entry, &now_timestamp()) {
            Ok(id) => {
                debug!(id, name = %entry.name, "saved resume analysis");
                Some(id)
            }
            Err(e) => {
                error!("failed to save resume analysis: {e}");
                None
            }
        }
    }

    /// Record a full analysis report for an uploaded file.
    pub fn log_analysis(&self, report: &AnalysisReport, filename: &str) -> Option<i64> {
        let id = self.save_analysis(&report.parsed_data, Some(&report.match_result()));
        if id.is_some() {
            info!("analysis logged for file: {filename}");
        }
        id
    }

    /// Most recent analyses, newest first.
    pub fn get_history(&self, limit: usize) -> Vec<ResumeLogRecord> {
        self.backend.recent_analyses(limit).unwrap_or_else(|e| {
            error!("failed to read analysis history: {e}");
            Vec::new()
        })
    }

    /// One analysis by id, or `None` if absent or unreadable.
    pub fn get_record(&self, id: i64) -> Option<ResumeLogRecord> {
        self.backend.get_analysis(id).unwrap_or_else(|e| {
            error!("failed to read analysis {id}: {e}");
            None
        })
    }

    /// Record one agent interaction, truncating payloads to 5000 characters.
    pub fn log_interaction(
        &self,
        agent_name: &str,
        action: &str,
        input_data: &str,
        output_data: &str,
    ) -> Option<i64> {
        let entry = NewInteraction::new(agent_name, action, input_data, output_data);
        match self.backend.insert_interaction(&entry, &now_timestamp()) {
            Ok(id) => {
                debug!(id, agent = agent_name, action, "logged agent interaction");
                Some(id)
            }
            Err(e) => {
                error!("failed to log interaction for {agent_name}: {e}");
                None
            }
        }
    }

    /// Most recent agent interactions, newest first.
    pub fn get_interactions(&self, limit: usize) -> Vec<AgentInteractionRecord> {
        self.backend.recent_interactions(limit).unwrap_or_else(|e| {
            error!("failed to read agent interactions: {e}");
            Vec::new()
        })
    }
}

/// Insert timestamp: RFC 3339 UTC with microseconds.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::storage::memory::MemoryBackend;
    use crate::storage::records::MAX_PAYLOAD_CHARS;
    use chrono::DateTime;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend whose every operation fails.
    #[derive(Debug, Default)]
    struct BrokenBackend {
        calls: AtomicUsize,
    }

    impl BrokenBackend {
        fn fail<T>(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Io(io::Error::other("disk on fire")))
        }
    }

    impl HistoryBackend for BrokenBackend {
        fn init(&self) -> Result<()> {
            self.fail()
        }
        fn insert_analysis(&self, _: &NewResumeLog, _: &str) -> Result<i64> {
            self.fail()
        }
        fn recent_analyses(&self, _: usize) -> Result<Vec<ResumeLogRecord>> {
            self.fail()
        }
        fn get_analysis(&self, _: i64) -> Result<Option<ResumeLogRecord>> {
            self.fail()
        }
        fn insert_interaction(&self, _: &NewInteraction, _: &str) -> Result<i64> {
            self.fail()
        }
        fn recent_interactions(&self, _: usize) -> Result<Vec<AgentInteractionRecord>> {
            self.fail()
        }
    }

    fn parsed(name: &str) -> ParsedResume {
        ParsedResume {
            name: Some(name.to_string()),
            skills: vec!["Rust".to_string()],
            ..ParsedResume::default()
        }
    }

    #[test]
    fn save_then_latest_history_entry() {
        let store = HistoryStore::new(MemoryBackend::new());
        let id = store.save_analysis(&parsed("Ada"), None).unwrap();

        let history = store.get_history(1);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, id);
        assert_eq!(history[0].name, "Ada");
        assert!(DateTime::parse_from_rfc3339(&history[0].timestamp).is_ok());
    }

    #[test]
    fn get_record_by_id() {
        let store = HistoryStore::new(MemoryBackend::new());
        let id = store.save_analysis(&parsed("Ada"), None).unwrap();

        assert_eq!(store.get_record(id).unwrap().name, "Ada");
        assert!(store.get_record(id + 100).is_none());
    }

    #[test]
    fn log_analysis_maps_report() {
        let store = HistoryStore::new(MemoryBackend::new());
        let report = AnalysisReport {
            parsed_data: parsed("Grace"),
            overall_score: 88.0,
            target_job: "Compiler Engineer".to_string(),
            recommendations: vec!["Add links".to_string(), "Trim intro".to_string()],
            job_suggestions: vec!["Toolchain Engineer".to_string()],
        };

        let id = store.log_analysis(&report, "grace.pdf").unwrap();
        let record = store.get_record(id).unwrap();
        assert_eq!(record.match_percent, 88);
        assert_eq!(record.job_title, "Compiler Engineer");
        assert_eq!(record.feedback_summary, "Add links, Trim intro");
        assert_eq!(record.suggested_jobs, "Toolchain Engineer");
    }

    #[test]
    fn log_interaction_truncates_payloads() {
        let store = HistoryStore::new(MemoryBackend::new());
        store
            .log_interaction("parser", "parse", &"x".repeat(6000), "done")
            .unwrap();

        let rows = store.get_interactions(1);
        assert_eq!(rows[0].input_data.chars().count(), MAX_PAYLOAD_CHARS);
        assert_eq!(rows[0].output_data, "done");
    }

    #[test]
    fn failures_degrade_to_neutral_results() {
        let store = HistoryStore::new(BrokenBackend::default());

        assert!(!store.init());
        assert!(store.save_analysis(&parsed("Ada"), None).is_none());
        assert!(store.log_analysis(&AnalysisReport::default(), "cv.pdf").is_none());
        assert!(store.get_history(DEFAULT_HISTORY_LIMIT).is_empty());
        assert!(store.get_record(1).is_none());
        assert!(store.log_interaction("a", "b", "c", "d").is_none());
        assert!(store.get_interactions(5).is_empty());

        // new() + 7 calls above
        assert_eq!(store.backend().calls.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn sqlite_store_creates_schema_on_open() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store = HistoryStore::sqlite(temp_dir.path().join("history.db"));

        assert!(store.save_analysis(&parsed("Ada"), None).is_some());
        assert_eq!(store.get_history(DEFAULT_HISTORY_LIMIT).len(), 1);
    }
}
