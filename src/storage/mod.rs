//! Analysis history storage.
//!
//! Backends implement [`HistoryBackend`] and report failures as `Err`.
//! [`HistoryStore`] wraps a backend with the best-effort contract the rest
//! of the application relies on: failures are logged and turned into
//! empty results, never propagated.

pub mod history;
pub mod memory;
pub mod records;
pub mod sqlite;
pub mod traits;

pub use history::HistoryStore;
pub use memory::MemoryBackend;
pub use records::{
    AgentInteractionRecord, AnalysisReport, MatchResult, NewInteraction, NewResumeLog,
    ParsedResume, ResumeLogRecord,
};
pub use sqlite::SqliteBackend;
pub use traits::HistoryBackend;
