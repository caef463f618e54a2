//! In-memory storage backend for tests and dry runs.

use crate::error::Result;
use crate::storage::records::{
    AgentInteractionRecord, NewInteraction, NewResumeLog, ResumeLogRecord,
};
use crate::storage::traits::HistoryBackend;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct Tables {
    analyses: Vec<ResumeLogRecord>,
    interactions: Vec<AgentInteractionRecord>,
}

/// In-memory storage backend.
///
/// Rows live in insertion order, so ids are their 1-based positions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n + 1)
}

impl HistoryBackend for MemoryBackend {
    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn insert_analysis(&self, entry: &NewResumeLog, timestamp: &str) -> Result<i64> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let id = next_id(tables.analyses.len());
        tables.analyses.push(ResumeLogRecord {
            id,
            timestamp: timestamp.to_string(),
            name: entry.name.clone(),
            skills: entry.skills.clone(),
            education: entry.education.clone(),
            experience: entry.experience.clone(),
            match_percent: entry.match_percent,
            job_title: entry.job_title.clone(),
            feedback_summary: entry.feedback_summary.clone(),
            suggested_jobs: entry.suggested_jobs.clone(),
        });
        Ok(id)
    }

    fn recent_analyses(&self, limit: usize) -> Result<Vec<ResumeLogRecord>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables.analyses.iter().rev().take(limit).cloned().collect())
    }

    fn get_analysis(&self, id: i64) -> Result<Option<ResumeLogRecord>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables.analyses.iter().find(|r| r.id == id).cloned())
    }

    fn insert_interaction(&self, entry: &NewInteraction, timestamp: &str) -> Result<i64> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let id = next_id(tables.interactions.len());
        tables.interactions.push(AgentInteractionRecord {
            id,
            timestamp: timestamp.to_string(),
            agent_name: entry.agent_name.clone(),
            action: entry.action.clone(),
            input_data: entry.input_data.clone(),
            output_data: entry.output_data.clone(),
        });
        Ok(id)
    }

    fn recent_interactions(&self, limit: usize) -> Result<Vec<AgentInteractionRecord>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables.interactions.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::records::ParsedResume;

    fn entry(name: &str) -> NewResumeLog {
        let parsed = ParsedResume {
            name: Some(name.to_string()),
            ..ParsedResume::default()
        };
        NewResumeLog::from_analysis(&parsed, None)
    }

    #[test]
    fn get_missing_analysis() {
        let store = MemoryBackend::new();
        assert!(store.get_analysis(1).unwrap().is_none());
    }

    #[test]
    fn ids_increase_from_one() {
        let store = MemoryBackend::new();
        assert_eq!(store.insert_analysis(&entry("a"), "t").unwrap(), 1);
        assert_eq!(store.insert_analysis(&entry("b"), "t").unwrap(), 2);
        assert_eq!(store.get_analysis(2).unwrap().unwrap().name, "b");
    }

    #[test]
    fn recent_analyses_respects_limit_and_order() {
        let store = MemoryBackend::new();
        for i in 0..5 {
            store.insert_analysis(&entry(&format!("r{i}")), "t").unwrap();
        }

        let records = store.recent_analyses(3).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "r4");
        assert_eq!(records[2].name, "r2");
    }

    #[test]
    fn interactions_are_separate_table() {
        let store = MemoryBackend::new();
        store.insert_analysis(&entry("a"), "t").unwrap();
        let id = store
            .insert_interaction(&NewInteraction::new("agent", "run", "i", "o"), "t")
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(store.recent_interactions(10).unwrap().len(), 1);
    }
}
