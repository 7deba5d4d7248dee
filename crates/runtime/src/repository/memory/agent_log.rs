//! In-memory agent log implementation.

use std::sync::RwLock;

use crate::repository::{AgentLog, AgentLogRecord, RepositoryError, Result};

/// In-memory agent log for testing and development.
///
/// Thread-safe but not persistent across process restarts.
#[derive(Default)]
pub struct MemoryAgentLog {
    records: RwLock<Vec<AgentLogRecord>>,
}

impl MemoryAgentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all records (for testing/debugging).
    pub fn records(&self) -> Result<Vec<AgentLogRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(records.clone())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AgentLog for MemoryAgentLog {
    fn append(&self, record: &AgentLogRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        records.push(record.clone());
        Ok(())
    }
}
