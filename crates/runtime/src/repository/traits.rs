use super::{AgentLogRecord, Result};

/// Sink for agent decision records.
///
/// Shared by every shell of a batch, so implementations synchronise
/// internally.
pub trait AgentLog: Send + Sync {
    /// Appends one record.
    fn append(&self, record: &AgentLogRecord) -> Result<()>;

    /// Flushes buffered records, if any.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
