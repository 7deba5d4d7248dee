//! In-memory repository implementations for testing and development.

mod agent_log;

pub use agent_log::MemoryAgentLog;
