//! File-based repository implementations.

mod agent_log;

pub use agent_log::FileAgentLog;
