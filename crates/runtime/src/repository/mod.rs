//! Repository layer for agent decision records.
//!
//! Every applied turn leaves one [`AgentLogRecord`] in the configured
//! [`AgentLog`]: the prompts an agent saw and the response it gave, tagged with
//! game, timestep, phase and player so the run can be audited afterwards.

mod error;
mod file;
mod memory;
pub(crate) mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileAgentLog;
pub use memory::MemoryAgentLog;
pub use record::{AgentLogRecord, AgentResponse, Interaction, PlayerTag};
pub use traits::AgentLog;
