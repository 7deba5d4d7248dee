//! Small helpers shared by the orchestrator and the batch runner.

pub mod hash;

pub use hash::state_root;
