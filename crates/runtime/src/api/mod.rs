//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration or infrastructure.

pub mod errors;
pub mod policy;

pub use errors::{DecisionError, Result, RuntimeError};
pub use policy::{AgentContext, AgentIdentity, Decision, DecisionPolicy};
