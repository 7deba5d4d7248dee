//! Decision policy implementations.

pub mod llm;
pub mod random;

pub use llm::{CompletionClient, CompletionRequest, LlmPolicy};
pub use random::RandomPolicy;
