//! Agent Shell: one player, one decision policy, one log sink.
//!
//! The game hands each shell a freshly built observation when it is that
//! player's turn and gets one decision back. Prompts live in [`prompt`] so the
//! text logged for a turn is exactly what an LLM policy was shown.

pub mod prompt;
mod shell;

pub use shell::AgentShell;
