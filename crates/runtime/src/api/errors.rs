//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from game setup, the engine, decision policies and agent
//! logs so callers can bubble them up with consistent context.
use std::time::Duration;

use thiserror::Error;

use game_core::{ExecuteError, InvariantViolation, ObserveError, SetupError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("game setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("engine rejected the turn: {0}")]
    Execute(#[from] ExecuteError),

    #[error("failed to build observation: {0}")]
    Observe(#[from] ObserveError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{player} needs an LLM policy but no completion client was configured")]
    CompletionClientMissing { player: String },

    #[error("game {game_index} has no agent for {player}")]
    MissingAgent { game_index: usize, player: String },

    #[error("game {game_index} stopped without a winner")]
    NotFinished { game_index: usize },

    #[error("game worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Failure of a single decision. The game forfeits the turn and continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("decision timed out after {0:?}")]
    Timeout(Duration),

    #[error("completion request failed: {0}")]
    Completion(String),

    #[error("could not parse response: {0}")]
    Parse(String),

    #[error("no legal action available")]
    NoLegalAction,
}

impl DecisionError {
    /// Short reason recorded in the forfeit event.
    pub fn forfeit_reason(&self) -> &'static str {
        match self {
            DecisionError::Timeout(_) => "decision timeout",
            DecisionError::Completion(_) => "decision failed",
            DecisionError::Parse(_) => "unreadable response",
            DecisionError::NoLegalAction => "no legal action",
        }
    }
}
