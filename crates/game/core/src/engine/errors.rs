//! Error types for action execution pipeline.

use crate::action::ActionError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExecuteError {
    /// The proposed action matches no legal template for the player.
    #[error("illegal action for {actor}: {action}")]
    Illegal { actor: PlayerId, action: String },

    #[error("invalid actor: {actor} is not the current turn actor {current:?}")]
    NotCurrentActor {
        actor: PlayerId,
        current: Option<PlayerId>,
    },

    #[error("player {0} is dead")]
    ActorDead(PlayerId),

    #[error("game is already over")]
    GameOver,

    #[error("transition failed: {0}")]
    Transition(TransitionPhaseError<ActionError>),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Illegal { .. } => ErrorSeverity::Recoverable,
            ExecuteError::NotCurrentActor { .. }
            | ExecuteError::ActorDead(_)
            | ExecuteError::GameOver => ErrorSeverity::Validation,
            ExecuteError::Transition(_) => ErrorSeverity::Internal,
            ExecuteError::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Illegal { .. } => "EXECUTE_ILLEGAL_ACTION",
            ExecuteError::NotCurrentActor { .. } => "EXECUTE_NOT_CURRENT_ACTOR",
            ExecuteError::ActorDead(_) => "EXECUTE_ACTOR_DEAD",
            ExecuteError::GameOver => "EXECUTE_GAME_OVER",
            ExecuteError::Transition(e) => e.error.error_code(),
            ExecuteError::Oracle(e) => e.error_code(),
        }
    }
}
