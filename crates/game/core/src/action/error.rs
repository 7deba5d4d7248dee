//! Action execution errors.
//!
//! Raised by the transition hooks. The engine has already checked the action
//! against the legal set, so most of these indicate state that changed under
//! the transition or an engine bug.

use crate::env::{OracleError, Room, TaskId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ActionError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("player {0} is not an impostor")]
    NotImpostor(PlayerId),

    #[error("target {0} is not a living crewmate")]
    InvalidTarget(PlayerId),

    #[error("target {target} is not in {room}")]
    TargetElsewhere { target: PlayerId, room: Room },

    #[error("kill is on cooldown for {remaining} more timesteps")]
    KillCooldown { remaining: u32 },

    #[error("{from} is not connected to {to}")]
    NotConnected { from: Room, to: Room },

    #[error("player {player} is in {actual}, not {expected}")]
    WrongRoom {
        player: PlayerId,
        expected: Room,
        actual: Room,
    },

    #[error("{0} is not assigned to the player")]
    TaskNotAssigned(TaskId),

    #[error("{0} is already complete")]
    TaskComplete(TaskId),

    #[error("no emergency meetings left")]
    NoEmergencyCalls,

    #[error("no emergency button in {0}")]
    NoEmergencyButton(Room),

    #[error("no unreported body of {0} here")]
    NoBody(PlayerId),

    #[error("player {0} already voted")]
    AlreadyVoted(PlayerId),

    #[error("action is not allowed during {0}")]
    WrongPhase(String),

    #[error("state check failed after apply: {0}")]
    PostCondition(&'static str),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            PlayerNotFound(_) | PostCondition(_) => ErrorSeverity::Internal,
            Oracle(e) => e.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            PlayerNotFound(_) => "ACTION_PLAYER_NOT_FOUND",
            NotImpostor(_) => "ACTION_NOT_IMPOSTOR",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            TargetElsewhere { .. } => "ACTION_TARGET_ELSEWHERE",
            KillCooldown { .. } => "ACTION_KILL_COOLDOWN",
            NotConnected { .. } => "ACTION_NOT_CONNECTED",
            WrongRoom { .. } => "ACTION_WRONG_ROOM",
            TaskNotAssigned(_) => "ACTION_TASK_NOT_ASSIGNED",
            TaskComplete(_) => "ACTION_TASK_COMPLETE",
            NoEmergencyCalls => "ACTION_NO_EMERGENCY_CALLS",
            NoEmergencyButton(_) => "ACTION_NO_EMERGENCY_BUTTON",
            NoBody(_) => "ACTION_NO_BODY",
            AlreadyVoted(_) => "ACTION_ALREADY_VOTED",
            WrongPhase(_) => "ACTION_WRONG_PHASE",
            PostCondition(_) => "ACTION_POST_CONDITION",
            Oracle(e) => e.error_code(),
        }
    }
}
