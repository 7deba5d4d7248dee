//! Event types for different topics.

use game_core::{Action, GameEvent, Phase, PlayerId, Role, Timestep, WinReason};
use serde::Serialize;

/// Events related to game state changes.
#[derive(Debug, Clone, Serialize)]
pub enum GameStateEvent {
    /// An action passed validation and was applied.
    ActionApplied {
        game_index: usize,
        actor: PlayerId,
        action: Action,
        /// Ground-truth events recorded during the turn.
        events: Vec<GameEvent>,
    },

    /// The turn was consumed without an action.
    TurnForfeited {
        game_index: usize,
        actor: PlayerId,
        reason: String,
    },

    GameOver {
        game_index: usize,
        winner: Role,
        reason: WinReason,
        timestep: Timestep,
    },
}

/// Events related to turn management (lightweight).
#[derive(Debug, Clone, Serialize)]
pub struct TurnEvent {
    pub game_index: usize,
    /// Player whose decision is being awaited.
    pub player: PlayerId,
    pub timestep: Timestep,
    pub phase: Phase,
}
