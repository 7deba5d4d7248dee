//! Deterministic rules of the hidden-role elimination game.
//!
//! `game-core` defines the canonical rules (roles, actions, phases, win
//! conditions) and the information boundary between ground truth and each
//! player's view. It performs no I/O: all state mutation flows through
//! [`engine::GameEngine`], static world data comes in through the oracles in
//! [`env`], and supporting crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod phase;
pub mod roles;
pub mod state;
pub mod visibility;

#[cfg(test)]
mod test_support;

pub use action::{Action, ActionError, ActionTransition, legal_actions};
pub use config::{BodyDiscovery, GameConfig, GamePreset, TaskQuota};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError,
};
pub use env::{
    Env, GameEnv, MapOracle, OracleError, PcgRng, RngOracle, Room, TaskDefinition, TaskId,
    TaskKind,
};
pub use error::{ConfigError, ErrorSeverity, GameError, InvariantViolation, SetupError};
pub use phase::current_actor;
pub use roles::{ImpostorRoster, RoleAssignment, RoleStrategy, assign_roles};
pub use state::{
    Body, EventKind, GameEvent, GameState, Phase, Player, PlayerId, Role, Task, Timestep,
    WinReason,
};
pub use visibility::{Observation, ObserveError, ObservedEvent, TaskView, observe};
