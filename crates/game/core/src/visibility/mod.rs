//! Per-player redacted views of the global state.
//!
//! [`observe`] is the only way policy code learns about the game. It never
//! exposes another player's role, an unwitnessed event, or a secret ballot;
//! the impostor roster reaches impostors through their agent context, not
//! through observations.

mod observation;

pub use observation::{Observation, ObservedEvent, TaskView};

use crate::action::legal_actions;
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ObserveError {
    #[error("player {0} is not part of this game")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ObserveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ObserveError::UnknownPlayer(_) => ErrorSeverity::Validation,
            ObserveError::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ObserveError::UnknownPlayer(_) => "OBSERVE_UNKNOWN_PLAYER",
            ObserveError::Oracle(e) => e.error_code(),
        }
    }
}

/// Builds `player`'s observation from scratch.
///
/// Pure function of `(state, player)` and the static map: identical inputs
/// always yield identical observations.
///
/// # Errors
///
/// Fails for unknown players or a missing map oracle.
pub fn observe(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
) -> Result<Observation, ObserveError> {
    let me = state
        .player(player)
        .ok_or(ObserveError::UnknownPlayer(player))?;
    let map = env.map()?;

    let co_located = if me.alive {
        state
            .occupants(&me.location)
            .into_iter()
            .map(|id| state.name_of(id).to_string())
            .collect()
    } else {
        Vec::new()
    };

    let bodies = if me.alive {
        state
            .bodies_in(&me.location)
            .map(|body| state.name_of(body.victim).to_string())
            .collect()
    } else {
        Vec::new()
    };

    let history = state
        .events
        .iter()
        .filter(|event| event.is_witnessed_by(player))
        .map(|event| ObservedEvent {
            sequence: event.sequence,
            timestep: event.timestep,
            phase: event.phase.label(),
            text: event.describe(state),
        })
        .collect();

    let own_actions = me
        .action_history
        .iter()
        .map(|record| {
            format!(
                "Timestep {}: [{}] {}",
                record.timestep,
                record.phase.label(),
                record.action.describe(state)
            )
        })
        .collect();

    let tasks = me
        .tasks
        .iter()
        .map(|task| TaskView {
            name: task.name.clone(),
            room: task.room.clone(),
            steps_left: task.steps_left,
            path: map.path(&me.location, &task.room).unwrap_or_default(),
        })
        .collect();

    let legal = legal_actions(state, env, player);
    let legal_descriptions = legal.iter().map(|action| action.describe(state)).collect();

    Ok(Observation {
        player,
        name: me.name.clone(),
        role: me.role,
        alive: me.alive,
        timestep: state.turn.timestep,
        max_timesteps: state.config.max_timesteps,
        phase: state.phase,
        discussion_rounds: state.config.discussion_rounds,
        location: me.location.clone(),
        co_located,
        bodies,
        history,
        own_actions,
        tasks,
        legal_actions: legal,
        legal_descriptions,
    })
}
