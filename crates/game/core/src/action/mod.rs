//! Action domain.
//!
//! [`Action`] is the intent a policy hands back: plain data with no actor or
//! phase attached. The engine pairs it with the acting player and routes it to
//! one of the concrete transitions below, each implementing
//! [`ActionTransition`].
//!
//! # Module Structure
//!
//! - `available`: legal action enumeration per player and phase
//! - `error`: [`ActionError`] raised by transition hooks
//! - `kill`, `meeting`, `movement`, `task`: concrete transitions

mod available;
mod error;
mod kill;
mod meeting;
mod movement;
mod task;

pub use available::legal_actions;
pub use error::ActionError;
pub use kill::KillAction;
pub use meeting::{CallMeetingAction, SpeakAction, VoteAction};
pub use movement::{MoveAction, Passage};
pub use task::TaskAction;

use crate::env::{GameEnv, Room, TaskId};
use crate::state::{GameState, PlayerId};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks receive
/// read-only access to deterministic environment facts via `Env` and must stay
/// side-effect free.
pub trait ActionTransition {
    type Error;

    /// Returns the player performing this action.
    fn actor(&self) -> PlayerId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations should
    /// assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A player's intent for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    MoveTo { from: Room, to: Room },
    /// Impostor-only shortcut through the vent network.
    Vent { from: Room, to: Room },
    /// Free text; legality only depends on `location`.
    Speak { location: Room, message: String },
    Kill { target: PlayerId },
    /// Emergency button press, or a body report when `report` names the victim.
    CallMeeting {
        location: Room,
        report: Option<PlayerId>,
    },
    /// `None` abstains.
    Vote { target: Option<PlayerId> },
    CompleteTask { task: TaskId },
}

impl Action {
    /// Returns true if `proposed` is an instance of this legal template.
    ///
    /// Every variant must match exactly except `Speak`, whose message is free.
    pub fn admits(&self, proposed: &Action) -> bool {
        match (self, proposed) {
            (Action::Speak { location, .. }, Action::Speak { location: other, .. }) => {
                location == other
            }
            (template, proposed) => template == proposed,
        }
    }

    /// Returns the snake_case name of the action.
    ///
    /// Used for log fields and metrics keys.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::MoveTo { .. } => "move_to",
            Action::Vent { .. } => "vent",
            Action::Speak { .. } => "speak",
            Action::Kill { .. } => "kill",
            Action::CallMeeting { report: None, .. } => "call_meeting",
            Action::CallMeeting { report: Some(_), .. } => "report_body",
            Action::Vote { .. } => "vote",
            Action::CompleteTask { .. } => "complete_task",
        }
    }

    /// Prompt text for this action, e.g. `MOVE from Cafeteria to Admin`.
    ///
    /// A `Speak` template with an empty message renders as `SPEAK` alone.
    pub fn describe(&self, state: &GameState) -> String {
        match self {
            Action::MoveTo { from, to } => format!("MOVE from {from} to {to}"),
            Action::Vent { from, to } => format!("VENT from {from} to {to}"),
            Action::Speak { message, .. } if message.is_empty() => "SPEAK".to_string(),
            Action::Speak { message, .. } => format!("SPEAK: \"{message}\""),
            Action::Kill { target } => format!("KILL {}", state.name_of(*target)),
            Action::CallMeeting { report: None, .. } => {
                "CALL MEETING using the emergency button".to_string()
            }
            Action::CallMeeting {
                report: Some(victim),
                ..
            } => format!("REPORT DEAD BODY of {}", state.name_of(*victim)),
            Action::Vote {
                target: Some(target),
            } => format!("VOTE {}", state.name_of(*target)),
            Action::Vote { target: None } => "VOTE SKIP".to_string(),
            Action::CompleteTask { task } => format!("COMPLETE TASK - {}", state.task_name(*task)),
        }
    }

    /// Copy with the speech cut to `max_chars` characters.
    pub fn truncated(&self, max_chars: usize) -> Action {
        match self {
            Action::Speak { location, message } => Action::Speak {
                location: location.clone(),
                message: message.trim().chars().take(max_chars).collect(),
            },
            other => other.clone(),
        }
    }
}
