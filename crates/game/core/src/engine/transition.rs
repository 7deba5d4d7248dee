//! Action transition dispatch and execution logic.

use crate::action::{
    Action, ActionError, ActionTransition, CallMeetingAction, KillAction, MoveAction, Passage,
    SpeakAction, TaskAction, VoteAction,
};
use crate::env::GameEnv;
use crate::state::{GameState, PlayerId};

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(())
}

/// Pairs `action` with its actor and routes it to the matching transition.
pub(super) fn execute_transition(
    actor: PlayerId,
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), ExecuteError> {
    let result: Result<(), TransitionPhaseError<ActionError>> = match action {
        Action::MoveTo { from, to } => drive_transition(
            &MoveAction::new(actor, from.clone(), to.clone(), Passage::Corridor),
            state,
            env,
        ),
        Action::Vent { from, to } => drive_transition(
            &MoveAction::new(actor, from.clone(), to.clone(), Passage::Vent),
            state,
            env,
        ),
        Action::Speak { location, message } => drive_transition(
            &SpeakAction::new(actor, location.clone(), message.clone()),
            state,
            env,
        ),
        Action::Kill { target } => drive_transition(&KillAction::new(actor, *target), state, env),
        Action::CallMeeting { location, report } => drive_transition(
            &CallMeetingAction::new(actor, location.clone(), *report),
            state,
            env,
        ),
        Action::Vote { target } => drive_transition(&VoteAction::new(actor, *target), state, env),
        Action::CompleteTask { task } => {
            drive_transition(&TaskAction::new(actor, *task), state, env)
        }
    };
    result.map_err(ExecuteError::Transition)
}
