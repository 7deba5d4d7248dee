//! Turn scheduling and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! checks whose turn it is, matches the proposed action against the legal set,
//! drives the transition phases, and hands control to the phase controller.
//! Forfeited turns (illegal proposals, timeouts, policy failures) go through
//! the same bookkeeping so the turn order never stalls.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use std::collections::BTreeSet;

use crate::action::{Action, legal_actions};
use crate::env::GameEnv;
use crate::phase;
use crate::state::{ActionRecord, EventKind, GameEvent, GameState, Phase, PlayerId};

/// Complete outcome of one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action as applied (speech already truncated); `None` for a forfeit.
    pub applied: Option<Action>,

    /// Every event recorded during the turn, including phase transitions.
    pub events: Vec<GameEvent>,

    /// Phase after the turn.
    pub phase: Phase,
}

/// Game engine that manages action execution and turn scheduling.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Applies `action` for `actor` and advances the turn.
    ///
    /// Enforces mandatory actor validation before execution: the game must be
    /// running, the actor alive and holding the turn, and the action must match
    /// one of the actor's legal templates.
    ///
    /// # Errors
    ///
    /// [`ExecuteError::Illegal`] leaves the state untouched; callers usually
    /// follow up with [`GameEngine::forfeit`].
    pub fn execute(
        &mut self,
        env: &GameEnv<'_>,
        actor: PlayerId,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(actor)?;

        let legal = legal_actions(self.state, env, actor);
        if !legal.iter().any(|template| template.admits(action)) {
            return Err(ExecuteError::Illegal {
                actor,
                action: action.describe(self.state),
            });
        }

        let action = action.truncated(self.state.config.max_message_chars);
        let first_event = self.state.events.len();
        let record = ActionRecord {
            timestep: self.state.turn.timestep,
            phase: self.state.phase,
            action: action.clone(),
        };

        transition::execute_transition(actor, &action, self.state, env)?;

        if let Some(player) = self.state.player_mut(actor) {
            player.action_history.push(record);
        }
        self.state.turn.nonce += 1;

        phase::evaluate_win(self.state);
        // A meeting call already handed the turn to the first speaker.
        if !matches!(action, Action::CallMeeting { .. }) {
            phase::advance(self.state, env)?;
        }

        Ok(self.outcome(Some(action), first_event))
    }

    /// Consumes the current turn without applying an action.
    ///
    /// A forfeited ballot counts as an abstention. Only the forfeiting player
    /// witnesses the forfeit.
    ///
    /// # Errors
    ///
    /// Fails when `actor` does not hold the turn.
    pub fn forfeit(
        &mut self,
        env: &GameEnv<'_>,
        actor: PlayerId,
        reason: impl Into<String>,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(actor)?;

        let first_event = self.state.events.len();
        let room = self.state.player(actor).map(|player| player.location.clone());
        self.state.record(
            Some(actor),
            room,
            EventKind::TurnForfeited {
                reason: reason.into(),
            },
            BTreeSet::from([actor]),
        );
        if self.state.phase == Phase::MeetingVoting {
            self.state.meeting.votes.entry(actor).or_insert(None);
        }
        self.state.turn.nonce += 1;

        phase::advance(self.state, env)?;
        Ok(self.outcome(None, first_event))
    }

    /// Validates the actor against the turn state.
    fn validate_actor(&self, actor: PlayerId) -> Result<(), ExecuteError> {
        if self.state.is_over() {
            return Err(ExecuteError::GameOver);
        }
        if !self.state.is_alive(actor) {
            return Err(ExecuteError::ActorDead(actor));
        }
        let current = phase::current_actor(self.state);
        if current != Some(actor) {
            return Err(ExecuteError::NotCurrentActor { actor, current });
        }
        Ok(())
    }

    fn outcome(&self, applied: Option<Action>, first_event: usize) -> ExecutionOutcome {
        ExecutionOutcome {
            applied,
            events: self.state.events[first_event..].to_vec(),
            phase: self.state.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Room;
    use crate::error::GameError;
    use crate::state::{Role, WinReason};
    use crate::test_support::{env, game_with_impostors, id, place};

    #[test]
    fn only_the_current_actor_may_act() {
        let mut state = game_with_impostors(5, &[0]);
        let mut engine = GameEngine::new(&mut state);
        let action = Action::MoveTo {
            from: Room::from("Cafeteria"),
            to: Room::from("Admin"),
        };
        assert_eq!(
            engine.execute(&env(), id(2), &action),
            Err(ExecuteError::NotCurrentActor {
                actor: id(2),
                current: Some(id(0))
            })
        );
    }

    #[test]
    fn dead_players_are_rejected_before_the_action_is_checked() {
        let mut state = game_with_impostors(5, &[0]);
        state.players[3].alive = false;
        let mut engine = GameEngine::new(&mut state);
        let error = engine
            .execute(&env(), id(3), &Action::Vote { target: None })
            .unwrap_err();
        assert_eq!(error, ExecuteError::ActorDead(id(3)));
        assert_eq!(error.error_code(), "EXECUTE_ACTOR_DEAD");
    }

    #[test]
    fn illegal_action_leaves_state_untouched() {
        let mut state = game_with_impostors(5, &[0]);
        let before = state.clone();
        let result = GameEngine::new(&mut state).execute(
            &env(),
            id(0),
            &Action::MoveTo {
                from: Room::from("Cafeteria"),
                to: Room::from("Electrical"),
            },
        );
        assert!(matches!(result, Err(ExecuteError::Illegal { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn applied_move_advances_turn_and_history() {
        let mut state = game_with_impostors(5, &[0]);
        let action = Action::MoveTo {
            from: Room::from("Cafeteria"),
            to: Room::from("Admin"),
        };
        let outcome = GameEngine::new(&mut state)
            .execute(&env(), id(0), &action)
            .unwrap();

        assert_eq!(outcome.applied, Some(action.clone()));
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(state.players[0].action_history[0].action, action);
        assert_eq!(phase::current_actor(&state), Some(id(1)));
        assert_eq!(state.turn.nonce, 1);
    }

    #[test]
    fn kill_in_shared_room_reaches_parity() {
        // 4 players, 1 impostor: one kill leaves 1 vs 2, a second one ends it.
        let mut state = game_with_impostors(4, &[0]);
        state.config.kill_cooldown = 0;
        for player in 0..4 {
            place(&mut state, player, "Admin");
        }
        GameEngine::new(&mut state)
            .execute(&env(), id(0), &Action::Kill { target: id(1) })
            .unwrap();
        assert!(!state.is_over());

        state.turn.cursor = 0;
        GameEngine::new(&mut state)
            .execute(&env(), id(0), &Action::Kill { target: id(2) })
            .unwrap();
        assert_eq!(
            state.phase,
            Phase::GameOver {
                winner: Role::Impostor,
                reason: WinReason::ImpostorParity
            }
        );
    }

    #[test]
    fn forfeited_ballot_counts_as_abstention() {
        let mut state = game_with_impostors(5, &[0]);
        state.phase = Phase::MeetingVoting;
        GameEngine::new(&mut state)
            .forfeit(&env(), id(0), "timeout")
            .unwrap();

        assert_eq!(state.meeting.votes.get(&id(0)), Some(&None));
        let event = state.events.last().unwrap();
        assert_eq!(event.witnesses, BTreeSet::from([id(0)]));
        assert_eq!(phase::current_actor(&state), Some(id(1)));
    }

    #[test]
    fn speech_is_truncated_before_logging() {
        let mut state = game_with_impostors(5, &[0]);
        state.phase = Phase::MeetingDiscussion { round: 0 };
        state.config.max_message_chars = 5;
        let outcome = GameEngine::new(&mut state)
            .execute(
                &env(),
                id(0),
                &Action::Speak {
                    location: Room::from("Cafeteria"),
                    message: "where were you all?".to_string(),
                },
            )
            .unwrap();
        assert_eq!(
            outcome.events[0].kind,
            EventKind::Spoke {
                message: "where".to_string()
            }
        );
    }

    #[test]
    fn no_actions_after_game_over() {
        let mut state = game_with_impostors(2, &[0]);
        assert!(state.is_over());
        assert_eq!(
            GameEngine::new(&mut state).forfeit(&env(), id(0), "late"),
            Err(ExecuteError::GameOver)
        );
    }
}
