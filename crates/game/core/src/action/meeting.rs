//! Meeting-related transitions: calling, speaking and voting.

use std::collections::BTreeSet;

use crate::action::{ActionError, ActionTransition};
use crate::env::{GameEnv, Room};
use crate::phase;
use crate::state::{EventKind, GameState, Phase, PlayerId};

/// Emergency button press or body report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallMeetingAction {
    pub actor: PlayerId,
    pub location: Room,
    pub report: Option<PlayerId>,
}

impl CallMeetingAction {
    pub fn new(actor: PlayerId, location: Room, report: Option<PlayerId>) -> Self {
        Self {
            actor,
            location,
            report,
        }
    }
}

impl ActionTransition for CallMeetingAction {
    type Error = ActionError;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.phase != Phase::Task {
            return Err(ActionError::WrongPhase(state.phase.label()));
        }
        let player = state
            .player(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?;
        if player.location != self.location {
            return Err(ActionError::WrongRoom {
                player: self.actor,
                expected: self.location.clone(),
                actual: player.location.clone(),
            });
        }

        match self.report {
            Some(victim) => {
                if !state.bodies_in(&self.location).any(|body| body.victim == victim) {
                    return Err(ActionError::NoBody(victim));
                }
            }
            None => {
                if !env.map()?.has_emergency_button(&self.location) {
                    return Err(ActionError::NoEmergencyButton(self.location.clone()));
                }
                if player.emergency_calls_left == 0 {
                    return Err(ActionError::NoEmergencyCalls);
                }
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if self.report.is_none() {
            let player = state
                .player_mut(self.actor)
                .ok_or(ActionError::PlayerNotFound(self.actor))?;
            player.emergency_calls_left -= 1;
        }

        state.record(
            Some(self.actor),
            Some(self.location.clone()),
            EventKind::MeetingCalled {
                report: self.report,
            },
            state.living_ids(),
        );
        phase::begin_meeting(state, env, Some(self.actor), self.report)?;
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !state.phase.is_meeting() && !state.is_over() {
            return Err(ActionError::PostCondition("meeting did not start"));
        }
        Ok(())
    }
}

/// One utterance during a discussion round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeakAction {
    pub actor: PlayerId,
    pub location: Room,
    pub message: String,
}

impl SpeakAction {
    pub fn new(actor: PlayerId, location: Room, message: String) -> Self {
        Self {
            actor,
            location,
            message,
        }
    }
}

impl ActionTransition for SpeakAction {
    type Error = ActionError;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !matches!(state.phase, Phase::MeetingDiscussion { .. }) {
            return Err(ActionError::WrongPhase(state.phase.label()));
        }
        let player = state
            .player(self.actor)
            .ok_or(ActionError::PlayerNotFound(self.actor))?;
        if player.location != self.location {
            return Err(ActionError::WrongRoom {
                player: self.actor,
                expected: self.location.clone(),
                actual: player.location.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.record(
            Some(self.actor),
            Some(self.location.clone()),
            EventKind::Spoke {
                message: self.message.clone(),
            },
            state.living_ids(),
        );
        Ok(())
    }
}

/// Secret ballot cast during the voting phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoteAction {
    pub actor: PlayerId,
    pub target: Option<PlayerId>,
}

impl VoteAction {
    pub fn new(actor: PlayerId, target: Option<PlayerId>) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for VoteAction {
    type Error = ActionError;

    fn actor(&self) -> PlayerId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.phase != Phase::MeetingVoting {
            return Err(ActionError::WrongPhase(state.phase.label()));
        }
        if state.meeting.votes.contains_key(&self.actor) {
            return Err(ActionError::AlreadyVoted(self.actor));
        }
        if let Some(target) = self.target
            && (target == self.actor || !state.is_alive(target))
        {
            return Err(ActionError::InvalidTarget(target));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.meeting.votes.insert(self.actor, self.target);
        // Ballots stay secret until the result is announced.
        state.record(
            Some(self.actor),
            None,
            EventKind::Voted {
                target: self.target,
            },
            BTreeSet::from([self.actor]),
        );
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.meeting.votes.get(&self.actor) != Some(&self.target) {
            return Err(ActionError::PostCondition("ballot not recorded"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env, game_with_impostors, id, place};

    #[test]
    fn emergency_call_spends_a_charge_and_gathers_everyone() {
        let mut state = game_with_impostors(5, &[0]);
        place(&mut state, 3, "Storage");

        let call = CallMeetingAction::new(id(1), "Cafeteria".into(), None);
        call.pre_validate(&state, &env()).unwrap();
        call.apply(&mut state, &env()).unwrap();
        call.post_validate(&state, &env()).unwrap();

        assert_eq!(state.players[1].emergency_calls_left, 0);
        assert_eq!(state.phase, Phase::MeetingDiscussion { round: 0 });
        assert_eq!(state.players[3].location, Room::from("Cafeteria"));
        assert!(matches!(
            call.pre_validate(&state, &env()),
            Err(ActionError::WrongPhase(_))
        ));
    }

    #[test]
    fn report_needs_a_body_in_the_room() {
        let mut state = game_with_impostors(5, &[0]);
        place(&mut state, 1, "Admin");
        let report = CallMeetingAction::new(id(1), "Admin".into(), Some(id(2)));
        assert_eq!(
            report.pre_validate(&state, &env()),
            Err(ActionError::NoBody(id(2)))
        );
    }

    #[test]
    fn ballots_are_seen_only_by_the_voter() {
        let mut state = game_with_impostors(5, &[0]);
        state.phase = Phase::MeetingVoting;

        let vote = VoteAction::new(id(2), Some(id(0)));
        vote.pre_validate(&state, &env()).unwrap();
        vote.apply(&mut state, &env()).unwrap();

        let event = state.events.last().unwrap();
        assert_eq!(event.witnesses, BTreeSet::from([id(2)]));
        assert_eq!(
            vote.pre_validate(&state, &env()),
            Err(ActionError::AlreadyVoted(id(2)))
        );
    }

    #[test]
    fn cannot_vote_for_self_or_dead() {
        let mut state = game_with_impostors(5, &[0]);
        state.phase = Phase::MeetingVoting;
        state.players[4].alive = false;
        assert_eq!(
            VoteAction::new(id(1), Some(id(1))).pre_validate(&state, &env()),
            Err(ActionError::InvalidTarget(id(1)))
        );
        assert_eq!(
            VoteAction::new(id(1), Some(id(4))).pre_validate(&state, &env()),
            Err(ActionError::InvalidTarget(id(4)))
        );
    }
}
