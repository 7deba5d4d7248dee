//! Phase controller.
//!
//! ```text
//! Task --meeting called / body found--> MeetingDiscussion{0}
//! MeetingDiscussion{r} --everyone spoke--> MeetingDiscussion{r+1} | MeetingVoting
//! MeetingVoting --votes resolved--> Task
//! any --win condition--> GameOver
//! ```
//!
//! Turns run in roster order over living players. The clock advances when a
//! task round completes or is cut short by a meeting, and when a meeting ends.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::BodyDiscovery;
use crate::env::{GameEnv, OracleError};
use crate::state::{
    EventKind, GameState, MeetingState, Phase, PlayerId, Role, WinReason,
};

/// Player whose action is requested next, or `None` once the game is over.
pub fn current_actor(state: &GameState) -> Option<PlayerId> {
    if state.is_over() {
        return None;
    }
    state
        .players
        .iter()
        .skip(state.turn.cursor)
        .find(|player| player.alive)
        .map(|player| player.id)
}

/// Moves the turn to the next living player, closing the round when the
/// roster is exhausted.
///
/// # Errors
///
/// Only fails when a finished voting round needs the map and it is missing.
pub fn advance(state: &mut GameState, env: &GameEnv<'_>) -> Result<(), OracleError> {
    if state.is_over() {
        return Ok(());
    }
    if state.phase == Phase::Task && discover_bodies(state, env)? {
        return Ok(());
    }

    let next = state
        .players
        .iter()
        .skip(state.turn.cursor + 1)
        .find(|player| player.alive)
        .map(|player| player.id.index());
    if let Some(next) = next {
        state.turn.cursor = next;
        return Ok(());
    }

    match state.phase {
        Phase::Task => {
            state.turn.timestep = state.turn.timestep.next();
        }
        Phase::MeetingDiscussion { round } => {
            state.phase = if round + 1 < state.config.discussion_rounds {
                Phase::MeetingDiscussion { round: round + 1 }
            } else {
                Phase::MeetingVoting
            };
        }
        Phase::MeetingVoting => {
            resolve_votes(state);
            state.turn.timestep = state.turn.timestep.next();
            state.phase = Phase::Task;
            state.meeting = MeetingState::default();
        }
        Phase::GameOver { .. } => return Ok(()),
    }
    rewind_cursor(state);
    evaluate_win(state);
    Ok(())
}

/// Starts a meeting: gathers every living player in the meeting room, clears
/// the bodies and hands the first turn to the first living player.
///
/// The interrupted task round counts as a full timestep.
///
/// # Errors
///
/// Returns [`OracleError::MapNotAvailable`] without a map.
pub fn begin_meeting(
    state: &mut GameState,
    env: &GameEnv<'_>,
    caller: Option<PlayerId>,
    reported_body: Option<PlayerId>,
) -> Result<(), OracleError> {
    let meeting_room = env.map()?.meeting_room();

    state.turn.timestep = state.turn.timestep.next();
    for player in state.players.iter_mut().filter(|player| player.alive) {
        player.location = meeting_room.clone();
    }
    state.bodies.clear();
    state.meeting = MeetingState {
        caller,
        reported_body,
        votes: BTreeMap::new(),
    };
    state.phase = Phase::MeetingDiscussion { round: 0 };
    rewind_cursor(state);

    // The time limit may fire before anyone speaks.
    evaluate_win(state);
    Ok(())
}

/// Automatic discovery: the first living non-killer sharing a room with a
/// body triggers a meeting. No-op under [`BodyDiscovery::Report`].
///
/// Returns whether a meeting started.
///
/// # Errors
///
/// Propagates [`begin_meeting`] failures.
pub fn discover_bodies(state: &mut GameState, env: &GameEnv<'_>) -> Result<bool, OracleError> {
    if state.config.body_discovery != BodyDiscovery::Automatic || state.phase != Phase::Task {
        return Ok(false);
    }

    let found = state.bodies.iter().find_map(|body| {
        state
            .occupants(&body.room)
            .into_iter()
            .find(|id| *id != body.killer)
            .map(|finder| (finder, body.victim, body.room.clone()))
    });
    let Some((finder, victim, room)) = found else {
        return Ok(false);
    };

    state.record(
        Some(finder),
        Some(room),
        EventKind::BodyFound { victim },
        state.living_ids(),
    );
    begin_meeting(state, env, Some(finder), Some(victim))?;
    Ok(true)
}

/// Tallies the ballots, announces the result to every living player and
/// ejects the strict plurality winner, if any.
///
/// A candidate is ejected only with strictly more votes than every other
/// candidate and than the abstentions. Living players without a ballot count
/// as abstaining.
pub fn resolve_votes(state: &mut GameState) -> Option<PlayerId> {
    let mut tally: BTreeMap<PlayerId, u32> = BTreeMap::new();
    let mut abstained = 0u32;
    for voter in state.living_ids() {
        match state.meeting.votes.get(&voter).copied().flatten() {
            Some(target) => *tally.entry(target).or_default() += 1,
            None => abstained += 1,
        }
    }

    let top = tally.values().copied().max().unwrap_or(0);
    let mut leaders = tally.iter().filter(|(_, count)| **count == top);
    let ejected = match (leaders.next(), leaders.next()) {
        (Some((id, count)), None) if *count > abstained => Some(*id),
        _ => None,
    };

    let witnesses: BTreeSet<PlayerId> = state.living_ids();
    state.record(
        None,
        None,
        EventKind::VoteResolved {
            tally: tally.into_iter().collect(),
            abstained,
            ejected,
        },
        witnesses,
    );

    if let Some(id) = ejected
        && let Some(player) = state.player_mut(id)
    {
        player.alive = false;
    }
    ejected
}

/// Checks every win condition in priority order and ends the game on the
/// first that holds.
///
/// Returns the winner when the game is (or already was) over.
pub fn evaluate_win(state: &mut GameState) -> Option<Role> {
    if let Phase::GameOver { winner, .. } = state.phase {
        return Some(winner);
    }

    let impostors = state.living_count(Role::Impostor);
    let crewmates = state.living_count(Role::Crewmate);

    let (winner, reason) = if impostors == 0 {
        (Role::Crewmate, WinReason::ImpostorsEliminated)
    } else if impostors >= crewmates {
        (Role::Impostor, WinReason::ImpostorParity)
    } else if state.crewmate_tasks_complete() {
        (Role::Crewmate, WinReason::TasksCompleted)
    } else if state.turn.timestep.0 >= state.config.max_timesteps {
        (Role::Impostor, WinReason::TimeLimit)
    } else {
        return None;
    };

    state.phase = Phase::GameOver { winner, reason };
    let everyone = state.players.iter().map(|player| player.id).collect();
    state.record(None, None, EventKind::GameEnded { winner, reason }, everyone);
    Some(winner)
}

fn rewind_cursor(state: &mut GameState) {
    state.turn.cursor = state
        .players
        .iter()
        .position(|player| player.alive)
        .unwrap_or(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Room;
    use crate::state::{Body, Timestep};
    use crate::test_support::{env, game_with_impostors, id, place};

    #[test]
    fn cursor_skips_dead_players() {
        let mut state = game_with_impostors(5, &[0]);
        state.players[1].alive = false;
        assert_eq!(current_actor(&state), Some(id(0)));

        advance(&mut state, &env()).unwrap();
        assert_eq!(current_actor(&state), Some(id(2)));
    }

    #[test]
    fn completed_task_round_advances_the_clock() {
        let mut state = game_with_impostors(5, &[0]);
        for _ in 0..5 {
            advance(&mut state, &env()).unwrap();
        }
        assert_eq!(state.turn.timestep, Timestep(1));
        assert_eq!(current_actor(&state), Some(id(0)));
    }

    #[test]
    fn discussion_rounds_lead_to_voting() {
        let mut state = game_with_impostors(5, &[0]);
        begin_meeting(&mut state, &env(), Some(id(1)), None).unwrap();
        let rounds = state.config.discussion_rounds as usize;
        for _ in 0..rounds * 5 {
            assert!(matches!(state.phase, Phase::MeetingDiscussion { .. }));
            advance(&mut state, &env()).unwrap();
        }
        assert_eq!(state.phase, Phase::MeetingVoting);
    }

    #[test]
    fn tie_vote_ejects_nobody() {
        let mut state = game_with_impostors(5, &[0]);
        state.phase = Phase::MeetingVoting;
        state.meeting.votes = BTreeMap::from([
            (id(0), Some(id(1))),
            (id(1), Some(id(0))),
            (id(2), Some(id(1))),
            (id(3), Some(id(0))),
            (id(4), None),
        ]);

        assert_eq!(resolve_votes(&mut state), None);
        assert_eq!(state.living_ids().len(), 5);
        let event = state.events.last().unwrap();
        assert_eq!(event.witnesses, state.living_ids());
    }

    #[test]
    fn plurality_must_beat_abstentions() {
        let mut state = game_with_impostors(5, &[0]);
        state.meeting.votes = BTreeMap::from([(id(1), Some(id(0))), (id(2), Some(id(0)))]);
        // Three silent voters abstain.
        assert_eq!(resolve_votes(&mut state), None);

        let mut state = game_with_impostors(5, &[0]);
        state.meeting.votes = BTreeMap::from([
            (id(1), Some(id(0))),
            (id(2), Some(id(0))),
            (id(3), Some(id(0))),
        ]);
        assert_eq!(resolve_votes(&mut state), Some(id(0)));
        assert!(!state.players[0].alive);
    }

    #[test]
    fn ejecting_the_last_impostor_wins_for_crew() {
        let mut state = game_with_impostors(5, &[0]);
        state.phase = Phase::MeetingVoting;
        state.turn.cursor = 4;
        state.meeting.votes = BTreeMap::from([
            (id(1), Some(id(0))),
            (id(2), Some(id(0))),
            (id(3), Some(id(0))),
            (id(4), Some(id(0))),
        ]);
        advance(&mut state, &env()).unwrap();
        assert_eq!(
            state.phase,
            Phase::GameOver {
                winner: Role::Crewmate,
                reason: WinReason::ImpostorsEliminated
            }
        );
    }

    #[test]
    fn parity_wins_for_impostors() {
        let mut state = game_with_impostors(5, &[0]);
        for victim in [1, 2, 3] {
            state.players[victim].alive = false;
        }
        assert_eq!(evaluate_win(&mut state), Some(Role::Impostor));
        assert!(matches!(
            state.phase,
            Phase::GameOver {
                reason: WinReason::ImpostorParity,
                ..
            }
        ));
    }

    #[test]
    fn finished_crew_tasks_win() {
        let mut state = game_with_impostors(5, &[0]);
        for player in state.players.iter_mut().filter(|p| !p.is_impostor()) {
            for task in &mut player.tasks {
                task.steps_left = 0;
            }
        }
        assert_eq!(evaluate_win(&mut state), Some(Role::Crewmate));
    }

    #[test]
    fn clock_running_out_wins_for_impostors() {
        let mut state = game_with_impostors(5, &[0]);
        state.turn.timestep = Timestep(state.config.max_timesteps);
        assert_eq!(evaluate_win(&mut state), Some(Role::Impostor));
    }

    #[test]
    fn automatic_discovery_starts_meeting() {
        let mut state = game_with_impostors(5, &[0]);
        state.config.body_discovery = BodyDiscovery::Automatic;
        place(&mut state, 2, "Admin");
        state.players[3].alive = false;
        state.bodies.push(Body {
            victim: id(3),
            killer: id(0),
            room: Room::from("Admin"),
            killed_at: Timestep::ZERO,
        });

        assert!(discover_bodies(&mut state, &env()).unwrap());
        assert_eq!(state.meeting.caller, Some(id(2)));
        assert_eq!(state.meeting.reported_body, Some(id(3)));
        assert!(state.bodies.is_empty());
    }
}
