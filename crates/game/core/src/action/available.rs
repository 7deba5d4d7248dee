//! Legal action enumeration.
//!
//! The list is rebuilt from scratch on every call and ordered deterministically:
//! corridor moves, vents, tasks, kills and meeting calls in the task phase;
//! candidates in roster order followed by the abstain vote during voting.

use crate::config::BodyDiscovery;
use crate::env::GameEnv;
use crate::state::{GameState, Phase, Player, PlayerId};

use super::Action;

/// Get all actions `player` may take right now.
///
/// Returns an empty list for dead or unknown players, after the game ended,
/// and when the map oracle is missing.
pub fn legal_actions(state: &GameState, env: &GameEnv<'_>, player: PlayerId) -> Vec<Action> {
    let Some(actor) = state.player(player).filter(|actor| actor.alive) else {
        return Vec::new();
    };

    match state.phase {
        Phase::Task => task_phase_actions(actor, state, env),
        Phase::MeetingDiscussion { .. } => vec![Action::Speak {
            location: actor.location.clone(),
            message: String::new(),
        }],
        Phase::MeetingVoting => voting_actions(actor, state),
        Phase::GameOver { .. } => Vec::new(),
    }
}

fn task_phase_actions(actor: &Player, state: &GameState, env: &GameEnv<'_>) -> Vec<Action> {
    let Ok(map) = env.map() else {
        return Vec::new();
    };
    let here = &actor.location;
    let mut actions = Vec::new();

    for to in map.adjacent_rooms(here) {
        actions.push(Action::MoveTo {
            from: here.clone(),
            to,
        });
    }

    if actor.is_impostor() {
        for to in map.vent_connections(here) {
            actions.push(Action::Vent {
                from: here.clone(),
                to,
            });
        }
    }

    // Impostor tasks never progress, so they stay available as cover.
    for task in actor.tasks.iter().filter(|task| &task.room == here) {
        if actor.is_impostor() || !task.is_complete() {
            actions.push(Action::CompleteTask { task: task.id });
        }
    }

    if actor.is_impostor() && kill_ready(actor, state) {
        for target in state.occupants(here) {
            if state.player(target).is_some_and(|p| !p.is_impostor()) {
                actions.push(Action::Kill { target });
            }
        }
    }

    if map.has_emergency_button(here) && actor.emergency_calls_left > 0 {
        actions.push(Action::CallMeeting {
            location: here.clone(),
            report: None,
        });
    }

    if state.config.body_discovery == BodyDiscovery::Report {
        for body in state.bodies_in(here) {
            actions.push(Action::CallMeeting {
                location: here.clone(),
                report: Some(body.victim),
            });
        }
    }

    actions
}

fn voting_actions(actor: &Player, state: &GameState) -> Vec<Action> {
    if state.meeting.votes.contains_key(&actor.id) {
        return Vec::new();
    }

    let mut actions: Vec<Action> = state
        .living()
        .filter(|candidate| candidate.id != actor.id)
        .map(|candidate| Action::Vote {
            target: Some(candidate.id),
        })
        .collect();
    actions.push(Action::Vote { target: None });
    actions
}

/// Cooldown check shared with [`KillAction`](super::KillAction).
pub(super) fn kill_ready(actor: &Player, state: &GameState) -> bool {
    cooldown_remaining(actor, state) == 0
}

pub(super) fn cooldown_remaining(actor: &Player, state: &GameState) -> u32 {
    match actor.last_kill {
        None => 0,
        Some(last) => state
            .config
            .kill_cooldown
            .saturating_sub(state.turn.timestep.since(last)),
    }
}
