use std::collections::BTreeSet;

use crate::env::{Room, TaskId};

use super::{GameState, Phase, PlayerId, Role, Timestep, WinReason};

/// What happened, with just enough data to render it for a witness.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Moved { from: Room, to: Room },
    Vented { from: Room, to: Room },
    /// `fake` is ground truth only; witnesses see a regular task.
    TaskWorked { task: TaskId, fake: bool },
    Killed { victim: PlayerId },
    MeetingCalled { report: Option<PlayerId> },
    BodyFound { victim: PlayerId },
    Spoke { message: String },
    Voted { target: Option<PlayerId> },
    VoteResolved {
        tally: Vec<(PlayerId, u32)>,
        abstained: u32,
        ejected: Option<PlayerId>,
    },
    TurnForfeited { reason: String },
    GameEnded { winner: Role, reason: WinReason },
}

/// Entry of the global event log.
///
/// `witnesses` is fixed when the event is recorded: it is the set of players
/// that could perceive it at that moment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameEvent {
    pub sequence: u64,
    pub timestep: Timestep,
    pub phase: Phase,
    pub room: Option<Room>,
    pub actor: Option<PlayerId>,
    pub kind: EventKind,
    pub witnesses: BTreeSet<PlayerId>,
}

impl GameEvent {
    pub fn is_witnessed_by(&self, player: PlayerId) -> bool {
        self.witnesses.contains(&player)
    }

    /// Text as perceived by a witness, e.g. `Player 2: blue MOVE from Admin to O2`.
    pub fn describe(&self, state: &GameState) -> String {
        let actor = self
            .actor
            .map(|id| state.name_of(id).to_string())
            .unwrap_or_default();

        match &self.kind {
            EventKind::Moved { from, to } => format!("{actor} MOVE from {from} to {to}"),
            EventKind::Vented { from, to } => format!("{actor} VENT from {from} to {to}"),
            EventKind::TaskWorked { task, .. } => {
                format!("{actor} COMPLETE TASK - {}", state.task_name(*task))
            }
            EventKind::Killed { victim } => format!("{actor} KILL {}", state.name_of(*victim)),
            EventKind::MeetingCalled { report: None } => {
                format!("{actor} CALL MEETING using the emergency button")
            }
            EventKind::MeetingCalled {
                report: Some(victim),
            } => format!("{actor} REPORT DEAD BODY of {}", state.name_of(*victim)),
            EventKind::BodyFound { victim } => {
                format!("{actor} found the body of {}", state.name_of(*victim))
            }
            EventKind::Spoke { message } => format!("{actor} SPEAK: \"{message}\""),
            EventKind::Voted { target: Some(target) } => {
                format!("{actor} VOTE {}", state.name_of(*target))
            }
            EventKind::Voted { target: None } => format!("{actor} VOTE SKIP"),
            EventKind::VoteResolved {
                tally,
                abstained,
                ejected,
            } => {
                let mut votes: Vec<String> = tally
                    .iter()
                    .map(|(id, count)| format!("{}: {count}", state.name_of(*id)))
                    .collect();
                votes.push(format!("skip: {abstained}"));
                let outcome = match ejected {
                    Some(id) => format!("{} was ejected", state.name_of(*id)),
                    None => "no one was ejected".to_string(),
                };
                format!("Voting results ({}) - {outcome}", votes.join(", "))
            }
            EventKind::TurnForfeited { reason } => format!("{actor} forfeited the turn ({reason})"),
            EventKind::GameEnded { winner, reason } => {
                format!("Game over: {winner}s win ({reason})")
            }
        }
    }
}
