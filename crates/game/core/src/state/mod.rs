//! Authoritative game state representation.
//!
//! This module owns the roster, the phase/turn bookkeeping, the global event
//! log and the per-meeting ballot box. Runtime layers clone or query this state
//! but mutate it exclusively through [`GameEngine`](crate::GameEngine).
mod event;
mod player;
mod setup;
mod turn;

use std::collections::{BTreeMap, BTreeSet};

pub use event::{EventKind, GameEvent};
pub use player::{ActionRecord, Player, PlayerId, Role, Task};
pub use turn::{Phase, Timestep, TurnState, WinReason};

use crate::config::GameConfig;
use crate::env::{Room, TaskDefinition, TaskId};
use crate::roles::ImpostorRoster;

/// A killed player that nobody has reported yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub victim: PlayerId,
    pub killer: PlayerId,
    pub room: Room,
    pub killed_at: Timestep,
}

/// Ballot box and context of the running meeting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeetingState {
    pub caller: Option<PlayerId>,
    pub reported_body: Option<PlayerId>,
    /// `None` target is an abstention.
    pub votes: BTreeMap<PlayerId, Option<PlayerId>>,
}

/// Canonical snapshot of one game.
///
/// One instance per game; nothing in it is shared with other games.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameState {
    pub config: GameConfig,
    /// Roster in turn order.
    pub players: Vec<Player>,
    pub phase: Phase,
    pub turn: TurnState,
    /// Built from the completed role assignment, before any agent exists.
    pub impostors: ImpostorRoster,
    pub events: Vec<GameEvent>,
    pub bodies: Vec<Body>,
    pub meeting: MeetingState,
    /// Catalogue entries of every task handed out in this game.
    pub tasks: BTreeMap<TaskId, TaskDefinition>,
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    /// Name of a player, or an empty string for an unknown id.
    pub fn name_of(&self, id: PlayerId) -> &str {
        self.player(id).map(|player| player.name.as_str()).unwrap_or("")
    }

    pub fn task_name(&self, id: TaskId) -> &str {
        self.tasks
            .get(&id)
            .map(|task| task.name.as_str())
            .unwrap_or("unknown task")
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|player| player.alive)
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| player.alive)
    }

    pub fn living_ids(&self) -> BTreeSet<PlayerId> {
        self.living().map(|player| player.id).collect()
    }

    /// Living players currently in `room`, in roster order.
    pub fn occupants(&self, room: &Room) -> Vec<PlayerId> {
        self.living()
            .filter(|player| &player.location == room)
            .map(|player| player.id)
            .collect()
    }

    pub fn living_count(&self, role: Role) -> usize {
        self.living().filter(|player| player.role == role).count()
    }

    pub fn bodies_in(&self, room: &Room) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |body| &body.room == room)
    }

    /// True when every crewmate task in the roster is done.
    ///
    /// A roster without crewmate tasks never wins this way.
    pub fn crewmate_tasks_complete(&self) -> bool {
        let mut tasks = self
            .players
            .iter()
            .filter(|player| !player.is_impostor())
            .flat_map(|player| player.tasks.iter())
            .peekable();
        tasks.peek().is_some() && tasks.all(Task::is_complete)
    }

    /// (completed, total) over crewmate tasks.
    pub fn task_progress(&self) -> (usize, usize) {
        let tasks = self
            .players
            .iter()
            .filter(|player| !player.is_impostor())
            .flat_map(|player| player.tasks.iter());
        tasks.fold((0, 0), |(done, total), task| {
            (done + usize::from(task.is_complete()), total + 1)
        })
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Appends an event stamped with the current clock and phase.
    pub(crate) fn record(
        &mut self,
        actor: Option<PlayerId>,
        room: Option<Room>,
        kind: EventKind,
        witnesses: BTreeSet<PlayerId>,
    ) {
        self.events.push(GameEvent {
            sequence: self.events.len() as u64,
            timestep: self.turn.timestep,
            phase: self.phase,
            room,
            actor,
            kind,
            witnesses,
        });
    }
}
