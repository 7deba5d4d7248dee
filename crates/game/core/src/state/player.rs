use std::fmt;

use crate::action::Action;
use crate::env::{Room, TaskDefinition, TaskId, TaskKind};

use super::{Phase, Timestep};

/// Index of a player in the roster. Roster order is turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hidden identity of a player, fixed once roles are assigned.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Crewmate,
    Impostor,
}

impl Role {
    pub fn is_impostor(self) -> bool {
        matches!(self, Role::Impostor)
    }
}

/// A task handed to a player, with its remaining work.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub kind: TaskKind,
    pub room: Room,
    pub steps_left: u32,
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.steps_left == 0
    }
}

impl From<&TaskDefinition> for Task {
    fn from(definition: &TaskDefinition) -> Self {
        Self {
            id: definition.id,
            name: definition.name.clone(),
            kind: definition.kind,
            room: definition.room.clone(),
            steps_left: definition.steps.max(1),
        }
    }
}

/// One entry of a player's own action history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub timestep: Timestep,
    pub phase: Phase,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    /// Unique within a game, e.g. `Player 3: green`.
    pub name: String,
    pub role: Role,
    pub alive: bool,
    pub location: Room,
    pub tasks: Vec<Task>,
    /// Opaque tag forwarded to decision policies.
    pub personality: Option<String>,
    pub emergency_calls_left: u32,
    pub last_kill: Option<Timestep>,
    pub action_history: Vec<ActionRecord>,
}

impl Player {
    pub fn is_impostor(&self) -> bool {
        self.role.is_impostor()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}
