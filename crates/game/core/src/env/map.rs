use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

/// Named room of the ship. Rooms are the only unit of location in the game.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Room(String);

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Room {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identifier of a task in the map's catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TaskId(pub u16);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TaskKind {
    Common,
    Short,
    Long,
}

/// Catalogue entry for a task that can be handed to players.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskDefinition {
    pub id: TaskId,
    pub name: String,
    pub kind: TaskKind,
    pub room: Room,
    /// `CompleteTask` actions needed before the task counts as done.
    pub steps: u32,
}

/// Static map oracle exposing the immutable ship layout.
///
/// Implementations must return rooms in a stable order; the engine relies on it
/// for deterministic legal-action enumeration and path finding.
pub trait MapOracle: Send + Sync {
    fn rooms(&self) -> Vec<Room>;

    /// Rooms reachable from `room` through a corridor.
    fn adjacent_rooms(&self, room: &Room) -> Vec<Room>;

    /// Rooms reachable from `room` through a vent (impostors only).
    fn vent_connections(&self, _room: &Room) -> Vec<Room> {
        Vec::new()
    }

    fn tasks(&self) -> Vec<TaskDefinition>;

    /// Room where every player starts.
    fn spawn_room(&self) -> Room;

    /// Room everyone is gathered into when a meeting starts.
    fn meeting_room(&self) -> Room {
        self.spawn_room()
    }

    /// Room holding the emergency button.
    fn emergency_room(&self) -> Room;

    fn has_emergency_button(&self, room: &Room) -> bool {
        &self.emergency_room() == room
    }

    fn contains(&self, room: &Room) -> bool {
        self.rooms().iter().any(|candidate| candidate == room)
    }

    fn task_rooms(&self) -> BTreeMap<TaskId, Room> {
        self.tasks()
            .into_iter()
            .map(|task| (task.id, task.room))
            .collect()
    }

    fn task(&self, id: TaskId) -> Option<TaskDefinition> {
        self.tasks().into_iter().find(|task| task.id == id)
    }

    /// Shortest corridor path from `from` to `to`, both ends included.
    ///
    /// Breadth-first search visiting neighbours in oracle order, so the same
    /// map always yields the same path.
    fn path(&self, from: &Room, to: &Room) -> Option<Vec<Room>> {
        if from == to {
            return Some(vec![from.clone()]);
        }

        let mut parents: BTreeMap<Room, Room> = BTreeMap::new();
        let mut seen: HashSet<Room> = HashSet::from([from.clone()]);
        let mut queue = VecDeque::from([from.clone()]);

        while let Some(room) = queue.pop_front() {
            for next in self.adjacent_rooms(&room) {
                if !seen.insert(next.clone()) {
                    continue;
                }
                parents.insert(next.clone(), room.clone());
                if &next == to {
                    let mut path = vec![next];
                    while let Some(parent) = parents.get(path.last()?) {
                        path.push(parent.clone());
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        None
    }
}
