//! Static ship layouts served through [`game_core::MapOracle`].

use std::collections::{BTreeMap, BTreeSet};

use game_core::{MapOracle, Room, TaskDefinition, TaskId};

/// Raw layout description, as stored in map RON files.
///
/// Corridors and vents are undirected pairs; neighbour order follows the
/// order in which pairs are listed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapData {
    pub name: String,
    pub rooms: Vec<Room>,
    pub spawn: Room,
    pub meeting_room: Room,
    pub emergency_room: Room,
    pub corridors: Vec<(Room, Room)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vents: Vec<(Room, Room)>,
    pub tasks: Vec<TaskDefinition>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapDataError {
    #[error("map has no rooms")]
    NoRooms,

    #[error("room '{0}' is listed twice")]
    DuplicateRoom(Room),

    #[error("room '{0}' is referenced but not declared")]
    UnknownRoom(Room),

    #[error("{0} is declared twice")]
    DuplicateTask(TaskId),

    #[error("corridor connects '{0}' to itself")]
    SelfLoop(Room),
}

/// MapOracle implementation with static layout data.
///
/// Immutable once built and shared between concurrent games behind an `Arc`.
#[derive(Clone, Debug)]
pub struct StaticMap {
    name: String,
    rooms: Vec<Room>,
    corridors: BTreeMap<Room, Vec<Room>>,
    vents: BTreeMap<Room, Vec<Room>>,
    tasks: Vec<TaskDefinition>,
    spawn: Room,
    meeting_room: Room,
    emergency_room: Room,
}

impl StaticMap {
    /// Validates `data` and builds the oracle.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found in the layout.
    pub fn new(data: MapData) -> Result<Self, MapDataError> {
        if data.rooms.is_empty() {
            return Err(MapDataError::NoRooms);
        }

        let mut declared = BTreeSet::new();
        for room in &data.rooms {
            if !declared.insert(room) {
                return Err(MapDataError::DuplicateRoom(room.clone()));
            }
        }

        let known = |room: &Room| {
            if declared.contains(room) {
                Ok(())
            } else {
                Err(MapDataError::UnknownRoom(room.clone()))
            }
        };
        known(&data.spawn)?;
        known(&data.meeting_room)?;
        known(&data.emergency_room)?;
        for (a, b) in data.corridors.iter().chain(&data.vents) {
            known(a)?;
            known(b)?;
            if a == b {
                return Err(MapDataError::SelfLoop(a.clone()));
            }
        }

        let mut task_ids = BTreeSet::new();
        for task in &data.tasks {
            known(&task.room)?;
            if !task_ids.insert(task.id) {
                return Err(MapDataError::DuplicateTask(task.id));
            }
        }

        Ok(Self::build(data))
    }

    fn build(data: MapData) -> Self {
        Self {
            corridors: undirected(&data.corridors),
            vents: undirected(&data.vents),
            name: data.name,
            rooms: data.rooms,
            tasks: data.tasks,
            spawn: data.spawn,
            meeting_room: data.meeting_room,
            emergency_room: data.emergency_room,
        }
    }

    /// The Skeld layout used by default.
    pub fn skeld() -> Self {
        Self::build(crate::skeld::skeld_data())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn undirected(pairs: &[(Room, Room)]) -> BTreeMap<Room, Vec<Room>> {
    let mut graph: BTreeMap<Room, Vec<Room>> = BTreeMap::new();
    for (a, b) in pairs {
        let forward = graph.entry(a.clone()).or_default();
        if !forward.contains(b) {
            forward.push(b.clone());
        }
        let backward = graph.entry(b.clone()).or_default();
        if !backward.contains(a) {
            backward.push(a.clone());
        }
    }
    graph
}

impl MapOracle for StaticMap {
    fn rooms(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    fn adjacent_rooms(&self, room: &Room) -> Vec<Room> {
        self.corridors.get(room).cloned().unwrap_or_default()
    }

    fn vent_connections(&self, room: &Room) -> Vec<Room> {
        self.vents.get(room).cloned().unwrap_or_default()
    }

    fn tasks(&self) -> Vec<TaskDefinition> {
        self.tasks.clone()
    }

    fn spawn_room(&self) -> Room {
        self.spawn.clone()
    }

    fn meeting_room(&self) -> Room {
        self.meeting_room.clone()
    }

    fn emergency_room(&self) -> Room {
        self.emergency_room.clone()
    }

    fn contains(&self, room: &Room) -> bool {
        self.rooms.contains(room)
    }
}
