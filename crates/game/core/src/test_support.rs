//! Small fixed ship used by unit tests.
//!
//! ```text
//! Medbay - Cafeteria - Admin - Storage - Electrical
//!                        \________vent______/
//! ```

use crate::config::GameConfig;
use crate::env::{Env, GameEnv, MapOracle, PcgRng, Room, TaskDefinition, TaskId, TaskKind};
use crate::state::{GameState, PlayerId, Role};

pub(crate) struct TestMap;

static MAP: TestMap = TestMap;
static RNG: PcgRng = PcgRng;

const ROOMS: [&str; 5] = ["Cafeteria", "Medbay", "Admin", "Storage", "Electrical"];

impl MapOracle for TestMap {
    fn rooms(&self) -> Vec<Room> {
        ROOMS.iter().copied().map(Room::from).collect()
    }

    fn adjacent_rooms(&self, room: &Room) -> Vec<Room> {
        let names: &[&str] = match room.as_str() {
            "Cafeteria" => &["Medbay", "Admin"],
            "Medbay" => &["Cafeteria"],
            "Admin" => &["Cafeteria", "Storage"],
            "Storage" => &["Admin", "Electrical"],
            "Electrical" => &["Storage"],
            _ => &[],
        };
        names.iter().copied().map(Room::from).collect()
    }

    fn vent_connections(&self, room: &Room) -> Vec<Room> {
        match room.as_str() {
            "Admin" => vec![Room::from("Electrical")],
            "Electrical" => vec![Room::from("Admin")],
            _ => Vec::new(),
        }
    }

    fn tasks(&self) -> Vec<TaskDefinition> {
        let task = |id, name: &str, kind, room: &str, steps| TaskDefinition {
            id: TaskId(id),
            name: name.to_string(),
            kind,
            room: Room::from(room),
            steps,
        };
        vec![
            task(0, "Swipe Card", TaskKind::Common, "Admin", 1),
            task(1, "Fix Wiring", TaskKind::Common, "Electrical", 1),
            task(2, "Empty Garbage", TaskKind::Short, "Storage", 1),
            task(3, "Calibrate Distributor", TaskKind::Short, "Electrical", 1),
            task(4, "Submit Scan", TaskKind::Long, "Medbay", 2),
            task(5, "Fuel Engines", TaskKind::Long, "Storage", 2),
        ]
    }

    fn spawn_room(&self) -> Room {
        Room::from("Cafeteria")
    }

    fn emergency_room(&self) -> Room {
        Room::from("Cafeteria")
    }
}

pub(crate) fn env() -> GameEnv<'static> {
    Env::with_all(&MAP, &RNG).into_game_env()
}

/// Game with impostors at the given roster slots and everything else crewmate.
pub(crate) fn game_with_impostors(players: usize, impostors: &[u32]) -> GameState {
    let roles = (0..players as u32)
        .map(|slot| {
            if impostors.contains(&slot) {
                Role::Impostor
            } else {
                Role::Crewmate
            }
        })
        .collect();
    let config = GameConfig::new(players, impostors.len()).with_fixed_roles(roles);
    GameState::initialize(config, &env()).expect("test game builds")
}

pub(crate) fn place(state: &mut GameState, player: u32, room: &str) {
    state.players[player as usize].location = Room::from(room);
}

pub(crate) fn id(player: u32) -> PlayerId {
    PlayerId(player)
}
