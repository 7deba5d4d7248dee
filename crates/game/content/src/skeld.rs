//! Built-in Skeld layout.

use game_core::{Room, TaskDefinition, TaskId, TaskKind};

use crate::map::MapData;

const ROOMS: [&str; 14] = [
    "Cafeteria",
    "Weapons",
    "Navigation",
    "O2",
    "Shields",
    "Communications",
    "Storage",
    "Admin",
    "Electrical",
    "Lower Engine",
    "Security",
    "Reactor",
    "Upper Engine",
    "Medbay",
];

const CORRIDORS: [(&str, &str); 24] = [
    ("Cafeteria", "Weapons"),
    ("Cafeteria", "Admin"),
    ("Cafeteria", "Upper Engine"),
    ("Cafeteria", "Medbay"),
    ("Cafeteria", "Storage"),
    ("Weapons", "Navigation"),
    ("Weapons", "O2"),
    ("Navigation", "O2"),
    ("Navigation", "Shields"),
    ("O2", "Shields"),
    ("Shields", "Communications"),
    ("Shields", "Storage"),
    ("Communications", "Storage"),
    ("Storage", "Admin"),
    ("Storage", "Electrical"),
    ("Storage", "Lower Engine"),
    ("Electrical", "Lower Engine"),
    ("Lower Engine", "Security"),
    ("Lower Engine", "Reactor"),
    ("Security", "Reactor"),
    ("Upper Engine", "Medbay"),
    ("Upper Engine", "Reactor"),
    ("Upper Engine", "Security"),
    ("Upper Engine", "Lower Engine"),
];

const VENTS: [(&str, &str); 7] = [
    ("Admin", "Cafeteria"),
    ("Navigation", "Weapons"),
    ("Navigation", "Shields"),
    ("Reactor", "Upper Engine"),
    ("Reactor", "Lower Engine"),
    ("Medbay", "Electrical"),
    ("Security", "Electrical"),
];

const TASKS: [(&str, TaskKind, &str, u32); 18] = [
    ("Fix Wiring", TaskKind::Common, "Electrical", 1),
    ("Swipe Card", TaskKind::Common, "Admin", 1),
    ("Prime Shields", TaskKind::Short, "Shields", 1),
    ("Clean O2 Filter", TaskKind::Short, "O2", 1),
    ("Chart Course", TaskKind::Short, "Navigation", 1),
    ("Stabilize Steering", TaskKind::Short, "Navigation", 1),
    ("Calibrate Distributor", TaskKind::Short, "Electrical", 1),
    ("Divert Power", TaskKind::Short, "Electrical", 1),
    ("Accept Diverted Power", TaskKind::Short, "Communications", 1),
    ("Clear Asteroids", TaskKind::Short, "Weapons", 1),
    ("Upload Data", TaskKind::Short, "Admin", 1),
    ("Unlock Manifolds", TaskKind::Short, "Reactor", 1),
    ("Submit Scan", TaskKind::Long, "Medbay", 2),
    ("Inspect Sample", TaskKind::Long, "Medbay", 2),
    ("Start Reactor", TaskKind::Long, "Reactor", 3),
    ("Fuel Engines", TaskKind::Long, "Storage", 2),
    ("Align Engine Output", TaskKind::Long, "Upper Engine", 2),
    ("Empty Garbage", TaskKind::Long, "Storage", 2),
];

fn pairs(list: &[(&str, &str)]) -> Vec<(Room, Room)> {
    list.iter()
        .map(|(a, b)| (Room::from(*a), Room::from(*b)))
        .collect()
}

pub(crate) fn skeld_data() -> MapData {
    MapData {
        name: "skeld".to_string(),
        rooms: ROOMS.iter().copied().map(Room::from).collect(),
        spawn: Room::from("Cafeteria"),
        meeting_room: Room::from("Cafeteria"),
        emergency_room: Room::from("Cafeteria"),
        corridors: pairs(&CORRIDORS),
        vents: pairs(&VENTS),
        tasks: TASKS
            .iter()
            .enumerate()
            .map(|(index, (name, kind, room, steps))| TaskDefinition {
                id: TaskId(index as u16),
                name: name.to_string(),
                kind: *kind,
                room: Room::from(*room),
                steps: *steps,
            })
            .collect(),
    }
}
