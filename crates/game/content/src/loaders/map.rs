//! Map data loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::map::{MapData, StaticMap};

/// Loader for ship layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load and validate a map from a RON file.
    pub fn load(path: &Path) -> LoadResult<StaticMap> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a map from RON text.
    pub fn parse(content: &str) -> LoadResult<StaticMap> {
        let data = Self::parse_data(content)?;
        let map = StaticMap::new(data)
            .map_err(|e| anyhow::anyhow!("Invalid map layout: {}", e))?;
        Ok(map)
    }

    /// Parse raw layout data without validation.
    pub fn parse_data(content: &str) -> LoadResult<MapData> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{MapOracle, Room};
    use std::io::Write;

    const SKELD_RON: &str = include_str!("../../data/skeld.ron");

    #[test]
    fn bundled_skeld_matches_builtin() {
        let data = MapLoader::parse_data(SKELD_RON).unwrap();
        assert_eq!(data, crate::skeld::skeld_data());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                name: "tiny",
                rooms: ["Hall", "Lab"],
                spawn: "Hall",
                meeting_room: "Hall",
                emergency_room: "Hall",
                corridors: [("Hall", "Lab")],
                tasks: [(id: 0, name: "Sort", kind: short, room: "Lab", steps: 1)],
            )"#
        )
        .unwrap();

        let map = MapLoader::load(file.path()).unwrap();
        assert_eq!(map.name(), "tiny");
        assert!(map.vent_connections(&Room::from("Hall")).is_empty());
        assert_eq!(map.adjacent_rooms(&Room::from("Lab")), vec![Room::from("Hall")]);
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let result = MapLoader::parse(
            r#"(
                name: "broken",
                rooms: ["Hall"],
                spawn: "Nowhere",
                meeting_room: "Hall",
                emergency_room: "Hall",
                corridors: [],
                tasks: [],
            )"#,
        );
        assert!(result.is_err());
    }
}
