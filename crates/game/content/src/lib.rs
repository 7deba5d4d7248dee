//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Ship layouts: rooms, corridors, vents, task catalogue (built-in or RON)
//! - Game configuration (TOML, or a named preset)
//!
//! Content is consumed by the runtime through [`game_core::MapOracle`] and never
//! appears in game state.

pub mod map;
mod skeld;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use map::{MapData, MapDataError, StaticMap};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapLoader};
