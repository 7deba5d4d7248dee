//! Runtime wrapper around static game content oracles.
//!
//! The map is immutable once loaded and shared by every game of a batch; the
//! [`OracleManager`] builds [`game_core::GameEnv`] snapshots on demand. Dynamic
//! state lives in each game's [`game_core::GameState`].
use std::sync::Arc;

use game_content::StaticMap;
use game_core::{GameEnv, MapOracle, PcgRng, RngOracle};

/// Manages the oracle implementations of one game.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) map: Arc<dyn MapOracle>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(map: Arc<dyn MapOracle>) -> Self {
        Self {
            map,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// The built-in Skeld layout.
    pub fn skeld() -> Self {
        Self::new(Arc::new(StaticMap::skeld()))
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        let rng: &dyn RngOracle = &self.rng;
        GameEnv::with_all(self.map.as_ref(), rng)
    }

    pub fn map(&self) -> &Arc<dyn MapOracle> {
        &self.map
    }
}

impl Default for OracleManager {
    fn default() -> Self {
        Self::skeld()
    }
}
