//! Hashing utilities for game state.
//!
//! Provides deterministic state roots for logging and for comparing runs.

use game_core::GameState;
use sha2::{Digest, Sha256};

use crate::repository::RepositoryError;

/// SHA-256 of the bincode encoding of `state`, hex encoded.
///
/// Two games driven by the same seeds and decisions end with the same root.
pub fn state_root(state: &GameState) -> Result<String, RepositoryError> {
    let bytes =
        bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::OracleManager;
    use game_core::GameConfig;

    fn state(seed: u64) -> GameState {
        let oracles = OracleManager::skeld();
        GameState::initialize(
            GameConfig::seven_member().with_seed(seed),
            &oracles.as_game_env(),
        )
        .unwrap()
    }

    #[test]
    fn root_is_stable() {
        assert_eq!(state_root(&state(3)).unwrap(), state_root(&state(3)).unwrap());
    }

    #[test]
    fn root_format() {
        let root = state_root(&state(3)).unwrap();
        assert_eq!(root.len(), 64);
        assert!(root.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn seed_changes_root() {
        assert_ne!(state_root(&state(3)).unwrap(), state_root(&state(4)).unwrap());
    }
}
