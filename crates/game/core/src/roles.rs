//! Hidden-role assignment and the impostor roster.
//!
//! Setup is two-phase: [`assign_roles`] produces a complete
//! [`RoleAssignment`] for the whole roster, and only then is the
//! [`ImpostorRoster`] derived from the finished player list. The roster type
//! has no public constructor besides [`ImpostorRoster::from_players`], and agent
//! shells require a `&ImpostorRoster`, so an agent can never be built from a
//! half-assigned roster.

use crate::config::GameConfig;
use crate::env::{ROLE_STREAM, RngOracle, SeedStream};
use crate::error::{ConfigError, InvariantViolation};
use crate::state::{Player, PlayerId, Role};

/// How roles are distributed over the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleStrategy {
    /// Uniform random permutation derived from the seed.
    Shuffled { seed: u64 },
    /// Scripted roles in roster order (tests, reproductions).
    Fixed(Vec<Role>),
}

impl RoleStrategy {
    pub fn from_config(config: &GameConfig) -> Self {
        match &config.fixed_roles {
            Some(roles) => RoleStrategy::Fixed(roles.clone()),
            None => RoleStrategy::Shuffled { seed: config.seed },
        }
    }
}

/// One role per roster slot, complete by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleAssignment {
    roles: Vec<Role>,
}

impl RoleAssignment {
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role_of(&self, id: PlayerId) -> Option<Role> {
        self.roles.get(id.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn impostor_count(&self) -> usize {
        self.roles.iter().filter(|role| role.is_impostor()).count()
    }
}

/// Assigns exactly `impostors` impostor roles over `players` slots.
///
/// # Errors
///
/// Returns [`ConfigError`] when the counts are out of range or a fixed role
/// list disagrees with them.
pub fn assign_roles<R>(
    players: usize,
    impostors: usize,
    strategy: &RoleStrategy,
    rng: &R,
) -> Result<RoleAssignment, ConfigError>
where
    R: RngOracle + ?Sized,
{
    if impostors == 0 || impostors >= players {
        return Err(ConfigError::ImpostorCount { players, impostors });
    }

    let roles = match strategy {
        RoleStrategy::Fixed(roles) => {
            if roles.len() != players {
                return Err(ConfigError::FixedRoleLength {
                    players,
                    given: roles.len(),
                });
            }
            let given = roles.iter().filter(|role| role.is_impostor()).count();
            if given != impostors {
                return Err(ConfigError::FixedRoleImpostors {
                    expected: impostors,
                    given,
                });
            }
            roles.clone()
        }
        RoleStrategy::Shuffled { seed } => {
            let mut roles = vec![Role::Crewmate; players];
            roles[..impostors].fill(Role::Impostor);
            SeedStream::new(rng, *seed, ROLE_STREAM).shuffle(&mut roles);
            roles
        }
    };

    Ok(RoleAssignment { roles })
}

/// Names and ids of every impostor, in roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImpostorRoster {
    ids: Vec<PlayerId>,
    names: Vec<String>,
}

impl ImpostorRoster {
    /// Derives the roster from a fully built player list.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation::ImpostorCardinality`] when the number of impostors
    /// differs from `expected`.
    pub fn from_players(players: &[Player], expected: usize) -> Result<Self, InvariantViolation> {
        let (ids, names): (Vec<_>, Vec<_>) = players
            .iter()
            .filter(|player| player.is_impostor())
            .map(|player| (player.id, player.name.clone()))
            .unzip();

        let roster = Self { ids, names };
        roster.verify(players, expected)?;
        Ok(roster)
    }

    /// Re-checks cardinality and membership against `players`.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant.
    pub fn verify(&self, players: &[Player], expected: usize) -> Result<(), InvariantViolation> {
        if self.ids.len() != expected || self.names.len() != expected {
            return Err(InvariantViolation::ImpostorCardinality {
                expected,
                actual: self.names.len(),
            });
        }
        for (id, name) in self.ids.iter().zip(&self.names) {
            match players.get(id.index()) {
                Some(player) if player.is_impostor() && &player.name == name => {}
                Some(player) => {
                    return Err(InvariantViolation::NonImpostorListed {
                        player: *id,
                        role: player.role,
                    });
                }
                None => {
                    return Err(InvariantViolation::ImpostorCardinality {
                        expected,
                        actual: players.len(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Teammates of `id` (every impostor except `id`).
    pub fn teammates_of(&self, id: PlayerId) -> Vec<&str> {
        self.ids
            .iter()
            .zip(&self.names)
            .filter(|(other, _)| **other != id)
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, Room};

    fn player(id: u32, role: Role) -> Player {
        Player {
            id: PlayerId(id),
            name: format!("Player {}: test", id + 1),
            role,
            alive: true,
            location: Room::new("Cafeteria"),
            tasks: Vec::new(),
            personality: None,
            emergency_calls_left: 1,
            last_kill: None,
            action_history: Vec::new(),
        }
    }

    #[test]
    fn shuffled_assignment_has_exact_impostor_count() {
        for seed in 0..50 {
            let assignment =
                assign_roles(7, 2, &RoleStrategy::Shuffled { seed }, &PcgRng).unwrap();
            assert_eq!(assignment.len(), 7);
            assert_eq!(assignment.impostor_count(), 2);
        }
    }

    #[test]
    fn same_seed_same_roles() {
        let first = assign_roles(9, 2, &RoleStrategy::Shuffled { seed: 11 }, &PcgRng).unwrap();
        let second = assign_roles(9, 2, &RoleStrategy::Shuffled { seed: 11 }, &PcgRng).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_slot_can_hold_the_impostor() {
        let mut seen = [false; 5];
        for seed in 0..200 {
            let assignment =
                assign_roles(5, 1, &RoleStrategy::Shuffled { seed }, &PcgRng).unwrap();
            let slot = assignment.roles().iter().position(|r| r.is_impostor()).unwrap();
            seen[slot] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn fixed_strategy_is_used_verbatim() {
        let roles = vec![Role::Impostor, Role::Crewmate, Role::Crewmate];
        let assignment = assign_roles(3, 1, &RoleStrategy::Fixed(roles.clone()), &PcgRng).unwrap();
        assert_eq!(assignment.roles(), roles.as_slice());
    }

    #[test]
    fn rejects_out_of_range_counts() {
        let strategy = RoleStrategy::Shuffled { seed: 0 };
        assert!(assign_roles(4, 0, &strategy, &PcgRng).is_err());
        assert!(assign_roles(4, 4, &strategy, &PcgRng).is_err());
    }

    #[test]
    fn roster_is_derived_from_completed_players() {
        let players = vec![
            player(0, Role::Crewmate),
            player(1, Role::Impostor),
            player(2, Role::Crewmate),
            player(3, Role::Impostor),
        ];
        let roster = ImpostorRoster::from_players(&players, 2).unwrap();
        assert_eq!(roster.names(), ["Player 2: test", "Player 4: test"]);
        assert_eq!(roster.teammates_of(PlayerId(1)), ["Player 4: test"]);
    }

    #[test]
    fn roster_cardinality_mismatch_is_fatal() {
        let players = vec![player(0, Role::Crewmate), player(1, Role::Impostor)];
        assert_eq!(
            ImpostorRoster::from_players(&players, 2),
            Err(InvariantViolation::ImpostorCardinality {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn empty_roster_never_passes_verification() {
        let players = vec![player(0, Role::Impostor), player(1, Role::Crewmate)];
        let err = ImpostorRoster::default().verify(&players, 1).unwrap_err();
        assert!(matches!(err, InvariantViolation::ImpostorCardinality { .. }));
    }
}
