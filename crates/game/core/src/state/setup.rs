use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;
use crate::env::{
    COLOR_STREAM, GameEnv, MapOracle, RngOracle, Room, SeedStream, TASK_STREAM, TaskDefinition,
    TaskId, TaskKind,
};
use crate::error::{ConfigError, InvariantViolation, SetupError};
use crate::roles::{ImpostorRoster, RoleStrategy, assign_roles};

use super::{GameState, MeetingState, Phase, Player, PlayerId, Task, TurnState};

impl GameState {
    /// Builds the initial state of a game.
    ///
    /// Order matters: roles are assigned for the whole roster first, the
    /// players are materialised, and only the finished player list is used to
    /// derive the [`ImpostorRoster`]. A win condition that already holds (for
    /// example impostor parity in a tiny roster) ends the game immediately.
    ///
    /// # Errors
    ///
    /// Fails with [`SetupError`] on invalid configuration, a map that lacks the
    /// referenced rooms or enough tasks, or a broken roster invariant.
    pub fn initialize(config: GameConfig, env: &GameEnv<'_>) -> Result<Self, SetupError> {
        config.validate()?;
        let map = env.map()?;
        let rng = env.rng()?;

        let spawn = map.spawn_room();
        for room in [&spawn, &map.meeting_room(), &map.emergency_room()] {
            ensure_room(map, room)?;
        }

        let colors = shuffled_colors(rng, config.seed);
        let assignment = assign_roles(
            config.num_players,
            config.num_impostors,
            &RoleStrategy::from_config(&config),
            rng,
        )?;
        if assignment.len() != config.num_players {
            return Err(InvariantViolation::IncompleteAssignment {
                players: config.num_players,
                assigned: assignment.len(),
            }
            .into());
        }

        let deck = TaskDeck::from_map(map, &config)?;
        let mut tasks = SeedStream::new(rng, config.seed, TASK_STREAM);
        let common = deck.draw(TaskKind::Common, config.tasks.common, &mut tasks);

        let mut handed_out = BTreeMap::new();
        let mut players = Vec::with_capacity(config.num_players);
        for (index, role) in assignment.roles().iter().enumerate() {
            let mut own: Vec<TaskDefinition> = common.clone();
            own.extend(deck.draw(TaskKind::Short, config.tasks.short, &mut tasks));
            own.extend(deck.draw(TaskKind::Long, config.tasks.long, &mut tasks));
            for definition in &own {
                handed_out.insert(definition.id, definition.clone());
            }

            players.push(Player {
                id: PlayerId(index as u32),
                name: format!("Player {}: {}", index + 1, colors[index]),
                role: *role,
                alive: true,
                location: spawn.clone(),
                tasks: own.iter().map(Task::from).collect(),
                personality: personality_for(&config, index),
                emergency_calls_left: config.emergency_calls_per_player,
                last_kill: None,
                action_history: Vec::new(),
            });
        }

        let mut names = BTreeSet::new();
        for player in &players {
            if !names.insert(player.name.as_str()) {
                return Err(InvariantViolation::DuplicateName(player.name.clone()).into());
            }
        }

        let impostors = ImpostorRoster::from_players(&players, config.num_impostors)?;

        let mut state = Self {
            config,
            players,
            phase: Phase::Task,
            turn: TurnState::new(),
            impostors,
            events: Vec::new(),
            bodies: Vec::new(),
            meeting: MeetingState::default(),
            tasks: handed_out,
        };
        crate::phase::evaluate_win(&mut state);
        Ok(state)
    }
}

fn ensure_room(map: &dyn MapOracle, room: &Room) -> Result<(), ConfigError> {
    if map.contains(room) {
        Ok(())
    } else {
        Err(ConfigError::UnknownRoom(room.to_string()))
    }
}

fn shuffled_colors(rng: &dyn RngOracle, seed: u64) -> Vec<&'static str> {
    let mut colors = GameConfig::COLORS.to_vec();
    SeedStream::new(rng, seed, COLOR_STREAM).shuffle(&mut colors);
    colors
}

fn personality_for(config: &GameConfig, index: usize) -> Option<String> {
    if config.personalities.is_empty() {
        return None;
    }
    Some(config.personalities[index % config.personalities.len()].clone())
}

/// Map task catalogue split by kind, in catalogue order.
struct TaskDeck {
    by_kind: BTreeMap<TaskKind, Vec<TaskDefinition>>,
}

impl TaskDeck {
    fn from_map(map: &dyn MapOracle, config: &GameConfig) -> Result<Self, ConfigError> {
        let mut by_kind: BTreeMap<TaskKind, Vec<TaskDefinition>> = BTreeMap::new();
        let mut ids: BTreeSet<TaskId> = BTreeSet::new();
        for task in map.tasks() {
            ensure_room(map, &task.room)?;
            if ids.insert(task.id) {
                by_kind.entry(task.kind).or_default().push(task);
            }
        }

        let deck = Self { by_kind };
        for (kind, requested) in [
            (TaskKind::Common, config.tasks.common),
            (TaskKind::Short, config.tasks.short),
            (TaskKind::Long, config.tasks.long),
        ] {
            let available = deck.available(kind);
            if available < requested {
                return Err(ConfigError::NotEnoughTasks {
                    kind: kind_label(kind),
                    available,
                    requested,
                });
            }
        }
        Ok(deck)
    }

    fn available(&self, kind: TaskKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// `count` distinct tasks of `kind`, chosen by the seeded stream.
    fn draw(
        &self,
        kind: TaskKind,
        count: usize,
        stream: &mut SeedStream<'_, dyn RngOracle + '_>,
    ) -> Vec<TaskDefinition> {
        let Some(pool) = self.by_kind.get(&kind) else {
            return Vec::new();
        };
        let mut order: Vec<usize> = (0..pool.len()).collect();
        stream.shuffle(&mut order);
        order
            .into_iter()
            .take(count)
            .map(|index| pool[index].clone())
            .collect()
    }
}

fn kind_label(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Common => "common",
        TaskKind::Short => "short",
        TaskKind::Long => "long",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaskQuota;
    use crate::env::{Env, PcgRng};
    use crate::state::Role;
    use crate::test_support::TestMap;

    fn build(config: GameConfig) -> Result<GameState, SetupError> {
        let map = TestMap;
        let rng = PcgRng;
        let env = Env::with_all(&map, &rng).into_game_env();
        GameState::initialize(config, &env)
    }

    #[test]
    fn seven_player_roster_has_two_impostors() {
        let state = build(GameConfig::seven_member().with_seed(3)).unwrap();

        assert_eq!(state.players.len(), 7);
        assert_eq!(state.living_count(Role::Impostor), 2);
        assert_eq!(state.impostors.len(), 2);
        for id in state.impostors.ids() {
            assert_eq!(state.player(*id).unwrap().role, Role::Impostor);
        }
        assert!(state.players.iter().all(|p| p.location == Room::new("Cafeteria")));
        assert_eq!(state.phase, Phase::Task);
    }

    #[test]
    fn names_follow_roster_order_and_are_unique() {
        let state = build(GameConfig::nine_member().with_seed(8)).unwrap();
        let names: BTreeSet<_> = state.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 9);
        for (index, player) in state.players.iter().enumerate() {
            assert!(player.name.starts_with(&format!("Player {}: ", index + 1)));
        }
    }

    #[test]
    fn same_seed_builds_the_same_game() {
        let first = build(GameConfig::seven_member().with_seed(21)).unwrap();
        let second = build(GameConfig::seven_member().with_seed(21)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn everyone_shares_the_common_task() {
        let state = build(GameConfig::five_member().with_seed(4)).unwrap();
        let common: BTreeSet<_> = state
            .players
            .iter()
            .flat_map(|p| p.tasks.iter().filter(|t| t.kind == TaskKind::Common))
            .map(|t| t.id)
            .collect();
        assert_eq!(common.len(), 1);
        assert!(state.players.iter().all(|p| p.tasks.len() == 3));
    }

    #[test]
    fn fixed_roles_are_respected() {
        let roles = vec![
            Role::Crewmate,
            Role::Impostor,
            Role::Crewmate,
            Role::Crewmate,
            Role::Crewmate,
        ];
        let state = build(GameConfig::five_member().with_fixed_roles(roles)).unwrap();
        assert_eq!(state.impostors.ids(), [PlayerId(1)]);
    }

    #[test]
    fn short_catalogue_is_a_config_error() {
        let mut config = GameConfig::five_member();
        config.tasks = TaskQuota::new(5, 1, 1);
        assert!(matches!(
            build(config),
            Err(SetupError::Config(ConfigError::NotEnoughTasks { kind: "common", .. }))
        ));
    }

    #[test]
    fn missing_map_is_reported() {
        let env: GameEnv<'_> = Env::empty();
        assert!(matches!(
            GameState::initialize(GameConfig::five_member(), &env),
            Err(SetupError::Oracle(_))
        ));
    }

    #[test]
    fn parity_at_start_ends_the_game() {
        let state = build(GameConfig::new(2, 1)).unwrap();
        assert!(state.is_over());
    }
}
