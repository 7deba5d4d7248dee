use crate::error::ConfigError;
use crate::state::Role;

/// How many tasks of each kind every player receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskQuota {
    /// Tasks shared by the whole roster (same list for everyone).
    pub common: usize,
    pub short: usize,
    pub long: usize,
}

impl TaskQuota {
    pub const fn new(common: usize, short: usize, long: usize) -> Self {
        Self {
            common,
            short,
            long,
        }
    }

    pub const fn total(&self) -> usize {
        self.common + self.short + self.long
    }
}

impl Default for TaskQuota {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// How an unreported body leads to a meeting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BodyDiscovery {
    /// A living player sharing the room may choose `CallMeeting` as a report.
    #[default]
    Report,
    /// The first living non-killer that shares a room with a body triggers the
    /// meeting immediately, without spending an action.
    Automatic,
}

/// Named roster sizes accepted by the loaders, e.g. `seven_member` or `7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GamePreset {
    #[strum(to_string = "five_member", serialize = "five", serialize = "5")]
    FiveMember,
    #[strum(to_string = "seven_member", serialize = "seven", serialize = "7")]
    SevenMember,
    #[strum(to_string = "nine_member", serialize = "nine", serialize = "9")]
    NineMember,
}

impl GamePreset {
    pub fn config(self) -> GameConfig {
        match self {
            GamePreset::FiveMember => GameConfig::five_member(),
            GamePreset::SevenMember => GameConfig::seven_member(),
            GamePreset::NineMember => GameConfig::nine_member(),
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub num_players: usize,
    pub num_impostors: usize,
    /// Speaking rounds before a meeting moves on to voting.
    pub discussion_rounds: u32,
    /// Timesteps an impostor must wait between two kills.
    pub kill_cooldown: u32,
    /// Impostors win once the clock reaches this value.
    pub max_timesteps: u32,
    pub tasks: TaskQuota,
    pub emergency_calls_per_player: u32,
    pub body_discovery: BodyDiscovery,
    /// Longer utterances are truncated before they enter the event log.
    pub max_message_chars: usize,
    /// Seed for role, color and task assignment.
    pub seed: u64,
    /// Scripted role list in roster order; shuffled assignment when `None`.
    pub fixed_roles: Option<Vec<Role>>,
    /// Personality tags handed to decision policies in roster order (cycled).
    pub personalities: Vec<String>,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Player colors, which also bound the roster size.
    pub const COLORS: [&'static str; 12] = [
        "red", "blue", "green", "pink", "orange", "yellow", "black", "white", "purple", "brown",
        "cyan", "lime",
    ];
    pub const MAX_PLAYERS: usize = Self::COLORS.len();

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DISCUSSION_ROUNDS: u32 = 3;
    pub const DEFAULT_KILL_COOLDOWN: u32 = 3;
    pub const DEFAULT_MAX_TIMESTEPS: u32 = 20;
    pub const DEFAULT_EMERGENCY_CALLS: u32 = 1;
    pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 600;

    pub fn new(num_players: usize, num_impostors: usize) -> Self {
        Self {
            num_players,
            num_impostors,
            discussion_rounds: Self::DEFAULT_DISCUSSION_ROUNDS,
            kill_cooldown: Self::DEFAULT_KILL_COOLDOWN,
            max_timesteps: Self::DEFAULT_MAX_TIMESTEPS,
            tasks: TaskQuota::default(),
            emergency_calls_per_player: Self::DEFAULT_EMERGENCY_CALLS,
            body_discovery: BodyDiscovery::default(),
            max_message_chars: Self::DEFAULT_MAX_MESSAGE_CHARS,
            seed: 0,
            fixed_roles: None,
            personalities: Vec::new(),
        }
    }

    /// Five players, one impostor.
    pub fn five_member() -> Self {
        Self::new(5, 1)
    }

    /// Seven players, two impostors.
    pub fn seven_member() -> Self {
        Self::new(7, 2)
    }

    /// Nine players, two impostors, longer clock.
    pub fn nine_member() -> Self {
        Self {
            max_timesteps: 30,
            tasks: TaskQuota::new(1, 2, 1),
            ..Self::new(9, 2)
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_fixed_roles(mut self, roles: Vec<Role>) -> Self {
        self.fixed_roles = Some(roles);
        self
    }

    /// Checks every constraint that does not need the map.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_impostors == 0 || self.num_impostors >= self.num_players {
            return Err(ConfigError::ImpostorCount {
                players: self.num_players,
                impostors: self.num_impostors,
            });
        }
        if self.num_players > Self::MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                players: self.num_players,
                max: Self::MAX_PLAYERS,
            });
        }
        if self.discussion_rounds == 0 {
            return Err(ConfigError::NoDiscussionRounds);
        }
        if self.max_timesteps == 0 {
            return Err(ConfigError::NoTimesteps);
        }
        if let Some(roles) = &self.fixed_roles {
            if roles.len() != self.num_players {
                return Err(ConfigError::FixedRoleLength {
                    players: self.num_players,
                    given: roles.len(),
                });
            }
            let given = roles.iter().filter(|role| role.is_impostor()).count();
            if given != self.num_impostors {
                return Err(ConfigError::FixedRoleImpostors {
                    expected: self.num_impostors,
                    given,
                });
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::seven_member()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::five_member(),
            GameConfig::seven_member(),
            GameConfig::nine_member(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn preset_names_parse_with_aliases() {
        assert_eq!("Nine".parse(), Ok(GamePreset::NineMember));
        assert_eq!("5".parse(), Ok(GamePreset::FiveMember));
        assert_eq!("seven_member".parse(), Ok(GamePreset::SevenMember));
        assert!("eleven".parse::<GamePreset>().is_err());
        assert_eq!(GamePreset::FiveMember.to_string(), "five_member");
        assert_eq!(GamePreset::NineMember.config(), GameConfig::nine_member());
    }

    #[test]
    fn rejects_impostor_count_out_of_range() {
        assert!(matches!(
            GameConfig::new(5, 0).validate(),
            Err(ConfigError::ImpostorCount { .. })
        ));
        assert!(matches!(
            GameConfig::new(5, 5).validate(),
            Err(ConfigError::ImpostorCount { .. })
        ));
    }

    #[test]
    fn rejects_roster_larger_than_palette() {
        assert!(matches!(
            GameConfig::new(13, 2).validate(),
            Err(ConfigError::TooManyPlayers { max: 12, .. })
        ));
    }

    #[test]
    fn fixed_roles_must_match_counts() {
        let config = GameConfig::new(3, 1).with_fixed_roles(vec![Role::Crewmate; 3]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::FixedRoleImpostors {
                expected: 1,
                given: 0
            })
        );
    }
}
