//! Common error infrastructure for game-core.
//!
//! This module provides the severity classification shared by every error in
//! the crate, plus the two setup-time error families: [`ConfigError`] for bad
//! game configuration and [`InvariantViolation`] for corrupted role data.
//! Action errors live next to the actions they validate.
//!
//! # Severity
//!
//! - **Recoverable**: a single turn fails, the game continues (illegal action)
//! - **Validation**: invalid input that must be fixed before retrying
//! - **Internal**: state inconsistency that indicates an engine bug
//! - **Fatal**: the game cannot start or continue

use crate::state::{PlayerId, Role};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The turn can be forfeited and the game continues.
    Recoverable,

    /// Invalid input, should not retry without changes.
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Unrecoverable: setup must abort.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or corrupted state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log filtering and assertions in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid game configuration, detected before any game starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConfigError {
    #[error("impostor count {impostors} must be at least 1 and below roster size {players}")]
    ImpostorCount { players: usize, impostors: usize },

    #[error("roster size {players} exceeds the {max} available player colors")]
    TooManyPlayers { players: usize, max: usize },

    #[error("at least one discussion round is required")]
    NoDiscussionRounds,

    #[error("max_timesteps must be positive")]
    NoTimesteps,

    #[error("fixed role list has {given} entries for a roster of {players}")]
    FixedRoleLength { players: usize, given: usize },

    #[error("fixed role list contains {given} impostors, configuration asks for {expected}")]
    FixedRoleImpostors { expected: usize, given: usize },

    #[error("map offers {available} {kind} tasks, {requested} requested per player")]
    NotEnoughTasks {
        kind: &'static str,
        available: usize,
        requested: usize,
    },

    #[error("room '{0}' is not part of the map")]
    UnknownRoom(String),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            ImpostorCount { .. } => "CONFIG_IMPOSTOR_COUNT",
            TooManyPlayers { .. } => "CONFIG_TOO_MANY_PLAYERS",
            NoDiscussionRounds => "CONFIG_NO_DISCUSSION_ROUNDS",
            NoTimesteps => "CONFIG_NO_TIMESTEPS",
            FixedRoleLength { .. } => "CONFIG_FIXED_ROLE_LENGTH",
            FixedRoleImpostors { .. } => "CONFIG_FIXED_ROLE_IMPOSTORS",
            NotEnoughTasks { .. } => "CONFIG_NOT_ENOUGH_TASKS",
            UnknownRoom(_) => "CONFIG_UNKNOWN_ROOM",
        }
    }
}

/// A broken structural invariant of the role data.
///
/// Always fatal: a wrong impostor roster corrupts every agent built from it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("impostor roster has {actual} names, expected {expected}")]
    ImpostorCardinality { expected: usize, actual: usize },

    #[error("player {player} is listed as impostor but has role {role}")]
    NonImpostorListed { player: PlayerId, role: Role },

    #[error("impostor {0} is missing from the impostor roster")]
    ImpostorNotListed(PlayerId),

    #[error("role assignment covers {assigned} of {players} players")]
    IncompleteAssignment { players: usize, assigned: usize },

    #[error("player name '{0}' is used more than once")]
    DuplicateName(String),
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            ImpostorCardinality { .. } => "INVARIANT_IMPOSTOR_CARDINALITY",
            NonImpostorListed { .. } => "INVARIANT_NON_IMPOSTOR_LISTED",
            ImpostorNotListed(_) => "INVARIANT_IMPOSTOR_NOT_LISTED",
            IncompleteAssignment { .. } => "INVARIANT_INCOMPLETE_ASSIGNMENT",
            DuplicateName(_) => "INVARIANT_DUPLICATE_NAME",
        }
    }
}

/// Errors surfaced while building the initial [`GameState`](crate::GameState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Oracle(#[from] crate::env::OracleError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            SetupError::Config(e) => e.error_code(),
            SetupError::Invariant(e) => e.error_code(),
            SetupError::Oracle(e) => e.error_code(),
        }
    }
}
