use std::fmt;

use super::Role;

/// Game clock. One timestep is a full task round or a whole meeting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestep(pub u32);

impl Timestep {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Timesteps elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Timestep) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which rule ended the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum WinReason {
    /// Every impostor was ejected.
    ImpostorsEliminated,
    /// Every crewmate task was completed.
    TasksCompleted,
    /// Living impostors reached the number of living crewmates.
    ImpostorParity,
    /// The clock reached `max_timesteps`.
    TimeLimit,
}

/// Phase controller states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Task,
    /// Zero-based discussion round.
    MeetingDiscussion { round: u32 },
    MeetingVoting,
    GameOver { winner: Role, reason: WinReason },
}

impl Phase {
    pub fn is_meeting(&self) -> bool {
        matches!(self, Phase::MeetingDiscussion { .. } | Phase::MeetingVoting)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }

    /// Short tag used in histories, e.g. `meeting phase - round 1`.
    pub fn label(&self) -> String {
        match self {
            Phase::Task => "task phase".to_string(),
            Phase::MeetingDiscussion { round } => format!("meeting phase - round {}", round + 1),
            Phase::MeetingVoting => "meeting phase - voting".to_string(),
            Phase::GameOver { .. } => "game over".to_string(),
        }
    }

    /// Prompt heading, e.g. `Meeting phase - Discussion round (1/3)`.
    pub fn describe(&self, discussion_rounds: u32) -> String {
        match self {
            Phase::Task => "Task phase".to_string(),
            Phase::MeetingDiscussion { round } => format!(
                "Meeting phase - Discussion round ({}/{discussion_rounds})",
                round + 1
            ),
            Phase::MeetingVoting => "Meeting phase - Voting".to_string(),
            Phase::GameOver { winner, .. } => format!("Game over - {winner}s win"),
        }
    }

    /// What players are expected to do in this phase. Empty once the game is over.
    pub fn guidance(&self, discussion_rounds: u32) -> String {
        match self {
            Phase::Task => "In this phase, Crewmates should try to complete all tasks or \
                identify the Impostor. Impostors should try to kill Crewmates before they \
                finish all the tasks. Turns run in order, so players in your room see what \
                you do."
                .to_string(),
            Phase::MeetingDiscussion { .. } => format!(
                "In this phase, players discuss who the Impostor might be. There will be a \
                 total of {discussion_rounds} discussion rounds, followed by a vote. Share \
                 your observations and suspicions."
            ),
            Phase::MeetingVoting => "In this phase, every living player votes to eject the \
                suspected Impostor or skips. Ballots are secret and a tie ejects nobody."
                .to_string(),
            Phase::GameOver { .. } => String::new(),
        }
    }

    pub fn winner(&self) -> Option<Role> {
        match self {
            Phase::GameOver { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

/// Turn bookkeeping for strict roster-order sequencing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub timestep: Timestep,

    /// Roster index of the player whose action is requested next.
    pub cursor: usize,

    /// Sequential identifier incremented by every applied or forfeited turn.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
