//! Shape of one agent log line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One decision of one agent, tagged with enough context to audit it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLogRecord {
    pub game_index: usize,
    pub timestep: u32,
    pub phase: String,
    pub player: PlayerTag,
    pub interaction: Interaction,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTag {
    pub name: String,
    /// `Crewmate` or `Impostor`.
    pub identity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub system_prompt: String,
    pub prompt: String,
    pub response: AgentResponse,
}

/// Response sections, keyed the way LLM agents write them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    #[serde(rename = "Condensed Memory")]
    pub condensed_memory: String,
    #[serde(rename = "Thinking Process")]
    pub thinking_process: String,
    #[serde(rename = "Action")]
    pub action: String,
}

/// Compact view: the record without prompts.
#[derive(Serialize)]
pub(crate) struct CompactRecord<'a> {
    pub game_index: usize,
    pub timestep: u32,
    pub phase: &'a str,
    pub player: &'a PlayerTag,
    pub interaction: CompactInteraction<'a>,
    pub timestamp: &'a DateTime<Utc>,
}

#[derive(Serialize)]
pub(crate) struct CompactInteraction<'a> {
    pub response: &'a AgentResponse,
}

impl<'a> From<&'a AgentLogRecord> for CompactRecord<'a> {
    fn from(record: &'a AgentLogRecord) -> Self {
        Self {
            game_index: record.game_index,
            timestep: record.timestep,
            phase: &record.phase,
            player: &record.player,
            interaction: CompactInteraction {
                response: &record.interaction.response,
            },
            timestamp: &record.timestamp,
        }
    }
}
