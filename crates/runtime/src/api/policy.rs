//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`DecisionPolicy`] implementations so a game can run
//! with scripted fixtures, random play, or LLM-backed agents.
use async_trait::async_trait;
use game_core::{Action, Observation, Player, PlayerId, Role};

use super::errors::DecisionError;

/// Who an agent plays, fixed for the whole game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentIdentity {
    pub player: PlayerId,
    pub name: String,
    pub role: Role,
    pub personality: Option<String>,
}

impl AgentIdentity {
    pub fn from_player(player: &Player) -> Self {
        Self {
            player: player.id,
            name: player.name.clone(),
            role: player.role,
            personality: player.personality.clone(),
        }
    }
}

/// Context the shell hands to its policy on every turn.
#[derive(Clone, Debug)]
pub struct AgentContext {
    pub game_index: usize,
    pub identity: AgentIdentity,
    /// Rules, role and (for impostors) the teammate roster.
    pub system_prompt: String,
    /// Condensed memory carried over from the previous decision.
    pub memory: String,
    /// Reasoning produced with the previous decision.
    pub thinking: String,
}

/// One decision: the action plus whatever the policy wants remembered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    /// Replaces the shell's condensed memory when present.
    pub memory: Option<String>,
    pub thinking: Option<String>,
}

impl Decision {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            memory: None,
            thinking: None,
        }
    }

    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.memory = Some(memory.into());
        self
    }

    pub fn with_thinking(mut self, thinking: impl Into<String>) -> Self {
        self.thinking = Some(thinking.into());
        self
    }
}

/// Chooses one action per turn for a single player.
///
/// Implementations may suspend (an LLM round trip); the shell bounds every
/// call with its decision timeout.
#[async_trait]
pub trait DecisionPolicy: Send {
    /// Picks an action for `observation`.
    ///
    /// `legal` holds the action templates of this turn; a `Speak` template
    /// accepts any message.
    async fn decide(
        &mut self,
        ctx: &AgentContext,
        observation: &Observation,
        legal: &[Action],
    ) -> Result<Decision, DecisionError>;

    /// Short label for logs.
    fn kind(&self) -> &'static str;
}
