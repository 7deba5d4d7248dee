use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use game_core::{ImpostorRoster, InvariantViolation, Observation};

use super::prompt::{self, NO_MEMORY, NO_THINKING};
use crate::api::{AgentContext, AgentIdentity, Decision, DecisionError, DecisionPolicy};
use crate::repository::{AgentLog, AgentLogRecord, AgentResponse, Interaction, PlayerTag};

/// Binds one player to a decision policy and a log sink.
///
/// The shell owns the agent's memory between turns and writes one log record
/// per decision. Construction takes the finished [`ImpostorRoster`], so an
/// impostor's context can only be built once every role is known.
pub struct AgentShell {
    context: AgentContext,
    policy: Box<dyn DecisionPolicy>,
    log: Arc<dyn AgentLog>,
    timeout: Duration,
}

impl AgentShell {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Builds the shell and its system prompt.
    ///
    /// # Errors
    ///
    /// [`InvariantViolation::ImpostorNotListed`] when `identity` is an
    /// impostor missing from `roster`.
    pub fn new(
        identity: AgentIdentity,
        roster: &ImpostorRoster,
        policy: Box<dyn DecisionPolicy>,
        log: Arc<dyn AgentLog>,
    ) -> Result<Self, InvariantViolation> {
        if identity.role.is_impostor() && !roster.contains(identity.player) {
            return Err(InvariantViolation::ImpostorNotListed(identity.player));
        }

        let system_prompt = prompt::system_prompt(&identity, roster);
        Ok(Self {
            context: AgentContext {
                game_index: 0,
                identity,
                system_prompt,
                memory: NO_MEMORY.to_string(),
                thinking: NO_THINKING.to_string(),
            },
            policy,
            log,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_game_index(mut self, game_index: usize) -> Self {
        self.context.game_index = game_index;
        self
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.context.identity
    }

    pub fn system_prompt(&self) -> &str {
        &self.context.system_prompt
    }

    pub fn memory(&self) -> &str {
        &self.context.memory
    }

    pub fn policy_kind(&self) -> &'static str {
        self.policy.kind()
    }

    /// Asks the policy for one action, bounded by the decision timeout.
    ///
    /// # Errors
    ///
    /// Any [`DecisionError`]; the caller forfeits the turn.
    pub async fn act(&mut self, observation: &Observation) -> Result<Decision, DecisionError> {
        if observation.legal_actions.is_empty() {
            return Err(DecisionError::NoLegalAction);
        }

        let turn_prompt = prompt::turn_prompt(&self.context, observation);
        let decision = tokio::time::timeout(
            self.timeout,
            self.policy
                .decide(&self.context, observation, &observation.legal_actions),
        )
        .await
        .map_err(|_| DecisionError::Timeout(self.timeout))??;

        if let Some(memory) = &decision.memory {
            self.context.memory = memory.clone();
        }
        if let Some(thinking) = &decision.thinking {
            self.context.thinking = thinking.clone();
        }

        let record = self.record(observation, turn_prompt, &decision);
        if let Err(error) = self.log.append(&record) {
            tracing::warn!(
                target: "runtime::agent",
                player = %self.context.identity.name,
                %error,
                "failed to write agent log"
            );
        }

        tracing::debug!(
            target: "runtime::agent",
            game = self.context.game_index,
            player = %self.context.identity.name,
            action = %record.interaction.response.action,
            "decided"
        );
        Ok(decision)
    }

    fn record(
        &self,
        observation: &Observation,
        turn_prompt: String,
        decision: &Decision,
    ) -> AgentLogRecord {
        let identity = &self.context.identity;
        AgentLogRecord {
            game_index: self.context.game_index,
            timestep: observation.timestep.0,
            phase: observation.phase.label(),
            player: PlayerTag {
                name: identity.name.clone(),
                identity: identity.role.to_string(),
            },
            interaction: Interaction {
                system_prompt: self.context.system_prompt.clone(),
                prompt: turn_prompt,
                response: AgentResponse {
                    condensed_memory: self.context.memory.clone(),
                    thinking_process: self.context.thinking.clone(),
                    action: prompt::describe_choice(observation, &decision.action),
                },
            },
            timestamp: Utc::now(),
        }
    }
}
