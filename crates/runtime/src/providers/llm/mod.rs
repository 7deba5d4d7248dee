//! LLM-backed decision policy.
//!
//! The policy renders the turn prompt, sends it through a
//! [`CompletionClient`], and maps the `[Action]` section of the reply back to a
//! legal action. The condensed memory and reasoning of the reply travel back
//! to the shell inside the [`Decision`].

mod client;
mod parser;

pub use client::{CompletionClient, CompletionRequest};
pub use parser::{ParsedResponse, match_action, parse_response};

use async_trait::async_trait;
use game_core::{Action, Observation};

use crate::agent::prompt;
use crate::api::{AgentContext, Decision, DecisionError, DecisionPolicy};

pub struct LlmPolicy<C> {
    client: C,
    model: String,
}

impl<C: CompletionClient> LlmPolicy<C> {
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl<C: CompletionClient> DecisionPolicy for LlmPolicy<C> {
    async fn decide(
        &mut self,
        ctx: &AgentContext,
        observation: &Observation,
        legal: &[Action],
    ) -> Result<Decision, DecisionError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: ctx.system_prompt.clone(),
            prompt: prompt::turn_prompt(ctx, observation),
        };
        let reply = self.client.complete(request).await?;
        let parsed = parse_response(&reply)?;
        let action = match_action(&parsed.action, legal, &observation.legal_descriptions)?;

        let mut decision = Decision::new(action);
        decision.memory = parsed.memory;
        decision.thinking = parsed.thinking;
        Ok(decision)
    }

    fn kind(&self) -> &'static str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::api::AgentIdentity;
    use crate::oracle::OracleManager;
    use game_core::{GameConfig, GameState, observe};

    /// Replies with a fixed text and remembers the last request.
    struct Canned {
        reply: String,
        seen: Mutex<Option<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionClient for Canned {
        async fn complete(&self, request: CompletionRequest) -> Result<String, DecisionError> {
            *self.seen.lock().unwrap() = Some(request);
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn reply_becomes_a_decision() {
        let oracles = OracleManager::skeld();
        let state =
            GameState::initialize(GameConfig::five_member().with_seed(8), &oracles.as_game_env())
                .unwrap();
        let player = &state.players[0];
        let observation = observe(&state, &oracles.as_game_env(), player.id).unwrap();
        let chosen = observation.legal_descriptions[0].clone();

        let client = Canned {
            reply: format!(
                "[Condensed Memory]\nGame just started.\n[Thinking Process]\nHead out.\n[Action]\n{chosen}"
            ),
            seen: Mutex::new(None),
        };
        let mut policy = LlmPolicy::new(client, "test-model");
        let ctx = AgentContext {
            game_index: 1,
            identity: AgentIdentity::from_player(player),
            system_prompt: "system".to_string(),
            memory: prompt::NO_MEMORY.to_string(),
            thinking: prompt::NO_THINKING.to_string(),
        };

        let decision = policy
            .decide(&ctx, &observation, &observation.legal_actions)
            .await
            .unwrap();
        assert_eq!(decision.action, observation.legal_actions[0]);
        assert_eq!(decision.memory.as_deref(), Some("Game just started."));
        assert_eq!(decision.thinking.as_deref(), Some("Head out."));

        let seen = policy.client.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.model, "test-model");
        assert_eq!(seen.system, "system");
        assert!(seen.prompt.contains("Available Actions:"));
    }
}
