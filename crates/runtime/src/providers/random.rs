//! Uniformly random decision policy.

use async_trait::async_trait;
use game_core::{Action, Observation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::api::{AgentContext, Decision, DecisionError, DecisionPolicy};

const SMALL_TALK: [&str; 4] = [
    "I was busy with my tasks and did not see anything.",
    "Has anyone noticed something strange?",
    "We should not vote without evidence.",
    "Where was everyone before this meeting?",
];

/// Picks one legal action uniformly at random.
///
/// Seeded explicitly so a batch replays identically for the same seeds.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn utterance(&mut self, observation: &Observation) -> String {
        let others: Vec<&String> = observation
            .co_located
            .iter()
            .filter(|name| **name != observation.name)
            .collect();

        if !others.is_empty() && self.rng.gen_bool(0.25) {
            let suspect = others[self.rng.gen_range(0..others.len())];
            return format!("I have doubts about {suspect}.");
        }
        SMALL_TALK[self.rng.gen_range(0..SMALL_TALK.len())].to_string()
    }
}

#[async_trait]
impl DecisionPolicy for RandomPolicy {
    async fn decide(
        &mut self,
        _ctx: &AgentContext,
        observation: &Observation,
        legal: &[Action],
    ) -> Result<Decision, DecisionError> {
        let template = legal
            .choose(&mut self.rng)
            .cloned()
            .ok_or(DecisionError::NoLegalAction)?;

        let action = match template {
            Action::Speak { location, .. } => Action::Speak {
                location,
                message: self.utterance(observation),
            },
            other => other,
        };

        Ok(Decision::new(action).with_thinking(format!(
            "Picked one of {} available actions at random.",
            legal.len()
        )))
    }

    fn kind(&self) -> &'static str {
        "random"
    }
}
