//! Scripted decision policies shared by the integration tests.
#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use game_core::{Action, Observation};
use runtime::{AgentContext, Decision, DecisionError, DecisionPolicy};

type Script = Box<dyn FnMut(&Observation, &[Action]) -> Option<Action> + Send>;

/// Policy driven by a closure over the observation and the legal templates.
pub struct Scripted {
    script: Script,
}

impl Scripted {
    pub fn new(
        script: impl FnMut(&Observation, &[Action]) -> Option<Action> + Send + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
        }
    }
}

#[async_trait]
impl DecisionPolicy for Scripted {
    async fn decide(
        &mut self,
        _ctx: &AgentContext,
        observation: &Observation,
        legal: &[Action],
    ) -> Result<Decision, DecisionError> {
        (self.script)(observation, legal)
            .map(Decision::new)
            .ok_or(DecisionError::NoLegalAction)
    }

    fn kind(&self) -> &'static str {
        "scripted"
    }
}

/// Never answers within any reasonable timeout.
pub struct Sleepy;

#[async_trait]
impl DecisionPolicy for Sleepy {
    async fn decide(
        &mut self,
        _ctx: &AgentContext,
        _observation: &Observation,
        _legal: &[Action],
    ) -> Result<Decision, DecisionError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(DecisionError::NoLegalAction)
    }

    fn kind(&self) -> &'static str {
        "sleepy"
    }
}

/// Speaks in meetings, skips votes, and otherwise wanders without killing or
/// calling meetings.
pub fn harmless(observation: &Observation, legal: &[Action]) -> Option<Action> {
    legal
        .iter()
        .find(|action| {
            !matches!(
                action,
                Action::Kill { .. } | Action::CallMeeting { .. } | Action::Vote { target: Some(_) }
            )
        })
        .map(|action| fill_speech(observation, action))
}

/// Works on tasks, walking the shortest path to the next unfinished one.
pub fn diligent(observation: &Observation, legal: &[Action]) -> Option<Action> {
    if let Some(work) = legal
        .iter()
        .find(|action| matches!(action, Action::CompleteTask { .. }))
    {
        return Some(work.clone());
    }

    let next_room = observation
        .tasks
        .iter()
        .filter(|task| task.steps_left > 0)
        .find_map(|task| task.path.get(1));
    if let Some(next_room) = next_room
        && let Some(step) = legal
            .iter()
            .find(|action| matches!(action, Action::MoveTo { to, .. } if to == next_room))
    {
        return Some(step.clone());
    }

    harmless(observation, legal)
}

pub fn fill_speech(observation: &Observation, action: &Action) -> Action {
    match action {
        Action::Speak { location, .. } => Action::Speak {
            location: location.clone(),
            message: format!("{} has nothing to report.", observation.name),
        },
        other => other.clone(),
    }
}
