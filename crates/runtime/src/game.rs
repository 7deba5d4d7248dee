//! Game orchestrator.
//!
//! A [`Game`] owns one [`GameState`], the shared map, and one [`AgentShell`]
//! per player. Setup runs strictly in order: the state (with its finished role
//! assignment and impostor roster) is built first, and only then are the
//! shells constructed from that roster. Each [`Game::step`] asks exactly one
//! agent for a decision and applies it before anything else happens.
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use game_core::env::compute_seed;
use game_core::{
    ExecuteError, ExecutionOutcome, GameConfig, GameEngine, GameState, ImpostorRoster, MapOracle,
    Phase, PlayerId, Role, WinReason, current_actor, observe,
};

use crate::agent::AgentShell;
use crate::agent::prompt::describe_choice;
use crate::api::{AgentIdentity, DecisionPolicy, Result, RuntimeError};
use crate::config::{AgentConfig, PolicyKind};
use crate::events::{Event, EventBus, GameStateEvent, Topic, TurnEvent};
use crate::oracle::OracleManager;
use crate::providers::{CompletionClient, LlmPolicy, RandomPolicy};
use crate::repository::{AgentLog, MemoryAgentLog};
use crate::utils::state_root;

/// Seed stream for random policies, disjoint from the setup streams.
const POLICY_STREAM: u32 = 16;

/// Final result of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_index: usize,
    pub seed: u64,
    pub winner: Role,
    pub reason: WinReason,
    pub timesteps: u32,
    /// Applied plus forfeited turns.
    pub turns: u64,
    pub impostors: Vec<String>,
    pub survivors: Vec<String>,
    /// Completed and total crewmate task steps.
    pub task_progress: (usize, usize),
    pub state_root: String,
}

/// Builder for [`Game`] with flexible configuration.
pub struct GameBuilder {
    index: usize,
    config: GameConfig,
    oracles: Option<OracleManager>,
    agents: AgentConfig,
    log: Option<Arc<dyn AgentLog>>,
    completion: Option<Arc<dyn CompletionClient>>,
    policies: BTreeMap<PlayerId, Box<dyn DecisionPolicy>>,
    events: Option<EventBus>,
}

impl GameBuilder {
    fn new() -> Self {
        Self {
            index: 0,
            config: GameConfig::default(),
            oracles: None,
            agents: AgentConfig::default(),
            log: None,
            completion: None,
            policies: BTreeMap::new(),
            events: None,
        }
    }

    /// Index of this game inside its batch, used to tag logs.
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Map shared with other games; the Skeld layout when unset.
    pub fn map(mut self, map: Arc<dyn MapOracle>) -> Self {
        self.oracles = Some(OracleManager::new(map));
        self
    }

    pub fn agents(mut self, agents: AgentConfig) -> Self {
        self.agents = agents;
        self
    }

    /// Agent log sink; an in-memory log when unset.
    pub fn log(mut self, log: Arc<dyn AgentLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn completion_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.completion = Some(client);
        self
    }

    /// Replaces the configured policy of one roster slot.
    pub fn policy(mut self, player: PlayerId, policy: impl DecisionPolicy + 'static) -> Self {
        self.policies.insert(player, Box::new(policy));
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Runs setup.
    ///
    /// # Errors
    ///
    /// Configuration and invariant errors abort before any agent exists; a
    /// missing completion client fails once the first LLM agent is built.
    pub fn build(mut self) -> Result<Game> {
        let oracles = self.oracles.take().unwrap_or_default();
        let mut config = self.config.clone();
        if !self.agents.personalities.is_empty() {
            config.personalities = self.agents.personalities.clone();
        }

        let state = GameState::initialize(config, &oracles.as_game_env())?;
        let roster = state.impostors.clone();
        roster.verify(&state.players, state.config.num_impostors)?;

        let log = self
            .log
            .take()
            .unwrap_or_else(|| Arc::new(MemoryAgentLog::new()));
        let mut shells = Vec::with_capacity(state.players.len());
        for player in &state.players {
            let identity = AgentIdentity::from_player(player);
            let policy = self.policy_for(&identity, state.config.seed)?;
            let shell = AgentShell::new(identity, &roster, policy, log.clone())?
                .with_timeout(self.agents.decision_timeout)
                .with_game_index(self.index);
            shells.push(shell);
        }

        tracing::info!(
            target: "runtime::game",
            game = self.index,
            players = state.players.len(),
            impostors = ?roster.names(),
            "game initialized"
        );

        Ok(Game {
            index: self.index,
            state,
            oracles,
            shells,
            events: self.events.unwrap_or_default(),
        })
    }

    fn policy_for(
        &mut self,
        identity: &AgentIdentity,
        seed: u64,
    ) -> Result<Box<dyn DecisionPolicy>> {
        if let Some(policy) = self.policies.remove(&identity.player) {
            return Ok(policy);
        }

        match self.agents.policy_for(identity.role) {
            PolicyKind::Random => Ok(Box::new(RandomPolicy::new(compute_seed(
                seed,
                POLICY_STREAM,
                u64::from(identity.player.0),
            )))),
            PolicyKind::Llm => {
                let client = self.completion.clone().ok_or_else(|| {
                    RuntimeError::CompletionClientMissing {
                        player: identity.name.clone(),
                    }
                })?;
                Ok(Box::new(LlmPolicy::new(client, self.agents.model.clone())))
            }
        }
    }
}

/// One running game.
pub struct Game {
    index: usize,
    state: GameState,
    oracles: OracleManager,
    shells: Vec<AgentShell>,
    events: EventBus,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// Sets up a game with an in-memory agent log and no completion client.
    ///
    /// # Errors
    ///
    /// See [`GameBuilder::build`].
    pub fn initialize(
        config: GameConfig,
        map: Arc<dyn MapOracle>,
        agents: AgentConfig,
    ) -> Result<Self> {
        Self::builder().config(config).map(map).agents(agents).build()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn impostors(&self) -> &ImpostorRoster {
        &self.state.impostors
    }

    pub fn agents(&self) -> &[AgentShell] {
        &self.shells
    }

    pub fn agent(&self, player: PlayerId) -> Option<&AgentShell> {
        self.shells.get(player.index())
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Plays one turn: observe, decide, apply, advance.
    ///
    /// Illegal actions and failed decisions forfeit the turn. Returns `None`
    /// once the game is over.
    ///
    /// # Errors
    ///
    /// Only engine or observation failures that indicate a broken state.
    pub async fn step(&mut self) -> Result<Option<ExecutionOutcome>> {
        let Some(actor) = current_actor(&self.state) else {
            return Ok(None);
        };

        let observation = observe(&self.state, &self.oracles.as_game_env(), actor)?;
        self.events.publish(Event::Turn(TurnEvent {
            game_index: self.index,
            player: actor,
            timestep: self.state.turn.timestep,
            phase: self.state.phase,
        }));

        let shell =
            self.shells
                .get_mut(actor.index())
                .ok_or_else(|| RuntimeError::MissingAgent {
                    game_index: self.index,
                    player: observation.name.clone(),
                })?;
        let decision = shell.act(&observation).await;

        let env = self.oracles.as_game_env();
        let mut engine = GameEngine::new(&mut self.state);
        let outcome = match decision {
            Ok(decision) => match engine.execute(&env, actor, &decision.action) {
                Ok(outcome) => outcome,
                Err(error @ ExecuteError::Illegal { .. }) => {
                    tracing::warn!(
                        target: "runtime::game",
                        game = self.index,
                        player = %observation.name,
                        %error,
                        "illegal action, turn forfeited"
                    );
                    engine.forfeit(&env, actor, "illegal action")?
                }
                Err(error) => return Err(error.into()),
            },
            Err(error) => {
                tracing::warn!(
                    target: "runtime::game",
                    game = self.index,
                    player = %observation.name,
                    %error,
                    "decision failed, turn forfeited"
                );
                engine.forfeit(&env, actor, error.forfeit_reason())?
            }
        };

        self.publish_outcome(actor, &observation, &outcome);
        Ok(Some(outcome))
    }

    fn publish_outcome(
        &self,
        actor: PlayerId,
        observation: &game_core::Observation,
        outcome: &ExecutionOutcome,
    ) {
        let event = match &outcome.applied {
            Some(action) => {
                tracing::debug!(
                    target: "runtime::game",
                    game = self.index,
                    timestep = %observation.timestep,
                    player = %observation.name,
                    action = %describe_choice(observation, action),
                    "turn applied"
                );
                GameStateEvent::ActionApplied {
                    game_index: self.index,
                    actor,
                    action: action.clone(),
                    events: outcome.events.clone(),
                }
            }
            None => GameStateEvent::TurnForfeited {
                game_index: self.index,
                actor,
                reason: outcome
                    .events
                    .iter()
                    .find_map(|event| match &event.kind {
                        game_core::EventKind::TurnForfeited { reason } => Some(reason.clone()),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
        };
        self.events.publish(Event::GameState(event));

        if observation.phase != outcome.phase {
            tracing::info!(
                target: "runtime::game",
                game = self.index,
                timestep = %self.state.turn.timestep,
                phase = %outcome.phase.label(),
                "phase changed"
            );
        }

        if let Phase::GameOver { winner, reason } = outcome.phase {
            self.events
                .publish(Event::GameState(GameStateEvent::GameOver {
                    game_index: self.index,
                    winner,
                    reason,
                    timestep: self.state.turn.timestep,
                }));
        }
    }

    /// Plays until a win condition fires.
    ///
    /// # Errors
    ///
    /// Propagates [`Game::step`] failures.
    pub async fn run(&mut self) -> Result<GameSummary> {
        while self.step().await?.is_some() {}
        let summary = self.summary()?;

        tracing::info!(
            target: "runtime::game",
            game = self.index,
            winner = %summary.winner,
            reason = %summary.reason,
            timesteps = summary.timesteps,
            "game finished"
        );
        Ok(summary)
    }

    /// Summary of a finished game.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NotFinished`] while the game is still running.
    pub fn summary(&self) -> Result<GameSummary> {
        let Phase::GameOver { winner, reason } = self.state.phase else {
            return Err(RuntimeError::NotFinished {
                game_index: self.index,
            });
        };

        Ok(GameSummary {
            game_index: self.index,
            seed: self.state.config.seed,
            winner,
            reason,
            timesteps: self.state.turn.timestep.0,
            turns: self.state.turn.nonce,
            impostors: self.state.impostors.names().to_vec(),
            survivors: self
                .state
                .living()
                .map(|player| player.name.clone())
                .collect(),
            task_progress: self.state.task_progress(),
            state_root: state_root(&self.state)?,
        })
    }
}
