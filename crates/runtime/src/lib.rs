//! Runtime orchestration for hidden-role games played by agents.
//!
//! This crate wires the deterministic rules of `game-core` to decision
//! policies, agent logs and an event bus. Consumers build a [`Game`] (or a
//! whole batch through [`run_batch`]) and drive it turn by turn.
//!
//! Modules are organized by responsibility:
//! - [`game`] hosts the orchestrator and its builder
//! - [`agent`] binds one player to a policy and keeps its memory
//! - [`providers`] contains the random and LLM decision policies
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod agent;
pub mod api;
pub mod batch;
pub mod config;
pub mod events;
pub mod game;
pub mod oracle;
pub mod providers;
pub mod repository;
pub mod utils;

pub use agent::AgentShell;
pub use api::{
    AgentContext, AgentIdentity, Decision, DecisionError, DecisionPolicy, Result, RuntimeError,
};
pub use batch::{BatchConfig, run_batch};
pub use config::{AgentConfig, AgentPreset, PolicyKind};
pub use events::{Event, EventBus, GameStateEvent, Topic, TurnEvent};
pub use game::{Game, GameBuilder, GameSummary};
pub use oracle::OracleManager;
pub use providers::{CompletionClient, CompletionRequest, LlmPolicy, RandomPolicy};
pub use repository::{
    AgentLog, AgentLogRecord, AgentResponse, FileAgentLog, MemoryAgentLog, RepositoryError,
};
