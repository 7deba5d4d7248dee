//! Agent-side configuration: which policy plays which role.

use std::time::Duration;

use game_core::Role;

/// Decision policy family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PolicyKind {
    Random,
    Llm,
}

/// Named policy line-ups, e.g. `crewmate_llm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AgentPreset {
    AllRandom,
    AllLlm,
    CrewmateLlm,
    ImpostorLlm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub crewmate: PolicyKind,
    pub impostor: PolicyKind,
    pub decision_timeout: Duration,
    /// Model name passed to the completion client.
    pub model: String,
    /// Personality tags in roster order (cycled); overrides the game config's
    /// list when non-empty.
    pub personalities: Vec<String>,
}

impl AgentConfig {
    pub const DEFAULT_DECISION_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_MODEL: &'static str = "meta-llama/llama-3.3-70b-instruct";

    pub fn new(crewmate: PolicyKind, impostor: PolicyKind) -> Self {
        Self {
            crewmate,
            impostor,
            decision_timeout: Self::DEFAULT_DECISION_TIMEOUT,
            model: Self::DEFAULT_MODEL.to_string(),
            personalities: Vec::new(),
        }
    }

    pub fn all_random() -> Self {
        Self::new(PolicyKind::Random, PolicyKind::Random)
    }

    pub fn all_llm() -> Self {
        Self::new(PolicyKind::Llm, PolicyKind::Llm)
    }

    /// LLM crewmates against random impostors.
    pub fn crewmate_llm() -> Self {
        Self::new(PolicyKind::Llm, PolicyKind::Random)
    }

    /// LLM impostors against random crewmates.
    pub fn impostor_llm() -> Self {
        Self::new(PolicyKind::Random, PolicyKind::Llm)
    }

    pub fn from_preset(preset: AgentPreset) -> Self {
        match preset {
            AgentPreset::AllRandom => Self::all_random(),
            AgentPreset::AllLlm => Self::all_llm(),
            AgentPreset::CrewmateLlm => Self::crewmate_llm(),
            AgentPreset::ImpostorLlm => Self::impostor_llm(),
        }
    }

    /// Looks up a preset by name, see [`AgentPreset`].
    pub fn preset(name: &str) -> Option<Self> {
        name.parse().ok().map(Self::from_preset)
    }

    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn policy_for(&self, role: Role) -> PolicyKind {
        match role {
            Role::Crewmate => self.crewmate,
            Role::Impostor => self.impostor,
        }
    }

    pub fn needs_completion_client(&self) -> bool {
        self.crewmate == PolicyKind::Llm || self.impostor == PolicyKind::Llm
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::all_random()
    }
}
