use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use game_content::StaticMap;
use game_core::GameConfig;
use runtime::providers::llm::{CompletionClient, CompletionRequest};
use runtime::{AgentConfig, DecisionError, FileAgentLog, Game, MemoryAgentLog};
use serde_json::Value;
use tempfile::TempDir;

/// Answers with the first available action, counting its own turns in memory.
struct FirstChoice;

#[async_trait]
impl CompletionClient for FirstChoice {
    async fn complete(&self, request: CompletionRequest) -> Result<String, DecisionError> {
        let choice = request
            .prompt
            .split("Available Actions:")
            .nth(1)
            .and_then(|actions| actions.lines().map(str::trim).find(|line| !line.is_empty()))
            .ok_or_else(|| DecisionError::Completion("no actions in prompt".to_string()))?;
        let choice = match choice.split_once(". ") {
            Some((_, "SPEAK")) => "SPEAK: \"Nothing suspicious so far.\"",
            Some((_, action)) => action,
            None => choice,
        };
        Ok(format!(
            "[Condensed Memory]\nSeen the list of actions.\n[Thinking Process]\nTake the first option.\n[Action]\n{choice}"
        ))
    }
}

#[tokio::test]
async fn file_log_holds_full_and_compact_records() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(FileAgentLog::create(dir.path().join("logs")).unwrap());

    let mut config = GameConfig::five_member().with_seed(12);
    config.max_timesteps = 4;
    let mut game = Game::builder()
        .index(1)
        .config(config)
        .log(log.clone())
        .build()
        .unwrap();
    game.run().await.unwrap();

    let full = fs::read_to_string(log.full_path()).unwrap();
    let compact = fs::read_to_string(log.compact_path()).unwrap();
    assert!(!full.is_empty());
    assert_eq!(full.lines().count(), compact.lines().count());

    let first: Value = serde_json::from_str(compact.lines().next().unwrap()).unwrap();
    assert_eq!(first["game_index"], 1);
    let response = &first["interaction"]["response"];
    for key in ["Condensed Memory", "Thinking Process", "Action"] {
        assert!(response.get(key).is_some(), "compact record lacks {key}");
    }
    assert!(first["interaction"].get("system_prompt").is_none());

    let first: Value = serde_json::from_str(full.lines().next().unwrap()).unwrap();
    assert_eq!(
        first["interaction"]["response"]["Condensed Memory"],
        "No memory has been processed."
    );
    let prompt = first["interaction"]["prompt"].as_str().unwrap();
    assert!(prompt.contains("Game Time: 0/4"));
    assert!(prompt.contains("Available Actions:"));
}

#[tokio::test]
async fn llm_agents_carry_their_memory_between_turns() {
    let log = Arc::new(MemoryAgentLog::new());
    let mut config = GameConfig::five_member().with_seed(30);
    config.max_timesteps = 3;

    let mut game = Game::builder()
        .config(config)
        .map(Arc::new(StaticMap::skeld()))
        .agents(AgentConfig::all_llm())
        .completion_client(Arc::new(FirstChoice))
        .log(log.clone())
        .build()
        .unwrap();
    assert!(game.agents().iter().all(|agent| agent.policy_kind() == "llm"));

    game.run().await.unwrap();
    assert!(game.agents().iter().all(|agent| {
        agent.memory() == "Seen the list of actions."
    }));

    let records = log.records().unwrap();
    assert!(!records.is_empty());
    let first = &records[0];
    assert!(
        first
            .interaction
            .prompt
            .starts_with("Memory: No memory has been processed.")
    );
    assert_eq!(
        first.interaction.response.condensed_memory,
        "Seen the list of actions."
    );
    assert!(
        records
            .iter()
            .any(|record| record.interaction.prompt.contains("Memory: Seen the list of actions."))
    );
}
