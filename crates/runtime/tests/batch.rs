use std::sync::Arc;

use game_content::StaticMap;
use game_core::{GameConfig, MapOracle};
use runtime::{AgentConfig, BatchConfig, MemoryAgentLog, RuntimeError, run_batch};

fn skeld() -> Arc<dyn MapOracle> {
    Arc::new(StaticMap::skeld())
}

#[tokio::test]
async fn batch_runs_independent_games_in_order() {
    let log = Arc::new(MemoryAgentLog::new());
    let config = BatchConfig::new(
        5,
        GameConfig::five_member().with_seed(500),
        AgentConfig::default(),
    )
    .with_max_concurrent(2);

    let summaries = run_batch(config, skeld(), log.clone(), None).await.unwrap();

    let indices: Vec<usize> = summaries.iter().map(|s| s.game_index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    for summary in &summaries {
        assert_eq!(summary.seed, 500 + summary.game_index as u64);
        assert_eq!(summary.impostors.len(), 1);
    }

    let records = log.records().unwrap();
    for index in 1..=5 {
        assert!(records.iter().any(|record| record.game_index == index));
    }
}

#[tokio::test]
async fn batch_matches_single_games() {
    let game = GameConfig::seven_member().with_seed(40);
    let batch = run_batch(
        BatchConfig::new(2, game.clone(), AgentConfig::default()),
        skeld(),
        Arc::new(MemoryAgentLog::new()),
        None,
    )
    .await
    .unwrap();

    let mut single = runtime::Game::builder()
        .index(2)
        .config(game.with_seed(42))
        .map(skeld())
        .build()
        .unwrap();
    assert_eq!(single.run().await.unwrap(), batch[1]);
}

#[tokio::test]
async fn llm_batch_without_client_fails_fast() {
    let result = run_batch(
        BatchConfig::new(2, GameConfig::five_member(), AgentConfig::impostor_llm()),
        skeld(),
        Arc::new(MemoryAgentLog::new()),
        None,
    )
    .await;
    assert!(matches!(
        result,
        Err(RuntimeError::CompletionClientMissing { .. })
    ));
}
