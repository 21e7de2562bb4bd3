// ABOUTME: Integration tests for the knowledge store client
// ABOUTME: Validates ranking, truncation, and degradation to empty results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    hiit_candidate, init_test_logging, knowledge, running_candidate, yoga_candidate, FailingIndex,
    FixedIndex, SlowIndex,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use stride_agent::knowledge::{KnowledgeStoreClient, WeaviateConfig, WeaviateExerciseIndex};
use stride_agent::models::ExerciseCandidate;

fn names(candidates: &[ExerciseCandidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn test_unconfigured_client_returns_no_candidates() {
    init_test_logging();
    let client = KnowledgeStoreClient::unconfigured();
    assert!(!client.is_configured());
    assert!(client.lookup("ran 5k", 5).await.is_empty());
}

#[tokio::test]
async fn test_results_ranked_by_score_then_name() {
    let index = FixedIndex::new(vec![
        yoga_candidate(0.4),
        running_candidate(0.9),
        ExerciseCandidate::new("Jogging", "Run", 0.9),
        hiit_candidate(0.7),
    ]);
    let client = knowledge(index.clone());

    let candidates = client.lookup("morning jog", 5).await;
    assert_eq!(names(&candidates), vec!["Jogging", "Running", "HIIT Training", "Yoga"]);
    assert_eq!(index.calls(), 1);
}

#[tokio::test]
async fn test_results_truncated_to_top_k() {
    let index = FixedIndex::new(vec![
        yoga_candidate(0.4),
        running_candidate(0.9),
        hiit_candidate(0.7),
    ]);
    let client = knowledge(index);

    let candidates = client.lookup("workout", 2).await;
    assert_eq!(names(&candidates), vec!["Running", "HIIT Training"]);
    assert!(client.lookup("workout", 0).await.is_empty());
}

#[tokio::test]
async fn test_backend_errors_degrade_to_empty() {
    init_test_logging();
    let client = knowledge(Arc::new(FailingIndex));
    assert!(client.is_configured());
    assert!(client.lookup("ran 5k", 5).await.is_empty());
}

#[tokio::test]
async fn test_slow_backend_times_out_to_empty() {
    let index = Arc::new(SlowIndex {
        delay: Duration::from_secs(2),
        candidates: vec![running_candidate(0.9)],
    });
    let client = KnowledgeStoreClient::new(index, Duration::from_millis(50));

    let started = Instant::now();
    assert!(client.lookup("ran 5k", 5).await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_unreachable_weaviate_degrades_to_empty() {
    init_test_logging();
    // Nothing listens on the discard port locally
    let index = WeaviateExerciseIndex::new(
        WeaviateConfig::new("http://127.0.0.1:9"),
        Duration::from_millis(500),
    )
    .unwrap();
    let client = KnowledgeStoreClient::new(Arc::new(index), Duration::from_secs(1));

    assert!(client.lookup("yoga", 5).await.is_empty());
}
