// ABOUTME: Knowledge store client for semantic exercise lookup with graceful degradation
// ABOUTME: Wraps an optional exercise index and never surfaces backend failures to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Knowledge Store Client
//!
//! [`ExerciseIndex`] is the raw, fallible backend (Weaviate in production, fixed
//! lists in tests). [`KnowledgeStoreClient`] is what the pipeline holds: an
//! unconfigured client behaves exactly like a reachable store with no matches,
//! so callers never branch on availability.

mod weaviate;

pub use weaviate::{WeaviateConfig, WeaviateExerciseIndex, DEFAULT_COLLECTION};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::errors::AppError;
use crate::models::{rank_candidates, ExerciseCandidate};
use stride_core::constants::parsing::DEFAULT_KNOWLEDGE_TIMEOUT_MS;

/// Similarity search over a corpus of exercise concepts
#[async_trait]
pub trait ExerciseIndex: Send + Sync {
    /// Backend identifier used in logs
    fn name(&self) -> &'static str;

    /// Return up to `limit` candidates similar to `phrase`, in any order
    async fn search(&self, phrase: &str, limit: usize) -> Result<Vec<ExerciseCandidate>, AppError>;
}

/// Never-failing lookup client used by the parse pipeline
#[derive(Clone)]
pub struct KnowledgeStoreClient {
    index: Option<Arc<dyn ExerciseIndex>>,
    timeout: Duration,
}

impl KnowledgeStoreClient {
    /// Client backed by `index`, giving up after `timeout`
    #[must_use]
    pub fn new(index: Arc<dyn ExerciseIndex>, timeout: Duration) -> Self {
        Self {
            index: Some(index),
            timeout,
        }
    }

    /// Client with no backing store; every lookup returns no candidates
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            index: None,
            timeout: Duration::from_millis(DEFAULT_KNOWLEDGE_TIMEOUT_MS),
        }
    }

    /// Whether a backing store is attached
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.index.is_some()
    }

    /// Ranked candidates for `phrase`, at most `top_k`
    ///
    /// Ordered by similarity descending, ties by name. Backend errors and
    /// timeouts degrade to an empty list with a warning.
    #[instrument(skip(self, phrase), fields(phrase_len = phrase.len()))]
    pub async fn lookup(&self, phrase: &str, top_k: usize) -> Vec<ExerciseCandidate> {
        let Some(index) = &self.index else {
            debug!("Knowledge store not configured, continuing without enrichment");
            return Vec::new();
        };
        if top_k == 0 {
            return Vec::new();
        }

        let mut candidates = match timeout(self.timeout, index.search(phrase, top_k)).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                warn!("Knowledge store '{}' lookup failed: {}", index.name(), e);
                return Vec::new();
            }
            Err(_) => {
                warn!(
                    "Knowledge store '{}' lookup timed out after {:?}",
                    index.name(),
                    self.timeout
                );
                return Vec::new();
            }
        };

        rank_candidates(&mut candidates);
        candidates.truncate(top_k);
        debug!(
            count = candidates.len(),
            top = candidates.first().map(|c| c.name.as_str()),
            "Knowledge lookup complete"
        );
        candidates
    }
}

impl Default for KnowledgeStoreClient {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl std::fmt::Debug for KnowledgeStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStoreClient")
            .field("index", &self.index.as_ref().map(|i| i.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
