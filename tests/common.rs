// ABOUTME: Shared test utilities and mock collaborators for integration tests
// ABOUTME: Provides scripted LLM providers, fixed exercise indexes, and parser builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `stride_agent`

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use stride_agent::config::ParserConfig;
use stride_agent::errors::AppError;
use stride_agent::knowledge::{ExerciseIndex, KnowledgeStoreClient};
use stride_agent::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use stride_agent::models::{ExerciseCandidate, Intensity};
use stride_agent::parsing::{ActivityParser, GenerativeExtractor};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// LLM providers
// ============================================================================

/// What a scripted provider does when called
pub enum Reply {
    /// Return this message content
    Content(String),
    /// Fail with this error
    Error(AppError),
    /// Sleep for this long, then return the content
    Delayed(Duration, String),
}

/// Provider that replays a fixed reply and counts calls
pub struct ScriptedProvider {
    reply: Reply,
    calls: AtomicUsize,
    capabilities: LlmCapabilities,
    last_request: std::sync::Mutex<Option<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            capabilities: LlmCapabilities::structured_output(),
            last_request: std::sync::Mutex::new(None),
        })
    }

    pub fn json(content: &str) -> Arc<Self> {
        Self::new(Reply::Content(content.to_owned()))
    }

    pub fn failing(error: AppError) -> Arc<Self> {
        Self::new(Reply::Error(error))
    }

    pub fn slow(delay: Duration, content: &str) -> Arc<Self> {
        Self::new(Reply::Delayed(delay, content.to_owned()))
    }

    pub fn text_only(content: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Content(content.to_owned()),
            calls: AtomicUsize::new(0),
            capabilities: LlmCapabilities::empty(),
            last_request: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let content = match &self.reply {
            Reply::Content(content) => content.clone(),
            Reply::Error(error) => return Err(AppError::new(error.code, error.message.clone())),
            Reply::Delayed(delay, content) => {
                tokio::time::sleep(*delay).await;
                content.clone()
            }
        };
        Ok(ChatResponse {
            content,
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match &self.reply {
            Reply::Content(_) => Ok(true),
            Reply::Error(error) => Err(AppError::new(error.code, error.message.clone())),
            Reply::Delayed(delay, _) => {
                tokio::time::sleep(*delay).await;
                Ok(true)
            }
        }
    }
}

// ============================================================================
// Exercise indexes
// ============================================================================

/// Index returning a fixed candidate list (in the given order) and counting calls
pub struct FixedIndex {
    candidates: Vec<ExerciseCandidate>,
    calls: AtomicUsize,
}

impl FixedIndex {
    pub fn new(candidates: Vec<ExerciseCandidate>) -> Arc<Self> {
        Arc::new(Self {
            candidates,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExerciseIndex for FixedIndex {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn search(
        &self,
        _phrase: &str,
        _limit: usize,
    ) -> Result<Vec<ExerciseCandidate>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates.clone())
    }
}

/// Index that always fails like an unreachable service
pub struct FailingIndex;

#[async_trait]
impl ExerciseIndex for FailingIndex {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn search(
        &self,
        _phrase: &str,
        _limit: usize,
    ) -> Result<Vec<ExerciseCandidate>, AppError> {
        Err(AppError::external_unavailable("Weaviate", "connection refused"))
    }
}

/// Index that answers only after a delay
pub struct SlowIndex {
    pub delay: Duration,
    pub candidates: Vec<ExerciseCandidate>,
}

#[async_trait]
impl ExerciseIndex for SlowIndex {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn search(
        &self,
        _phrase: &str,
        _limit: usize,
    ) -> Result<Vec<ExerciseCandidate>, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.candidates.clone())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn hiit_candidate(score: f64) -> ExerciseCandidate {
    ExerciseCandidate::new("HIIT Training", "HighIntensityIntervalTraining", score)
        .with_synonyms([
            "high intensity interval training",
            "tabata",
            "circuit training",
            "intervals",
        ])
        .with_equipment(["none"])
        .with_muscle_groups(["full body", "cardio"])
        .with_keywords(["burpees", "explosive"])
        .with_intensity(Intensity::High)
}

pub fn running_candidate(score: f64) -> ExerciseCandidate {
    ExerciseCandidate::new("Running", "Run", score)
        .with_synonyms(["jogging", "sprinting", "trail running"])
        .with_equipment(["running shoes"])
        .with_muscle_groups(["legs", "glutes"])
}

pub fn yoga_candidate(score: f64) -> ExerciseCandidate {
    ExerciseCandidate::new("Yoga", "Yoga", score)
        .with_synonyms(["vinyasa", "hatha"])
        .with_equipment(["yoga mat"])
        .with_muscle_groups(["core", "flexibility"])
        .with_intensity(Intensity::Low)
}

/// Parser config with short timeouts for tests
pub fn test_config() -> ParserConfig {
    ParserConfig {
        knowledge_timeout: Duration::from_millis(200),
        generative_timeout: Duration::from_millis(200),
        ..ParserConfig::default()
    }
}

pub fn knowledge(index: Arc<dyn ExerciseIndex>) -> KnowledgeStoreClient {
    KnowledgeStoreClient::new(index, Duration::from_millis(200))
}

pub fn generative(provider: Arc<dyn LlmProvider>) -> GenerativeExtractor {
    GenerativeExtractor::new(provider, Duration::from_millis(200))
}

/// Parser over the given collaborators; `None` means unconfigured
pub fn parser(
    index: Option<Arc<dyn ExerciseIndex>>,
    provider: Option<Arc<dyn LlmProvider>>,
) -> ActivityParser {
    init_test_logging();
    ActivityParser::new(
        test_config(),
        index.map_or_else(KnowledgeStoreClient::unconfigured, knowledge),
        provider.map_or_else(GenerativeExtractor::unconfigured, generative),
    )
}
