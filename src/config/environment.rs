// ABOUTME: Environment-variable configuration for the parser, LLM backend, and exercise index
// ABOUTME: Provides defaults, validation, and a secret-free startup summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::knowledge::{WeaviateConfig, DEFAULT_COLLECTION};
use crate::llm::{
    OpenAiCompatibleConfig, LOCAL_DEFAULT_MODEL, WRITER_DEFAULT_BASE_URL, WRITER_DEFAULT_MODEL,
};
use stride_core::constants::parsing::{
    DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_GENERATIVE_TIMEOUT_MS,
    DEFAULT_KNOWLEDGE_OVERRIDE_SIMILARITY, DEFAULT_KNOWLEDGE_TIMEOUT_MS, DEFAULT_KNOWLEDGE_TOP_K,
    DEFAULT_LOW_CONFIDENCE, DEFAULT_SUMMARY_CHAR_BUDGET,
};

/// Thresholds, budgets and timeouts for one parse pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Candidates requested from the knowledge store
    pub top_k: usize,
    /// Minimum confidence for a generative draft to win outright
    pub acceptance_threshold: f64,
    /// Similarity at which the top candidate overrides a generative sport type
    pub knowledge_override_similarity: f64,
    /// Confidence given to generative drafts with an unknown sport type
    pub low_confidence: f64,
    /// Character budget for the candidate summary
    pub summary_char_budget: usize,
    /// Knowledge lookup time budget
    pub knowledge_timeout: Duration,
    /// Generative extraction time budget
    pub generative_timeout: Duration,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_KNOWLEDGE_TOP_K,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            knowledge_override_similarity: DEFAULT_KNOWLEDGE_OVERRIDE_SIMILARITY,
            low_confidence: DEFAULT_LOW_CONFIDENCE,
            summary_char_budget: DEFAULT_SUMMARY_CHAR_BUDGET,
            knowledge_timeout: Duration::from_millis(DEFAULT_KNOWLEDGE_TIMEOUT_MS),
            generative_timeout: Duration::from_millis(DEFAULT_GENERATIVE_TIMEOUT_MS),
        }
    }
}

impl ParserConfig {
    /// Load parser settings, falling back to defaults for unset variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but unparseable, or
    /// if the resulting settings fail [`ParserConfig::validate`].
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let config = Self {
            top_k: parse_env("STRIDE_KNOWLEDGE_TOP_K", defaults.top_k)?,
            acceptance_threshold: parse_env(
                "STRIDE_ACCEPTANCE_THRESHOLD",
                defaults.acceptance_threshold,
            )?,
            knowledge_override_similarity: parse_env(
                "STRIDE_OVERRIDE_SIMILARITY",
                defaults.knowledge_override_similarity,
            )?,
            low_confidence: defaults.low_confidence,
            summary_char_budget: parse_env(
                "STRIDE_SUMMARY_CHAR_BUDGET",
                defaults.summary_char_budget,
            )?,
            knowledge_timeout: Duration::from_millis(parse_env(
                "STRIDE_KNOWLEDGE_TIMEOUT_MS",
                DEFAULT_KNOWLEDGE_TIMEOUT_MS,
            )?),
            generative_timeout: Duration::from_millis(parse_env(
                "STRIDE_GENERATIVE_TIMEOUT_MS",
                DEFAULT_GENERATIVE_TIMEOUT_MS,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are probabilities and budgets are non-zero
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first invalid setting.
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("acceptance_threshold", self.acceptance_threshold),
            ("knowledge_override_similarity", self.knowledge_override_similarity),
            ("low_confidence", self.low_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.top_k == 0 {
            return Err(AppError::config("top_k must be at least 1"));
        }
        if self.knowledge_timeout.is_zero() || self.generative_timeout.is_zero() {
            return Err(AppError::config("timeouts must be greater than zero"));
        }
        if self.low_confidence >= self.acceptance_threshold {
            warn!(
                "low_confidence ({}) is not below acceptance_threshold ({}); unknown sport types will be accepted",
                self.low_confidence, self.acceptance_threshold
            );
        }
        Ok(())
    }
}

/// Which generative endpoint is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerativeBackend {
    /// Writer Palmyra API
    Writer,
    /// Local `OpenAI`-compatible server (Ollama, vLLM)
    Local,
}

/// Settings for the generative-language service
#[derive(Debug, Clone)]
pub struct GenerativeServiceConfig {
    /// Selected backend
    pub backend: GenerativeBackend,
    /// API base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer key, required for Writer
    pub api_key: Option<String>,
}

impl GenerativeServiceConfig {
    /// Load from `WRITER_*`, else `LOCAL_LLM_BASE_URL`/`LOCAL_LLM_*`
    ///
    /// Returns `None` when neither backend is configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        if let Some(api_key) = non_empty_env("WRITER_API_KEY") {
            return Some(Self {
                backend: GenerativeBackend::Writer,
                base_url: non_empty_env("WRITER_BASE_URL")
                    .unwrap_or_else(|| WRITER_DEFAULT_BASE_URL.to_owned()),
                model: non_empty_env("WRITER_MODEL")
                    .unwrap_or_else(|| WRITER_DEFAULT_MODEL.to_owned()),
                api_key: Some(api_key),
            });
        }

        non_empty_env("LOCAL_LLM_BASE_URL").map(|base_url| Self {
            backend: GenerativeBackend::Local,
            base_url,
            model: non_empty_env("LOCAL_LLM_MODEL")
                .unwrap_or_else(|| LOCAL_DEFAULT_MODEL.to_owned()),
            api_key: non_empty_env("LOCAL_LLM_API_KEY"),
        })
    }

    /// Provider configuration for this service
    #[must_use]
    pub fn provider_config(&self) -> OpenAiCompatibleConfig {
        match self.backend {
            GenerativeBackend::Writer => OpenAiCompatibleConfig::writer(
                self.api_key.clone().unwrap_or_default(),
                &self.model,
            )
            .with_base_url(self.base_url.clone()),
            GenerativeBackend::Local => OpenAiCompatibleConfig::local(
                self.base_url.clone(),
                &self.model,
                self.api_key.clone(),
            ),
        }
    }
}

/// Settings for the semantic exercise index
#[derive(Debug, Clone)]
pub struct KnowledgeStoreConfig {
    /// Weaviate base URL
    pub url: String,
    /// Optional API key
    pub api_key: Option<String>,
    /// Class holding exercise concepts
    pub collection: String,
}

impl KnowledgeStoreConfig {
    /// Load from `WEAVIATE_URL`, `WEAVIATE_API_KEY`, `WEAVIATE_COLLECTION`
    ///
    /// Returns `None` when `WEAVIATE_URL` is unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        non_empty_env("WEAVIATE_URL").map(|url| Self {
            url,
            api_key: non_empty_env("WEAVIATE_API_KEY"),
            collection: non_empty_env("WEAVIATE_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_owned()),
        })
    }

    /// Index client configuration
    #[must_use]
    pub fn weaviate_config(&self) -> WeaviateConfig {
        WeaviateConfig {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            collection: self.collection.clone(),
        }
    }
}

/// Complete agent configuration
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Pipeline thresholds and budgets
    pub parser: ParserConfig,
    /// Generative service, if any
    pub generative: Option<GenerativeServiceConfig>,
    /// Knowledge store, if any
    pub knowledge: Option<KnowledgeStoreConfig>,
}

impl AgentConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if parser settings are present but invalid.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        let config = Self {
            parser: ParserConfig::from_env()?,
            generative: GenerativeServiceConfig::from_env(),
            knowledge: KnowledgeStoreConfig::from_env(),
        };
        if config.generative.is_none() {
            warn!("No generative service configured (WRITER_API_KEY or LOCAL_LLM_BASE_URL); using deterministic extraction only");
        }
        if config.knowledge.is_none() {
            warn!("WEAVIATE_URL not set; exercise knowledge enrichment disabled");
        }
        Ok(config)
    }

    /// Human-readable summary without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Stride Agent Configuration:\n\
             - Generative Service: {}\n\
             - Knowledge Store: {}\n\
             - Top K: {}\n\
             - Acceptance Threshold: {}\n\
             - Override Similarity: {}\n\
             - Timeouts: knowledge {}ms, generative {}ms",
            self.generative.as_ref().map_or_else(
                || "Disabled".to_owned(),
                |g| format!("{:?} ({} @ {})", g.backend, g.model, g.base_url)
            ),
            self.knowledge.as_ref().map_or_else(
                || "Disabled".to_owned(),
                |k| format!("Weaviate ({} @ {})", k.collection, k.url)
            ),
            self.parser.top_k,
            self.parser.acceptance_threshold,
            self.parser.knowledge_override_similarity,
            self.parser.knowledge_timeout.as_millis(),
            self.parser.generative_timeout.as_millis(),
        )
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    non_empty_env(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value {raw:?}: {e}")))
    })
}
