// ABOUTME: Parse orchestrator driving knowledge lookup, generative and fallback extraction
// ABOUTME: Explicit state machine producing an ActivityRecord or a terminal ParseFailure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Parse Orchestrator
//!
//! ```text
//! Start -> LookupKnowledge -> BuildContext -> TryGenerative -+-> Reconcile -> Done
//!   |                                              |          |      |
//!   v                                              v          |      v
//! Failed(EmptyInput)                          TryFallback ----+   Failed(NoDurationDetected)
//!                                                  |
//!                                                  v
//!                                        Failed(NoSportTypeDetected)
//! ```
//!
//! Every external failure has already been absorbed by the adapters, so the
//! only failures leaving this module are the three [`ParseFailure`] reasons.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::generative::GenerativeExtractor;
use crate::config::{AgentConfig, ParserConfig};
use crate::errors::{AppResult, ExtractionFailure, ParseFailure};
use crate::knowledge::{KnowledgeStoreClient, WeaviateExerciseIndex};
use crate::llm::OpenAiCompatibleProvider;
use crate::models::{
    ActivityContext, ActivityRecord, DescriptionStyle, DraftSource, ExerciseCandidate,
    ParsedActivityDraft, SportType,
};
use stride_intelligence::{
    default_description, default_name, detect_context_cues, extract_fallback,
    scan_distance_meters, scan_duration_seconds, ContextEnrichmentBuilder, EnrichedContext,
};

/// Named stage of one parse call, recorded in [`ParseReport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    /// Input validation
    Start,
    /// Knowledge store query
    LookupKnowledge,
    /// Candidate summary construction
    BuildContext,
    /// Generative extraction attempt
    TryGenerative,
    /// Deterministic extraction
    TryFallback,
    /// Final record assembly
    Reconcile,
    /// Record produced
    Done,
    /// Terminal failure
    Failed,
}

/// Fields kept from a rejected generative draft
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftHints {
    /// Suggested name
    pub name: Option<String>,
    /// Suggested description seed
    pub description_seed: Option<String>,
    /// Requested description tone
    pub description_style: Option<DescriptionStyle>,
    /// Context cues the service found
    pub context: ActivityContext,
}

impl DraftHints {
    fn from_draft(draft: ParsedActivityDraft) -> Self {
        Self {
            name: draft.name,
            description_seed: draft.description_seed,
            description_style: draft.description_style,
            context: draft.context,
        }
    }

    fn apply_to(&self, draft: &mut ParsedActivityDraft) {
        if draft.name.is_none() {
            draft.name.clone_from(&self.name);
        }
        if draft.description_seed.is_none() {
            draft.description_seed.clone_from(&self.description_seed);
        }
        if draft.description_style.is_none() {
            draft.description_style = self.description_style;
        }
        draft.context.fill_from(&self.context);
    }
}

/// States of a single parse call
enum ParseState {
    Start,
    LookupKnowledge,
    BuildContext(Vec<ExerciseCandidate>),
    TryGenerative(EnrichedContext),
    TryFallback(EnrichedContext, DraftHints),
    Reconcile(EnrichedContext, ParsedActivityDraft),
    Done(ActivityRecord),
    Failed(ParseFailure),
}

impl ParseState {
    const fn stage(&self) -> ParseStage {
        match self {
            Self::Start => ParseStage::Start,
            Self::LookupKnowledge => ParseStage::LookupKnowledge,
            Self::BuildContext(_) => ParseStage::BuildContext,
            Self::TryGenerative(_) => ParseStage::TryGenerative,
            Self::TryFallback(..) => ParseStage::TryFallback,
            Self::Reconcile(..) => ParseStage::Reconcile,
            Self::Done(_) => ParseStage::Done,
            Self::Failed(_) => ParseStage::Failed,
        }
    }
}

/// Outcome of a traced parse call
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// Final record or terminal failure
    pub result: Result<ActivityRecord, ParseFailure>,
    /// Stages visited, in order
    pub stages: Vec<ParseStage>,
    /// Extractor whose draft was finalized
    pub source: Option<DraftSource>,
    /// Why the generative path was skipped, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generative_failure: Option<String>,
    /// Candidates returned by the knowledge store
    pub candidate_count: usize,
}

/// Hybrid natural-language activity parser
///
/// Holds no per-call state; one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct ActivityParser {
    config: ParserConfig,
    knowledge: KnowledgeStoreClient,
    generative: GenerativeExtractor,
    builder: ContextEnrichmentBuilder,
}

impl ActivityParser {
    /// Parser over explicit collaborators
    #[must_use]
    pub fn new(
        config: ParserConfig,
        knowledge: KnowledgeStoreClient,
        generative: GenerativeExtractor,
    ) -> Self {
        let builder = ContextEnrichmentBuilder::new(config.summary_char_budget);
        let generative = generative.with_low_confidence(config.low_confidence);
        Self {
            config,
            knowledge,
            generative,
            builder,
        }
    }

    /// Parser with no external services
    #[must_use]
    pub fn offline(config: ParserConfig) -> Self {
        Self::new(
            config,
            KnowledgeStoreClient::unconfigured(),
            GenerativeExtractor::unconfigured(),
        )
    }

    /// Build the parser and its HTTP adapters from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be created or the knowledge
    /// store settings are invalid.
    pub fn from_config(config: &AgentConfig) -> AppResult<Self> {
        let parser = &config.parser;

        let knowledge = match &config.knowledge {
            Some(settings) => {
                let index = WeaviateExerciseIndex::new(
                    settings.weaviate_config(),
                    parser.knowledge_timeout,
                )?;
                KnowledgeStoreClient::new(Arc::new(index), parser.knowledge_timeout)
            }
            None => KnowledgeStoreClient::unconfigured(),
        };

        let generative = match &config.generative {
            Some(settings) => {
                let provider = OpenAiCompatibleProvider::new(settings.provider_config())?;
                info!(
                    "Generative extraction via {:?} model {}",
                    settings.backend, settings.model
                );
                GenerativeExtractor::new(Arc::new(provider), parser.generative_timeout)
            }
            None => GenerativeExtractor::unconfigured(),
        };

        Ok(Self::new(parser.clone(), knowledge, generative))
    }

    /// Pipeline settings
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Whether a knowledge store is attached
    #[must_use]
    pub const fn has_knowledge_store(&self) -> bool {
        self.knowledge.is_configured()
    }

    /// Health of the generative service, `None` when none is configured
    pub async fn check_generative(&self) -> Option<bool> {
        self.generative.health_check().await
    }

    /// Convert free text into an activity record
    ///
    /// # Errors
    ///
    /// Returns the terminal [`ParseFailure`] when no record can be produced.
    pub async fn parse_activity_from_prompt(
        &self,
        text: &str,
    ) -> Result<ActivityRecord, ParseFailure> {
        self.parse_with_trace(text).await.result
    }

    /// Convert free text into an activity record, recording each stage
    #[instrument(skip(self, text), fields(prompt_len = text.len()))]
    pub async fn parse_with_trace(&self, text: &str) -> ParseReport {
        let mut report = ParseReport {
            result: Err(ParseFailure::EmptyInput),
            stages: Vec::new(),
            source: None,
            generative_failure: None,
            candidate_count: 0,
        };

        let mut state = ParseState::Start;
        loop {
            report.stages.push(state.stage());
            state = match state {
                ParseState::Start => {
                    if text.trim().is_empty() {
                        ParseState::Failed(ParseFailure::EmptyInput)
                    } else {
                        debug!("Parsing prompt: {}", preview(text));
                        ParseState::LookupKnowledge
                    }
                }
                ParseState::LookupKnowledge => {
                    let candidates = self.knowledge.lookup(text, self.config.top_k).await;
                    report.candidate_count = candidates.len();
                    ParseState::BuildContext(candidates)
                }
                ParseState::BuildContext(candidates) => {
                    ParseState::TryGenerative(self.builder.build(text, candidates))
                }
                ParseState::TryGenerative(context) => {
                    match self.generative.extract(&context).await {
                        Ok(draft) if self.accepts(&draft) => ParseState::Reconcile(context, draft),
                        Ok(draft) => {
                            debug!(
                                confidence = draft.confidence,
                                "Generative draft below acceptance threshold"
                            );
                            report.generative_failure = Some(format!(
                                "confidence {:.2} below threshold {:.2}",
                                draft.confidence, self.config.acceptance_threshold
                            ));
                            ParseState::TryFallback(context, DraftHints::from_draft(draft))
                        }
                        Err(failure) => {
                            log_extraction_failure(&failure);
                            report.generative_failure = Some(failure.to_string());
                            ParseState::TryFallback(context, DraftHints::default())
                        }
                    }
                }
                ParseState::TryFallback(context, hints) => {
                    let mut draft = extract_fallback(text, &context.candidates);
                    if draft.is_usable() {
                        hints.apply_to(&mut draft);
                        ParseState::Reconcile(context, draft)
                    } else {
                        ParseState::Failed(ParseFailure::NoSportTypeDetected)
                    }
                }
                ParseState::Reconcile(context, draft) => {
                    report.source = Some(draft.source);
                    self.reconcile(text, &context, draft)
                        .map_or_else(ParseState::Failed, ParseState::Done)
                }
                ParseState::Done(record) => {
                    info!(
                        sport = %record.sport_type,
                        duration_seconds = record.duration_seconds,
                        source = ?report.source,
                        "Activity parsed"
                    );
                    report.result = Ok(record);
                    break;
                }
                ParseState::Failed(failure) => {
                    info!(reason = failure.as_str(), "Activity parse failed");
                    report.result = Err(failure);
                    break;
                }
            };
        }
        report
    }

    fn accepts(&self, draft: &ParsedActivityDraft) -> bool {
        draft.is_usable() && draft.confidence >= self.config.acceptance_threshold
    }

    /// Top candidate's sport type when it should replace a generative one
    fn knowledge_override(
        &self,
        context: &EnrichedContext,
        generated: SportType,
    ) -> Option<SportType> {
        let top = context.top_candidate()?;
        let mapped = top.sport_type()?;
        (mapped != generated
            && top.similarity_score >= self.config.knowledge_override_similarity)
            .then_some(mapped)
    }

    fn reconcile(
        &self,
        text: &str,
        context: &EnrichedContext,
        draft: ParsedActivityDraft,
    ) -> Result<ActivityRecord, ParseFailure> {
        let ParsedActivityDraft {
            sport_type,
            name,
            duration_seconds,
            distance_meters,
            description_seed,
            description_style,
            source,
            context: mut cues,
            ..
        } = draft;
        let mut sport = sport_type.ok_or(ParseFailure::NoSportTypeDetected)?;

        if source == DraftSource::Generative {
            if let Some(mapped) = self.knowledge_override(context, sport) {
                debug!(
                    generated = %sport,
                    knowledge = %mapped,
                    "Knowledge candidate overrides generative sport type"
                );
                sport = mapped;
            }
            cues.fill_from(&detect_context_cues(text));
        }

        let duration_seconds = duration_seconds
            .or_else(|| scan_duration_seconds(text))
            .ok_or(ParseFailure::NoDurationDetected)?;
        let distance_meters = distance_meters
            .or_else(|| scan_distance_meters(text))
            .unwrap_or(0.0);

        let enrichment = context
            .top_candidate()
            .filter(|top| top.sport_type() == Some(sport))
            .map(ExerciseCandidate::enrichment_keywords)
            .filter(|keywords| !keywords.is_empty());

        let name = name.unwrap_or_else(|| default_name(sport, &cues));
        let description = description_seed.unwrap_or_else(|| {
            default_description(sport, duration_seconds, distance_meters, &cues)
        });

        Ok(ActivityRecord {
            sport_type: sport,
            name,
            description,
            description_style: description_style.unwrap_or_default(),
            duration_seconds,
            distance_meters,
            enrichment,
            context: cues,
        })
    }
}

fn log_extraction_failure(failure: &ExtractionFailure) {
    match failure {
        ExtractionFailure::Unavailable => {
            debug!("Generative service not configured, using deterministic extraction");
        }
        other => warn!("Generative extraction failed, falling back: {}", other),
    }
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 60;
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}
