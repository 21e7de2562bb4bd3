// ABOUTME: Generative extractor adapter turning LLM replies into validated activity drafts
// ABOUTME: Applies strict schema validation and maps every failure to ExtractionFailure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Generative Extractor
//!
//! The reply is validated field by field at this boundary:
//!
//! - a reply that is not a JSON object carrying at least one schema key is an
//!   [`ExtractionFailure::MalformedResponse`]
//! - an absent or unknown `sport_type` keeps the draft but drops its confidence
//!   to the configured low value
//! - invalid numeric fields are dropped, never defaulted

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::errors::ExtractionFailure;
use crate::llm::prompts::{build_activity_request, get_activity_parser_prompt};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{
    ActivityContext, DescriptionStyle, DraftSource, ParsedActivityDraft, SportType,
};
use stride_core::constants::parsing::{
    DEFAULT_GENERATIVE_CONFIDENCE, DEFAULT_GENERATIVE_TIMEOUT_MS, DEFAULT_LOW_CONFIDENCE,
};
use stride_core::constants::units::{METERS_PER_KM, SECONDS_PER_MINUTE};
use stride_intelligence::EnrichedContext;

const EXTRACTION_TEMPERATURE: f32 = 0.1;
const EXTRACTION_MAX_TOKENS: u32 = 800;

const SCHEMA_KEYS: &[&str] = &[
    "sport_type",
    "name",
    "duration_seconds",
    "duration_minutes",
    "distance_meters",
    "distance_km",
    "description_seed",
    "description_style",
    "confidence",
    "context",
];

/// Adapter between the parse pipeline and a generative-language service
#[derive(Clone)]
pub struct GenerativeExtractor {
    provider: Option<Arc<dyn LlmProvider>>,
    timeout: Duration,
    low_confidence: f64,
}

impl GenerativeExtractor {
    /// Extractor backed by `provider` with a per-call time budget
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
            low_confidence: DEFAULT_LOW_CONFIDENCE,
        }
    }

    /// Extractor with no service; every call yields `Unavailable`
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            provider: None,
            timeout: Duration::from_millis(DEFAULT_GENERATIVE_TIMEOUT_MS),
            low_confidence: DEFAULT_LOW_CONFIDENCE,
        }
    }

    /// Confidence assigned to drafts whose sport type is missing or unknown
    #[must_use]
    pub const fn with_low_confidence(mut self, low_confidence: f64) -> Self {
        self.low_confidence = low_confidence;
        self
    }

    /// Whether a provider is attached
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Build the chat request for an enriched context
    #[must_use]
    pub fn build_request(&self, context: &EnrichedContext) -> ChatRequest {
        let allow_list = SportType::allow_list();
        let user = build_activity_request(
            &context.raw_prompt,
            &context.candidate_summary_text,
            &allow_list,
        );
        let system_supported = self
            .provider
            .as_ref()
            .map_or(true, |p| p.capabilities().supports_system_messages());

        let messages = if system_supported {
            vec![
                ChatMessage::system(get_activity_parser_prompt()),
                ChatMessage::user(user),
            ]
        } else {
            vec![ChatMessage::user(format!(
                "{}\n\n{user}",
                get_activity_parser_prompt()
            ))]
        };

        ChatRequest::new(messages)
            .with_temperature(EXTRACTION_TEMPERATURE)
            .with_max_tokens(EXTRACTION_MAX_TOKENS)
            .with_json_mode()
    }

    /// Ask the service for a draft
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionFailure`] when no service is configured, the call
    /// fails or exceeds its budget, or the reply does not match the schema.
    #[instrument(skip(self, context), fields(candidates = context.candidates.len()))]
    pub async fn extract(
        &self,
        context: &EnrichedContext,
    ) -> Result<ParsedActivityDraft, ExtractionFailure> {
        let Some(provider) = &self.provider else {
            return Err(ExtractionFailure::Unavailable);
        };

        let request = self.build_request(context);
        let response = match timeout(self.timeout, provider.complete(&request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Generative provider '{}' failed: {}", provider.name(), e);
                return Err(ExtractionFailure::from(e));
            }
            Err(_) => {
                let elapsed_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(
                    "Generative provider '{}' timed out after {}ms",
                    provider.name(),
                    elapsed_ms
                );
                return Err(ExtractionFailure::Timeout { elapsed_ms });
            }
        };

        let draft = parse_draft(&response.content, self.low_confidence)?;
        debug!(
            sport = ?draft.sport_type,
            confidence = draft.confidence,
            duration = ?draft.duration_seconds,
            "Generative draft validated"
        );
        Ok(draft)
    }

    /// Probe the attached service within the extraction budget
    ///
    /// Returns `None` when no service is configured. Errors and timeouts
    /// count as unhealthy.
    pub async fn health_check(&self) -> Option<bool> {
        let provider = self.provider.as_ref()?;
        let healthy = match timeout(self.timeout, provider.health_check()).await {
            Ok(Ok(healthy)) => healthy,
            Ok(Err(e)) => {
                warn!("Generative provider '{}' health check failed: {}", provider.name(), e);
                false
            }
            Err(_) => {
                warn!("Generative provider '{}' health check timed out", provider.name());
                false
            }
        };
        Some(healthy)
    }
}

impl std::fmt::Debug for GenerativeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeExtractor")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("timeout", &self.timeout)
            .field("low_confidence", &self.low_confidence)
            .finish()
    }
}

/// Validate a raw reply into a draft
///
/// # Errors
///
/// Returns [`ExtractionFailure::MalformedResponse`] when the reply is not a
/// JSON object or carries none of the schema keys.
pub fn parse_draft(
    content: &str,
    low_confidence: f64,
) -> Result<ParsedActivityDraft, ExtractionFailure> {
    let body = strip_code_fence(content);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ExtractionFailure::MalformedResponse(format!("not valid JSON: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(ExtractionFailure::MalformedResponse(
            "expected a JSON object".to_owned(),
        ));
    };
    if !SCHEMA_KEYS.iter().any(|key| fields.contains_key(*key)) {
        return Err(ExtractionFailure::MalformedResponse(
            "no recognised activity fields".to_owned(),
        ));
    }

    let sport_type = fields
        .get("sport_type")
        .and_then(Value::as_str)
        .and_then(SportType::from_provider_str);

    let confidence = if sport_type.is_some() {
        fields
            .get("confidence")
            .and_then(as_number)
            .filter(|c| c.is_finite())
            .map_or(DEFAULT_GENERATIVE_CONFIDENCE, |c| c.clamp(0.0, 1.0))
    } else {
        low_confidence
    };

    let duration_seconds = positive_seconds(fields.get("duration_seconds"), 1.0).or_else(|| {
        positive_seconds(fields.get("duration_minutes"), SECONDS_PER_MINUTE)
    });
    let distance_meters = non_negative(fields.get("distance_meters"))
        .or_else(|| non_negative(fields.get("distance_km")).map(|km| km * METERS_PER_KM));

    Ok(ParsedActivityDraft {
        sport_type,
        name: text_field(&fields, "name"),
        duration_seconds,
        distance_meters,
        description_seed: text_field(&fields, "description_seed"),
        description_style: fields
            .get("description_style")
            .and_then(Value::as_str)
            .and_then(DescriptionStyle::from_label),
        confidence,
        source: DraftSource::Generative,
        context: fields
            .get("context")
            .and_then(Value::as_object)
            .map(context_from_object)
            .unwrap_or_default(),
    })
}

/// Remove a surrounding markdown code fence such as ```` ```json ````
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.split_once('\n').map_or_else(
        || rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        |(_, body)| body,
    );
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn positive_seconds(value: Option<&Value>, scale: f64) -> Option<u32> {
    let seconds = (value.and_then(as_number)? * scale).round();
    (seconds.is_finite() && seconds >= 1.0 && seconds <= f64::from(u32::MAX))
        .then_some(seconds as u32)
}

fn non_negative(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(as_number)
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("null"))
        .map(str::to_owned)
}

fn context_from_object(object: &Map<String, Value>) -> ActivityContext {
    ActivityContext {
        location: text_field(object, "location"),
        time_of_day: text_field(object, "time_of_day"),
        weather: text_field(object, "weather"),
        feeling: text_field(object, "feeling"),
        intensity: text_field(object, "intensity"),
        companions: text_field(object, "companions"),
        achievements: text_field(object, "achievements"),
        equipment: text_field(object, "equipment"),
        goals: text_field(object, "goals"),
        challenges: text_field(object, "challenges"),
        route: text_field(object, "route"),
        music: text_field(object, "music"),
        nutrition: text_field(object, "nutrition"),
        recovery: text_field(object, "recovery"),
        highlights: text_field(object, "highlights"),
    }
}
