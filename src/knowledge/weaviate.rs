// ABOUTME: Weaviate-backed exercise index using GraphQL hybrid search
// ABOUTME: Translates Weaviate exercise objects into ranked exercise candidates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

use super::ExerciseIndex;
use crate::errors::{AppError, ErrorCode};
use crate::models::{clamp_score, ExerciseCandidate, Intensity};

const SERVICE: &str = "Weaviate";

/// Default Weaviate class holding exercise concepts
pub const DEFAULT_COLLECTION: &str = "Exercise";

const RETURN_FIELDS: &str =
    "name sport_type synonyms description muscle_groups equipment intensity_level keywords _additional { score }";

/// Connection settings for a Weaviate instance
#[derive(Debug, Clone)]
pub struct WeaviateConfig {
    /// Base URL, e.g. `http://localhost:8080`
    pub url: String,
    /// Optional bearer API key
    pub api_key: Option<String>,
    /// Class name to query
    pub collection: String,
}

impl WeaviateConfig {
    /// Settings for `url` with the default collection and no key
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            collection: DEFAULT_COLLECTION.to_owned(),
        }
    }
}

/// Exercise index served by Weaviate's GraphQL endpoint
pub struct WeaviateExerciseIndex {
    client: Client,
    config: WeaviateConfig,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExerciseObject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sport_type: Option<String>,
    #[serde(default)]
    synonyms: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    muscle_groups: Option<Vec<String>>,
    #[serde(default)]
    equipment: Option<Vec<String>>,
    #[serde(default)]
    intensity_level: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default, rename = "_additional")]
    additional: Option<Additional>,
}

#[derive(Debug, Default, Deserialize)]
struct Additional {
    #[serde(default)]
    score: Option<Value>,
}

impl WeaviateExerciseIndex {
    /// Create an index client
    ///
    /// # Errors
    ///
    /// Returns an error if the collection name is not a valid class name or the
    /// HTTP client cannot be created.
    pub fn new(config: WeaviateConfig, request_timeout: Duration) -> Result<Self, AppError> {
        let valid_class = config
            .collection
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && config
                .collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_class {
            return Err(AppError::config(format!(
                "Invalid Weaviate collection name: {:?}",
                config.collection
            )));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn graphql_url(&self) -> String {
        format!("{}/v1/graphql", self.config.url.trim_end_matches('/'))
    }

    fn build_query(&self, phrase: &str, limit: usize) -> Result<String, AppError> {
        let literal = serde_json::to_string(phrase)?;
        Ok(format!(
            "{{ Get {{ {class}(hybrid: {{query: {literal}}}, limit: {limit}) {{ {RETURN_FIELDS} }} }} }}",
            class = self.config.collection
        ))
    }

    fn parse_candidates(&self, body: &str) -> Result<Vec<ExerciseCandidate>, AppError> {
        let response: GraphQlResponse = serde_json::from_str(body)?;
        if let Some(first) = response.errors.first() {
            return Err(AppError::external_service(SERVICE, first.message.clone()));
        }

        let objects = response
            .data
            .as_ref()
            .and_then(|data| data.get("Get"))
            .and_then(|get| get.get(&self.config.collection))
            .filter(|objects| !objects.is_null())
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        let objects: Vec<ExerciseObject> = serde_json::from_value(objects)?;

        Ok(objects.into_iter().filter_map(to_candidate).collect())
    }
}

fn parse_score(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    clamp_score(raw.unwrap_or(0.0))
}

fn to_candidate(object: ExerciseObject) -> Option<ExerciseCandidate> {
    let name = object.name.filter(|n| !n.trim().is_empty())?;
    let mapping = object.sport_type.unwrap_or_default();
    let score = parse_score(object.additional.as_ref().and_then(|a| a.score.as_ref()));

    let mut candidate = ExerciseCandidate::new(name, mapping, score)
        .with_synonyms(object.synonyms.unwrap_or_default())
        .with_equipment(object.equipment.unwrap_or_default())
        .with_muscle_groups(object.muscle_groups.unwrap_or_default())
        .with_keywords(object.keywords.unwrap_or_default())
        .with_intensity(
            object
                .intensity_level
                .as_deref()
                .map_or(Intensity::Moderate, Intensity::from_label),
        );
    if let Some(description) = object.description {
        candidate = candidate.with_description(description);
    }
    Some(candidate)
}

#[async_trait]
impl ExerciseIndex for WeaviateExerciseIndex {
    fn name(&self) -> &'static str {
        "weaviate"
    }

    #[instrument(skip(self, phrase), fields(collection = %self.config.collection))]
    async fn search(&self, phrase: &str, limit: usize) -> Result<Vec<ExerciseCandidate>, AppError> {
        let query = self.build_query(phrase, limit)?;
        let mut request = self
            .client
            .post(self.graphql_url())
            .json(&json!({ "query": query }));
        if let Some(ref api_key) = self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::external_timeout(SERVICE)
            } else {
                AppError::external_unavailable(SERVICE, e.to_string())
            }
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
            })?;
        if !status.is_success() {
            return Err(AppError::new(
                ErrorCode::ExternalServiceError,
                format!("{SERVICE}: HTTP {status}"),
            ));
        }

        let candidates = self.parse_candidates(&body)?;
        debug!(count = candidates.len(), "Weaviate hybrid search returned");
        Ok(candidates)
    }
}
