// ABOUTME: Generic OpenAI-compatible LLM provider for Writer and local endpoints
// ABOUTME: Sends chat completions over reqwest and maps HTTP failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! One implementation serves every endpoint that speaks the `OpenAI` chat
//! completions API:
//!
//! - **Writer**: <https://api.writer.com/v1> (Palmyra models, bearer key required)
//! - **Ollama**: <http://localhost:11434/v1>
//! - **vLLM**: <http://localhost:8000/v1>

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::errors::{AppError, ErrorCode};

/// Default Writer API base URL
pub const WRITER_DEFAULT_BASE_URL: &str = "https://api.writer.com/v1";

/// Default Writer model
pub const WRITER_DEFAULT_MODEL: &str = "palmyra-x5";

/// Default local base URL (Ollama)
pub const LOCAL_DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for local inference
pub const LOCAL_DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Upper bound for a single HTTP exchange; the extractor applies its own tighter budget
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.writer.com/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging: writer, ollama, vllm or local
    pub provider_name: String,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Configuration for the Writer API
    #[must_use]
    pub fn writer(api_key: impl Into<String>, model: &str) -> Self {
        Self {
            base_url: WRITER_DEFAULT_BASE_URL.to_owned(),
            api_key: Some(api_key.into()),
            default_model: model.to_owned(),
            provider_name: "writer".to_owned(),
            capabilities: LlmCapabilities::structured_output(),
        }
    }

    /// Configuration for a local Ollama instance
    #[must_use]
    pub fn ollama(model: &str) -> Self {
        Self {
            base_url: LOCAL_DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            default_model: model.to_owned(),
            provider_name: "ollama".to_owned(),
            capabilities: LlmCapabilities::structured_output(),
        }
    }

    /// Configuration for a local vLLM instance
    #[must_use]
    pub fn vllm(model: &str) -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_owned(),
            api_key: None,
            default_model: model.to_owned(),
            provider_name: "vllm".to_owned(),
            capabilities: LlmCapabilities::structured_output(),
        }
    }

    /// Configuration for an arbitrary local endpoint, named after its port
    #[must_use]
    pub fn local(base_url: impl Into<String>, model: &str, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        let provider_name = if base_url.contains(":11434") {
            "ollama"
        } else if base_url.contains(":8000") {
            "vllm"
        } else {
            "local"
        };
        Self {
            base_url,
            api_key,
            default_model: model.to_owned(),
            provider_name: provider_name.to_owned(),
            capabilities: LlmCapabilities::structured_output(),
        }
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::ollama(LOCAL_DEFAULT_MODEL)
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Provider configuration
    #[must_use]
    pub const fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.bearer_auth(api_key)
        } else {
            request
        }
    }

    fn service_label(&self) -> &'static str {
        self.display_name()
    }

    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        let response_format = (request.json_mode && self.config.capabilities.supports_json_mode())
            .then_some(ResponseFormat {
                format_type: "json_object",
            });

        OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
            stream: false,
        }
    }

    fn map_send_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to send request to {}: {}", self.config.provider_name, e);
        if e.is_timeout() {
            AppError::external_timeout(self.service_label())
        } else if e.is_connect() {
            AppError::external_unavailable(
                self.service_label(),
                format!("Cannot connect to {}", self.config.base_url),
            )
        } else {
            AppError::external_service(self.service_label(), format!("Failed to connect: {e}"))
        }
    }

    /// Read a successful `/chat/completions` body
    ///
    /// A null message content becomes an empty string; deciding whether that
    /// is usable is left to the caller.
    fn parse_completion(body: &str) -> Result<ChatResponse, AppError> {
        let parsed: OpenAiResponse = serde_json::from_str(body).map_err(|e| {
            AppError::new(
                ErrorCode::SerializationError,
                format!("Failed to parse completion envelope: {e}"),
            )
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            AppError::new(ErrorCode::InvalidFormat, "API returned no choices")
        })?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    /// Map a non-success HTTP status and body to an error
    fn parse_error_response(service: &str, status: StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let detail = error_response.error.message;
            match status.as_u16() {
                401 | 403 => AppError::auth_invalid(format!("API authentication failed: {detail}")),
                429 => AppError::new(
                    ErrorCode::ExternalRateLimited,
                    format!("{service} rate limit reached: {detail}"),
                ),
                400 => AppError::invalid_input(format!("API validation error: {detail}")),
                404 => AppError::not_found(format!("Model or endpoint ({detail})")),
                _ => {
                    let error_type = error_response
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_owned());
                    AppError::external_service(service, format!("{error_type} - {detail}"))
                }
            }
        } else {
            match status.as_u16() {
                502..=504 => AppError::external_unavailable(
                    service,
                    format!("Server is not responding ({status})"),
                ),
                _ => AppError::external_service(
                    service,
                    format!(
                        "API error ({status}): {}",
                        body.chars().take(200).collect::<String>()
                    ),
                ),
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        match self.config.provider_name.as_str() {
            "writer" => "writer",
            "ollama" => "ollama",
            "vllm" => "vllm",
            _ => "local",
        }
    }

    fn display_name(&self) -> &'static str {
        match self.config.provider_name.as_str() {
            "writer" => "Writer",
            "ollama" => "Ollama (Local)",
            "vllm" => "vLLM (Local)",
            _ => "Local LLM",
        }
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = %self.config.provider_name, model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let body = self.build_request(request);
        debug!(
            messages = body.messages.len(),
            json_mode = body.response_format.is_some(),
            "Sending chat completion request"
        );

        let http_request = self.client.post(self.api_url("chat/completions")).json(&body);
        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service(
                self.service_label(),
                format!("Failed to read response: {e}"),
            )
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(self.service_label(), status, &text));
        }

        let response = Self::parse_completion(&text)?;
        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.config.provider_name,
            response.content.len(),
            response.finish_reason
        );
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let http_request = self.client.get(self.api_url("models"));
        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(
                "{} health check failed with status: {}",
                self.config.provider_name,
                response.status()
            );
        }
        Ok(healthy)
    }
}
