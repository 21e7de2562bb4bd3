// ABOUTME: Integration tests for the OpenAI-compatible LLM provider and SPI types
// ABOUTME: Validates presets, capabilities, request builders, and connection failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use stride_agent::errors::ErrorCode;
use stride_agent::llm::{
    ChatMessage, ChatRequest, LlmCapabilities, LlmProvider, MessageRole, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider, WRITER_DEFAULT_BASE_URL, WRITER_DEFAULT_MODEL,
};

/// Serve one canned HTTP response on a local port
///
/// Returns the `/v1` base URL and a handle yielding the raw request text.
async fn respond_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{addr}/v1"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = socket.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        let text = String::from_utf8_lossy(&buffer);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn provider_at(base_url: &str) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(
        OpenAiCompatibleConfig::writer("test-key", WRITER_DEFAULT_MODEL).with_base_url(base_url),
    )
    .unwrap()
}

// ============================================================================
// SPI types
// ============================================================================

#[test]
fn test_capability_helpers() {
    let structured = LlmCapabilities::structured_output();
    assert!(structured.supports_json_mode());
    assert!(structured.supports_system_messages());

    let text = LlmCapabilities::text_only();
    assert!(!text.supports_json_mode());
    assert!(text.supports_system_messages());
}

#[test]
fn test_chat_request_builder() {
    let request = ChatRequest::new(vec![
        ChatMessage::system("Return JSON."),
        ChatMessage::user("ran 5k"),
    ])
    .with_model("palmyra-x5")
    .with_temperature(0.1)
    .with_max_tokens(800)
    .with_json_mode();

    assert_eq!(request.model.as_deref(), Some("palmyra-x5"));
    assert_eq!(request.max_tokens, Some(800));
    assert!(request.json_mode);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[1].role.as_str(), "user");
}

// ============================================================================
// Provider presets
// ============================================================================

#[test]
fn test_writer_preset() {
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::writer(
        "test-key",
        WRITER_DEFAULT_MODEL,
    ))
    .unwrap();

    assert_eq!(provider.name(), "writer");
    assert_eq!(provider.display_name(), "Writer");
    assert_eq!(provider.default_model(), "palmyra-x5");
    assert_eq!(provider.config().base_url, WRITER_DEFAULT_BASE_URL);
    assert!(provider.capabilities().supports_json_mode());
}

#[test]
fn test_local_presets() {
    let ollama = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::ollama("llama3.1")).unwrap();
    assert_eq!(ollama.name(), "ollama");
    assert!(ollama.config().api_key.is_none());

    let vllm = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::vllm("qwen")).unwrap();
    assert_eq!(vllm.name(), "vllm");
    assert_eq!(vllm.display_name(), "vLLM (Local)");

    let custom = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::local(
        "http://gpu-box:9000/v1",
        "mistral",
        Some("k".to_owned()),
    ))
    .unwrap();
    assert_eq!(custom.name(), "local");
}

// ============================================================================
// Connection failures
// ============================================================================

#[tokio::test]
async fn test_unreachable_endpoint_is_external_error() {
    let config = OpenAiCompatibleConfig::ollama("llama3.1").with_base_url("http://127.0.0.1:9/v1");
    let provider = OpenAiCompatibleProvider::new(config).unwrap();

    let request = ChatRequest::new(vec![ChatMessage::user("ran 5k")]);
    let error = provider.complete(&request).await.unwrap_err();
    assert!(error.is_external());
    assert!(matches!(
        error.code,
        ErrorCode::ExternalServiceUnavailable | ErrorCode::ExternalServiceError
    ));

    assert!(provider.health_check().await.is_err());
}

// ============================================================================
// Responses from a live endpoint
// ============================================================================

#[tokio::test]
async fn test_completion_round_trip() {
    let body = r#"{"model":"palmyra-x5","choices":[{"message":{"role":"assistant","content":"{\"sport_type\":\"Run\"}"},"finish_reason":"stop"}],"usage":{"prompt_tokens":10,"completion_tokens":5,"total_tokens":15}}"#;
    let (base_url, server) = respond_once("200 OK", body).await;

    let request = ChatRequest::new(vec![
        ChatMessage::system("Return JSON."),
        ChatMessage::user("ran 5k"),
    ])
    .with_json_mode();
    let response = provider_at(&base_url).complete(&request).await.unwrap();

    assert_eq!(response.content, r#"{"sport_type":"Run"}"#);
    assert_eq!(response.usage.unwrap().total_tokens, 15);

    let raw_request = server.await.unwrap();
    assert!(raw_request.starts_with("POST /v1/chat/completions"));
    assert!(raw_request.to_lowercase().contains("authorization: bearer test-key"));
    assert!(raw_request.contains(r#""response_format":{"type":"json_object"}"#));
    assert!(raw_request.contains(r#""model":"palmyra-x5""#));
}

#[tokio::test]
async fn test_empty_choices_are_invalid_format() {
    let (base_url, _server) = respond_once("200 OK", r#"{"model":"m","choices":[]}"#).await;
    let request = ChatRequest::new(vec![ChatMessage::user("ran 5k")]);
    let error = provider_at(&base_url).complete(&request).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[tokio::test]
async fn test_null_content_reaches_caller_as_empty_text() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"length"}]}"#;
    let (base_url, _server) = respond_once("200 OK", body).await;
    let request = ChatRequest::new(vec![ChatMessage::user("ran 5k")]);
    let response = provider_at(&base_url).complete(&request).await.unwrap();
    assert!(response.content.is_empty());
    assert_eq!(response.finish_reason.as_deref(), Some("length"));
}

#[tokio::test]
async fn test_error_statuses_map_to_app_errors() {
    let (base_url, _server) = respond_once(
        "401 Unauthorized",
        r#"{"error":{"message":"invalid api key","type":"auth_error"}}"#,
    )
    .await;
    let request = ChatRequest::new(vec![ChatMessage::user("ran 5k")]);
    let error = provider_at(&base_url).complete(&request).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);

    let (base_url, _server) = respond_once("503 Service Unavailable", "upstream overloaded").await;
    let error = provider_at(&base_url).complete(&request).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_health_check_against_live_endpoint() {
    let (base_url, server) = respond_once("200 OK", r#"{"data":[]}"#).await;
    assert!(provider_at(&base_url).health_check().await.unwrap());
    assert!(server.await.unwrap().starts_with("GET /v1/models"));

    let (base_url, _server) = respond_once("500 Internal Server Error", "{}").await;
    assert!(!provider_at(&base_url).health_check().await.unwrap());
}
