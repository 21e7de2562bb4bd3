// ABOUTME: Unit tests for environment-driven agent configuration
// ABOUTME: Validates defaults, overrides, backend selection, and invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use std::time::Duration;
use stride_agent::config::{
    AgentConfig, GenerativeBackend, GenerativeServiceConfig, KnowledgeStoreConfig, ParserConfig,
};
use stride_agent::errors::ErrorCode;
use stride_agent::parsing::ActivityParser;

const VARS: &[&str] = &[
    "STRIDE_KNOWLEDGE_TOP_K",
    "STRIDE_ACCEPTANCE_THRESHOLD",
    "STRIDE_OVERRIDE_SIMILARITY",
    "STRIDE_SUMMARY_CHAR_BUDGET",
    "STRIDE_KNOWLEDGE_TIMEOUT_MS",
    "STRIDE_GENERATIVE_TIMEOUT_MS",
    "WRITER_API_KEY",
    "WRITER_BASE_URL",
    "WRITER_MODEL",
    "LOCAL_LLM_BASE_URL",
    "LOCAL_LLM_MODEL",
    "LOCAL_LLM_API_KEY",
    "WEAVIATE_URL",
    "WEAVIATE_API_KEY",
    "WEAVIATE_COLLECTION",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AgentConfig::from_env().unwrap();

    assert_eq!(config.parser, ParserConfig::default());
    assert_eq!(config.parser.top_k, 5);
    assert!((config.parser.acceptance_threshold - 0.3).abs() < f64::EPSILON);
    assert!((config.parser.knowledge_override_similarity - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.parser.summary_char_budget, 800);
    assert!(config.generative.is_none());
    assert!(config.knowledge.is_none());
    assert!(config.summary().contains("Generative Service: Disabled"));
}

#[test]
#[serial]
fn test_parser_overrides() {
    clear_env();
    env::set_var("STRIDE_KNOWLEDGE_TOP_K", "3");
    env::set_var("STRIDE_ACCEPTANCE_THRESHOLD", "0.45");
    env::set_var("STRIDE_GENERATIVE_TIMEOUT_MS", "2500");

    let config = ParserConfig::from_env().unwrap();
    assert_eq!(config.top_k, 3);
    assert!((config.acceptance_threshold - 0.45).abs() < f64::EPSILON);
    assert_eq!(config.generative_timeout, Duration::from_millis(2500));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_are_config_errors() {
    clear_env();
    env::set_var("STRIDE_KNOWLEDGE_TOP_K", "many");
    let error = ParserConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("STRIDE_KNOWLEDGE_TOP_K"));

    clear_env();
    env::set_var("STRIDE_ACCEPTANCE_THRESHOLD", "1.2");
    assert!(ParserConfig::from_env().is_err());

    clear_env();
    env::set_var("STRIDE_KNOWLEDGE_TIMEOUT_MS", "0");
    assert!(ParserConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_writer_takes_precedence_over_local() {
    clear_env();
    env::set_var("WRITER_API_KEY", "wr-key");
    env::set_var("LOCAL_LLM_BASE_URL", "http://localhost:11434/v1");

    let generative = GenerativeServiceConfig::from_env().unwrap();
    assert_eq!(generative.backend, GenerativeBackend::Writer);
    assert_eq!(generative.base_url, "https://api.writer.com/v1");
    assert_eq!(generative.model, "palmyra-x5");
    assert_eq!(generative.provider_config().provider_name, "writer");
    clear_env();
}

#[test]
#[serial]
fn test_local_backend_from_environment() {
    clear_env();
    env::set_var("LOCAL_LLM_BASE_URL", "http://localhost:8000/v1");
    env::set_var("LOCAL_LLM_MODEL", "qwen2.5:7b-instruct");

    let generative = GenerativeServiceConfig::from_env().unwrap();
    assert_eq!(generative.backend, GenerativeBackend::Local);
    assert!(generative.api_key.is_none());
    let provider = generative.provider_config();
    assert_eq!(provider.provider_name, "vllm");
    assert_eq!(provider.default_model, "qwen2.5:7b-instruct");
    clear_env();
}

#[test]
#[serial]
fn test_knowledge_store_from_environment() {
    clear_env();
    assert!(KnowledgeStoreConfig::from_env().is_none());

    env::set_var("WEAVIATE_URL", "http://localhost:8080");
    env::set_var("WEAVIATE_API_KEY", "wv-key");
    let knowledge = KnowledgeStoreConfig::from_env().unwrap();
    assert_eq!(knowledge.collection, "Exercise");
    assert_eq!(knowledge.weaviate_config().api_key.as_deref(), Some("wv-key"));

    let config = AgentConfig::from_env().unwrap();
    let summary = config.summary();
    assert!(summary.contains("Weaviate (Exercise @ http://localhost:8080)"));
    assert!(!summary.contains("wv-key"));
    clear_env();
}

#[test]
#[serial]
fn test_parser_builds_from_full_configuration() {
    clear_env();
    env::set_var("WRITER_API_KEY", "wr-key");
    env::set_var("WEAVIATE_URL", "http://localhost:8080");

    let config = AgentConfig::from_env().unwrap();
    let parser = ActivityParser::from_config(&config).unwrap();
    assert_eq!(parser.config().top_k, 5);

    env::set_var("WEAVIATE_COLLECTION", "Exercise; DROP");
    let config = AgentConfig::from_env().unwrap();
    assert!(ActivityParser::from_config(&config).is_err());
    clear_env();
}
