// ABOUTME: Configuration management for the parsing pipeline and its external services
// ABOUTME: Loads parser thresholds, generative service and knowledge store settings from env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All configuration comes from environment variables. Missing service
//! settings are not errors: the matching adapter is built unconfigured and the
//! pipeline degrades to its deterministic path.

/// Environment-driven configuration types
pub mod environment;

pub use environment::{
    AgentConfig, GenerativeBackend, GenerativeServiceConfig, KnowledgeStoreConfig, ParserConfig,
};
