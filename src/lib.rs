// ABOUTME: Main library entry point for the Stride activity parsing agent
// ABOUTME: Turns free-text workout descriptions into structured fitness activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Agent
//!
//! Converts a description such as "Did some HIIT training for 30 minutes" into
//! an [`ActivityRecord`](models::ActivityRecord) ready for a fitness platform.
//!
//! Three information sources feed one decision chain:
//!
//! - **Knowledge store**: semantic exercise lookup (Weaviate)
//! - **Generative extractor**: an `OpenAI`-compatible LLM (Writer, Ollama, vLLM)
//! - **Fallback extractor**: deterministic keyword and pattern rules
//!
//! Either external service may be missing or failing; only the quality of the
//! result depends on them.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stride_agent::config::AgentConfig;
//! use stride_agent::errors::AppResult;
//! use stride_agent::parsing::ActivityParser;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AgentConfig::from_env()?;
//!     let parser = ActivityParser::from_config(&config)?;
//!
//!     match parser.parse_activity_from_prompt("Went for a 45 minute run").await {
//!         Ok(record) => println!("{} for {}s", record.sport_type, record.duration_seconds),
//!         Err(failure) => println!("{failure}"),
//!     }
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Error types shared across the agent
pub mod errors;

/// Semantic exercise knowledge store client
pub mod knowledge;

/// LLM provider abstraction and `OpenAI`-compatible implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Hybrid parse pipeline
pub mod parsing;

/// Domain models for candidates, drafts and activity records
pub use stride_core::models;

/// Unit and pipeline constants
pub use stride_core::constants;

pub use parsing::{ActivityParser, ParseReport, ParseStage};
