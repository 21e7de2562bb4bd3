// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the activity parser prompt and the per-request user message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

use std::fmt::Write as _;

/// Activity parser system prompt
///
/// Describes the JSON schema the generative extractor validates against.
pub const ACTIVITY_PARSER_PROMPT: &str = include_str!("activity_parser.md");

/// Get the activity parser system prompt
#[must_use]
pub const fn get_activity_parser_prompt() -> &'static str {
    ACTIVITY_PARSER_PROMPT
}

/// Build the user message for one extraction request
///
/// The candidate block is omitted when the knowledge store returned nothing.
#[must_use]
pub fn build_activity_request(
    raw_prompt: &str,
    candidate_summary: &str,
    allowed_sport_types: &[&str],
) -> String {
    let mut message = String::with_capacity(raw_prompt.len() + candidate_summary.len() + 512);
    let _ = writeln!(
        message,
        "Allowed sport types: {}",
        allowed_sport_types.join(", ")
    );
    if !candidate_summary.is_empty() {
        message.push_str("\nCandidate exercises:\n");
        message.push_str(candidate_summary);
        message.push('\n');
    }
    message.push_str("\nActivity description:\n");
    message.push_str(raw_prompt.trim());
    message
}
