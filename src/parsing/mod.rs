// ABOUTME: Activity prompt parsing pipeline combining generative and deterministic extraction
// ABOUTME: Exposes the generative adapter and the parse orchestrator state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Generative-language extraction adapter
pub mod generative;

/// State machine driving one parse call
pub mod orchestrator;

pub use generative::{parse_draft, GenerativeExtractor};
pub use orchestrator::{ActivityParser, DraftHints, ParseReport, ParseStage};
