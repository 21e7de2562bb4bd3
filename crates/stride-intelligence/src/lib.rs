// ABOUTME: Deterministic activity extraction engine for the Stride pipeline
// ABOUTME: Context enrichment, keyword/pattern fallback extraction, and narration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Intelligence
//!
//! Pure functions with no I/O. Everything in this crate is deterministic for a
//! given input, which is what lets the orchestrator promise identical records
//! for identical prompts and external responses.

/// Enriched context handed to both extractors
pub mod context;

/// Rule and keyword based extraction used when the generative path is unusable
pub mod fallback;

/// Default activity names and descriptions
pub mod narration;

pub use context::{ContextEnrichmentBuilder, EnrichedContext};
pub use fallback::{
    detect_context_cues, detect_sport_keyword, extract_fallback, scan_distance_meters,
    scan_duration_seconds,
};
pub use narration::{default_description, default_name};
