// ABOUTME: Default thresholds, budgets, and timeouts for the parsing pipeline
// ABOUTME: Values are tuning defaults and can be overridden through configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Number of knowledge candidates requested per parse
pub const DEFAULT_KNOWLEDGE_TOP_K: usize = 5;

/// Minimum confidence for a generative draft to be accepted without fallback
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.3;

/// Similarity at which a knowledge candidate overrides a disagreeing generative sport type
pub const DEFAULT_KNOWLEDGE_OVERRIDE_SIMILARITY: f64 = 0.7;

/// Confidence assigned to generative drafts whose sport type is missing or unknown
pub const DEFAULT_LOW_CONFIDENCE: f64 = 0.2;

/// Confidence assumed when the generative service omits its own estimate
pub const DEFAULT_GENERATIVE_CONFIDENCE: f64 = 0.5;

/// Character budget for the candidate summary sent to the generative service
pub const DEFAULT_SUMMARY_CHAR_BUDGET: usize = 800;

/// Synonyms included per candidate in the summary
pub const SUMMARY_SYNONYMS_PER_CANDIDATE: usize = 3;

/// Knowledge lookup time budget in milliseconds
pub const DEFAULT_KNOWLEDGE_TIMEOUT_MS: u64 = 3_000;

/// Generative extraction time budget in milliseconds
pub const DEFAULT_GENERATIVE_TIMEOUT_MS: u64 = 8_000;

/// Fallback confidence when the sport type came from a strong knowledge candidate
pub const FALLBACK_CANDIDATE_CONFIDENCE: f64 = 0.8;

/// Fallback confidence when the sport type came from a weak knowledge candidate
pub const FALLBACK_WEAK_CANDIDATE_CONFIDENCE: f64 = 0.4;

/// Similarity at which a knowledge candidate counts as strong for the fallback
pub const FALLBACK_STRONG_SIMILARITY: f64 = 0.5;

/// Fallback confidence when the sport type came from the keyword table
pub const FALLBACK_KEYWORD_CONFIDENCE: f64 = 0.5;
