// ABOUTME: Deterministic fallback extractor for free-text workout descriptions
// ABOUTME: Never fails; returns a zero-confidence draft when nothing is recognised
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback Extraction
//!
//! Used when the generative service is unavailable or returns unusable output.
//! Sport type comes from the top knowledge candidate when one resolves to a
//! recognised sport type, otherwise from a fixed-priority keyword table.

mod cues;
mod keywords;
mod measures;

pub use cues::detect_context_cues;
pub use keywords::{detect_sport_keyword, SPORT_KEYWORDS};
pub use measures::{scan_distance_meters, scan_duration_seconds};

use stride_core::constants::parsing::{
    FALLBACK_CANDIDATE_CONFIDENCE, FALLBACK_KEYWORD_CONFIDENCE, FALLBACK_STRONG_SIMILARITY,
    FALLBACK_WEAK_CANDIDATE_CONFIDENCE,
};
use stride_core::models::{DraftSource, ExerciseCandidate, ParsedActivityDraft, SportType};
use tracing::debug;

/// Extract a draft from raw text and knowledge candidates
///
/// Confidence is 0.8 for a sport type taken from a candidate with similarity
/// >= 0.5 (0.4 below that), 0.5 for a keyword-table match, and 0 when no sport
/// type was found. Accepts any string, including the empty string.
#[must_use]
pub fn extract_fallback(raw_prompt: &str, candidates: &[ExerciseCandidate]) -> ParsedActivityDraft {
    let mut draft = ParsedActivityDraft::empty(DraftSource::Fallback);
    if raw_prompt.trim().is_empty() {
        return draft;
    }

    draft.duration_seconds = scan_duration_seconds(raw_prompt);
    draft.distance_meters = scan_distance_meters(raw_prompt);
    draft.context = detect_context_cues(raw_prompt);

    if let Some((sport, confidence)) = sport_from_candidates(candidates) {
        draft.sport_type = Some(sport);
        draft.confidence = confidence;
    } else if let Some(sport) = detect_sport_keyword(raw_prompt) {
        draft.sport_type = Some(sport);
        draft.confidence = FALLBACK_KEYWORD_CONFIDENCE;
    }

    debug!(
        sport_type = ?draft.sport_type,
        duration_seconds = ?draft.duration_seconds,
        distance_meters = ?draft.distance_meters,
        confidence = draft.confidence,
        "Fallback extraction finished"
    );
    draft
}

fn sport_from_candidates(candidates: &[ExerciseCandidate]) -> Option<(SportType, f64)> {
    let top = candidates.iter().min_by(|a, b| a.rank_cmp(b))?;
    let Some(sport) = top.sport_type() else {
        debug!(
            mapping = %top.sport_type_mapping,
            "Top knowledge candidate maps to an unrecognised sport type"
        );
        return None;
    };
    let confidence = if top.similarity_score >= FALLBACK_STRONG_SIMILARITY {
        FALLBACK_CANDIDATE_CONFIDENCE
    } else {
        FALLBACK_WEAK_CANDIDATE_CONFIDENCE
    };
    Some((sport, confidence))
}

/// Lowercase alphanumeric tokens of `text`, in order
pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
