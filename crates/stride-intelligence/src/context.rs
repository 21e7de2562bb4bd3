// ABOUTME: Context enrichment builder combining knowledge candidates with the raw prompt
// ABOUTME: Produces a budgeted candidate summary for the generative prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use stride_core::constants::parsing::{
    DEFAULT_SUMMARY_CHAR_BUDGET, SUMMARY_SYNONYMS_PER_CANDIDATE,
};
use stride_core::models::{rank_candidates, ExerciseCandidate};

/// Prompt plus knowledge candidates, shared read-only by both extractors
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedContext {
    /// Prompt exactly as supplied by the caller
    pub raw_prompt: String,
    /// Knowledge candidates, highest similarity first
    pub candidates: Vec<ExerciseCandidate>,
    /// Compact candidate listing for inclusion in the generative prompt
    pub candidate_summary_text: String,
}

impl EnrichedContext {
    /// Highest ranked candidate, if any
    #[must_use]
    pub fn top_candidate(&self) -> Option<&ExerciseCandidate> {
        self.candidates.first()
    }
}

/// Builds [`EnrichedContext`] values under a fixed summary character budget
#[derive(Debug, Clone, Copy)]
pub struct ContextEnrichmentBuilder {
    char_budget: usize,
}

impl Default for ContextEnrichmentBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_CHAR_BUDGET)
    }
}

impl ContextEnrichmentBuilder {
    /// Create a builder with the given summary character budget
    #[must_use]
    pub const fn new(char_budget: usize) -> Self {
        Self { char_budget }
    }

    /// Combine the prompt and candidates into an enriched context
    ///
    /// Candidates are put into ranking order. Summary lines are added from the
    /// best candidate down and the first line that would exceed the budget ends
    /// the summary, so the lowest-similarity candidates are the ones left out.
    #[must_use]
    pub fn build(
        &self,
        raw_prompt: &str,
        mut candidates: Vec<ExerciseCandidate>,
    ) -> EnrichedContext {
        rank_candidates(&mut candidates);

        let mut summary = String::new();
        let mut used = 0_usize;
        for candidate in &candidates {
            let line = summarize_candidate(candidate);
            let separator = usize::from(!summary.is_empty());
            let cost = line.chars().count() + separator;
            if used + cost > self.char_budget {
                break;
            }
            if separator == 1 {
                summary.push('\n');
            }
            summary.push_str(&line);
            used += cost;
        }

        EnrichedContext {
            raw_prompt: raw_prompt.to_owned(),
            candidates,
            candidate_summary_text: summary,
        }
    }
}

/// One summary line: name, up to three synonyms, and the sport-type mapping
#[must_use]
pub fn summarize_candidate(candidate: &ExerciseCandidate) -> String {
    let mut line = format!("- {}", candidate.name);
    let synonyms: Vec<&str> = candidate
        .synonyms
        .iter()
        .take(SUMMARY_SYNONYMS_PER_CANDIDATE)
        .map(String::as_str)
        .collect();
    if !synonyms.is_empty() {
        let _ = write!(line, " (also: {})", synonyms.join(", "));
    }
    let _ = write!(line, " => {}", candidate.sport_type_mapping);
    line
}
