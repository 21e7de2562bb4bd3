// ABOUTME: Core data models for the prompt-to-activity pipeline
// ABOUTME: Sport types, knowledge candidates, extractor drafts, and final records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod activity;
mod exercise;
mod sport;

pub use activity::{
    ActivityContext, ActivityRecord, DescriptionStyle, DraftSource, ParsedActivityDraft,
};
pub use exercise::{clamp_score, rank_candidates, ExerciseCandidate, Intensity};
pub use sport::SportType;
