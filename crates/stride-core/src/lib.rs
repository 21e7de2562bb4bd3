// ABOUTME: Core types and constants for the Stride activity parsing pipeline
// ABOUTME: Foundation crate with error handling, activity models, sport types, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing shared types and constants for the Stride
//! prompt-to-activity pipeline. This crate performs no I/O and is designed to
//! change infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   parse-specific `ParseFailure` / `ExtractionFailure` taxonomies
//! - **models**: `SportType`, `ExerciseCandidate`, `ParsedActivityDraft`, `ActivityRecord`
//! - **constants**: Unit conversion factors and pipeline tuning defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (drafts, records, candidates, sport types)
pub mod models;
