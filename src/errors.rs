// ABOUTME: Error types for the Stride agent, re-exported from stride-core
// ABOUTME: Single import path for AppError, ErrorCode and the parse failure taxonomies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Error handling
//!
//! The error types live in `stride-core` so the pure crates can use them.

pub use stride_core::errors::{
    AppError, AppResult, ErrorCode, ExtractionFailure, ParseFailure,
};
