// ABOUTME: Failure taxonomies for the prompt parsing pipeline
// ABOUTME: Terminal ParseFailure surfaced to callers and internal ExtractionFailure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Parse Failure Types
//!
//! - `ParseFailure` - the closed set of terminal outcomes returned to callers
//! - `ExtractionFailure` - why the generative extractor produced no draft;
//!   always absorbed by the orchestrator, never returned to callers

use serde::{Deserialize, Serialize};

use super::{AppError, ErrorCode};

/// Terminal reasons a prompt could not be turned into an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ParseFailure {
    /// Prompt was empty or whitespace-only; no external calls were attempted
    #[error("Please describe your workout, for example 'I went for a 30 minute run'.")]
    EmptyInput,
    /// Neither extractor identified a usable sport type
    #[error(
        "Could not understand what kind of workout this was. Please include the activity type (e.g. run, ride, swim, yoga)."
    )]
    NoSportTypeDetected,
    /// A sport type was found but no duration could be derived
    #[error(
        "Could not find a duration in your description. Please include how long you exercised (e.g. '30 minutes')."
    )]
    NoDurationDetected,
}

impl ParseFailure {
    /// Error code used when this failure crosses into `AppError`
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::InvalidInput,
            Self::NoSportTypeDetected | Self::NoDurationDetected => ErrorCode::MissingRequiredField,
        }
    }

    /// Stable machine-readable identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::NoSportTypeDetected => "no_sport_type_detected",
            Self::NoDurationDetected => "no_duration_detected",
        }
    }
}

impl From<ParseFailure> for AppError {
    fn from(failure: ParseFailure) -> Self {
        Self::new(failure.code(), failure.to_string())
    }
}

/// Why the generative extractor did not produce a draft
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionFailure {
    /// No generative service is configured
    #[error("generative service is not configured")]
    Unavailable,
    /// The request exceeded its time budget
    #[error("generative service timed out after {elapsed_ms} ms")]
    Timeout {
        /// Time budget that was exceeded, in milliseconds
        elapsed_ms: u64,
    },
    /// Network or HTTP level failure reported by the provider
    #[error("generative service error: {0}")]
    Provider(String),
    /// The reply could not be read as the requested schema
    #[error("malformed generative response: {0}")]
    MalformedResponse(String),
}

impl From<AppError> for ExtractionFailure {
    fn from(error: AppError) -> Self {
        match error.code {
            ErrorCode::ExternalTimeout => Self::Timeout { elapsed_ms: 0 },
            ErrorCode::SerializationError | ErrorCode::InvalidFormat => {
                Self::MalformedResponse(error.message)
            }
            _ => Self::Provider(error.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_serializes_as_tagged_value() {
        let json = serde_json::to_string(&ParseFailure::NoDurationDetected).unwrap();
        assert_eq!(json, r#"{"reason":"no_duration_detected"}"#);
    }

    #[test]
    fn test_parse_failure_into_app_error() {
        let error: AppError = ParseFailure::EmptyInput.into();
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert!(error.message.contains("describe your workout"));
    }

    #[test]
    fn test_extraction_failure_from_app_error() {
        let failure = ExtractionFailure::from(AppError::external_service("Writer", "503"));
        assert!(matches!(failure, ExtractionFailure::Provider(_)));

        let failure = ExtractionFailure::from(AppError::new(
            ErrorCode::SerializationError,
            "not json",
        ));
        assert_eq!(failure, ExtractionFailure::MalformedResponse("not json".to_owned()));
    }
}
