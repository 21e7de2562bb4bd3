// ABOUTME: Deterministic default names and descriptions for finalized activities
// ABOUTME: Used when neither extractor supplied a name or description seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use stride_core::constants::units::METERS_PER_KM;
use stride_core::models::{ActivityContext, SportType};

/// Default title, e.g. "Morning Run", or the sport label alone
#[must_use]
pub fn default_name(sport: SportType, context: &ActivityContext) -> String {
    context.time_of_day.as_deref().map_or_else(
        || sport.label().to_owned(),
        |time_of_day| format!("{} {}", capitalize(time_of_day), sport.label()),
    )
}

/// Default description built from the sport, duration, distance, and cues
#[must_use]
pub fn default_description(
    sport: SportType,
    duration_seconds: u32,
    distance_meters: f64,
    context: &ActivityContext,
) -> String {
    let mut text = format!(
        "Great {} session! {}",
        sport.label().to_lowercase(),
        describe_duration(duration_seconds)
    );
    if distance_meters > 0.0 {
        let _ = write!(text, " covering {:.2} km", distance_meters / METERS_PER_KM);
    }
    if let Some(location) = &context.location {
        let _ = write!(text, " at the {location}");
    }
    match &context.feeling {
        Some(feeling) => {
            let _ = write!(text, " - {feeling}!");
        }
        None => text.push('.'),
    }
    text
}

fn describe_duration(duration_seconds: u32) -> String {
    if duration_seconds < 60 {
        return format!("{duration_seconds} seconds");
    }
    match duration_seconds.saturating_add(30) / 60 {
        1 => "1 minute".to_owned(),
        minutes => format!("{minutes} minutes"),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
