// ABOUTME: Contextual cue detection (time of day, weather, location, effort, milestones)
// ABOUTME: Fixed lookup tables so the same prompt always yields the same cues
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use stride_core::models::ActivityContext;

use super::tokens;

const TIME_OF_DAY: &[(&str, &[&str])] = &[
    ("morning", &["morning", "sunrise", "dawn", "breakfast"]),
    ("afternoon", &["afternoon", "lunch", "lunchtime", "midday"]),
    ("evening", &["evening", "sunset", "dusk", "tonight"]),
    ("night", &["night", "midnight"]),
];

const WEATHER: &[(&str, &[&str])] = &[
    ("rainy", &["rain", "rainy", "raining", "wet", "drizzle"]),
    ("snowy", &["snow", "snowy", "snowing"]),
    ("windy", &["wind", "windy", "gusty"]),
    ("cold", &["cold", "freezing", "chilly", "frosty"]),
    ("sunny", &["sunny", "sun", "hot", "warm"]),
];

const EFFORT: &[(&str, &[&str])] = &[
    ("hard", &["hard", "tough", "intense", "brutal", "grueling"]),
    ("easy", &["easy", "light", "gentle", "relaxed", "recovery"]),
];

const LOCATIONS: &[&str] = &[
    "park", "trail", "gym", "pool", "studio", "track", "beach", "lake", "river", "mountain",
    "treadmill", "neighborhood",
];

const MILESTONE_PHRASES: &[(&str, &str)] = &[
    ("first time", "first time"),
    ("personal best", "personal best"),
    ("personal record", "personal best"),
    ("new record", "personal best"),
    ("pr", "personal best"),
    ("pb", "personal best"),
];

const COMPANION_PHRASES: &[&str] = &[
    "with my dog",
    "with friends",
    "with my friend",
    "with the club",
    "with my partner",
];

/// Contextual cues found in `text`
#[must_use]
pub fn detect_context_cues(text: &str) -> ActivityContext {
    let tokens = tokens(text);
    // Space-padded token stream for whole-phrase matching
    let phrase_text = format!(" {} ", tokens.join(" "));

    ActivityContext {
        location: LOCATIONS
            .iter()
            .find(|location| tokens.iter().any(|t| t == *location))
            .map(|location| (*location).to_owned()),
        time_of_day: first_label(&tokens, TIME_OF_DAY),
        weather: first_label(&tokens, WEATHER),
        feeling: None,
        intensity: first_label(&tokens, EFFORT),
        companions: COMPANION_PHRASES
            .iter()
            .find(|phrase| phrase_text.contains(&format!(" {phrase} ")))
            .map(|phrase| phrase.trim_start_matches("with ").to_owned()),
        achievements: MILESTONE_PHRASES
            .iter()
            .find(|(phrase, _)| phrase_text.contains(&format!(" {phrase} ")))
            .map(|(_, label)| (*label).to_owned()),
        ..ActivityContext::default()
    }
}

fn first_label(tokens: &[String], table: &[(&str, &[&str])]) -> Option<String> {
    table
        .iter()
        .find(|(_, words)| tokens.iter().any(|t| words.contains(&t.as_str())))
        .map(|(label, _)| (*label).to_owned())
}
