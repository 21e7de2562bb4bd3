// ABOUTME: Static keyword-to-sport-type table scanned in fixed priority order
// ABOUTME: Whole-token matching keeps results deterministic and avoids substring noise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use stride_core::models::SportType;

use super::tokens;

/// Keyword table in priority order; the first entry with a matching token wins
pub const SPORT_KEYWORDS: &[(SportType, &[&str])] = &[
    (SportType::HighIntensityIntervalTraining, &["hiit", "tabata"]),
    (SportType::Crossfit, &["crossfit", "wod"]),
    (
        SportType::Yoga,
        &["yoga", "vinyasa", "hatha", "bikram", "ashtanga", "stretching"],
    ),
    (SportType::Pilates, &["pilates", "reformer"]),
    (
        SportType::Swim,
        &["swim", "swims", "swam", "swimming", "pool"],
    ),
    (
        SportType::Rowing,
        &["row", "rowed", "rowing", "erg", "ergometer"],
    ),
    (SportType::Elliptical, &["elliptical"]),
    (
        SportType::CrossCountrySkiing,
        &["ski", "skied", "skiing", "xc"],
    ),
    (
        SportType::Hike,
        &["hike", "hiked", "hiking", "trek", "trekking"],
    ),
    (
        SportType::Walk,
        &["walk", "walked", "walking", "stroll", "strolled"],
    ),
    (
        SportType::Ride,
        &[
            "ride", "rode", "riding", "bike", "biked", "biking", "cycle", "cycled", "cycling",
            "spin", "spinning",
        ],
    ),
    (
        SportType::WeightTraining,
        &[
            "weight", "weights", "lift", "lifted", "lifting", "strength", "deadlift", "squats",
        ],
    ),
    (
        SportType::Run,
        &[
            "run", "runs", "ran", "running", "jog", "jogged", "jogging", "sprint", "sprints",
        ],
    ),
];

/// Sport type of the highest-priority keyword found in `text`
#[must_use]
pub fn detect_sport_keyword(text: &str) -> Option<SportType> {
    let tokens = tokens(text);
    if tokens.is_empty() {
        return None;
    }
    SPORT_KEYWORDS
        .iter()
        .find(|(_, keywords)| tokens.iter().any(|t| keywords.contains(&t.as_str())))
        .map(|(sport, _)| *sport)
}
