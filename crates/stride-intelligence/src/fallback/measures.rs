// ABOUTME: Duration and distance scanning over free text
// ABOUTME: Converts matched quantities to seconds and meters with fixed unit factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::{Captures, Regex};
use std::sync::LazyLock;

use stride_core::constants::units::{
    METERS_PER_KM, METERS_PER_MILE, METERS_PER_YARD, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

static DURATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 45 minutes, 45-minute, 1.5 hrs, 90s, an hour, half an hour
    Regex::new(
        r"(?i)\b(?P<half>half\s+an?\s+hour)\b|\b(?P<one>an|one)\s+hour\b|(?P<value>\d+(?:\.\d+)?)\s*-?\s*(?P<unit>hours?|hrs?|h|minutes?|mins?|seconds?|secs?|s)\b",
    )
    .ok()
});

static DISTANCE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 5 km, 5k, 3.1 mi, 10 miles, 400m, 1500 meters, 800 yards
    Regex::new(
        r"(?i)(?P<value>\d+(?:\.\d+)?)\s*-?\s*(?P<unit>kilometers?|kilometres?|km|k|miles?|mi|meters?|metres?|m|yards?|yds?)\b",
    )
    .ok()
});

/// First positive duration stated in `text`, in whole seconds
#[must_use]
pub fn scan_duration_seconds(text: &str) -> Option<u32> {
    let pattern = DURATION_PATTERN.as_ref()?;
    pattern
        .captures_iter(text)
        .filter_map(|cap| duration_from_captures(&cap))
        .find_map(to_positive_seconds)
}

/// First distance stated in `text`, in meters
#[must_use]
pub fn scan_distance_meters(text: &str) -> Option<f64> {
    let pattern = DISTANCE_PATTERN.as_ref()?;
    pattern.captures_iter(text).find_map(|cap| {
        let value: f64 = cap.name("value")?.as_str().parse().ok()?;
        let factor = distance_factor(cap.name("unit")?.as_str())?;
        let meters = value * factor;
        meters.is_finite().then_some(meters)
    })
}

fn duration_from_captures(cap: &Captures<'_>) -> Option<f64> {
    if cap.name("half").is_some() {
        return Some(SECONDS_PER_HOUR / 2.0);
    }
    if cap.name("one").is_some() {
        return Some(SECONDS_PER_HOUR);
    }
    let value: f64 = cap.name("value")?.as_str().parse().ok()?;
    let factor = duration_factor(cap.name("unit")?.as_str())?;
    Some(value * factor)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_positive_seconds(seconds: f64) -> Option<u32> {
    let rounded = seconds.round();
    (rounded >= 1.0 && rounded <= f64::from(u32::MAX)).then_some(rounded as u32)
}

fn duration_factor(unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "hour" | "hours" | "hr" | "hrs" | "h" => Some(SECONDS_PER_HOUR),
        "minute" | "minutes" | "min" | "mins" => Some(SECONDS_PER_MINUTE),
        "second" | "seconds" | "sec" | "secs" | "s" => Some(1.0),
        _ => None,
    }
}

fn distance_factor(unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "kilometer" | "kilometers" | "kilometre" | "kilometres" | "km" | "k" => Some(METERS_PER_KM),
        "mile" | "miles" | "mi" => Some(METERS_PER_MILE),
        "meter" | "meters" | "metre" | "metres" | "m" => Some(1.0),
        "yard" | "yards" | "yd" | "yds" => Some(METERS_PER_YARD),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_units() {
        assert_eq!(scan_duration_seconds("Went for a 45 minute run"), Some(2700));
        assert_eq!(scan_duration_seconds("45-minute yoga flow"), Some(2700));
        assert_eq!(scan_duration_seconds("rode for 2 hrs"), Some(7200));
        assert_eq!(scan_duration_seconds("1.5 hours of hiking"), Some(5400));
        assert_eq!(scan_duration_seconds("plank for 90 s"), Some(90));
        assert_eq!(scan_duration_seconds("swam 30 MIN"), Some(1800));
    }

    #[test]
    fn test_duration_phrases() {
        assert_eq!(scan_duration_seconds("an hour of yoga"), Some(3600));
        assert_eq!(scan_duration_seconds("half an hour on the bike"), Some(1800));
    }

    #[test]
    fn test_first_positive_duration_wins() {
        assert_eq!(scan_duration_seconds("0 minutes rest then 20 minutes run"), Some(1200));
        assert_eq!(scan_duration_seconds("30 min run, 10 min cooldown"), Some(1800));
    }

    #[test]
    fn test_no_duration() {
        assert_eq!(scan_duration_seconds("ran 5 km"), None);
        assert_eq!(scan_duration_seconds("did 3 sets of squats"), None);
        assert_eq!(scan_duration_seconds(""), None);
    }

    #[test]
    fn test_distance_units() {
        assert_eq!(scan_distance_meters("ran 5 km"), Some(5000.0));
        assert_eq!(scan_distance_meters("a quick 10k"), Some(10_000.0));
        assert_eq!(scan_distance_meters("swam 400m"), Some(400.0));
        let miles = scan_distance_meters("3.1 mi loop").unwrap();
        assert!((miles - 4988.954).abs() < 1e-6);
    }

    #[test]
    fn test_minutes_are_not_distance() {
        assert_eq!(scan_distance_meters("30 min easy"), None);
        assert_eq!(scan_distance_meters("30 minutes easy"), None);
    }
}
