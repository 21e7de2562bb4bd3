// ABOUTME: Activity drafts produced by extractors and the final activity record
// ABOUTME: Includes contextual cues (location, weather, feeling) surfaced from prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SportType;

/// Contextual cues mentioned alongside the workout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityContext {
    /// Where the activity happened ("park", "gym")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Part of the day ("morning", "evening")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    /// Weather conditions ("rainy", "windy")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// How the athlete felt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeling: Option<String>,
    /// Perceived effort ("easy", "tough")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    /// Who came along
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companions: Option<String>,
    /// Milestones ("first time", "personal best")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
    /// Gear used ("new shoes", "kettlebell")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    /// What the session was training for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    /// Obstacles overcome ("windy conditions")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    /// Route or course taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// What was playing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    /// Fuel before or during the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<String>,
    /// Cool-down or recovery notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
    /// Standout moments worth mentioning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
}

impl ActivityContext {
    /// True when no cue is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.time_of_day.is_none()
            && self.weather.is_none()
            && self.feeling.is_none()
            && self.intensity.is_none()
            && self.companions.is_none()
            && self.achievements.is_none()
            && self.equipment.is_none()
            && self.goals.is_none()
            && self.challenges.is_none()
            && self.route.is_none()
            && self.music.is_none()
            && self.nutrition.is_none()
            && self.recovery.is_none()
            && self.highlights.is_none()
    }

    /// Fill every unset cue from `other`
    pub fn fill_from(&mut self, other: &Self) {
        fill(&mut self.location, other.location.as_ref());
        fill(&mut self.time_of_day, other.time_of_day.as_ref());
        fill(&mut self.weather, other.weather.as_ref());
        fill(&mut self.feeling, other.feeling.as_ref());
        fill(&mut self.intensity, other.intensity.as_ref());
        fill(&mut self.companions, other.companions.as_ref());
        fill(&mut self.achievements, other.achievements.as_ref());
        fill(&mut self.equipment, other.equipment.as_ref());
        fill(&mut self.goals, other.goals.as_ref());
        fill(&mut self.challenges, other.challenges.as_ref());
        fill(&mut self.route, other.route.as_ref());
        fill(&mut self.music, other.music.as_ref());
        fill(&mut self.nutrition, other.nutrition.as_ref());
        fill(&mut self.recovery, other.recovery.as_ref());
        fill(&mut self.highlights, other.highlights.as_ref());
    }
}

fn fill(slot: &mut Option<String>, value: Option<&String>) {
    if slot.is_none() {
        *slot = value.cloned();
    }
}

/// Tone requested for the downstream activity description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionStyle {
    /// Celebrates the effort
    Motivational,
    /// Relaxed, as if telling a friend
    #[default]
    Casual,
    /// Focused on numbers and performance
    Technical,
    /// Lighthearted
    Humorous,
}

impl DescriptionStyle {
    /// Parse a style label, ignoring case and surrounding whitespace
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "motivational" => Some(Self::Motivational),
            "casual" => Some(Self::Casual),
            "technical" => Some(Self::Technical),
            "humorous" => Some(Self::Humorous),
            _ => None,
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Motivational => "motivational",
            Self::Casual => "casual",
            Self::Technical => "technical",
            Self::Humorous => "humorous",
        }
    }
}

/// Which extractor produced a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSource {
    /// Generative-language service
    Generative,
    /// Deterministic keyword/pattern extractor
    Fallback,
}

/// Interim extraction result, not yet validated as a final record
///
/// A draft without `sport_type` is unusable and must never be promoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedActivityDraft {
    /// Detected sport type
    pub sport_type: Option<SportType>,
    /// Suggested activity name
    pub name: Option<String>,
    /// Duration in seconds, always > 0 when present
    pub duration_seconds: Option<u32>,
    /// Distance in meters, always >= 0 when present
    pub distance_meters: Option<f64>,
    /// Seed text for the activity description
    pub description_seed: Option<String>,
    /// Requested description tone, if the extractor picked one
    #[serde(default)]
    pub description_style: Option<DescriptionStyle>,
    /// Trust in this draft, in [0, 1]
    pub confidence: f64,
    /// Extractor that produced this draft
    pub source: DraftSource,
    /// Contextual cues found in the prompt
    #[serde(default)]
    pub context: ActivityContext,
}

impl ParsedActivityDraft {
    /// A draft with nothing detected and zero confidence
    #[must_use]
    pub fn empty(source: DraftSource) -> Self {
        Self {
            sport_type: None,
            name: None,
            duration_seconds: None,
            distance_meters: None,
            description_seed: None,
            description_style: None,
            confidence: 0.0,
            source,
            context: ActivityContext::default(),
        }
    }

    /// Whether the draft carries a sport type and may be finalized
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.sport_type.is_some()
    }
}

/// Final structured activity, ready to hand to the fitness platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Platform sport type
    pub sport_type: SportType,
    /// Activity title
    pub name: String,
    /// Activity description
    pub description: String,
    /// Tone for downstream description generation
    #[serde(default)]
    pub description_style: DescriptionStyle,
    /// Elapsed time in seconds, always > 0
    pub duration_seconds: u32,
    /// Distance in meters, 0.0 when none was stated
    pub distance_meters: f64,
    /// Keywords and equipment for downstream description generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<BTreeSet<String>>,
    /// Contextual cues carried through from the prompt
    #[serde(default, skip_serializing_if = "ActivityContext::is_empty")]
    pub context: ActivityContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_style_labels() {
        assert_eq!(
            DescriptionStyle::from_label(" Humorous "),
            Some(DescriptionStyle::Humorous)
        );
        assert_eq!(DescriptionStyle::from_label("sarcastic"), None);
        assert_eq!(DescriptionStyle::default(), DescriptionStyle::Casual);
        assert_eq!(DescriptionStyle::Technical.as_str(), "technical");
    }

    #[test]
    fn test_fill_from_covers_extended_cues() {
        let mut cues = ActivityContext {
            route: Some("river loop".to_owned()),
            ..ActivityContext::default()
        };
        let other = ActivityContext {
            route: Some("hill repeats".to_owned()),
            challenges: Some("headwind".to_owned()),
            highlights: Some("saw a heron".to_owned()),
            ..ActivityContext::default()
        };
        cues.fill_from(&other);
        assert_eq!(cues.route.as_deref(), Some("river loop"));
        assert_eq!(cues.challenges.as_deref(), Some("headwind"));
        assert_eq!(cues.highlights.as_deref(), Some("saw a heron"));
        assert!(!cues.is_empty());
    }
}
