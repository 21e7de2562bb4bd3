// ABOUTME: Exercise knowledge candidate returned by the semantic exercise index
// ABOUTME: Candidate ranking order and intensity classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::SportType;

/// Typical intensity of an exercise concept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Low intensity (walking, gentle yoga)
    Low,
    /// Moderate intensity; also used for corpus values such as "variable"
    #[default]
    Moderate,
    /// High intensity (intervals, heavy lifting)
    High,
}

impl Intensity {
    /// Classify a corpus intensity label; unknown labels count as moderate
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Moderate,
        }
    }
}

/// A ranked exercise concept from the knowledge store
///
/// Immutable once returned by the knowledge store client. `sport_type_mapping`
/// is the raw platform value stored in the corpus; use [`Self::sport_type`]
/// to resolve it against the recognised sport types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCandidate {
    /// Primary name of the exercise
    pub name: String,
    /// Alternative names, most common first
    pub synonyms: Vec<String>,
    /// Platform sport-type value this exercise maps to
    pub sport_type_mapping: String,
    /// Equipment typically used
    pub equipment: BTreeSet<String>,
    /// Muscle groups worked
    pub muscle_groups: BTreeSet<String>,
    /// Typical intensity
    pub intensity: Intensity,
    /// Similarity to the query phrase in [0, 1]
    pub similarity_score: f64,
    /// Short description from the corpus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Related keywords from the corpus
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl ExerciseCandidate {
    /// Create a candidate with the required fields; the score is clamped to [0, 1]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        sport_type_mapping: impl Into<String>,
        similarity_score: f64,
    ) -> Self {
        Self {
            name: name.into(),
            synonyms: Vec::new(),
            sport_type_mapping: sport_type_mapping.into(),
            equipment: BTreeSet::new(),
            muscle_groups: BTreeSet::new(),
            intensity: Intensity::default(),
            similarity_score: clamp_score(similarity_score),
            description: None,
            keywords: Vec::new(),
        }
    }

    /// Set the synonyms
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the equipment
    #[must_use]
    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = equipment.into_iter().map(Into::into).collect();
        self
    }

    /// Set the muscle groups
    #[must_use]
    pub fn with_muscle_groups<I, S>(mut self, muscle_groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.muscle_groups = muscle_groups.into_iter().map(Into::into).collect();
        self
    }

    /// Set the intensity
    #[must_use]
    pub const fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set the corpus description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the related keywords
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the corpus mapping to a recognised sport type
    #[must_use]
    pub fn sport_type(&self) -> Option<SportType> {
        SportType::from_provider_str(&self.sport_type_mapping)
    }

    /// Ranking order: similarity descending, then name ascending
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .similarity_score
            .total_cmp(&self.similarity_score)
            .then_with(|| self.name.cmp(&other.name))
    }

    /// Equipment, muscle groups and corpus keywords as one sorted set
    #[must_use]
    pub fn enrichment_keywords(&self) -> BTreeSet<String> {
        self.equipment
            .iter()
            .chain(self.muscle_groups.iter())
            .chain(self.keywords.iter())
            .cloned()
            .collect()
    }
}

/// Sort candidates into ranking order in place
pub fn rank_candidates(candidates: &mut [ExerciseCandidate]) {
    candidates.sort_by(ExerciseCandidate::rank_cmp);
}

/// Clamp a similarity score into [0, 1], mapping NaN to 0
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
