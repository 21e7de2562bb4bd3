// ABOUTME: Sport type enumeration mirroring the fitness platform's sport-type values
// ABOUTME: Defines the allow-list of recognised sport types with parsing and display helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Sport types recognised by the fitness platform
///
/// Variant names are the platform's wire values (`"Run"`, `"WeightTraining"`, ...),
/// so the derived serde representation is exactly what the platform expects.
/// There is no catch-all variant: a value outside this enum is not
/// a usable sport type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SportType {
    /// Running activity
    Run,
    /// Trail running
    TrailRun,
    /// Treadmill running activity
    VirtualRun,
    /// Cycling/biking activity
    Ride,
    /// Mountain biking activity
    MountainBikeRide,
    /// Gravel cycling activity
    GravelRide,
    /// Electric bike ride
    EBikeRide,
    /// Indoor/trainer cycling activity
    VirtualRide,
    /// Swimming activity
    Swim,
    /// Walking activity
    Walk,
    /// Hiking activity
    Hike,
    /// Weight/strength training
    WeightTraining,
    /// `CrossFit` workout
    Crossfit,
    /// High intensity interval training
    HighIntensityIntervalTraining,
    /// Yoga practice
    Yoga,
    /// Pilates session
    Pilates,
    /// Generic workout/exercise activity
    Workout,
    /// Rowing activity
    Rowing,
    /// Elliptical trainer session
    Elliptical,
    /// Stair stepper session
    StairStepper,
    /// Cross-country skiing
    CrossCountrySkiing,
    /// Alpine/downhill skiing
    AlpineSki,
    /// Backcountry skiing
    BackcountrySki,
    /// Snowboarding activity
    Snowboard,
    /// Snowshoeing activity
    Snowshoe,
    /// Ice skating activity
    IceSkate,
    /// Kayaking activity
    Kayaking,
    /// Canoeing activity
    Canoeing,
    /// Stand-up paddleboarding
    StandUpPaddling,
    /// Surfing activity
    Surfing,
    /// Rock climbing activity
    RockClimbing,
    /// Soccer/football
    Soccer,
    /// Tennis
    Tennis,
    /// Golf
    Golf,
}

impl SportType {
    /// Every recognised sport type, in declaration order
    pub const ALL: &'static [Self] = &[
        Self::Run,
        Self::TrailRun,
        Self::VirtualRun,
        Self::Ride,
        Self::MountainBikeRide,
        Self::GravelRide,
        Self::EBikeRide,
        Self::VirtualRide,
        Self::Swim,
        Self::Walk,
        Self::Hike,
        Self::WeightTraining,
        Self::Crossfit,
        Self::HighIntensityIntervalTraining,
        Self::Yoga,
        Self::Pilates,
        Self::Workout,
        Self::Rowing,
        Self::Elliptical,
        Self::StairStepper,
        Self::CrossCountrySkiing,
        Self::AlpineSki,
        Self::BackcountrySki,
        Self::Snowboard,
        Self::Snowshoe,
        Self::IceSkate,
        Self::Kayaking,
        Self::Canoeing,
        Self::StandUpPaddling,
        Self::Surfing,
        Self::RockClimbing,
        Self::Soccer,
        Self::Tennis,
        Self::Golf,
    ];

    /// The platform wire value for this sport type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "Run",
            Self::TrailRun => "TrailRun",
            Self::VirtualRun => "VirtualRun",
            Self::Ride => "Ride",
            Self::MountainBikeRide => "MountainBikeRide",
            Self::GravelRide => "GravelRide",
            Self::EBikeRide => "EBikeRide",
            Self::VirtualRide => "VirtualRide",
            Self::Swim => "Swim",
            Self::Walk => "Walk",
            Self::Hike => "Hike",
            Self::WeightTraining => "WeightTraining",
            Self::Crossfit => "Crossfit",
            Self::HighIntensityIntervalTraining => "HighIntensityIntervalTraining",
            Self::Yoga => "Yoga",
            Self::Pilates => "Pilates",
            Self::Workout => "Workout",
            Self::Rowing => "Rowing",
            Self::Elliptical => "Elliptical",
            Self::StairStepper => "StairStepper",
            Self::CrossCountrySkiing => "CrossCountrySkiing",
            Self::AlpineSki => "AlpineSki",
            Self::BackcountrySki => "BackcountrySki",
            Self::Snowboard => "Snowboard",
            Self::Snowshoe => "Snowshoe",
            Self::IceSkate => "IceSkate",
            Self::Kayaking => "Kayaking",
            Self::Canoeing => "Canoeing",
            Self::StandUpPaddling => "StandUpPaddling",
            Self::Surfing => "Surfing",
            Self::RockClimbing => "RockClimbing",
            Self::Soccer => "Soccer",
            Self::Tennis => "Tennis",
            Self::Golf => "Golf",
        }
    }

    /// Human-readable label used in generated activity names
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Run => "Run",
            Self::TrailRun => "Trail Run",
            Self::VirtualRun => "Treadmill Run",
            Self::Ride => "Ride",
            Self::MountainBikeRide => "Mountain Bike Ride",
            Self::GravelRide => "Gravel Ride",
            Self::EBikeRide => "E-Bike Ride",
            Self::VirtualRide => "Indoor Ride",
            Self::Swim => "Swim",
            Self::Walk => "Walk",
            Self::Hike => "Hike",
            Self::WeightTraining => "Weight Training",
            Self::Crossfit => "CrossFit",
            Self::HighIntensityIntervalTraining => "HIIT",
            Self::Yoga => "Yoga",
            Self::Pilates => "Pilates",
            Self::Workout => "Workout",
            Self::Rowing => "Row",
            Self::Elliptical => "Elliptical",
            Self::StairStepper => "Stair Stepper",
            Self::CrossCountrySkiing => "Nordic Ski",
            Self::AlpineSki => "Alpine Ski",
            Self::BackcountrySki => "Backcountry Ski",
            Self::Snowboard => "Snowboard",
            Self::Snowshoe => "Snowshoe",
            Self::IceSkate => "Ice Skate",
            Self::Kayaking => "Kayak",
            Self::Canoeing => "Canoe",
            Self::StandUpPaddling => "Paddleboard",
            Self::Surfing => "Surf",
            Self::RockClimbing => "Climb",
            Self::Soccer => "Soccer",
            Self::Tennis => "Tennis",
            Self::Golf => "Golf",
        }
    }

    /// Look up a sport type from a loosely formatted provider string
    ///
    /// Matching ignores case, spaces, underscores, and hyphens, so
    /// `"WeightTraining"`, `"weight_training"`, and `"Weight Training"` all resolve.
    #[must_use]
    pub fn from_provider_str(value: &str) -> Option<Self> {
        let wanted = normalize(value);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|sport| normalize(sport.as_str()) == wanted)
    }

    /// Wire values of every recognised sport type
    #[must_use]
    pub fn allow_list() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_provider_str(s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown sport type: {s}")))
    }
}
