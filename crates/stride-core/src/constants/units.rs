// ABOUTME: Unit conversion constants for distance and time measurements
// ABOUTME: Provides named constants to eliminate magic numbers in text scanning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Meters per kilometer conversion factor
pub const METERS_PER_KM: f64 = 1000.0;

/// Meters per statute mile
pub const METERS_PER_MILE: f64 = 1609.34;

/// Meters per yard
pub const METERS_PER_YARD: f64 = 0.9144;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;
