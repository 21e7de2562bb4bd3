// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Unit conversion factors and parsing pipeline defaults

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Unit conversion constants for distance and time
pub mod units;

/// Default thresholds and budgets for the parsing pipeline
pub mod parsing;
