//! Core types for Affinity
//!
//! This module defines the small value types shared across the engine:
//! - Member identifiers
//! - Affinity level bands
//! - Element harmony classes
//! - Conflict severity tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of an organization member
///
/// Ordering follows the underlying UUID, which is what the engine uses as the
/// deterministic tie-break when canonicalizing member sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Build an id from an integer; convenient for fixtures and tests
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Ordinal affinity band derived from a 0-100 score
///
/// - 80-100: Excellent
/// - 65-79: Good
/// - 50-64: Moderate
/// - 35-49: Challenging
/// - 0-34: Difficult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffinityLevel {
    Excellent,
    Good,
    Moderate,
    Challenging,
    Difficult,
}

impl AffinityLevel {
    /// Band a score. Works for both pair scores and (fractional) team averages.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            AffinityLevel::Excellent
        } else if score >= 65.0 {
            AffinityLevel::Good
        } else if score >= 50.0 {
            AffinityLevel::Moderate
        } else if score >= 35.0 {
            AffinityLevel::Challenging
        } else {
            AffinityLevel::Difficult
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AffinityLevel::Excellent => "excellent",
            AffinityLevel::Good => "good",
            AffinityLevel::Moderate => "moderate",
            AffinityLevel::Challenging => "challenging",
            AffinityLevel::Difficult => "difficult",
        }
    }
}

impl fmt::Display for AffinityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How two elements relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementHarmony {
    Harmonious,
    Challenging,
    Neutral,
}

impl fmt::Display for ElementHarmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Conflict severity tier. `Critical` sorts before `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// `numerator / denominator` in hundredths, rounded half-up.
///
/// Integer arithmetic only, so results never depend on float rounding of the
/// intermediate quotient. `denominator` must be non-zero.
pub fn hundredths_half_up(numerator: u64, denominator: u64) -> u64 {
    (numerator * 200 + denominator) / (denominator * 2)
}

/// Round `numerator / denominator` half-up to two decimal places
pub fn round_half_up_2dp(numerator: u64, denominator: u64) -> f64 {
    hundredths_half_up(numerator, denominator) as f64 / 100.0
}
