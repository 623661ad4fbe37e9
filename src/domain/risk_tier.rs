//! Risk Tiers
//!
//! Ordered risk classification derived from a numeric score. Higher scores
//! mean lower risk; the mapping lives in a single breakpoint table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk tier, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    /// Neutral finding, only used as an analysis entry severity
    Informational,
    VeryLowRisk,
    LowRisk,
    ModerateRisk,
    HighRisk,
    VeryHighRisk,
    ExtremeRisk,
}

/// Inclusive score upper bounds, ascending. Scores above the last bound
/// fall through to [`RiskTier::VeryLowRisk`].
pub const TIER_TABLE: [(u32, RiskTier); 5] = [
    (35, RiskTier::ExtremeRisk),
    (45, RiskTier::VeryHighRisk),
    (55, RiskTier::HighRisk),
    (75, RiskTier::ModerateRisk),
    (85, RiskTier::LowRisk),
];

/// Map a final score to its tier
pub fn tier_for_score(score: u32) -> RiskTier {
    TIER_TABLE
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::VeryLowRisk)
}

impl RiskTier {
    /// Wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Informational => "INFORMATIONAL",
            RiskTier::VeryLowRisk => "VERY_LOW_RISK",
            RiskTier::LowRisk => "LOW_RISK",
            RiskTier::ModerateRisk => "MODERATE_RISK",
            RiskTier::HighRisk => "HIGH_RISK",
            RiskTier::VeryHighRisk => "VERY_HIGH_RISK",
            RiskTier::ExtremeRisk => "EXTREME_RISK",
        }
    }

    /// Whether a token in this tier should be flagged to users
    pub fn is_flagged(&self) -> bool {
        matches!(
            self,
            RiskTier::HighRisk | RiskTier::VeryHighRisk | RiskTier::ExtremeRisk
        )
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
