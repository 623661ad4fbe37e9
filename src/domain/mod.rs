//! Domain Layer - Core types for token risk scoring
//!
//! This module contains pure domain types with no I/O.
//! External data reaches it only through the ports layer.
//!
//! - `signals`: the `TokenSignals` input record and its boundary validation
//! - `risk_tier`: ordered risk tiers and the score breakpoint table
//! - `assessment`: the scoring output and the running score card

pub mod signals;
pub mod risk_tier;
pub mod assessment;

pub use signals::{TokenSignals, SignalsError, STABLE_COIN_TAG, parse_timestamp, validate_address};
pub use risk_tier::{RiskTier, TIER_TABLE, tier_for_score};
pub use assessment::{AnalysisEntry, RiskAssessment, RuleKind, ScoreCard};
