//! Scoring Parameters
//!
//! The tunable constant set behind the rule pipeline. Band tables that are
//! not expected to change per deployment live next to their rules; the
//! values here are the ones operators adjust from config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default score ceiling (also the starting score)
pub const DEFAULT_MAX_SCORE: u32 = 100;

/// Default score floor
pub const DEFAULT_MIN_SCORE: u32 = 0;

/// Floor used by the `floored` preset
pub const FLOORED_MIN_SCORE: u32 = 35;

/// Default score stablecoins are lifted towards, inside the very-low-risk tier
pub const DEFAULT_STABLE_COIN_CEILING: f64 = 90.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("min_score ({min}) must be below max_score ({max})")]
    InvalidRange { min: u32, max: u32 },

    #[error("{name} must be within 0-100, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("stable_coin_ceiling ({ceiling}) must be within min_score ({min}) and max_score ({max})")]
    CeilingOutOfRange { ceiling: f64, min: u32, max: u32 },

    #[error("stable_coin_recovery must be within 0-1, got {0}")]
    InvalidRecovery(f64),
}

/// Tunable constants for the rule pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Lowest score a token can receive
    pub min_score: u32,
    /// Highest score a token can receive, also the starting score
    pub max_score: u32,

    /// Top-10 holder share above which concentration is penalized (%)
    pub top10_threshold_pct: f64,
    /// Top-20 holder share above which concentration is penalized (%)
    pub top20_threshold_pct: f64,
    /// Points per percentage point above the top-10 threshold
    pub top10_multiplier: f64,
    /// Points per percentage point above the top-20 threshold
    pub top20_multiplier: f64,
    /// Weight applied to the worst-case distance when a share is missing
    pub missing_concentration_weight: f64,
    /// Cap on the combined concentration penalty
    pub max_concentration_penalty: f64,
    /// Bonus when whale account data is available
    pub whale_accounts_bonus: f64,

    pub mint_authority_penalty: f64,
    pub freeze_authority_penalty: f64,
    pub mutable_metadata_penalty: f64,

    pub impersonator_penalty: f64,
    /// Penalty per token sharing this symbol
    pub symbol_collision_penalty: f64,
    pub max_symbol_collision_penalty: f64,

    pub honeypot_penalty: f64,
    pub rug_pull_penalty: f64,

    /// Score stablecoins are lifted towards
    pub stable_coin_ceiling: f64,
    /// Fraction of the gap to the ceiling granted back to stablecoins
    pub stable_coin_recovery: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
            top10_threshold_pct: 15.0,
            top20_threshold_pct: 40.0,
            top10_multiplier: 0.5,
            top20_multiplier: 0.3,
            missing_concentration_weight: 0.5,
            max_concentration_penalty: 25.0,
            whale_accounts_bonus: 2.0,
            mint_authority_penalty: 20.0,
            freeze_authority_penalty: 10.0,
            mutable_metadata_penalty: 5.0,
            impersonator_penalty: 50.0,
            symbol_collision_penalty: 2.0,
            max_symbol_collision_penalty: 10.0,
            honeypot_penalty: 60.0,
            rug_pull_penalty: 60.0,
            stable_coin_ceiling: DEFAULT_STABLE_COIN_CEILING,
            stable_coin_recovery: 1.0,
        }
    }
}

impl ScoringParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default weights with the score floored at 35, so the worst tokens
    /// sit exactly on the extreme-risk boundary
    pub fn floored() -> Self {
        Self {
            min_score: FLOORED_MIN_SCORE,
            ..Self::default()
        }
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_stable_coin_ceiling(mut self, ceiling: f64) -> Self {
        self.stable_coin_ceiling = ceiling;
        self
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.min_score >= self.max_score {
            return Err(ParamsError::InvalidRange {
                min: self.min_score,
                max: self.max_score,
            });
        }

        for (name, value) in [
            ("top10_threshold_pct", self.top10_threshold_pct),
            ("top20_threshold_pct", self.top20_threshold_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ParamsError::InvalidThreshold { name, value });
            }
        }

        for (name, value) in [
            ("top10_multiplier", self.top10_multiplier),
            ("top20_multiplier", self.top20_multiplier),
            ("missing_concentration_weight", self.missing_concentration_weight),
            ("max_concentration_penalty", self.max_concentration_penalty),
            ("whale_accounts_bonus", self.whale_accounts_bonus),
            ("mint_authority_penalty", self.mint_authority_penalty),
            ("freeze_authority_penalty", self.freeze_authority_penalty),
            ("mutable_metadata_penalty", self.mutable_metadata_penalty),
            ("impersonator_penalty", self.impersonator_penalty),
            ("symbol_collision_penalty", self.symbol_collision_penalty),
            ("max_symbol_collision_penalty", self.max_symbol_collision_penalty),
            ("honeypot_penalty", self.honeypot_penalty),
            ("rug_pull_penalty", self.rug_pull_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::NegativeWeight { name, value });
            }
        }

        let (min, max) = (self.min_score as f64, self.max_score as f64);
        if !(min..=max).contains(&self.stable_coin_ceiling) {
            return Err(ParamsError::CeilingOutOfRange {
                ceiling: self.stable_coin_ceiling,
                min: self.min_score,
                max: self.max_score,
            });
        }

        if !(0.0..=1.0).contains(&self.stable_coin_recovery) {
            return Err(ParamsError::InvalidRecovery(self.stable_coin_recovery));
        }

        Ok(())
    }
}
