//! Risk Engine
//!
//! Folds a rule policy over one token's signals and turns the resulting
//! score card into a bounded, tiered [`RiskAssessment`].
//!
//! Policy selection is a single branch: tokens with strong external
//! corroboration (stablecoins, or market data confirmed by CoinGecko
//! Terminal) get the full balanced rule set; everything else gets the light
//! subset that avoids market-data-driven rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{tier_for_score, RiskAssessment, RuleKind, ScoreCard, TokenSignals};

use super::params::{ParamsError, ScoringParams};
use super::rules::{Rule, RuleContext, CATALOGUE, LIGHT_CATALOGUE};

/// Rules the light policy runs, in catalogue order
pub const LIGHT_RULES: [RuleKind; 8] = [
    RuleKind::HolderConcentration,
    RuleKind::Verification,
    RuleKind::Authority,
    RuleKind::Impersonation,
    RuleKind::ScamFlags,
    RuleKind::Activity,
    RuleKind::TokenAge,
    RuleKind::SupplyInflation,
];

/// Named rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Every rule in the catalogue
    Balanced,
    /// Rules that stay meaningful without rich market data
    Light,
}

impl Policy {
    /// Pick the policy a token's corroboration level warrants
    pub fn for_signals(signals: &TokenSignals) -> Self {
        if signals.is_stable_coin || signals.verified_on_coingecko_terminal {
            Policy::Balanced
        } else {
            Policy::Light
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Policy::Balanced => &CATALOGUE,
            Policy::Light => &LIGHT_CATALOGUE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Balanced => "balanced",
            Policy::Light => "light",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "balanced" => Ok(Policy::Balanced),
            "light" => Ok(Policy::Light),
            other => Err(format!("unknown policy '{}', expected 'balanced' or 'light'", other)),
        }
    }
}

/// Stateless scorer holding an immutable parameter set
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    params: ScoringParams,
}

impl RiskEngine {
    /// Create an engine with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with validated custom parameters
    pub fn with_params(params: ScoringParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score a token with the policy its signals warrant
    pub fn evaluate(&self, signals: &TokenSignals, now: DateTime<Utc>) -> RiskAssessment {
        self.evaluate_with(Policy::for_signals(signals), signals, now)
    }

    /// Score a token with an explicit policy
    pub fn evaluate_with(&self, policy: Policy, signals: &TokenSignals, now: DateTime<Utc>) -> RiskAssessment {
        let ctx = RuleContext {
            params: &self.params,
            now,
        };

        let card = policy
            .rules()
            .iter()
            .fold(ScoreCard::new(self.params.max_score as f64), |card, rule| {
                let before = card.score;
                let card = (rule.apply)(card, signals, &ctx);
                tracing::trace!(
                    rule = rule.kind.name(),
                    delta = card.score - before,
                    "Rule applied to {}",
                    signals.address
                );
                card
            });

        let assessment = self.finish(policy, card);
        tracing::debug!(
            address = %signals.address,
            symbol = %signals.symbol,
            policy = %policy,
            score = assessment.score,
            risk = %assessment.risk,
            "Risk evaluated"
        );
        assessment
    }

    /// Clamp, round and tier a finished score card
    fn finish(&self, policy: Policy, card: ScoreCard) -> RiskAssessment {
        let min = self.params.min_score as f64;
        let max = self.params.max_score as f64;
        // NaN can only come from a non-finite signal slipping past validation
        let raw = if card.score.is_nan() { min } else { card.score };
        let score = raw.clamp(min, max).round() as u32;

        RiskAssessment {
            score,
            total_score: self.params.max_score,
            risk: tier_for_score(score),
            policy: policy.name().to_string(),
            detailed_analysis: card.entries,
        }
    }
}

/// Score a token with default parameters
pub fn evaluate_risk(signals: &TokenSignals, now: DateTime<Utc>) -> RiskAssessment {
    RiskEngine::new().evaluate(signals, now)
}
