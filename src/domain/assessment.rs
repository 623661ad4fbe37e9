//! Risk Assessment
//!
//! Output of one scoring run, plus the running score card that rules fold
//! over while it is being produced.

use serde::{Deserialize, Serialize};

use super::risk_tier::RiskTier;

/// Identifies which scoring rule produced an analysis entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    HolderConcentration,
    Verification,
    Authority,
    Impersonation,
    ScamFlags,
    Liquidity,
    MarketCap,
    Volume,
    Activity,
    HolderCount,
    TokenAge,
    SupplyInflation,
    Distribution,
    SocialPresence,
    StableCoinFloor,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::HolderConcentration => "holder_concentration",
            RuleKind::Verification => "verification",
            RuleKind::Authority => "authority",
            RuleKind::Impersonation => "impersonation",
            RuleKind::ScamFlags => "scam_flags",
            RuleKind::Liquidity => "liquidity",
            RuleKind::MarketCap => "market_cap",
            RuleKind::Volume => "volume",
            RuleKind::Activity => "activity",
            RuleKind::HolderCount => "holder_count",
            RuleKind::TokenAge => "token_age",
            RuleKind::SupplyInflation => "supply_inflation",
            RuleKind::Distribution => "distribution",
            RuleKind::SocialPresence => "social_presence",
            RuleKind::StableCoinFloor => "stable_coin_floor",
        }
    }
}

/// One explained scoring decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub rule: RuleKind,
    pub detail: String,
    /// Severity of the finding, calibrated independently of the point delta
    pub risk: RiskTier,
}

/// Running accumulator threaded through the rule pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub entries: Vec<AnalysisEntry>,
}

impl ScoreCard {
    pub fn new(starting_score: f64) -> Self {
        Self {
            score: starting_score,
            entries: Vec::new(),
        }
    }

    /// Apply a signed delta and record why
    pub fn apply(mut self, rule: RuleKind, delta: f64, risk: RiskTier, detail: impl Into<String>) -> Self {
        self.score += delta;
        self.entries.push(AnalysisEntry {
            rule,
            detail: detail.into(),
            risk,
        });
        self
    }

    /// Record a finding without touching the score
    pub fn note(self, rule: RuleKind, risk: RiskTier, detail: impl Into<String>) -> Self {
        self.apply(rule, 0.0, risk, detail)
    }

    pub fn entries_for(&self, rule: RuleKind) -> impl Iterator<Item = &AnalysisEntry> {
        self.entries.iter().filter(move |e| e.rule == rule)
    }
}

/// Final, caller-facing result of a scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u32,
    /// Maximum attainable score, for ratio display
    pub total_score: u32,
    pub risk: RiskTier,
    /// Name of the rule policy that produced this assessment
    pub policy: String,
    pub detailed_analysis: Vec<AnalysisEntry>,
}

impl RiskAssessment {
    /// Whether any entry came from the given rule
    pub fn mentions(&self, rule: RuleKind) -> bool {
        self.detailed_analysis.iter().any(|e| e.rule == rule)
    }

    /// Score as a fraction of the maximum
    pub fn ratio(&self) -> f64 {
        if self.total_score == 0 {
            return 0.0;
        }
        self.score as f64 / self.total_score as f64
    }

    /// Most severe finding recorded, if any
    pub fn worst_finding(&self) -> Option<&AnalysisEntry> {
        self.detailed_analysis.iter().max_by_key(|e| e.risk)
    }
}
