//! Scoring Rules
//!
//! Each rule reads a handful of signals, applies a signed delta to the
//! running [`ScoreCard`] and explains itself. Rules never depend on one
//! another, so they can be reordered, reweighted or tested alone.

use chrono::{DateTime, Utc};

use crate::domain::{RiskTier, RuleKind, ScoreCard, TokenSignals};

use super::params::ScoringParams;

/// Inputs shared by every rule in one evaluation
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub params: &'a ScoringParams,
    pub now: DateTime<Utc>,
}

pub type RuleFn = fn(ScoreCard, &TokenSignals, &RuleContext<'_>) -> ScoreCard;

/// A named entry in the rule catalogue
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: RuleKind,
    pub apply: RuleFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("kind", &self.kind).finish()
    }
}

/// Every rule, in evaluation order
pub const CATALOGUE: [Rule; 15] = [
    Rule { kind: RuleKind::HolderConcentration, apply: holder_concentration },
    Rule { kind: RuleKind::Verification, apply: verification },
    Rule { kind: RuleKind::Authority, apply: authority },
    Rule { kind: RuleKind::Impersonation, apply: impersonation },
    Rule { kind: RuleKind::ScamFlags, apply: scam_flags },
    Rule { kind: RuleKind::Liquidity, apply: liquidity },
    Rule { kind: RuleKind::MarketCap, apply: market_cap },
    Rule { kind: RuleKind::Volume, apply: volume },
    Rule { kind: RuleKind::Activity, apply: activity },
    Rule { kind: RuleKind::HolderCount, apply: holder_count },
    Rule { kind: RuleKind::TokenAge, apply: token_age },
    Rule { kind: RuleKind::SupplyInflation, apply: supply_inflation },
    Rule { kind: RuleKind::Distribution, apply: distribution },
    Rule { kind: RuleKind::SocialPresence, apply: social_presence },
    Rule { kind: RuleKind::StableCoinFloor, apply: stable_coin_floor },
];

/// Look up a rule by kind
pub fn rule(kind: RuleKind) -> Rule {
    let apply: RuleFn = match kind {
        RuleKind::HolderConcentration => holder_concentration,
        RuleKind::Verification => verification,
        RuleKind::Authority => authority,
        RuleKind::Impersonation => impersonation,
        RuleKind::ScamFlags => scam_flags,
        RuleKind::Liquidity => liquidity,
        RuleKind::MarketCap => market_cap,
        RuleKind::Volume => volume,
        RuleKind::Activity => activity,
        RuleKind::HolderCount => holder_count,
        RuleKind::TokenAge => token_age,
        RuleKind::SupplyInflation => supply_inflation,
        RuleKind::Distribution => distribution,
        RuleKind::SocialPresence => social_presence,
        RuleKind::StableCoinFloor => stable_coin_floor,
    };
    Rule { kind, apply }
}

/// Rules that stay meaningful without rich market data, in catalogue order
pub const LIGHT_CATALOGUE: [Rule; 8] = [
    CATALOGUE[0],
    CATALOGUE[1],
    CATALOGUE[2],
    CATALOGUE[3],
    CATALOGUE[4],
    CATALOGUE[8],
    CATALOGUE[10],
    CATALOGUE[11],
];

// ---------------------------------------------------------------------------
// Band tables: (exclusive upper bound, penalty, severity), ascending
// ---------------------------------------------------------------------------

type Band = (f64, f64, RiskTier);

/// (inclusive lower bound, bonus), descending
type BonusBand = (f64, f64);

const LIQUIDITY_BANDS: [Band; 7] = [
    (1_000.0, 20.0, RiskTier::ExtremeRisk),
    (10_000.0, 15.0, RiskTier::HighRisk),
    (50_000.0, 10.0, RiskTier::HighRisk),
    (100_000.0, 6.0, RiskTier::ModerateRisk),
    (500_000.0, 3.0, RiskTier::ModerateRisk),
    (1_000_000.0, 2.0, RiskTier::LowRisk),
    (5_000_000.0, 1.0, RiskTier::LowRisk),
];

const MARKET_CAP_BANDS: [Band; 6] = [
    (50_000.0, 10.0, RiskTier::HighRisk),
    (100_000.0, 8.0, RiskTier::HighRisk),
    (500_000.0, 7.0, RiskTier::ModerateRisk),
    (1_000_000.0, 6.0, RiskTier::ModerateRisk),
    (5_000_000.0, 5.0, RiskTier::ModerateRisk),
    (10_000_000.0, 4.0, RiskTier::LowRisk),
];

const MARKET_CAP_BONUSES: [BonusBand; 3] = [
    (1_000_000_000.0, 6.0),
    (100_000_000.0, 4.0),
    (50_000_000.0, 2.0),
];

const VOLUME_BANDS: [Band; 4] = [
    (1_000.0, 15.0, RiskTier::HighRisk),
    (10_000.0, 10.0, RiskTier::HighRisk),
    (50_000.0, 6.0, RiskTier::ModerateRisk),
    (100_000.0, 3.0, RiskTier::LowRisk),
];

const VOLUME_BONUSES: [BonusBand; 2] = [(10_000_000.0, 4.0), (1_000_000.0, 2.0)];

const HOLDER_BANDS: [Band; 5] = [
    (100.0, 20.0, RiskTier::ExtremeRisk),
    (500.0, 15.0, RiskTier::HighRisk),
    (1_000.0, 12.0, RiskTier::HighRisk),
    (3_000.0, 7.0, RiskTier::ModerateRisk),
    (10_000.0, 3.0, RiskTier::LowRisk),
];

const AGE_DAY_BANDS: [Band; 4] = [
    (3.0, 15.0, RiskTier::HighRisk),
    (7.0, 10.0, RiskTier::HighRisk),
    (30.0, 6.0, RiskTier::ModerateRisk),
    (90.0, 3.0, RiskTier::LowRisk),
];

const COINGECKO_WEIGHT: f64 = 5.0;
const JUPITER_WEIGHT: f64 = 5.0;
const RAYDIUM_BONUS: f64 = 2.0;
const COINGECKO_TERMINAL_BONUS: f64 = 2.0;
const UNVERIFIED_SOCIALS_PENALTY: f64 = 3.0;
const UNVERIFIED_METADATA_PENALTY: f64 = 3.0;

const NO_ACTIVITY_PENALTY: f64 = 8.0;
const SELL_PRESSURE_PENALTY: f64 = 4.0;

const SUPPLY_RATIO_SEVERE: f64 = 1.5;
const SUPPLY_RATIO_ELEVATED: f64 = 1.2;
const SUPPLY_SEVERE_PENALTY: f64 = 10.0;
const SUPPLY_ELEVATED_PENALTY: f64 = 5.0;

const SINGLE_NETWORK_PENALTY: f64 = 2.0;
const SINGLE_DEX_PENALTY: f64 = 3.0;
const BROAD_NETWORKS: u32 = 3;
const BROAD_DEXES: u32 = 5;
const BREADTH_BONUS: f64 = 2.0;

const NO_SOCIALS_PENALTY: f64 = 6.0;
const ONE_SOCIAL_PENALTY: f64 = 3.0;
const BROAD_SOCIALS: usize = 3;
const SOCIALS_BONUS: f64 = 2.0;

fn band_for(value: f64, bands: &[Band]) -> Option<Band> {
    bands.iter().copied().find(|(upper, _, _)| value < *upper)
}

fn bonus_for(value: f64, bonuses: &[BonusBand]) -> Option<BonusBand> {
    bonuses.iter().copied().find(|(lower, _)| value >= *lower)
}

fn usd(value: f64) -> String {
    format!("${:.0}", value)
}

// ---------------------------------------------------------------------------
// 1. Holder concentration
// ---------------------------------------------------------------------------

/// Penalty for one holder-share bucket and whether the share was missing.
/// A zero share is read as unknown and charged half the worst case.
fn share_penalty(share: f64, threshold: f64, multiplier: f64, missing_weight: f64) -> (f64, bool) {
    if share <= 0.0 {
        ((100.0 - threshold) * multiplier * missing_weight, true)
    } else if share > threshold {
        ((share - threshold) * multiplier, false)
    } else {
        (0.0, false)
    }
}

fn share_severity(share: f64, high: f64, moderate: f64) -> RiskTier {
    if share >= high {
        RiskTier::HighRisk
    } else if share >= moderate {
        RiskTier::ModerateRisk
    } else {
        RiskTier::LowRisk
    }
}

pub fn holder_concentration(mut card: ScoreCard, s: &TokenSignals, ctx: &RuleContext<'_>) -> ScoreCard {
    let p = ctx.params;
    let kind = RuleKind::HolderConcentration;
    let top10 = s.top10_holder_supply_percentage;
    let top20 = s.top20_holder_supply_percentage;

    let (top10_penalty, top10_missing) =
        share_penalty(top10, p.top10_threshold_pct, p.top10_multiplier, p.missing_concentration_weight);
    let (top20_penalty, top20_missing) =
        share_penalty(top20, p.top20_threshold_pct, p.top20_multiplier, p.missing_concentration_weight);

    let mut severity = RiskTier::LowRisk;

    if top10_missing {
        severity = severity.max(RiskTier::ModerateRisk);
        card = card.note(kind, RiskTier::ModerateRisk, "Top 10 holder share unavailable, assuming concentrated supply");
    } else if top10_penalty > 0.0 {
        let tier = share_severity(top10, 50.0, 30.0);
        severity = severity.max(tier);
        card = card.note(
            kind,
            tier,
            format!(
                "Top 10 holders control {:.1}% of supply (threshold {:.0}%)",
                top10, p.top10_threshold_pct
            ),
        );
    }

    if top20_missing {
        severity = severity.max(RiskTier::ModerateRisk);
        card = card.note(kind, RiskTier::ModerateRisk, "Top 20 holder share unavailable, assuming concentrated supply");
    } else if top20_penalty > 0.0 {
        let tier = share_severity(top20, 70.0, 55.0);
        severity = severity.max(tier);
        card = card.note(
            kind,
            tier,
            format!(
                "Top 20 holders control {:.1}% of supply (threshold {:.0}%)",
                top20, p.top20_threshold_pct
            ),
        );
    }

    let raw = top10_penalty + top20_penalty;
    let penalty = raw.min(p.max_concentration_penalty);
    if penalty > 0.0 {
        let capped = if raw > penalty { " (capped)" } else { "" };
        card = card.apply(
            kind,
            -penalty,
            severity,
            format!("Holder concentration penalty of {:.1} points{}", penalty, capped),
        );
    } else {
        card = card.note(
            kind,
            RiskTier::VeryLowRisk,
            format!("Supply is well distributed: top 10 hold {:.1}%", top10),
        );
    }

    if s.whale_accounts_available {
        card = card.apply(
            kind,
            p.whale_accounts_bonus,
            RiskTier::VeryLowRisk,
            "Whale accounts are identified and trackable",
        );
    }

    card
}

// ---------------------------------------------------------------------------
// 2. External verification
// ---------------------------------------------------------------------------

pub fn verification(mut card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let kind = RuleKind::Verification;

    card = if s.verified_on_coingecko {
        card.apply(kind, COINGECKO_WEIGHT, RiskTier::VeryLowRisk, "Listed on CoinGecko")
    } else {
        card.apply(kind, -COINGECKO_WEIGHT, RiskTier::ModerateRisk, "Not listed on CoinGecko")
    };

    card = if s.verified_on_jupiter {
        card.apply(kind, JUPITER_WEIGHT, RiskTier::VeryLowRisk, "Verified on Jupiter")
    } else {
        card.apply(kind, -JUPITER_WEIGHT, RiskTier::ModerateRisk, "Not verified on Jupiter")
    };

    if s.verified_on_raydium {
        card = card.apply(kind, RAYDIUM_BONUS, RiskTier::VeryLowRisk, "Verified on Raydium");
    }

    if s.verified_on_coingecko_terminal {
        card = card.apply(
            kind,
            COINGECKO_TERMINAL_BONUS,
            RiskTier::VeryLowRisk,
            "Market data corroborated by CoinGecko Terminal",
        );
    }

    if !s.socials_verified {
        card = card.apply(kind, -UNVERIFIED_SOCIALS_PENALTY, RiskTier::LowRisk, "Social accounts are not verified");
    }

    if !s.metadata_verified {
        card = card.apply(kind, -UNVERIFIED_METADATA_PENALTY, RiskTier::LowRisk, "Token metadata is not verified");
    }

    card
}

// ---------------------------------------------------------------------------
// 3. Authority & mutability
// ---------------------------------------------------------------------------

fn authority_label(authority: &Option<String>) -> String {
    match authority.as_deref() {
        Some(a) if !a.is_empty() => format!(" ({})", a),
        _ => String::new(),
    }
}

pub fn authority(mut card: ScoreCard, s: &TokenSignals, ctx: &RuleContext<'_>) -> ScoreCard {
    let p = ctx.params;
    let kind = RuleKind::Authority;

    card = match (s.mint_authority_available, s.is_stable_coin) {
        (true, true) => card.note(
            kind,
            RiskTier::Informational,
            format!("Mint authority retained by stablecoin issuer{}", authority_label(&s.mint_authority)),
        ),
        (true, false) => card.apply(
            kind,
            -p.mint_authority_penalty,
            RiskTier::HighRisk,
            format!("Mint authority is active{}: supply can be inflated", authority_label(&s.mint_authority)),
        ),
        (false, _) => card.note(kind, RiskTier::VeryLowRisk, "Mint authority is revoked"),
    };

    card = match (s.freeze_authority_available, s.is_stable_coin) {
        (true, true) => card.note(
            kind,
            RiskTier::Informational,
            format!("Freeze authority retained by stablecoin issuer{}", authority_label(&s.freeze_authority)),
        ),
        (true, false) => card.apply(
            kind,
            -p.freeze_authority_penalty,
            RiskTier::HighRisk,
            format!(
                "Freeze authority is active{}: holder wallets can be frozen",
                authority_label(&s.freeze_authority)
            ),
        ),
        (false, _) => card.note(kind, RiskTier::VeryLowRisk, "Freeze authority is revoked"),
    };

    card = match (s.immutable_metadata, s.is_stable_coin) {
        (true, _) => card.note(kind, RiskTier::VeryLowRisk, "Token metadata is immutable"),
        (false, true) => card.note(kind, RiskTier::Informational, "Stablecoin metadata is mutable by the issuer"),
        (false, false) => card.apply(
            kind,
            -p.mutable_metadata_penalty,
            RiskTier::ModerateRisk,
            "Token metadata is mutable",
        ),
    };

    card
}

// ---------------------------------------------------------------------------
// 4. Impersonation
// ---------------------------------------------------------------------------

pub fn impersonation(mut card: ScoreCard, s: &TokenSignals, ctx: &RuleContext<'_>) -> ScoreCard {
    let p = ctx.params;
    let kind = RuleKind::Impersonation;

    if s.impersonator {
        card = if s.is_stable_coin {
            card.note(kind, RiskTier::Informational, "Impersonation flag ignored for stablecoin")
        } else {
            card.apply(
                kind,
                -p.impersonator_penalty,
                RiskTier::ExtremeRisk,
                format!("Token impersonates a better-known {} token", s.symbol),
            )
        };
    }

    let collisions = s.symbol_collision_count;
    if collisions > 0 {
        card = if s.is_stable_coin {
            card.note(
                kind,
                RiskTier::Informational,
                format!("{} other tokens share the {} symbol", collisions, s.symbol),
            )
        } else {
            let penalty = (collisions as f64 * p.symbol_collision_penalty).min(p.max_symbol_collision_penalty);
            let tier = if collisions >= 3 { RiskTier::ModerateRisk } else { RiskTier::LowRisk };
            card.apply(
                kind,
                -penalty,
                tier,
                format!("{} other tokens share the {} symbol", collisions, s.symbol),
            )
        };
    }

    card
}

// ---------------------------------------------------------------------------
// 5. Honeypot / rug-pull
// ---------------------------------------------------------------------------

pub fn scam_flags(mut card: ScoreCard, s: &TokenSignals, ctx: &RuleContext<'_>) -> ScoreCard {
    let p = ctx.params;

    if s.is_honey_pot {
        card = card.apply(
            RuleKind::ScamFlags,
            -p.honeypot_penalty,
            RiskTier::ExtremeRisk,
            "Token behaves as a honeypot: sells are blocked",
        );
    }

    if s.is_rug_pull {
        card = card.apply(
            RuleKind::ScamFlags,
            -p.rug_pull_penalty,
            RiskTier::ExtremeRisk,
            "Token shows rug-pull behaviour",
        );
    }

    card
}

// ---------------------------------------------------------------------------
// 6. Liquidity
// ---------------------------------------------------------------------------

pub fn liquidity(card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let value = s.liquidity_usd;
    match band_for(value, &LIQUIDITY_BANDS) {
        Some((upper, penalty, tier)) => card.apply(
            RuleKind::Liquidity,
            -penalty,
            tier,
            format!("Liquidity of {} is below {}", usd(value), usd(upper)),
        ),
        None => card.note(
            RuleKind::Liquidity,
            RiskTier::VeryLowRisk,
            format!("Deep liquidity of {}", usd(value)),
        ),
    }
}

// ---------------------------------------------------------------------------
// 7. Market capitalization
// ---------------------------------------------------------------------------

pub fn market_cap(card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let value = s.market_cap;
    if let Some((upper, penalty, tier)) = band_for(value, &MARKET_CAP_BANDS) {
        return card.apply(
            RuleKind::MarketCap,
            -penalty,
            tier,
            format!("Market cap of {} is below {}", usd(value), usd(upper)),
        );
    }

    match bonus_for(value, &MARKET_CAP_BONUSES) {
        Some((lower, bonus)) => card.apply(
            RuleKind::MarketCap,
            bonus,
            RiskTier::VeryLowRisk,
            format!("Market cap of {} is above {}", usd(value), usd(lower)),
        ),
        None => card.note(
            RuleKind::MarketCap,
            RiskTier::LowRisk,
            format!("Mid-range market cap of {}", usd(value)),
        ),
    }
}

// ---------------------------------------------------------------------------
// 8. Trading volume
// ---------------------------------------------------------------------------

pub fn volume(card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    if s.is_stable_coin {
        return card.note(RuleKind::Volume, RiskTier::Informational, "Volume is not scored for stablecoins");
    }

    let value = s.daily_volume.max(s.volume24h);
    if let Some((upper, penalty, tier)) = band_for(value, &VOLUME_BANDS) {
        return card.apply(
            RuleKind::Volume,
            -penalty,
            tier,
            format!("24h volume of {} is below {}", usd(value), usd(upper)),
        );
    }

    match bonus_for(value, &VOLUME_BONUSES) {
        Some((lower, bonus)) => card.apply(
            RuleKind::Volume,
            bonus,
            RiskTier::VeryLowRisk,
            format!("24h volume of {} is above {}", usd(value), usd(lower)),
        ),
        None => card.note(
            RuleKind::Volume,
            RiskTier::LowRisk,
            format!("Moderate 24h volume of {}", usd(value)),
        ),
    }
}

// ---------------------------------------------------------------------------
// 9. Recent activity
// ---------------------------------------------------------------------------

pub fn activity(mut card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let kind = RuleKind::Activity;
    if s.is_stable_coin {
        return card.note(kind, RiskTier::Informational, "Trading activity is not scored for stablecoins");
    }

    card = if !s.recent_activity || s.tx_count24h == 0 {
        card.apply(kind, -NO_ACTIVITY_PENALTY, RiskTier::HighRisk, "No trading activity in the last 24h")
    } else {
        card.note(
            kind,
            RiskTier::VeryLowRisk,
            format!("{} transactions in the last 24h", s.tx_count24h),
        )
    };

    if s.unique_sellers24h > s.unique_buyers24h {
        card = card.apply(
            kind,
            -SELL_PRESSURE_PENALTY,
            RiskTier::ModerateRisk,
            format!(
                "Sell pressure: {} unique sellers vs {} unique buyers in 24h",
                s.unique_sellers24h, s.unique_buyers24h
            ),
        );
    }

    card
}

// ---------------------------------------------------------------------------
// 10. Holder count
// ---------------------------------------------------------------------------

pub fn holder_count(card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let holders = s.total_holders;
    match band_for(holders as f64, &HOLDER_BANDS) {
        Some((upper, penalty, tier)) => card.apply(
            RuleKind::HolderCount,
            -penalty,
            tier,
            format!("Only {} holders (fewer than {:.0})", holders, upper),
        ),
        None => card.note(
            RuleKind::HolderCount,
            RiskTier::VeryLowRisk,
            format!("Broad holder base of {} accounts", holders),
        ),
    }
}

// ---------------------------------------------------------------------------
// 11. Token age
// ---------------------------------------------------------------------------

pub fn token_age(card: ScoreCard, s: &TokenSignals, ctx: &RuleContext<'_>) -> ScoreCard {
    let Some(age) = s.age_days(ctx.now) else {
        return card.note(
            RuleKind::TokenAge,
            RiskTier::ModerateRisk,
            "First on-chain activity unknown, token age cannot be assessed",
        );
    };

    match band_for(age, &AGE_DAY_BANDS) {
        Some((upper, penalty, tier)) => card.apply(
            RuleKind::TokenAge,
            -penalty,
            tier,
            format!("Token is {:.1} days old (younger than {:.0} days)", age, upper),
        ),
        None => card.note(
            RuleKind::TokenAge,
            RiskTier::VeryLowRisk,
            format!("Established token, {:.0} days old", age),
        ),
    }
}

// ---------------------------------------------------------------------------
// 12. Supply inflation
// ---------------------------------------------------------------------------

pub fn supply_inflation(card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let kind = RuleKind::SupplyInflation;
    let total = s.total_supply;
    let circulating = s.circulating_supply;

    if total <= 0.0 && circulating <= 0.0 {
        return card.note(kind, RiskTier::Informational, "Supply data unavailable");
    }

    if circulating <= 0.0 {
        return card.apply(
            kind,
            -SUPPLY_SEVERE_PENALTY,
            RiskTier::HighRisk,
            format!("No circulating supply reported against a total supply of {:.0}", total),
        );
    }

    let ratio = total / circulating;
    if ratio > SUPPLY_RATIO_SEVERE {
        card.apply(
            kind,
            -SUPPLY_SEVERE_PENALTY,
            RiskTier::HighRisk,
            format!("Total supply is {:.2}x circulating supply", ratio),
        )
    } else if ratio > SUPPLY_RATIO_ELEVATED {
        card.apply(
            kind,
            -SUPPLY_ELEVATED_PENALTY,
            RiskTier::ModerateRisk,
            format!("Total supply is {:.2}x circulating supply", ratio),
        )
    } else {
        card.note(
            kind,
            RiskTier::VeryLowRisk,
            format!("Most of the supply is circulating ({:.2}x)", ratio),
        )
    }
}

// ---------------------------------------------------------------------------
// 13. Network & DEX breadth
// ---------------------------------------------------------------------------

pub fn distribution(mut card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let kind = RuleKind::Distribution;

    if s.networks_count >= BROAD_NETWORKS {
        card = card.apply(
            kind,
            BREADTH_BONUS,
            RiskTier::VeryLowRisk,
            format!("Available on {} networks", s.networks_count),
        );
    } else if s.networks_count <= 1 && !s.is_stable_coin {
        card = card.apply(
            kind,
            -SINGLE_NETWORK_PENALTY,
            RiskTier::LowRisk,
            "Token exists on a single network",
        );
    }

    if s.dex_count >= BROAD_DEXES {
        card = card.apply(
            kind,
            BREADTH_BONUS,
            RiskTier::VeryLowRisk,
            format!("Traded on {} DEXs", s.dex_count),
        );
    } else if s.dex_count <= 1 {
        card = card.apply(
            kind,
            -SINGLE_DEX_PENALTY,
            RiskTier::ModerateRisk,
            format!("Traded on {} DEX(s) only", s.dex_count),
        );
    }

    card
}

// ---------------------------------------------------------------------------
// 14. Social presence
// ---------------------------------------------------------------------------

pub fn social_presence(card: ScoreCard, s: &TokenSignals, _ctx: &RuleContext<'_>) -> ScoreCard {
    let kind = RuleKind::SocialPresence;
    match s.social_presence_count() {
        0 => card.apply(kind, -NO_SOCIALS_PENALTY, RiskTier::ModerateRisk, "No social presence found"),
        1 => card.apply(kind, -ONE_SOCIAL_PENALTY, RiskTier::LowRisk, "Only one social channel found"),
        n if n >= BROAD_SOCIALS => card.apply(
            kind,
            SOCIALS_BONUS,
            RiskTier::VeryLowRisk,
            format!("Active on {} social channels", n),
        ),
        n => card.note(kind, RiskTier::LowRisk, format!("Active on {} social channels", n)),
    }
}

// ---------------------------------------------------------------------------
// 15. Stablecoin floor
// ---------------------------------------------------------------------------

pub fn stable_coin_floor(card: ScoreCard, s: &TokenSignals, ctx: &RuleContext<'_>) -> ScoreCard {
    if !s.is_stable_coin {
        return card;
    }

    let p = ctx.params;
    let ceiling = p.stable_coin_ceiling;
    if card.score >= ceiling {
        return card.note(
            RuleKind::StableCoinFloor,
            RiskTier::Informational,
            "Stablecoin already scores above its floor",
        );
    }

    let headroom = (p.max_score as f64 - card.score).max(0.0);
    let bonus = ((ceiling - card.score) * p.stable_coin_recovery).min(headroom);
    card.apply(
        RuleKind::StableCoinFloor,
        bonus,
        RiskTier::Informational,
        format!("Stablecoin floor adds {:.1} points", bonus),
    )
}
