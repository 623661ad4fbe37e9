//! Scoring Scenario Integration Tests
//!
//! End-to-end checks of the public scoring API:
//! 1. Reference scenarios (scam launch, healthy stablecoin, empty record)
//! 2. Properties that must hold for any input (bounds, determinism, monotonicity)
//! 3. Policy dispatch and explanation completeness
//! 4. Snapshot-backed sniffing through the application service
//! 5. Batch scoring with malformed records
//!
//! All tests are deterministic: evaluation time is pinned and no network is used.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use snifra::adapters::SnapshotStore;
use snifra::application::{score_batch, Sniffer};
use snifra::domain::{tier_for_score, RiskTier, RuleKind, TokenSignals};
use snifra::scoring::{evaluate_risk, Policy, RiskEngine, ScoringParams, LIGHT_RULES};

// ============================================================================
// Test Fixtures
// ============================================================================

const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const SCAM: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Fresh launch with every red flag raised
fn scam_launch() -> TokenSignals {
    let mut s = TokenSignals::new("USDC", SCAM);
    s.top10_holder_supply_percentage = 80.0;
    s.mint_authority_available = true;
    s.freeze_authority_available = true;
    s.impersonator = true;
    s.liquidity_usd = 500.0;
    s.total_holders = 10;
    s.first_onchain_activity = (now() - Duration::hours(2)).to_rfc3339();
    s
}

/// Stablecoin with revoked authorities and full verification, nothing else known
fn verified_stablecoin() -> TokenSignals {
    let mut s = TokenSignals::new("USDC", USDC);
    s.is_stable_coin = true;
    s.immutable_metadata = true;
    s.market_cap = 50_000_000.0;
    s.liquidity_usd = 2_000_000.0;
    s.verified_on_coingecko = true;
    s.verified_on_coingecko_terminal = true;
    s.verified_on_jupiter = true;
    s.verified_on_raydium = true;
    s.socials_verified = true;
    s.metadata_verified = true;
    s
}

/// Verified stablecoin with a mature, well-distributed market around it
fn healthy_stablecoin() -> TokenSignals {
    let mut s = verified_stablecoin();
    s.top10_holder_supply_percentage = 12.0;
    s.top20_holder_supply_percentage = 25.0;
    s.whale_accounts_available = true;
    s.total_holders = 2_500_000;
    s.total_supply = 9_000_000_000.0;
    s.circulating_supply = 9_000_000_000.0;
    s.first_onchain_activity = "2020-09-30T00:00:00Z".to_string();
    s.networks_count = 8;
    s.dex_count = 20;
    s.twitter = Some("@circle".to_string());
    s.telegram = Some("t.me/circle".to_string());
    s.websites = vec!["https://www.circle.com".to_string()];
    s
}

/// Token that gets the balanced policy without any stablecoin relief
fn terminal_token() -> TokenSignals {
    let mut s = TokenSignals::new("MID", SCAM);
    s.verified_on_coingecko_terminal = true;
    s.top10_holder_supply_percentage = 20.0;
    s.top20_holder_supply_percentage = 45.0;
    s.total_holders = 4_000;
    s.first_onchain_activity = "2024-01-01T00:00:00Z".to_string();
    s
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_scam_launch_lands_on_floor() {
    let assessment = evaluate_risk(&scam_launch(), now());

    assert_eq!(assessment.score, 0);
    assert_eq!(assessment.total_score, 100);
    assert_eq!(assessment.risk, RiskTier::ExtremeRisk);
    assert_eq!(assessment.policy, "light");
    assert!(assessment.mentions(RuleKind::Impersonation));
    assert!(assessment.mentions(RuleKind::Authority));
    assert_eq!(
        assessment.worst_finding().map(|e| e.risk),
        Some(RiskTier::ExtremeRisk)
    );
}

#[test]
fn test_scam_launch_with_raised_floor() {
    let engine = RiskEngine::with_params(ScoringParams::floored()).unwrap();
    let assessment = engine.evaluate(&scam_launch(), now());

    assert_eq!(assessment.score, 35);
    assert_eq!(assessment.risk, RiskTier::ExtremeRisk);
}

#[test]
fn test_healthy_stablecoin_lands_near_ceiling() {
    let assessment = evaluate_risk(&healthy_stablecoin(), now());

    assert!(assessment.score >= 90, "score was {}", assessment.score);
    assert_eq!(assessment.risk, RiskTier::VeryLowRisk);
    assert_eq!(assessment.policy, "balanced");
    assert!(!assessment.risk.is_flagged());
}

#[test]
fn test_verified_stablecoin_lands_in_lowest_tier() {
    let assessment = evaluate_risk(&verified_stablecoin(), now());

    assert_eq!(assessment.score, 90);
    assert_eq!(assessment.risk, RiskTier::VeryLowRisk);
    assert!(assessment.mentions(RuleKind::StableCoinFloor));
}

#[test]
fn test_empty_record_is_bounded_and_high_risk() {
    let signals = TokenSignals::new("NEW", SCAM);
    let assessment = evaluate_risk(&signals, now());

    assert!(assessment.score <= 100);
    assert!(assessment.risk >= RiskTier::HighRisk);
    assert!(assessment.risk.is_flagged());
    assert_eq!(assessment.risk, tier_for_score(assessment.score));
}

#[test]
fn test_wire_format_scenario() {
    let json = format!(
        r#"{{
            "symbol": "USDC",
            "address": "{}",
            "top10HolderSupplyPercentage": 80,
            "mintAuthorityAvailable": true,
            "freezeAuthorityAvailable": true,
            "impersonator": true,
            "liquidityUSD": 500,
            "totalHolders": 10,
            "firstOnchainActivity": "{}"
        }}"#,
        SCAM,
        (now() - Duration::hours(2)).to_rfc3339()
    );

    let signals: TokenSignals = serde_json::from_str(&json).unwrap();
    signals.validate().unwrap();
    assert_eq!(signals, scam_launch());

    let value = serde_json::to_value(evaluate_risk(&signals, now())).unwrap();
    assert_eq!(value["risk"], "EXTREME_RISK");
    assert_eq!(value["totalScore"], 100);
    assert!(value["detailedAnalysis"].as_array().map_or(false, |a| !a.is_empty()));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_deterministic() {
    for signals in [scam_launch(), verified_stablecoin(), healthy_stablecoin(), terminal_token()] {
        assert_eq!(evaluate_risk(&signals, now()), evaluate_risk(&signals, now()));
    }
}

#[test]
fn test_score_always_within_bounds() {
    let engine = RiskEngine::new();
    let liquidity = [0.0, 900.0, 40_000.0, 3_000_000.0, 1e12];
    let holders = [0, 50, 5_000, 1_000_000];
    let top10 = [0.0, 10.0, 60.0, 100.0];

    for &liq in &liquidity {
        for &count in &holders {
            for &pct in &top10 {
                for stable in [false, true] {
                    for flagged in [false, true] {
                        let mut s = terminal_token();
                        s.liquidity_usd = liq;
                        s.total_holders = count;
                        s.top10_holder_supply_percentage = pct;
                        s.is_stable_coin = stable;
                        s.is_honey_pot = flagged;
                        s.is_rug_pull = flagged;
                        s.impersonator = flagged;

                        let a = engine.evaluate(&s, now());
                        assert!(a.score <= a.total_score);
                        assert_eq!(a.risk, tier_for_score(a.score));
                    }
                }
            }
        }
    }
}

#[test]
fn test_more_liquidity_never_lowers_score() {
    let levels = [0.0, 999.0, 1_000.0, 9_999.0, 10_000.0, 75_000.0, 250_000.0, 750_000.0, 2e6, 5e6, 1e9];
    let mut previous = 0;
    for liq in levels {
        let mut s = terminal_token();
        s.liquidity_usd = liq;
        let score = evaluate_risk(&s, now()).score;
        assert!(score >= previous, "score dropped at liquidity {}", liq);
        previous = score;
    }
}

#[test]
fn test_more_concentration_never_raises_score() {
    let mut previous = u32::MAX;
    for pct in (5..=100).step_by(5) {
        let mut s = terminal_token();
        s.top10_holder_supply_percentage = pct as f64;
        let score = evaluate_risk(&s, now()).score;
        assert!(score <= previous, "score rose at top10 = {}%", pct);
        previous = score;
    }
}

#[test]
fn test_stablecoin_never_worse_than_moderate() {
    let mut s = scam_launch();
    s.is_stable_coin = true;
    s.impersonator = false;
    let assessment = evaluate_risk(&s, now());
    assert!(assessment.risk <= RiskTier::ModerateRisk, "got {}", assessment.risk);
    assert_eq!(assessment.score, 90);
}

// ============================================================================
// Policy Dispatch & Explanations
// ============================================================================

#[test]
fn test_light_policy_skips_market_rules() {
    let mut s = scam_launch();
    s.market_cap = 10_000.0;
    s.daily_volume = 100.0;
    let assessment = evaluate_risk(&s, now());

    assert_eq!(assessment.policy, Policy::Light.name());
    for kind in [RuleKind::Liquidity, RuleKind::MarketCap, RuleKind::Volume, RuleKind::Distribution] {
        assert!(!assessment.mentions(kind), "{:?} ran under the light policy", kind);
    }
    assert!(assessment
        .detailed_analysis
        .iter()
        .all(|e| LIGHT_RULES.contains(&e.rule)));
}

#[test]
fn test_terminal_corroboration_selects_balanced() {
    let mut s = scam_launch();
    s.verified_on_coingecko_terminal = true;
    let assessment = evaluate_risk(&s, now());

    assert_eq!(assessment.policy, Policy::Balanced.name());
    for kind in [RuleKind::Liquidity, RuleKind::MarketCap, RuleKind::Volume, RuleKind::Distribution] {
        assert!(assessment.mentions(kind), "{:?} missing under the balanced policy", kind);
    }
}

#[test]
fn test_penalised_token_explains_itself() {
    let assessment = evaluate_risk(&terminal_token(), now());
    assert!(assessment.score < 100);
    assert!(!assessment.detailed_analysis.is_empty());
    assert!(assessment
        .detailed_analysis
        .iter()
        .all(|e| !e.detail.trim().is_empty()));
}

// ============================================================================
// Snapshot Sniffing
// ============================================================================

#[tokio::test]
async fn test_sniff_from_snapshot_flags_impersonator() {
    let snapshot = format!(
        r#"{{
            "tokens": [
                {{ "address": "{usdc}", "symbol": "USDC", "name": "USD Coin", "decimals": 6,
                   "tags": ["verified", "stablecoin"], "immutableMetadata": true }},
                {{ "address": "{scam}", "symbol": "usdc", "name": "USD Coin", "decimals": 6,
                   "mintAuthority": "Scammer1111111111111111111111111111111111111" }}
            ],
            "distributions": {{
                "{scam}": {{ "totalHolders": 10, "top10HolderSupplyPercentage": 80 }}
            }},
            "markets": {{
                "{scam}": {{ "liquidityUSD": 500, "firstOnchainActivity": "{launch}" }}
            }}
        }}"#,
        usdc = USDC,
        scam = SCAM,
        launch = (now() - Duration::hours(2)).to_rfc3339()
    );

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(snapshot.as_bytes()).unwrap();
    let store = Arc::new(SnapshotStore::load(file.path()).unwrap());
    let sniffer = Sniffer::new(store.clone(), store.clone(), store.clone(), store);

    let report = sniffer.sniff(SCAM, now()).await.unwrap();

    assert!(report.impersonator);
    assert!(report.mint_authority_available);
    assert!(!report.is_stable_coin);
    assert_eq!(report.assessment.score, 0);
    assert_eq!(report.assessment.risk, RiskTier::ExtremeRisk);

    let usdc = sniffer.sniff(USDC, now()).await.unwrap();
    assert!(!usdc.impersonator);
    assert!(usdc.is_stable_coin);
    assert_eq!(usdc.assessment.policy, "balanced");
}

// ============================================================================
// Batch Scoring
// ============================================================================

#[test]
fn test_batch_survives_mistyped_record() {
    let mut records = vec![
        serde_json::to_value(scam_launch()).unwrap(),
        serde_json::to_value(verified_stablecoin()).unwrap(),
    ];
    records.insert(1, serde_json::json!({ "symbol": "BAD", "address": SCAM, "totalHolders": -3 }));
    let raw = serde_json::to_string(&records).unwrap();

    let outcome = score_batch(&raw, &RiskEngine::new(), now()).unwrap();

    assert_eq!(outcome.reports.len(), 2);
    assert_eq!(outcome.reports[0].assessment.risk, RiskTier::ExtremeRisk);
    assert_eq!(outcome.reports[1].assessment.risk, RiskTier::VeryLowRisk);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 1);
}
