//! Token Sniffer
//!
//! Assembles [`TokenSignals`] for one token from the signal source ports,
//! scores it, and returns a caller-facing report.
//!
//! Only a registry miss is fatal. Every other source failing is logged and
//! replaced by defaults, so a report is always produced and simply scores
//! more conservatively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{RiskAssessment, TokenSignals, STABLE_COIN_TAG};
use crate::ports::{
    HolderDistribution, HolderDistributionSource, MarketDataSource, MarketSnapshot, SocialProfile,
    SocialVerifier, SourceError, TokenRecord, TokenRegistry,
};
use crate::scoring::RiskEngine;

/// Registry tags that mark a token as the canonical holder of its symbol
pub const TRUSTED_TAGS: [&str; 2] = ["verified", "strict"];

#[derive(Debug, Error)]
pub enum SnifferError {
    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Token registry error: {0}")]
    Registry(#[from] SourceError),
}

/// Scored token, as returned to API consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnifferReport {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub address: String,
    pub volume24h: f64,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub market_cap: f64,
    pub total_holders: u64,
    pub top10_holder_supply_percentage: f64,
    pub top20_holder_supply_percentage: f64,
    pub impersonator: bool,
    pub is_stable_coin: bool,
    pub freeze_authority: Option<String>,
    pub freeze_authority_available: bool,
    pub mint_authority: Option<String>,
    pub mint_authority_available: bool,
    pub immutable_metadata: bool,
    pub total_supply_unlocked: bool,
    pub first_onchain_activity: Option<DateTime<Utc>>,
    pub tags: BTreeSet<String>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

impl SnifferReport {
    pub fn new(signals: &TokenSignals, assessment: RiskAssessment) -> Self {
        Self {
            symbol: signals.symbol.clone(),
            name: signals.name.clone(),
            decimals: signals.decimals,
            address: signals.address.clone(),
            volume24h: signals.volume24h,
            total_supply: signals.total_supply,
            circulating_supply: signals.circulating_supply,
            market_cap: signals.market_cap,
            total_holders: signals.total_holders,
            top10_holder_supply_percentage: signals.top10_holder_supply_percentage,
            top20_holder_supply_percentage: signals.top20_holder_supply_percentage,
            impersonator: signals.impersonator,
            is_stable_coin: signals.is_stable_coin,
            freeze_authority: signals.freeze_authority.clone(),
            freeze_authority_available: signals.freeze_authority_available,
            mint_authority: signals.mint_authority.clone(),
            mint_authority_available: signals.mint_authority_available,
            immutable_metadata: signals.immutable_metadata,
            total_supply_unlocked: signals.total_supply_unlocked,
            first_onchain_activity: signals.first_activity_at(),
            tags: signals.tags.clone(),
            assessment,
        }
    }
}

/// Application service wiring the signal sources to the risk engine
#[derive(Clone)]
pub struct Sniffer {
    registry: Arc<dyn TokenRegistry>,
    holders: Arc<dyn HolderDistributionSource>,
    market: Arc<dyn MarketDataSource>,
    socials: Arc<dyn SocialVerifier>,
    engine: RiskEngine,
}

impl Sniffer {
    pub fn new(
        registry: Arc<dyn TokenRegistry>,
        holders: Arc<dyn HolderDistributionSource>,
        market: Arc<dyn MarketDataSource>,
        socials: Arc<dyn SocialVerifier>,
    ) -> Self {
        Self {
            registry,
            holders,
            market,
            socials,
            engine: RiskEngine::new(),
        }
    }

    /// Use a custom-configured engine
    pub fn with_engine(mut self, engine: RiskEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Gather signals for a token and score them
    pub async fn sniff(&self, address: &str, now: DateTime<Utc>) -> Result<SnifferReport, SnifferError> {
        let signals = self.collect_signals(address).await?;
        let assessment = self.engine.evaluate(&signals, now);
        tracing::info!(
            "Sniffed {} ({}): score {}/{} {}",
            signals.symbol,
            address,
            assessment.score,
            assessment.total_score,
            assessment.risk
        );
        Ok(SnifferReport::new(&signals, assessment))
    }

    /// Assemble the full signal record for a token
    pub async fn collect_signals(&self, address: &str) -> Result<TokenSignals, SnifferError> {
        let record = self
            .registry
            .find_by_address(address)
            .await?
            .ok_or_else(|| SnifferError::TokenNotFound(address.to_string()))?;

        let (holders, market, socials, namesakes) = tokio::join!(
            self.holders.fetch_distribution(address),
            self.market.fetch_market(address),
            self.socials.fetch_socials(address),
            self.registry.find_many_by_symbol(&record.symbol),
        );

        let holders = or_default(holders, "holder distribution", address);
        let market = or_default(market, "market data", address);
        let socials = or_default(socials, "social verification", address);
        let namesakes: Vec<TokenRecord> = or_default(namesakes, "symbol lookup", address)
            .into_iter()
            .filter(|other| other.address != record.address)
            .collect();

        Ok(assemble(record, holders, market, socials, &namesakes))
    }
}

fn or_default<T: Default>(result: Result<T, SourceError>, what: &str, address: &str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Falling back to empty {} for {}: {}", what, address, e);
        T::default()
    })
}

fn is_trusted(record: &TokenRecord) -> bool {
    TRUSTED_TAGS.iter().any(|tag| record.has_tag(tag))
}

/// Merge every source into one signal record.
///
/// `namesakes` are the other registry tokens sharing this token's symbol.
pub fn assemble(
    record: TokenRecord,
    holders: HolderDistribution,
    market: MarketSnapshot,
    socials: SocialProfile,
    namesakes: &[TokenRecord],
) -> TokenSignals {
    let self_trusted = is_trusted(&record) || market.verified_on_jupiter || market.verified_on_coingecko;
    let impersonator = !self_trusted && namesakes.iter().any(is_trusted);

    let first_onchain_activity = market
        .first_onchain_activity
        .clone()
        .filter(|ts| !ts.trim().is_empty())
        .or_else(|| record.minted_at.clone())
        .unwrap_or_default();

    // TODO: surface Token-2022 extensions (permanent delegate, transfer hooks) once the registry stores them
    TokenSignals {
        is_stable_coin: record.has_tag(STABLE_COIN_TAG),
        mint_authority_available: record.mint_authority.is_some(),
        freeze_authority_available: record.freeze_authority.is_some(),
        mint_authority: record.mint_authority,
        freeze_authority: record.freeze_authority,
        immutable_metadata: record.immutable_metadata,
        symbol: record.symbol,
        name: record.name,
        address: record.address,
        decimals: record.decimals,
        tags: record.tags.into_iter().collect(),

        total_supply: holders.total_supply,
        circulating_supply: holders.circulating_supply,
        total_supply_unlocked: holders.total_supply_unlocked,
        top10_holder_supply_percentage: holders.top10_holder_supply_percentage,
        top20_holder_supply_percentage: holders.top20_holder_supply_percentage,
        total_holders: holders.total_holders,
        whale_accounts_available: holders.whale_accounts_available,

        market_cap: market.market_cap,
        liquidity_usd: market.liquidity_usd,
        liquidity_token_amount: market.liquidity_token_amount,
        price_usd: market.price_usd,
        daily_volume: market.daily_volume,
        volume24h: market.volume24h,
        verified_on_raydium: market.verified_on_raydium,
        verified_on_coingecko: market.verified_on_coingecko,
        verified_on_coingecko_terminal: market.verified_on_coingecko_terminal,
        verified_on_jupiter: market.verified_on_jupiter,
        first_onchain_activity,
        tx_count24h: market.tx_count24h,
        unique_buyers24h: market.unique_buyers24h,
        unique_sellers24h: market.unique_sellers24h,
        total_transactions: market.total_transactions,
        total_transfers: market.total_transfers,
        recent_activity: market.tx_count24h > 0,
        networks_count: market.networks_count.max(1),
        dex_count: market.dex_count,

        impersonator,
        symbol_collision_count: u32::try_from(namesakes.len()).unwrap_or(u32::MAX),

        is_honey_pot: false,
        is_rug_pull: false,

        twitter: socials.twitter,
        telegram: socials.telegram,
        discord: socials.discord,
        github: socials.github,
        websites: socials.websites,
        socials_verified: socials.socials_verified,
        metadata_verified: socials.metadata_verified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskTier, RuleKind};
    use crate::ports::{
        MockHolderDistributionSource, MockMarketDataSource, MockSocialVerifier, MockTokenRegistry,
    };
    use chrono::TimeZone;

    const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    const FAKE_USDC: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn usdc_record() -> TokenRecord {
        TokenRecord {
            address: USDC.to_string(),
            symbol: "USDC".to_string(),
            name: "USD Coin".to_string(),
            decimals: 6,
            tags: vec!["verified".to_string(), "stablecoin".to_string()],
            mint_authority: Some("BJE5MMbqXjVwjAF7oxwPYXnTXDyspzZyt4vwenNw5ruG".to_string()),
            freeze_authority: Some("7dGbd2QZcCKcTndnHcTL8q7SMVXAkp688NTQYwrRCrar".to_string()),
            immutable_metadata: false,
            minted_at: Some("2020-09-30T00:00:00Z".to_string()),
        }
    }

    fn fake_record() -> TokenRecord {
        TokenRecord {
            address: FAKE_USDC.to_string(),
            symbol: "USDC".to_string(),
            name: "USD Coin".to_string(),
            decimals: 6,
            mint_authority: Some("Scammer111".to_string()),
            ..Default::default()
        }
    }

    fn sniffer(
        registry: MockTokenRegistry,
        holders: MockHolderDistributionSource,
        market: MockMarketDataSource,
        socials: MockSocialVerifier,
    ) -> Sniffer {
        Sniffer::new(Arc::new(registry), Arc::new(holders), Arc::new(market), Arc::new(socials))
    }

    fn failing_sources() -> (MockHolderDistributionSource, MockMarketDataSource, MockSocialVerifier) {
        let mut holders = MockHolderDistributionSource::new();
        holders
            .expect_fetch_distribution()
            .returning(|_| Err(SourceError::Unavailable("rpc timeout".to_string())));
        let mut market = MockMarketDataSource::new();
        market
            .expect_fetch_market()
            .returning(|_| Err(SourceError::Unavailable("rate limited".to_string())));
        let mut socials = MockSocialVerifier::new();
        socials
            .expect_fetch_socials()
            .returning(|_| Err(SourceError::NotFound("socials".to_string())));
        (holders, market, socials)
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let mut registry = MockTokenRegistry::new();
        registry.expect_find_by_address().returning(|_| Ok(None));
        let (holders, market, socials) = failing_sources();

        let result = sniffer(registry, holders, market, socials).sniff(USDC, now()).await;
        assert!(matches!(result, Err(SnifferError::TokenNotFound(_))));
    }

    #[tokio::test]
    async fn test_registry_failure_propagates() {
        let mut registry = MockTokenRegistry::new();
        registry
            .expect_find_by_address()
            .returning(|_| Err(SourceError::Unavailable("db down".to_string())));
        let (holders, market, socials) = failing_sources();

        let result = sniffer(registry, holders, market, socials).sniff(USDC, now()).await;
        assert!(matches!(result, Err(SnifferError::Registry(_))));
    }

    #[tokio::test]
    async fn test_source_failures_degrade_to_defaults() {
        let mut registry = MockTokenRegistry::new();
        registry.expect_find_by_address().returning(|_| Ok(Some(fake_record())));
        registry
            .expect_find_many_by_symbol()
            .returning(|_| Err(SourceError::Unavailable("db down".to_string())));
        let (holders, market, socials) = failing_sources();

        let report = sniffer(registry, holders, market, socials)
            .sniff(FAKE_USDC, now())
            .await
            .unwrap();

        assert_eq!(report.total_holders, 0);
        assert!(report.mint_authority_available);
        assert!(report.assessment.score <= 55);
        assert!(report.assessment.risk >= RiskTier::HighRisk);
    }

    #[tokio::test]
    async fn test_impersonator_detected_from_namesakes() {
        let mut registry = MockTokenRegistry::new();
        registry.expect_find_by_address().returning(|_| Ok(Some(fake_record())));
        registry
            .expect_find_many_by_symbol()
            .returning(|_| Ok(vec![usdc_record(), fake_record()]));
        let (holders, market, socials) = failing_sources();

        let signals = sniffer(registry, holders, market, socials)
            .collect_signals(FAKE_USDC)
            .await
            .unwrap();

        assert!(signals.impersonator);
        assert_eq!(signals.symbol_collision_count, 1);
        assert!(!signals.is_stable_coin);
    }

    #[tokio::test]
    async fn test_stablecoin_report() {
        let mut registry = MockTokenRegistry::new();
        registry.expect_find_by_address().returning(|_| Ok(Some(usdc_record())));
        registry
            .expect_find_many_by_symbol()
            .returning(|_| Ok(vec![usdc_record(), fake_record()]));

        let mut holders = MockHolderDistributionSource::new();
        holders.expect_fetch_distribution().returning(|_| {
            Ok(HolderDistribution {
                total_holders: 3_000_000,
                top10_holder_supply_percentage: 35.0,
                top20_holder_supply_percentage: 48.0,
                whale_accounts_available: true,
                total_supply: 9_000_000_000.0,
                circulating_supply: 9_000_000_000.0,
                total_supply_unlocked: true,
            })
        });
        let mut market = MockMarketDataSource::new();
        market.expect_fetch_market().returning(|_| {
            Ok(MarketSnapshot {
                price_usd: 1.0,
                market_cap: 9_000_000_000.0,
                liquidity_usd: 40_000_000.0,
                daily_volume: 500_000_000.0,
                verified_on_coingecko: true,
                verified_on_coingecko_terminal: true,
                verified_on_jupiter: true,
                tx_count24h: 250_000,
                networks_count: 8,
                dex_count: 20,
                ..Default::default()
            })
        });
        let mut socials = MockSocialVerifier::new();
        socials.expect_fetch_socials().returning(|_| {
            Ok(SocialProfile {
                twitter: Some("@circle".to_string()),
                websites: vec!["https://www.circle.com".to_string()],
                socials_verified: true,
                metadata_verified: true,
                ..Default::default()
            })
        });

        let report = sniffer(registry, holders, market, socials).sniff(USDC, now()).await.unwrap();

        assert!(report.is_stable_coin);
        assert!(!report.impersonator);
        assert_eq!(report.assessment.policy, "balanced");
        assert!(report.assessment.risk <= RiskTier::LowRisk);
        assert_eq!(report.first_onchain_activity, Some(Utc.with_ymd_and_hms(2020, 9, 30, 0, 0, 0).unwrap()));
        assert!(report.assessment.mentions(RuleKind::Liquidity));
    }

    #[test]
    fn test_assemble_prefers_market_activity_timestamp() {
        let market = MarketSnapshot {
            first_onchain_activity: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        let signals = assemble(
            usdc_record(),
            HolderDistribution::default(),
            market,
            SocialProfile::default(),
            &[],
        );
        assert_eq!(signals.first_onchain_activity, "2024-01-01T00:00:00Z");
        assert!(signals.is_stable_coin);
        assert!(signals.freeze_authority_available);
        assert_eq!(signals.symbol_collision_count, 0);
        assert!(!signals.recent_activity);
    }

    #[test]
    fn test_report_flattens_assessment() {
        let signals = TokenSignals::new("USDC", USDC);
        let assessment = crate::scoring::evaluate_risk(&signals, now());
        let report = SnifferReport::new(&signals, assessment);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("score").is_some());
        assert!(value.get("totalScore").is_some());
        assert!(value.get("detailedAnalysis").is_some());
        assert_eq!(value["address"], USDC);
    }
}
