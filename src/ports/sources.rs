//! Signal Source Ports
//!
//! Interfaces for the collaborators that supply [`TokenSignals`] fields:
//! the token registry, holder-distribution computation, market-data
//! providers and social/metadata verification. Adapters implement these;
//! the sniffer service only ever talks to the traits.
//!
//! [`TokenSignals`]: crate::domain::TokenSignals

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors any signal source can report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("No data for {0}")]
    NotFound(String),

    #[error("Malformed source data: {0}")]
    Parse(String),
}

/// Persisted token identity, as listed by a token registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenRecord {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub tags: Vec<String>,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub immutable_metadata: bool,
    /// When the mint was created, as reported by the registry
    pub minted_at: Option<String>,
}

impl TokenRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Holder and supply figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HolderDistribution {
    pub total_holders: u64,
    pub top10_holder_supply_percentage: f64,
    pub top20_holder_supply_percentage: f64,
    pub whale_accounts_available: bool,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub total_supply_unlocked: bool,
}

/// Price, liquidity, activity and listing data from market providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketSnapshot {
    #[serde(rename = "priceUSD")]
    pub price_usd: f64,
    pub market_cap: f64,
    #[serde(rename = "liquidityUSD")]
    pub liquidity_usd: f64,
    pub liquidity_token_amount: f64,
    pub daily_volume: f64,
    pub volume24h: f64,
    pub verified_on_raydium: bool,
    pub verified_on_coingecko: bool,
    pub verified_on_coingecko_terminal: bool,
    pub verified_on_jupiter: bool,
    pub first_onchain_activity: Option<String>,
    pub tx_count24h: u64,
    pub unique_buyers24h: u64,
    pub unique_sellers24h: u64,
    pub total_transactions: u64,
    pub total_transfers: u64,
    pub networks_count: u32,
    pub dex_count: u32,
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self {
            price_usd: 0.0,
            market_cap: 0.0,
            liquidity_usd: 0.0,
            liquidity_token_amount: 0.0,
            daily_volume: 0.0,
            volume24h: 0.0,
            verified_on_raydium: false,
            verified_on_coingecko: false,
            verified_on_coingecko_terminal: false,
            verified_on_jupiter: false,
            first_onchain_activity: None,
            tx_count24h: 0,
            unique_buyers24h: 0,
            unique_sellers24h: 0,
            total_transactions: 0,
            total_transfers: 0,
            networks_count: 1,
            dex_count: 0,
        }
    }
}

/// Social handles and verification outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialProfile {
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub discord: Option<String>,
    pub github: Option<String>,
    pub websites: Vec<String>,
    pub socials_verified: bool,
    pub metadata_verified: bool,
}

/// Persisted token registry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    /// Look up one token by mint address
    async fn find_by_address(&self, address: &str) -> Result<Option<TokenRecord>, SourceError>;

    /// All tokens listed under a symbol
    async fn find_many_by_symbol(&self, symbol: &str) -> Result<Vec<TokenRecord>, SourceError>;
}

/// Holder-distribution computation (on-chain or third-party)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolderDistributionSource: Send + Sync {
    async fn fetch_distribution(&self, address: &str) -> Result<HolderDistribution, SourceError>;
}

/// Market-data provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_market(&self, address: &str) -> Result<MarketSnapshot, SourceError>;
}

/// Social and metadata verification
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialVerifier: Send + Sync {
    async fn fetch_socials(&self, address: &str) -> Result<SocialProfile, SourceError>;
}
