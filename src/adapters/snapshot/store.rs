//! Snapshot Store
//!
//! Offline signal source backed by a single JSON document. Useful for
//! replaying captured provider data and for scoring without network access.
//!
//! ```json
//! {
//!   "tokens": [{ "address": "...", "symbol": "...", "tags": ["verified"] }],
//!   "distributions": { "<address>": { "totalHolders": 1200 } },
//!   "markets": { "<address>": { "liquidityUSD": 50000 } },
//!   "socials": { "<address>": { "twitter": "@token" } }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::ports::{
    HolderDistribution, HolderDistributionSource, MarketDataSource, MarketSnapshot, SocialProfile,
    SocialVerifier, SourceError, TokenRecord, TokenRegistry,
};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate token address in snapshot: {0}")]
    DuplicateToken(String),
}

/// On-disk snapshot layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotData {
    pub tokens: Vec<TokenRecord>,
    pub distributions: HashMap<String, HolderDistribution>,
    pub markets: HashMap<String, MarketSnapshot>,
    pub socials: HashMap<String, SocialProfile>,
}

/// In-memory signal source implementing every port
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    tokens: HashMap<String, TokenRecord>,
    data: SnapshotData,
}

impl SnapshotStore {
    pub fn from_data(mut data: SnapshotData) -> Result<Self, SnapshotError> {
        let mut tokens = HashMap::with_capacity(data.tokens.len());
        for token in std::mem::take(&mut data.tokens) {
            if tokens.contains_key(&token.address) {
                return Err(SnapshotError::DuplicateToken(token.address));
            }
            tokens.insert(token.address.clone(), token);
        }
        Ok(Self { tokens, data })
    }

    /// Load a snapshot document from disk
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        let data: SnapshotData = serde_json::from_str(&content)?;
        let store = Self::from_data(data)?;
        tracing::info!(
            "Snapshot loaded from {}: {} tokens",
            path.display(),
            store.tokens.len()
        );
        Ok(store)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Addresses of every token in the snapshot, sorted
    pub fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.tokens.keys().cloned().collect();
        addresses.sort();
        addresses
    }
}

fn lookup<T: Clone>(map: &HashMap<String, T>, address: &str, what: &str) -> Result<T, SourceError> {
    map.get(address)
        .cloned()
        .ok_or_else(|| SourceError::NotFound(format!("{} for {}", what, address)))
}

#[async_trait]
impl TokenRegistry for SnapshotStore {
    async fn find_by_address(&self, address: &str) -> Result<Option<TokenRecord>, SourceError> {
        Ok(self.tokens.get(address).cloned())
    }

    async fn find_many_by_symbol(&self, symbol: &str) -> Result<Vec<TokenRecord>, SourceError> {
        let mut matches: Vec<TokenRecord> = self
            .tokens
            .values()
            .filter(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(matches)
    }
}

#[async_trait]
impl HolderDistributionSource for SnapshotStore {
    async fn fetch_distribution(&self, address: &str) -> Result<HolderDistribution, SourceError> {
        lookup(&self.data.distributions, address, "holder distribution")
    }
}

#[async_trait]
impl MarketDataSource for SnapshotStore {
    async fn fetch_market(&self, address: &str) -> Result<MarketSnapshot, SourceError> {
        lookup(&self.data.markets, address, "market data")
    }
}

#[async_trait]
impl SocialVerifier for SnapshotStore {
    async fn fetch_socials(&self, address: &str) -> Result<SocialProfile, SourceError> {
        lookup(&self.data.socials, address, "socials")
    }
}
