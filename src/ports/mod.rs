//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract the producers of
//! token signals:
//! - Token registry (persisted identity, tags, authorities)
//! - Holder distribution (concentration, holder count, supply)
//! - Market data (price, liquidity, volume, listings, activity)
//! - Social verification

pub mod sources;

pub use sources::{
    HolderDistribution, HolderDistributionSource, MarketDataSource, MarketSnapshot, SocialProfile,
    SocialVerifier, SourceError, TokenRecord, TokenRegistry,
};

#[cfg(test)]
pub use sources::{
    MockHolderDistributionSource, MockMarketDataSource, MockSocialVerifier, MockTokenRegistry,
};
