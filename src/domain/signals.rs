//! Token Signals
//!
//! The flat, externally assembled snapshot of one token that the scoring
//! engine consumes. Unknown values are carried as zero / false / empty and
//! the engine treats them exactly like observed zeros.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Tag marking a token as a pegged stablecoin
pub const STABLE_COIN_TAG: &str = "stablecoin";

/// Length in bytes of a decoded mint address
pub const ADDRESS_LEN: usize = 32;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Digit strings above this are read as unix milliseconds rather than seconds
const UNIX_MILLIS_CUTOFF: i64 = 100_000_000_000;

/// Contract violations rejected at the input boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalsError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be within 0-100, got {value}")]
    PercentageOutOfRange { field: &'static str, value: f64 },

    #[error("networksCount must be at least 1")]
    NoNetworks,

    #[error("Invalid mint address: {0}")]
    InvalidAddress(String),
}

/// One token at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenSignals {
    // Identity
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u8,
    pub tags: BTreeSet<String>,

    // Supply
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub total_supply_unlocked: bool,

    // Concentration
    pub top10_holder_supply_percentage: f64,
    pub top20_holder_supply_percentage: f64,
    pub total_holders: u64,
    pub whale_accounts_available: bool,

    // Market
    pub market_cap: f64,
    #[serde(rename = "liquidityUSD")]
    pub liquidity_usd: f64,
    pub liquidity_token_amount: f64,
    #[serde(rename = "priceUSD")]
    pub price_usd: f64,
    pub daily_volume: f64,
    pub volume24h: f64,

    // Authority / security
    pub freeze_authority: Option<String>,
    pub freeze_authority_available: bool,
    pub mint_authority: Option<String>,
    pub mint_authority_available: bool,
    pub immutable_metadata: bool,
    pub is_stable_coin: bool,

    // Identity risk
    pub impersonator: bool,
    pub symbol_collision_count: u32,

    // Verification
    pub verified_on_raydium: bool,
    pub verified_on_coingecko: bool,
    pub verified_on_coingecko_terminal: bool,
    pub verified_on_jupiter: bool,

    // Activity
    pub first_onchain_activity: String,
    pub tx_count24h: u64,
    pub unique_buyers24h: u64,
    pub unique_sellers24h: u64,
    pub total_transactions: u64,
    pub total_transfers: u64,
    pub recent_activity: bool,

    // Scam flags, reserved for on-chain simulation
    pub is_honey_pot: bool,
    pub is_rug_pull: bool,

    // Social
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub discord: Option<String>,
    pub github: Option<String>,
    pub websites: Vec<String>,
    pub socials_verified: bool,
    pub metadata_verified: bool,

    // Distribution
    pub networks_count: u32,
    pub dex_count: u32,
}

impl Default for TokenSignals {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            name: String::new(),
            address: String::new(),
            decimals: 0,
            tags: BTreeSet::new(),
            total_supply: 0.0,
            circulating_supply: 0.0,
            total_supply_unlocked: false,
            top10_holder_supply_percentage: 0.0,
            top20_holder_supply_percentage: 0.0,
            total_holders: 0,
            whale_accounts_available: false,
            market_cap: 0.0,
            liquidity_usd: 0.0,
            liquidity_token_amount: 0.0,
            price_usd: 0.0,
            daily_volume: 0.0,
            volume24h: 0.0,
            freeze_authority: None,
            freeze_authority_available: false,
            mint_authority: None,
            mint_authority_available: false,
            immutable_metadata: false,
            is_stable_coin: false,
            impersonator: false,
            symbol_collision_count: 0,
            verified_on_raydium: false,
            verified_on_coingecko: false,
            verified_on_coingecko_terminal: false,
            verified_on_jupiter: false,
            first_onchain_activity: String::new(),
            tx_count24h: 0,
            unique_buyers24h: 0,
            unique_sellers24h: 0,
            total_transactions: 0,
            total_transfers: 0,
            recent_activity: false,
            is_honey_pot: false,
            is_rug_pull: false,
            twitter: None,
            telegram: None,
            discord: None,
            github: None,
            websites: Vec::new(),
            socials_verified: false,
            metadata_verified: false,
            networks_count: 1,
            dex_count: 0,
        }
    }
}

impl TokenSignals {
    /// Minimal signals carrying only identity; everything else at its default
    pub fn new(symbol: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Parsed first on-chain activity, `None` when empty or unreadable
    pub fn first_activity_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.first_onchain_activity)
    }

    /// Token age in fractional days relative to `now`.
    ///
    /// Timestamps in the future count as age zero.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<f64> {
        let first = self.first_activity_at()?;
        let millis = (now - first).num_milliseconds().max(0);
        Some(millis as f64 / MILLIS_PER_DAY)
    }

    /// Number of social channels present: twitter, telegram, discord, and
    /// any website (all websites count once)
    pub fn social_presence_count(&self) -> usize {
        [&self.twitter, &self.telegram, &self.discord]
            .iter()
            .filter(|handle| handle.as_deref().is_some_and(|h| !h.trim().is_empty()))
            .count()
            + usize::from(self.websites.iter().any(|w| !w.trim().is_empty()))
    }

    /// Reject signals that break the assembler's contract.
    ///
    /// Missing data is not an error here; only impossible values are.
    pub fn validate(&self) -> Result<(), SignalsError> {
        validate_address(&self.address)?;

        let amounts = [
            ("totalSupply", self.total_supply),
            ("circulatingSupply", self.circulating_supply),
            ("marketCap", self.market_cap),
            ("liquidityUSD", self.liquidity_usd),
            ("liquidityTokenAmount", self.liquidity_token_amount),
            ("priceUSD", self.price_usd),
            ("dailyVolume", self.daily_volume),
            ("volume24h", self.volume24h),
        ];
        for (field, value) in amounts {
            check_non_negative(field, value)?;
        }

        let percentages = [
            ("top10HolderSupplyPercentage", self.top10_holder_supply_percentage),
            ("top20HolderSupplyPercentage", self.top20_holder_supply_percentage),
        ];
        for (field, value) in percentages {
            check_non_negative(field, value)?;
            if value > 100.0 {
                return Err(SignalsError::PercentageOutOfRange { field, value });
            }
        }

        if self.networks_count == 0 {
            return Err(SignalsError::NoNetworks);
        }

        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SignalsError> {
    if !value.is_finite() {
        return Err(SignalsError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(SignalsError::Negative { field, value });
    }
    Ok(())
}

/// Check that an address is base58 and decodes to a 32-byte key
pub fn validate_address(address: &str) -> Result<(), SignalsError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| SignalsError::InvalidAddress(format!("{}: {}", address, e)))?;
    if bytes.len() != ADDRESS_LEN {
        return Err(SignalsError::InvalidAddress(format!(
            "{} decodes to {} bytes, expected {}",
            address,
            bytes.len(),
            ADDRESS_LEN
        )));
    }
    Ok(())
}

/// Parse the loosely formatted timestamps producers hand us
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        let value: i64 = raw.parse().ok()?;
        return if value >= UNIX_MILLIS_CUTOFF {
            DateTime::from_timestamp_millis(value)
        } else {
            DateTime::from_timestamp(value, 0)
        };
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_are_missing_values() {
        let signals = TokenSignals::default();
        assert_eq!(signals.total_holders, 0);
        assert_eq!(signals.networks_count, 1);
        assert!(!signals.is_stable_coin);
        assert!(signals.first_activity_at().is_none());
    }

    #[test]
    fn test_partial_json_deserializes() {
        let json = r#"{"symbol":"USDC","address":"EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v","liquidityUSD":2500.5,"isStableCoin":true,"tags":["stablecoin"]}"#;
        let signals: TokenSignals = serde_json::from_str(json).unwrap();
        assert_eq!(signals.symbol, "USDC");
        assert_relative_eq!(signals.liquidity_usd, 2500.5);
        assert!(signals.is_stable_coin);
        assert!(signals.has_tag("StableCoin"));
        assert_eq!(signals.networks_count, 1);
        assert_eq!(signals.dex_count, 0);
    }

    #[test]
    fn test_wire_names_keep_usd_suffix() {
        let value = serde_json::to_value(TokenSignals::default()).unwrap();
        assert!(value.get("liquidityUSD").is_some());
        assert!(value.get("priceUSD").is_some());
        assert!(value.get("top10HolderSupplyPercentage").is_some());
        assert!(value.get("verifiedOnCoingeckoTerminal").is_some());
        assert!(value.get("txCount24h").is_some());
    }

    #[test]
    fn test_age_days_rfc3339() {
        let mut signals = TokenSignals::default();
        signals.first_onchain_activity = (now() - Duration::days(10)).to_rfc3339();
        assert_relative_eq!(signals.age_days(now()).unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_age_days_other_formats() {
        let mut signals = TokenSignals::default();

        signals.first_onchain_activity = "2025-05-30 12:00:00".to_string();
        assert_relative_eq!(signals.age_days(now()).unwrap(), 2.0, epsilon = 1e-9);

        signals.first_onchain_activity = "2025-05-22".to_string();
        assert_relative_eq!(signals.age_days(now()).unwrap(), 10.5, epsilon = 1e-9);

        let secs = (now() - Duration::hours(12)).timestamp();
        signals.first_onchain_activity = secs.to_string();
        assert_relative_eq!(signals.age_days(now()).unwrap(), 0.5, epsilon = 1e-9);

        signals.first_onchain_activity = (secs * 1000).to_string();
        assert_relative_eq!(signals.age_days(now()).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_age_days_missing_or_garbage() {
        let mut signals = TokenSignals::default();
        assert!(signals.age_days(now()).is_none());
        signals.first_onchain_activity = "last tuesday".to_string();
        assert!(signals.age_days(now()).is_none());
    }

    #[test]
    fn test_future_timestamp_is_age_zero() {
        let mut signals = TokenSignals::default();
        signals.first_onchain_activity = (now() + Duration::days(3)).to_rfc3339();
        assert_eq!(signals.age_days(now()), Some(0.0));
    }

    #[test]
    fn test_social_presence_count() {
        let mut signals = TokenSignals::default();
        assert_eq!(signals.social_presence_count(), 0);

        signals.twitter = Some("@token".to_string());
        signals.telegram = Some("  ".to_string());
        assert_eq!(signals.social_presence_count(), 1);

        signals.websites = vec!["https://a.io".to_string(), "https://b.io".to_string()];
        signals.discord = Some("discord.gg/token".to_string());
        assert_eq!(signals.social_presence_count(), 3);
    }

    #[test]
    fn test_validate_accepts_missing_data() {
        let signals = TokenSignals::new("USDC", USDC);
        assert!(signals.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let mut signals = TokenSignals::new("USDC", USDC);
        signals.liquidity_usd = -1.0;
        assert_eq!(
            signals.validate(),
            Err(SignalsError::Negative { field: "liquidityUSD", value: -1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut signals = TokenSignals::new("USDC", USDC);
        signals.market_cap = f64::INFINITY;
        assert!(matches!(
            signals.validate(),
            Err(SignalsError::NonFinite { field: "marketCap", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_percentage_over_100() {
        let mut signals = TokenSignals::new("USDC", USDC);
        signals.top20_holder_supply_percentage = 120.0;
        assert!(matches!(
            signals.validate(),
            Err(SignalsError::PercentageOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_networks() {
        let mut signals = TokenSignals::new("USDC", USDC);
        signals.networks_count = 0;
        assert_eq!(signals.validate(), Err(SignalsError::NoNetworks));
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(USDC).is_ok());
        assert!(validate_address("So11111111111111111111111111111111111111112").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("0OIl-not-base58").is_err());
        assert!(validate_address("abc").is_err());
    }
}
