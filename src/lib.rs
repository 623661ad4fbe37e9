//! Snifra - Token Risk Sniffer Library
//!
//! Heuristic risk scoring for Solana fungible tokens.
//!
//! # Modules
//!
//! - `domain`: Core types (TokenSignals, RiskTier, RiskAssessment, ScoreCard)
//! - `scoring`: Rule catalogue, policies and the RiskEngine
//! - `ports`: Signal source traits (TokenRegistry, MarketDataSource, ...)
//! - `application`: The Sniffer service assembling signals and scoring them
//! - `adapters`: Snapshot-backed sources and the CLI
//! - `config`: Configuration loading and validation

pub mod domain;
pub mod scoring;
pub mod ports;
pub mod application;
pub mod adapters;
pub mod config;
