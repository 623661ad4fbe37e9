//! Scoring Layer - Risk scoring engine
//!
//! Pure, synchronous and stateless. The only non-pure input, the current
//! time, is passed in explicitly so results are reproducible.
//!
//! - `params`: tunable constant set (score floor, weights, stablecoin ceiling)
//! - `rules`: the rule catalogue, one function per scoring concern
//! - `engine`: balanced/light policies, dispatcher and final clamping

pub mod params;
pub mod rules;
pub mod engine;

pub use params::{ScoringParams, ParamsError};
pub use rules::{rule, Rule, RuleContext, RuleFn, CATALOGUE, LIGHT_CATALOGUE};
pub use engine::{evaluate_risk, Policy, RiskEngine, LIGHT_RULES};
