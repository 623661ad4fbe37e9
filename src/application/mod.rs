//! Application Layer - Use cases
//!
//! The sniffer service: gathers signals through the ports and scores them.
//! Batch scoring of signal files.

pub mod batch;
pub mod sniffer;

pub use batch::{score_batch, BatchError, BatchOutcome, RejectedRecord};
pub use sniffer::{assemble, Sniffer, SnifferError, SnifferReport, TRUSTED_TAGS};
