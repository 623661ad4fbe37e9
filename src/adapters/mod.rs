//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the outer surfaces:
//! - Snapshot: JSON file backing every signal source port
//! - CLI: Command-line interface definitions and rendering

pub mod cli;
pub mod snapshot;

pub use cli::CliApp;
pub use snapshot::{SnapshotError, SnapshotStore};
