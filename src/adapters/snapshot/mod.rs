//! Snapshot Adapter
//!
//! File-backed implementation of every signal source port.

mod store;

pub use store::{SnapshotData, SnapshotError, SnapshotStore};
