//! Batch Scoring
//!
//! Scores a JSON array of signal records. Each element is decoded on its
//! own, so one malformed record is skipped instead of sinking the batch.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use super::sniffer::SnifferReport;
use crate::domain::TokenSignals;
use crate::scoring::RiskEngine;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Batch is not a JSON array of records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("All {0} records in the batch were rejected")]
    AllRejected(usize),
}

/// A record that could not be scored
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in the input array
    pub index: usize,
    /// `symbol (address)` when the record carried them
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub reports: Vec<SnifferReport>,
    pub rejected: Vec<RejectedRecord>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.reports.len() + self.rejected.len()
    }
}

/// Score every well-formed record in `raw`, a JSON array of signal records.
///
/// Records that fail to decode or validate are logged and skipped. Fails
/// only when the document is not an array, or when it is non-empty and no
/// record survives.
pub fn score_batch(
    raw: &str,
    engine: &RiskEngine,
    now: DateTime<Utc>,
) -> Result<BatchOutcome, BatchError> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut outcome = BatchOutcome::default();

    for (index, record) in records.into_iter().enumerate() {
        let label = record_label(&record);
        match decode(record) {
            Ok(signals) => {
                let assessment = engine.evaluate(&signals, now);
                outcome.reports.push(SnifferReport::new(&signals, assessment));
            }
            Err(reason) => {
                tracing::warn!("Skipping record #{} {}: {}", index, label, reason);
                outcome.rejected.push(RejectedRecord {
                    index,
                    label,
                    reason,
                });
            }
        }
    }

    if outcome.reports.is_empty() && !outcome.rejected.is_empty() {
        return Err(BatchError::AllRejected(outcome.rejected.len()));
    }
    if !outcome.rejected.is_empty() {
        tracing::warn!(
            "{} of {} records skipped",
            outcome.rejected.len(),
            outcome.total()
        );
    }
    Ok(outcome)
}

fn decode(record: Value) -> Result<TokenSignals, String> {
    let signals: TokenSignals = serde_json::from_value(record).map_err(|e| e.to_string())?;
    signals.validate().map_err(|e| e.to_string())?;
    Ok(signals)
}

fn record_label(record: &Value) -> String {
    let field = |name: &str| record.get(name).and_then(Value::as_str).unwrap_or("?");
    format!("{} ({})", field("symbol"), field("address"))
}
