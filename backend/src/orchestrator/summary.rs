//! Run summary and content hashing
//!
//! A [`RunSummary`] is the report a driver prints or stores after a run. It
//! carries the config hash and the ledger digest so two summaries can be
//! checked for "same settings, same result" without comparing ledgers.

use crate::core::SimTime;
use crate::ledger::OutcomeCounts;
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub sim_time_ms: SimTime,
    pub events_dispatched: u64,
    pub shocks: u64,
    pub opportunities_detected: u64,
    pub opportunities_missed: u64,
    pub attempts: usize,
    pub counts: OutcomeCounts,
    pub realized_pnl: f64,
    pub hypothetical_pnl: f64,
    pub win_rate: f64,
    /// `None` until some attempt fills both legs
    pub average_locked_roi: Option<f64>,
    pub config_hash: String,
    pub ledger_digest: String,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SimulationError::SerializationError(format!("Summary serialization failed: {}", e))
        })
    }
}

/// Deterministic SHA-256 (hex) of a value's JSON serialization
///
/// Struct fields serialize in declaration order, so equal values always
/// produce equal hashes.
pub fn compute_content_hash<T: Serialize + ?Sized>(value: &T) -> Result<String, SimulationError> {
    let json = serde_json::to_vec(value).map_err(|e| {
        SimulationError::SerializationError(format!("Content serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}
