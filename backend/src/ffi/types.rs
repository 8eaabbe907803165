//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict).

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::ledger::LedgerEntry;
use crate::models::attempt::AttemptOutcome;
use crate::models::odds::OutcomeOdds;
use crate::orchestrator::{RunSummary, SimulationConfig};

/// Extract an optional field from a Python dict.
///
/// Returns error only if type conversion fails (not if field is missing)
fn extract_optional<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<T>>
where
    for<'py> T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

/// Convert a Python dict to SimulationConfig
///
/// Recognised keys mirror the config struct, plus `book_latency_ms`,
/// `book_latency_jitter_ms` and `book_reject_prob`, which apply to both
/// venues at once. Missing keys keep their defaults.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let mut config = SimulationConfig::default();

    if let Some(seed) = extract_optional::<u64>(py_config, "rng_seed")? {
        config.rng_seed = seed;
    }
    if let Some(freq) = extract_optional::<f64>(py_config, "shock_freq_sec")? {
        config.shock_freq_sec = freq;
    }
    if let Some(lag) = extract_optional::<f64>(py_config, "book_update_lag_ms")? {
        config.book_update_lag_ms = lag;
    }
    if let Some(latency) = extract_optional::<f64>(py_config, "book_latency_ms")? {
        let jitter = extract_optional::<f64>(py_config, "book_latency_jitter_ms")?.unwrap_or(0.0);
        config = config.with_book_latency_ms(latency, jitter);
    }
    if let Some(reject_prob) = extract_optional::<f64>(py_config, "book_reject_prob")? {
        config = config.with_reject_prob(reject_prob);
    }
    if let Some(outlay) = extract_optional::<f64>(py_config, "total_outlay")? {
        config.total_outlay = outlay;
    }
    if let Some(edge) = extract_optional::<f64>(py_config, "min_arbitrage_edge")? {
        config.min_arbitrage_edge = edge;
    }
    if let Some((a, b)) = extract_optional::<(f64, f64)>(py_config, "opening_odds")? {
        config.opening_odds = OutcomeOdds { a, b };
    }
    if let Some(range) = extract_optional::<(f64, f64)>(py_config, "favorite_odds_range")? {
        config.favorite_odds_range = range;
    }
    if let Some(noise) = extract_optional::<f64>(py_config, "odds_noise")? {
        config.odds_noise = noise;
    }

    config.validate().map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
    })?;
    Ok(config)
}

fn outcome_label(outcome: &AttemptOutcome) -> String {
    match outcome {
        AttemptOutcome::BothFilled => "both_filled".to_string(),
        AttemptOutcome::OrphanLeg(leg) => format!("orphan_leg_{:?}", leg).to_lowercase(),
        AttemptOutcome::BothRejected => "both_rejected".to_string(),
    }
}

pub fn summary_to_py(py: Python<'_>, summary: &RunSummary) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("sim_time_ms", summary.sim_time_ms)?;
    dict.set_item("events_dispatched", summary.events_dispatched)?;
    dict.set_item("shocks", summary.shocks)?;
    dict.set_item("opportunities_detected", summary.opportunities_detected)?;
    dict.set_item("opportunities_missed", summary.opportunities_missed)?;
    dict.set_item("attempts", summary.attempts)?;
    dict.set_item("both_filled", summary.counts.both_filled)?;
    dict.set_item("orphan_legs", summary.counts.orphan_legs)?;
    dict.set_item("both_rejected", summary.counts.both_rejected)?;
    dict.set_item("realized_pnl", summary.realized_pnl)?;
    dict.set_item("hypothetical_pnl", summary.hypothetical_pnl)?;
    dict.set_item("win_rate", summary.win_rate)?;
    dict.set_item("average_locked_roi", summary.average_locked_roi)?;
    dict.set_item("config_hash", &summary.config_hash)?;
    dict.set_item("ledger_digest", &summary.ledger_digest)?;
    Ok(dict.unbind())
}

pub fn ledger_entry_to_py(py: Python<'_>, entry: &LedgerEntry) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("attempt_id", entry.attempt_id)?;
    dict.set_item("outcome", outcome_label(&entry.outcome))?;
    dict.set_item("locked_or_lost", entry.locked_or_lost)?;
    dict.set_item("hypothetical_locked", entry.hypothetical_locked)?;
    dict.set_item("stake_a", entry.stake_a)?;
    dict.set_item("stake_b", entry.stake_b)?;
    dict.set_item("odds_a", entry.odds_a)?;
    dict.set_item("odds_b", entry.odds_b)?;
    dict.set_item("opened_at", entry.opened_at)?;
    dict.set_item("closed_at", entry.closed_at)?;
    Ok(dict.unbind())
}
