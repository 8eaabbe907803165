//! Shock Arbitrage Simulator Core - Rust Engine
//!
//! Discrete-event simulation of a timing arbitrage between two betting
//! venues that reprice at different speeds after a market-moving shock.
//!
//! # Architecture
//!
//! - **core**: Simulated time and the event scheduler
//! - **events**: Scheduled event types
//! - **models**: Domain types (odds, quotes, orders, attempts, event log)
//! - **shocks**: Poisson shock generator with a lagging second venue
//! - **venue**: Mock books with latency and rejection
//! - **arbitrage**: Opportunity detection and equal-payoff stake allocation
//! - **execution**: Two-leg order coordination
//! - **ledger**: Realized and hypothetical P&L
//! - **orchestrator**: Configuration, wiring and the run loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Odds are always > 1.0
//! 2. Simulated time never goes backwards; equal timestamps dispatch FIFO
//! 3. All randomness is deterministic (seeded RNG)
//! 4. At most one attempt (two legs) is in flight at a time

// Module declarations
pub mod arbitrage;
pub mod core;
pub mod events;
pub mod execution;
pub mod ledger;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod shocks;
pub mod venue;

// Re-exports for convenience
pub use arbitrage::{
    equalize_stakes, ArbitrageDetector, ArbitrageOpportunity, StakeAllocation, StakeAllocator,
};
pub use core::{SimTime, SimulationClock, StopCondition};
pub use execution::ExecutionCoordinator;
pub use ledger::{LedgerEntry, OutcomeCounts, ResultLedger};
pub use models::{
    attempt::{ArbitrageAttempt, AttemptOutcome},
    odds::{Outcome, OutcomeOdds},
    quote::VenueId,
};
pub use orchestrator::{Orchestrator, RunSummary, SimulationConfig, SimulationError};
pub use rng::RngManager;
pub use shocks::{ShockFeed, ShockFeedConfig};
pub use venue::{Venue, VenueConfig, Venues};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn shock_arb_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PySimulation>()?;
    Ok(())
}
