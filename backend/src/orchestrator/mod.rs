//! Orchestrator - wires every component and drives the clock
//!
//! See `engine.rs` for the dispatch loop, `config.rs` for the configuration
//! surface and `summary.rs` for the run report.

pub mod config;
pub mod engine;
pub mod summary;

// Re-export main types for convenience
pub use config::SimulationConfig;
pub use engine::{Orchestrator, SimulationError};
pub use summary::{compute_content_hash, RunSummary};
