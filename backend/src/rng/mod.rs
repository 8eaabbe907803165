//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, reproducible draws.
//! CRITICAL: Every stochastic draw in a run (shock timing, odds, latency,
//! rejection) MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;
