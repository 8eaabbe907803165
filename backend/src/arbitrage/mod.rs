//! Arbitrage decision logic
//!
//! - **detector**: spots a cross-venue price pair whose implied
//!   probabilities sum below the profitability threshold
//! - **allocator**: splits a fixed outlay so both outcomes pay the same

pub mod allocator;
pub mod detector;

pub use allocator::{equalize_stakes, AllocationError, StakeAllocation, StakeAllocator};
pub use detector::{ArbitrageDetector, ArbitrageOpportunity};
