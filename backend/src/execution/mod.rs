//! Two-leg order execution

pub mod coordinator;

pub use coordinator::{Commitment, ExecutionCoordinator, LegResolution};
