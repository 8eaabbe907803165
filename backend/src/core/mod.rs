//! Simulated time and the discrete-event scheduler

pub mod clock;

pub use clock::{EventHandler, RunStats, ScheduleError, SimulationClock, StopCondition, StopReason};

/// Simulated milliseconds since the start of a run
///
/// Never negative; never decreases across dispatched events.
pub type SimTime = f64;
