//! Events the simulation clock schedules and dispatches

pub mod types;

pub use types::{Event, ScheduledEvent};
