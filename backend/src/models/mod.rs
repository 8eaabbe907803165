//! Domain models for the shock-arbitrage simulator

pub mod attempt;
pub mod event;
pub mod odds;
pub mod order;
pub mod quote;

// Re-exports
pub use attempt::{ArbitrageAttempt, AttemptOutcome, OutcomeClass};
pub use event::{EventLog, LogEntry};
pub use odds::{OddsError, Outcome, OutcomeOdds};
pub use order::{Fill, LegId, Order, OrderError, OrderState};
pub use quote::{Quote, VenueId};
