//! Scheduled event types
//!
//! Everything that happens in a run is one of three events sitting in the
//! clock's schedule until its `due_at` comes up.
//!
//! # Design Principles
//!
//! 1. **Determinism**: Ordering is `(due_at, seq)`; equal timestamps pop in
//!    the order they were scheduled
//! 2. **Self-contained**: Events carry the data their handler needs
//!    (a lagging venue update carries the odds it will apply)

use crate::core::SimTime;
use crate::models::odds::OutcomeOdds;
use crate::models::order::LegId;
use crate::models::quote::VenueId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An event waiting in, or just popped from, the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Market-moving play: reprice venue A now, venue B after the lag
    Shock,

    /// A venue's quote changes to `odds`
    VenueUpdate { venue: VenueId, odds: OutcomeOdds },

    /// A placed order's processing delay has elapsed
    OrderResolution { leg_id: LegId, venue: VenueId },
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Shock => "Shock",
            Event::VenueUpdate { .. } => "VenueUpdate",
            Event::OrderResolution { .. } => "OrderResolution",
        }
    }
}

/// An event paired with its due time and insertion sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub due_at: SimTime,
    /// Global insertion counter, breaks ties between equal `due_at`
    pub seq: u64,
    pub event: Event,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_at
            .total_cmp(&other.due_at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(due_at: SimTime, seq: u64) -> ScheduledEvent {
        ScheduledEvent {
            due_at,
            seq,
            event: Event::Shock,
        }
    }

    #[test]
    fn test_orders_by_time_then_sequence() {
        assert!(at(10.0, 5) < at(20.0, 1));
        assert!(at(10.0, 1) < at(10.0, 2));
        assert_eq!(at(10.0, 3), at(10.0, 3));
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(Event::Shock.event_type(), "Shock");
        let update = Event::VenueUpdate {
            venue: VenueId::B,
            odds: OutcomeOdds { a: 1.5, b: 3.0 },
        };
        assert_eq!(update.event_type(), "VenueUpdate");
    }
}
