//! Event log for run replay and auditing.
//!
//! Every significant thing that happens during a run is appended here with
//! its simulated timestamp. Entries appear in dispatch order, so their
//! timestamps never decrease.
//!
//! # Entry Types
//!
//! - **Market**: shock fired, venue quote updated
//! - **Decision**: opportunity detected, opportunity missed (capital busy)
//! - **Execution**: order placed, order resolved, attempt closed

use crate::core::SimTime;
use crate::models::attempt::AttemptOutcome;
use crate::models::odds::{Outcome, OutcomeOdds};
use crate::models::order::LegId;
use crate::models::quote::VenueId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    ShockFired {
        at: SimTime,
        favorite: Outcome,
        odds: OutcomeOdds,
    },

    QuoteUpdated {
        at: SimTime,
        venue: VenueId,
        odds: OutcomeOdds,
    },

    OpportunityDetected {
        at: SimTime,
        implied_sum: f64,
        edge: f64,
    },

    /// Dropped because an earlier attempt still had pending legs
    OpportunityMissed {
        at: SimTime,
        edge: f64,
        blocking_attempt: u64,
    },

    OrderPlaced {
        at: SimTime,
        leg_id: LegId,
        venue: VenueId,
        stake: f64,
        odds: f64,
    },

    OrderResolved {
        at: SimTime,
        leg_id: LegId,
        venue: VenueId,
        filled: bool,
    },

    AttemptClosed {
        at: SimTime,
        attempt_id: u64,
        outcome: AttemptOutcome,
        realized_pnl: f64,
    },
}

impl LogEntry {
    /// Simulated time the entry was recorded
    pub fn at(&self) -> SimTime {
        match self {
            LogEntry::ShockFired { at, .. } => *at,
            LogEntry::QuoteUpdated { at, .. } => *at,
            LogEntry::OpportunityDetected { at, .. } => *at,
            LogEntry::OpportunityMissed { at, .. } => *at,
            LogEntry::OrderPlaced { at, .. } => *at,
            LogEntry::OrderResolved { at, .. } => *at,
            LogEntry::AttemptClosed { at, .. } => *at,
        }
    }

    pub fn entry_type(&self) -> &'static str {
        match self {
            LogEntry::ShockFired { .. } => "ShockFired",
            LogEntry::QuoteUpdated { .. } => "QuoteUpdated",
            LogEntry::OpportunityDetected { .. } => "OpportunityDetected",
            LogEntry::OpportunityMissed { .. } => "OpportunityMissed",
            LogEntry::OrderPlaced { .. } => "OrderPlaced",
            LogEntry::OrderResolved { .. } => "OrderResolved",
            LogEntry::AttemptClosed { .. } => "AttemptClosed",
        }
    }
}

/// Append-only log of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one type, in order
    pub fn of_type<'a>(&'a self, entry_type: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.entry_type() == entry_type)
    }

    pub fn count_type(&self, entry_type: &str) -> usize {
        self.of_type(entry_type).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_type() {
        let mut log = EventLog::new();
        log.log(LogEntry::OpportunityDetected {
            at: 10.0,
            implied_sum: 0.97,
            edge: 0.03,
        });
        log.log(LogEntry::OpportunityMissed {
            at: 10.0,
            edge: 0.03,
            blocking_attempt: 0,
        });
        log.log(LogEntry::OpportunityDetected {
            at: 12.0,
            implied_sum: 0.98,
            edge: 0.02,
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.count_type("OpportunityDetected"), 2);
        assert_eq!(log.count_type("OpportunityMissed"), 1);
        assert_eq!(log.entries()[2].at(), 12.0);
    }
}
