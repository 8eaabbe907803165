//! Result ledger
//!
//! Append-only record of every closed attempt, plus the aggregates a run
//! report needs: realized and hypothetical P&L, counts per outcome class,
//! win rate and average locked ROI.
//!
//! Entries are never modified after they are recorded.

use crate::core::SimTime;
use crate::models::attempt::{ArbitrageAttempt, AttemptOutcome, OutcomeClass};
use crate::orchestrator::{compute_content_hash, SimulationError};
use serde::{Deserialize, Serialize};

/// One closed attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub attempt_id: u64,
    pub outcome: AttemptOutcome,
    /// Realized P&L: locked profit, lost orphan stake, or zero
    pub locked_or_lost: f64,
    /// What the attempt would have locked had both legs filled
    pub hypothetical_locked: f64,
    pub stake_a: f64,
    pub stake_b: f64,
    pub odds_a: f64,
    pub odds_b: f64,
    pub opened_at: SimTime,
    pub closed_at: SimTime,
}

impl From<&ArbitrageAttempt> for LedgerEntry {
    fn from(attempt: &ArbitrageAttempt) -> Self {
        LedgerEntry {
            attempt_id: attempt.attempt_id,
            outcome: attempt.outcome,
            locked_or_lost: attempt.realized_pnl,
            hypothetical_locked: attempt.allocation.locked,
            stake_a: attempt.allocation.stake_a,
            stake_b: attempt.allocation.stake_b,
            odds_a: attempt.allocation.odds_a,
            odds_b: attempt.allocation.odds_b,
            opened_at: attempt.opened_at(),
            closed_at: attempt.closed_at,
        }
    }
}

impl LedgerEntry {
    pub fn total_outlay(&self) -> f64 {
        self.stake_a + self.stake_b
    }

    /// Locked ROI of the allocation, whether or not it was realized
    pub fn locked_roi(&self) -> f64 {
        self.hypothetical_locked / self.total_outlay()
    }
}

/// Attempt counts per outcome class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub both_filled: usize,
    pub orphan_legs: usize,
    pub both_rejected: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.both_filled + self.orphan_legs + self.both_rejected
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultLedger {
    entries: Vec<LedgerEntry>,
    missed_opportunities: u64,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed attempt
    pub fn record(&mut self, attempt: &ArbitrageAttempt) -> &LedgerEntry {
        self.entries.push(LedgerEntry::from(attempt));
        &self.entries[self.entries.len() - 1]
    }

    /// Count an opportunity dropped while capital was committed
    pub fn record_missed(&mut self) {
        self.missed_opportunities += 1;
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn missed_opportunities(&self) -> u64 {
        self.missed_opportunities
    }

    pub fn total_realized_pnl(&self) -> f64 {
        self.entries.iter().map(|entry| entry.locked_or_lost).sum()
    }

    /// Sum of locked profit assuming every attempt had filled both legs
    pub fn total_hypothetical_pnl(&self) -> f64 {
        self.entries.iter().map(|entry| entry.hypothetical_locked).sum()
    }

    pub fn count(&self, class: OutcomeClass) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.class() == class)
            .count()
    }

    pub fn counts(&self) -> OutcomeCounts {
        OutcomeCounts {
            both_filled: self.count(OutcomeClass::BothFilled),
            orphan_legs: self.count(OutcomeClass::OrphanLeg),
            both_rejected: self.count(OutcomeClass::BothRejected),
        }
    }

    /// Share of attempts where both legs filled; 0.0 with no attempts
    pub fn win_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.count(OutcomeClass::BothFilled) as f64 / self.entries.len() as f64
    }

    /// Mean locked ROI over attempts that filled both legs
    pub fn average_locked_roi(&self) -> Option<f64> {
        let rois: Vec<f64> = self
            .entries
            .iter()
            .filter(|entry| entry.outcome == AttemptOutcome::BothFilled)
            .map(LedgerEntry::locked_roi)
            .collect();

        if rois.is_empty() {
            None
        } else {
            Some(rois.iter().sum::<f64>() / rois.len() as f64)
        }
    }

    /// SHA-256 (hex) of the entry sequence; equal digests mean identical ledgers
    pub fn digest(&self) -> Result<String, SimulationError> {
        compute_content_hash(&self.entries)
    }
}
