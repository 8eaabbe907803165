//! Arbitrage attempt model
//!
//! Groups the two legs placed for one opportunity and the classification of
//! how they resolved.

use crate::arbitrage::{ArbitrageOpportunity, StakeAllocation};
use crate::core::SimTime;
use crate::models::odds::Outcome;
use crate::models::order::{Fill, Order};
use serde::{Deserialize, Serialize};

/// How the two legs of an attempt resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Hedged: the locked profit is realized
    BothFilled,

    /// Only the named leg filled; its stake is unhedged
    OrphanLeg(Outcome),

    /// Nothing was risked
    BothRejected,
}

/// Outcome without the orphan's leg, for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeClass {
    BothFilled,
    OrphanLeg,
    BothRejected,
}

impl AttemptOutcome {
    /// Classify from each leg's fill status
    pub fn classify(leg_a_filled: bool, leg_b_filled: bool) -> Self {
        match (leg_a_filled, leg_b_filled) {
            (true, true) => AttemptOutcome::BothFilled,
            (true, false) => AttemptOutcome::OrphanLeg(Outcome::A),
            (false, true) => AttemptOutcome::OrphanLeg(Outcome::B),
            (false, false) => AttemptOutcome::BothRejected,
        }
    }

    pub fn class(&self) -> OutcomeClass {
        match self {
            AttemptOutcome::BothFilled => OutcomeClass::BothFilled,
            AttemptOutcome::OrphanLeg(_) => OutcomeClass::OrphanLeg,
            AttemptOutcome::BothRejected => OutcomeClass::BothRejected,
        }
    }

    /// Realized P&L for this outcome under the given allocation
    ///
    /// An orphan leg is booked at worst case: the filled stake is lost
    /// with nothing on the other side to offset it.
    pub fn realized_pnl(&self, allocation: &StakeAllocation) -> f64 {
        match self {
            AttemptOutcome::BothFilled => allocation.locked,
            AttemptOutcome::OrphanLeg(leg) => -allocation.stake_for(*leg),
            AttemptOutcome::BothRejected => 0.0,
        }
    }
}

/// A fully resolved two-leg attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageAttempt {
    pub attempt_id: u64,
    pub opportunity: ArbitrageOpportunity,
    pub allocation: StakeAllocation,
    pub leg_a: Order,
    pub leg_b: Order,
    pub fills: Vec<Fill>,
    pub outcome: AttemptOutcome,
    pub realized_pnl: f64,
    pub closed_at: SimTime,
}

impl ArbitrageAttempt {
    pub fn opened_at(&self) -> SimTime {
        self.opportunity.detected_at
    }
}
