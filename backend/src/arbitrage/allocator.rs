//! Equal-payoff stake allocation
//!
//! For decimal odds `o_a`, `o_b` and total outlay `T`, backing outcome A with
//! `s_a = T * o_b / (o_a + o_b)` and outcome B with `s_b = T - s_a` makes
//! `s_a * o_a == s_b * o_b`, so the net result is the same whichever outcome
//! wins:
//!
//! ```text
//! locked = s_a * (o_a - 1) - s_b  ==  s_b * (o_b - 1) - s_a
//! ```
//!
//! `locked` is positive exactly when `1/o_a + 1/o_b < 1`. The allocator
//! itself does not check that; deciding whether to act is the detector's job.

use crate::models::odds::{validate_odds, OddsError, Outcome};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocationError {
    #[error(transparent)]
    InvalidOdds(#[from] OddsError),

    #[error("Total outlay must be finite and positive, got {outlay}")]
    InvalidOutlay { outlay: f64 },
}

/// Stakes for both legs and the profit they lock in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeAllocation {
    pub odds_a: f64,
    pub odds_b: f64,
    pub stake_a: f64,
    pub stake_b: f64,
    pub total_outlay: f64,
    /// Net result if both legs fill (negative when the book is overround)
    pub locked: f64,
}

impl StakeAllocation {
    pub fn stake_for(&self, leg: Outcome) -> f64 {
        match leg {
            Outcome::A => self.stake_a,
            Outcome::B => self.stake_b,
        }
    }

    /// Net result if `winner` wins and both legs filled
    pub fn payoff_if(&self, winner: Outcome) -> f64 {
        match winner {
            Outcome::A => self.stake_a * (self.odds_a - 1.0) - self.stake_b,
            Outcome::B => self.stake_b * (self.odds_b - 1.0) - self.stake_a,
        }
    }

    /// Locked profit as a fraction of the outlay
    pub fn roi(&self) -> f64 {
        self.locked / self.total_outlay
    }
}

/// Split `total_outlay` across both outcomes so either result pays the same
///
/// # Example
/// ```
/// use shock_arb_simulator_core_rs::arbitrage::equalize_stakes;
///
/// let alloc = equalize_stakes(1.80, 2.50, 1000.0).unwrap();
/// assert!((alloc.stake_a - 581.40).abs() < 0.01);
/// assert!((alloc.stake_b - 418.60).abs() < 0.01);
/// assert!((alloc.locked - 46.51).abs() < 0.01);
/// ```
pub fn equalize_stakes(
    odds_a: f64,
    odds_b: f64,
    total_outlay: f64,
) -> Result<StakeAllocation, AllocationError> {
    validate_odds(odds_a)?;
    validate_odds(odds_b)?;
    if !(total_outlay.is_finite() && total_outlay > 0.0) {
        return Err(AllocationError::InvalidOutlay {
            outlay: total_outlay,
        });
    }

    let stake_a = total_outlay * odds_b / (odds_a + odds_b);
    let stake_b = total_outlay - stake_a;
    let locked = stake_a * (odds_a - 1.0) - stake_b;

    Ok(StakeAllocation {
        odds_a,
        odds_b,
        stake_a,
        stake_b,
        total_outlay,
        locked,
    })
}

/// Allocates a fixed per-attempt outlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakeAllocator {
    total_outlay: f64,
}

impl StakeAllocator {
    pub fn new(total_outlay: f64) -> Result<Self, AllocationError> {
        if !(total_outlay.is_finite() && total_outlay > 0.0) {
            return Err(AllocationError::InvalidOutlay {
                outlay: total_outlay,
            });
        }
        Ok(Self { total_outlay })
    }

    pub fn total_outlay(&self) -> f64 {
        self.total_outlay
    }

    pub fn allocate(&self, odds_a: f64, odds_b: f64) -> Result<StakeAllocation, AllocationError> {
        equalize_stakes(odds_a, odds_b, self.total_outlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_is_equalized() {
        let alloc = equalize_stakes(1.45, 3.40, 200.0).unwrap();
        assert!((alloc.payoff_if(Outcome::A) - alloc.payoff_if(Outcome::B)).abs() < 1e-9);
        assert_eq!(alloc.payoff_if(Outcome::A), alloc.locked);
    }

    #[test]
    fn test_overround_book_locks_a_loss() {
        // 1/1.9 + 1/1.9 > 1
        let alloc = equalize_stakes(1.9, 1.9, 100.0).unwrap();
        assert!(alloc.locked < 0.0);
        assert!(alloc.roi() < 0.0);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            equalize_stakes(1.0, 2.0, 100.0),
            Err(AllocationError::InvalidOdds(_))
        ));
        assert!(matches!(
            equalize_stakes(2.0, 0.5, 100.0),
            Err(AllocationError::InvalidOdds(_))
        ));
        assert_eq!(
            equalize_stakes(2.0, 2.0, 0.0),
            Err(AllocationError::InvalidOutlay { outlay: 0.0 })
        );
        assert!(StakeAllocator::new(-5.0).is_err());
    }
}
