//! Decimal odds for a two-outcome market
//!
//! All prices in the simulator are decimal (European) odds. The implied
//! probability of an outcome is `1 / odds`; a valid price is always > 1.0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a price is not a usable decimal odds value
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OddsError {
    #[error("Decimal odds must be finite and greater than 1.0, got {odds}")]
    InvalidOdds { odds: f64 },

    #[error("American odds must be at least +100 or at most -100, got {american}")]
    InvalidAmerican { american: i32 },
}

/// One of the two outcomes of the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    A,
    B,
}

impl Outcome {
    /// The opposing outcome
    pub fn other(self) -> Outcome {
        match self {
            Outcome::A => Outcome::B,
            Outcome::B => Outcome::A,
        }
    }
}

/// A price for each outcome of the market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeOdds {
    pub a: f64,
    pub b: f64,
}

impl OutcomeOdds {
    /// Build a validated pair of odds
    ///
    /// # Example
    /// ```
    /// use shock_arb_simulator_core_rs::models::odds::OutcomeOdds;
    ///
    /// let odds = OutcomeOdds::new(1.80, 2.50).unwrap();
    /// assert!((odds.implied_sum() - 0.9556).abs() < 1e-4);
    /// assert!(OutcomeOdds::new(1.0, 2.0).is_err());
    /// ```
    pub fn new(a: f64, b: f64) -> Result<Self, OddsError> {
        Ok(Self {
            a: validate_odds(a)?,
            b: validate_odds(b)?,
        })
    }

    /// Check both prices without constructing a new value
    pub fn validate(&self) -> Result<(), OddsError> {
        validate_odds(self.a)?;
        validate_odds(self.b)?;
        Ok(())
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::A => self.a,
            Outcome::B => self.b,
        }
    }

    /// Sum of implied probabilities (the book's overround when > 1)
    pub fn implied_sum(&self) -> f64 {
        implied_probability(self.a) + implied_probability(self.b)
    }
}

/// Reject non-finite prices and anything at or below even money's floor of 1.0
pub fn validate_odds(odds: f64) -> Result<f64, OddsError> {
    if odds.is_finite() && odds > 1.0 {
        Ok(odds)
    } else {
        Err(OddsError::InvalidOdds { odds })
    }
}

/// Implied probability of a decimal price
pub fn implied_probability(odds: f64) -> f64 {
    1.0 / odds
}

/// Convert American (moneyline) odds to decimal
///
/// `+150` pays 1.5x the stake in profit (decimal 2.50), `-200` needs a stake
/// of 200 to win 100 (decimal 1.50).
pub fn decimal_from_american(american: i32) -> Result<f64, OddsError> {
    if american >= 100 {
        Ok(1.0 + american as f64 / 100.0)
    } else if american <= -100 {
        Ok(1.0 + 100.0 / (american as f64).abs())
    } else {
        Err(OddsError::InvalidAmerican { american })
    }
}

/// Convert decimal odds to the nearest American (moneyline) price
pub fn american_from_decimal(odds: f64) -> Result<i32, OddsError> {
    let odds = validate_odds(odds)?;
    if odds >= 2.0 {
        Ok(((odds - 1.0) * 100.0).round() as i32)
    } else {
        Ok(-(100.0 / (odds - 1.0)).round() as i32)
    }
}
