//! Order model
//!
//! One leg of an arbitrage attempt: a back bet on one outcome at one venue.
//! Each order has:
//! - A leg id (attempt id + the outcome it backs)
//! - The venue it was sent to
//! - The odds seen on that venue's quote when it was placed
//! - A stake (> 0)
//! - Status (Pending, Filled, Rejected)
//!
//! Odds are locked at placement: a fill pays at `odds_at_placement` no matter
//! what the venue quotes by the time the order resolves.

use crate::core::SimTime;
use crate::models::odds::{validate_odds, OddsError, Outcome};
use crate::models::quote::VenueId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifies one leg of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LegId {
    pub attempt_id: u64,
    pub leg: Outcome,
}

impl LegId {
    pub fn new(attempt_id: u64, leg: Outcome) -> Self {
        Self { attempt_id, leg }
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "att_{:06}/{:?}", self.attempt_id, self.leg)
    }
}

/// Order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Submitted, resolution event still scheduled
    Pending,
    Filled,
    Rejected,
}

/// Errors that can occur during order operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderError {
    #[error("Stake must be finite and positive, got {stake}")]
    InvalidStake { stake: f64 },

    #[error("Order {leg_id} already resolved")]
    AlreadyResolved { leg_id: LegId },

    #[error(transparent)]
    InvalidOdds(#[from] OddsError),
}

/// A resolved, accepted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub leg_id: LegId,
    pub odds_filled: f64,
    pub stake: f64,
    pub resolved_at: SimTime,
}

impl Fill {
    /// Net return if the backed outcome wins
    pub fn profit_if_wins(&self) -> f64 {
        self.stake * (self.odds_filled - 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    leg_id: LegId,
    venue_id: VenueId,
    odds_at_placement: f64,
    stake: f64,
    placed_at: SimTime,
    state: OrderState,
    resolved_at: Option<SimTime>,
}

impl Order {
    /// Create a pending order
    ///
    /// # Example
    /// ```
    /// use shock_arb_simulator_core_rs::models::odds::Outcome;
    /// use shock_arb_simulator_core_rs::models::order::{LegId, Order, OrderState};
    /// use shock_arb_simulator_core_rs::models::quote::VenueId;
    ///
    /// let order = Order::new(LegId::new(0, Outcome::A), VenueId::A, 1.80, 581.40, 1200.0).unwrap();
    /// assert_eq!(order.state(), OrderState::Pending);
    /// assert!(Order::new(LegId::new(0, Outcome::A), VenueId::A, 1.80, 0.0, 1200.0).is_err());
    /// ```
    pub fn new(
        leg_id: LegId,
        venue_id: VenueId,
        odds_at_placement: f64,
        stake: f64,
        placed_at: SimTime,
    ) -> Result<Self, OrderError> {
        if !(stake.is_finite() && stake > 0.0) {
            return Err(OrderError::InvalidStake { stake });
        }
        validate_odds(odds_at_placement)?;

        Ok(Self {
            leg_id,
            venue_id,
            odds_at_placement,
            stake,
            placed_at,
            state: OrderState::Pending,
            resolved_at: None,
        })
    }

    pub fn leg_id(&self) -> LegId {
        self.leg_id
    }

    pub fn venue_id(&self) -> VenueId {
        self.venue_id
    }

    /// The outcome this leg backs
    pub fn outcome(&self) -> Outcome {
        self.leg_id.leg
    }

    pub fn odds_at_placement(&self) -> f64 {
        self.odds_at_placement
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn placed_at(&self) -> SimTime {
        self.placed_at
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn resolved_at(&self) -> Option<SimTime> {
        self.resolved_at
    }

    pub fn is_pending(&self) -> bool {
        self.state == OrderState::Pending
    }

    pub fn is_filled(&self) -> bool {
        self.state == OrderState::Filled
    }

    /// Accept the order at its placement odds
    pub fn fill(&mut self, at: SimTime) -> Result<Fill, OrderError> {
        self.ensure_pending()?;
        self.state = OrderState::Filled;
        self.resolved_at = Some(at);

        Ok(Fill {
            leg_id: self.leg_id,
            odds_filled: self.odds_at_placement,
            stake: self.stake,
            resolved_at: at,
        })
    }

    /// Decline the order; final, never retried
    pub fn reject(&mut self, at: SimTime) -> Result<(), OrderError> {
        self.ensure_pending()?;
        self.state = OrderState::Rejected;
        self.resolved_at = Some(at);
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), OrderError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(OrderError::AlreadyResolved {
                leg_id: self.leg_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> Order {
        Order::new(LegId::new(3, Outcome::B), VenueId::B, 2.5, 418.6, 10.0).unwrap()
    }

    #[test]
    fn test_fill_locks_placement_odds() {
        let mut order = pending();
        let fill = order.fill(150.0).unwrap();

        assert_eq!(order.state(), OrderState::Filled);
        assert_eq!(order.resolved_at(), Some(150.0));
        assert_eq!(fill.odds_filled, 2.5);
        assert_eq!(fill.stake, 418.6);
        assert!((fill.profit_if_wins() - 627.9).abs() < 1e-9);
    }

    #[test]
    fn test_cannot_resolve_twice() {
        let mut order = pending();
        order.reject(120.0).unwrap();

        assert_eq!(
            order.fill(130.0),
            Err(OrderError::AlreadyResolved {
                leg_id: LegId::new(3, Outcome::B)
            })
        );
        assert_eq!(order.state(), OrderState::Rejected);
    }

    #[test]
    fn test_invalid_inputs() {
        let leg = LegId::new(0, Outcome::A);
        assert!(matches!(
            Order::new(leg, VenueId::A, 1.8, -1.0, 0.0),
            Err(OrderError::InvalidStake { .. })
        ));
        assert!(matches!(
            Order::new(leg, VenueId::A, 1.0, 10.0, 0.0),
            Err(OrderError::InvalidOdds(_))
        ));
    }

    #[test]
    fn test_leg_id_display() {
        assert_eq!(LegId::new(42, Outcome::A).to_string(), "att_000042/A");
    }
}
