//! Venue identity and the per-venue quote

use crate::core::SimTime;
use crate::models::odds::{OddsError, Outcome, OutcomeOdds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two venues in the simulation
///
/// Venue A reprices immediately after a shock; venue B lags behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VenueId {
    A,
    B,
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenueId::A => write!(f, "BookA"),
            VenueId::B => write!(f, "BookB"),
        }
    }
}

/// Current prices on one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    venue_id: VenueId,
    odds: OutcomeOdds,
    last_updated: SimTime,
}

impl Quote {
    pub fn new(venue_id: VenueId, odds: OutcomeOdds, at: SimTime) -> Result<Self, OddsError> {
        odds.validate()?;
        Ok(Self {
            venue_id,
            odds,
            last_updated: at,
        })
    }

    /// Overwrite both prices; the quote is left untouched on error
    pub fn update(&mut self, odds: OutcomeOdds, at: SimTime) -> Result<(), OddsError> {
        odds.validate()?;
        self.odds = odds;
        self.last_updated = at;
        Ok(())
    }

    pub fn venue_id(&self) -> VenueId {
        self.venue_id
    }

    pub fn odds(&self) -> OutcomeOdds {
        self.odds
    }

    pub fn odds_for(&self, outcome: Outcome) -> f64 {
        self.odds.get(outcome)
    }

    pub fn last_updated(&self) -> SimTime {
        self.last_updated
    }
}
