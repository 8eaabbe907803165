//! Mock betting venue
//!
//! A venue holds one [`Quote`] for the two-outcome market and simulates
//! order handling: a bounded random processing delay, then a Bernoulli
//! accept/reject decision when the resolution event fires.
//!
//! Quotes move only through [`Venue::apply_update`], which the shock feed
//! drives. Orders never move the market.

use crate::core::{SimTime, SimulationClock};
use crate::events::Event;
use crate::models::odds::{OddsError, OutcomeOdds};
use crate::models::order::{Fill, LegId, Order, OrderError};
use crate::models::quote::{Quote, VenueId};
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Execution frictions of one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Mean order processing delay (ms)
    pub latency_ms: f64,

    /// Half-width of the uniform delay window around `latency_ms`
    pub latency_jitter_ms: f64,

    /// Probability an order is rejected at resolution (0-1)
    pub reject_prob: f64,
}

impl VenueConfig {
    pub fn new(latency_ms: f64, latency_jitter_ms: f64, reject_prob: f64) -> Self {
        Self {
            latency_ms,
            latency_jitter_ms,
            reject_prob,
        }
    }

    /// Fast book: 80-180ms, 6% rejects
    pub fn book_a() -> Self {
        Self::new(130.0, 50.0, 0.06)
    }

    /// Lagging book: 90-220ms, 8% rejects
    pub fn book_b() -> Self {
        Self::new(155.0, 65.0, 0.08)
    }

    pub fn validate(&self, venue_id: VenueId) -> Result<(), SimulationError> {
        if !(self.latency_ms.is_finite() && self.latency_ms >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} latency_ms must be non-negative, got {}",
                venue_id, self.latency_ms
            )));
        }
        if !(self.latency_jitter_ms.is_finite() && self.latency_jitter_ms >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} latency_jitter_ms must be non-negative, got {}",
                venue_id, self.latency_jitter_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.reject_prob) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} reject_prob must be in [0, 1], got {}",
                venue_id, self.reject_prob
            )));
        }
        Ok(())
    }
}

/// One betting venue (mock book)
#[derive(Debug, Clone)]
pub struct Venue {
    quote: Quote,
    config: VenueConfig,
}

impl Venue {
    /// Create a venue quoting `opening_odds` at time zero
    ///
    /// # Example
    /// ```
    /// use shock_arb_simulator_core_rs::models::odds::OutcomeOdds;
    /// use shock_arb_simulator_core_rs::models::quote::VenueId;
    /// use shock_arb_simulator_core_rs::venue::{Venue, VenueConfig};
    ///
    /// let mut venue = Venue::new(VenueId::A, OutcomeOdds { a: 2.0, b: 2.0 }, VenueConfig::book_a()).unwrap();
    /// venue.apply_update(OutcomeOdds { a: 1.4, b: 3.5 }, 5_000.0).unwrap();
    /// assert_eq!(venue.quote().last_updated(), 5_000.0);
    /// assert!(venue.apply_update(OutcomeOdds { a: 1.0, b: 3.5 }, 6_000.0).is_err());
    /// ```
    pub fn new(
        venue_id: VenueId,
        opening_odds: OutcomeOdds,
        config: VenueConfig,
    ) -> Result<Self, SimulationError> {
        config.validate(venue_id)?;
        let quote = Quote::new(venue_id, opening_odds, 0.0)?;
        Ok(Self { quote, config })
    }

    pub fn id(&self) -> VenueId {
        self.quote.venue_id()
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn config(&self) -> &VenueConfig {
        &self.config
    }

    /// Overwrite the quote; invalid odds leave it unchanged
    pub fn apply_update(&mut self, odds: OutcomeOdds, at: SimTime) -> Result<(), OddsError> {
        self.quote.update(odds, at)
    }

    /// Draw a processing delay from `[latency - jitter, latency + jitter]`, floored at zero
    pub fn sample_latency(&self, rng: &mut RngManager) -> f64 {
        let low = self.config.latency_ms - self.config.latency_jitter_ms;
        let high = self.config.latency_ms + self.config.latency_jitter_ms;
        rng.uniform(low, high).max(0.0)
    }

    /// Submit a back bet on `leg_id.leg` at the current quote.
    ///
    /// The order captures the quote's odds now and its resolution is
    /// scheduled after a sampled processing delay.
    pub fn place_order(
        &self,
        leg_id: LegId,
        stake: f64,
        clock: &mut SimulationClock,
        rng: &mut RngManager,
    ) -> Result<Order, SimulationError> {
        let odds = self.quote.odds_for(leg_id.leg);
        let order = Order::new(leg_id, self.id(), odds, stake, clock.now())?;

        let delay = self.sample_latency(rng);
        clock.schedule(
            Event::OrderResolution {
                leg_id,
                venue: self.id(),
            },
            delay,
        )?;

        Ok(order)
    }

    /// Decide a pending order's fate at its resolution time
    ///
    /// Returns the fill when accepted, `None` when rejected.
    pub fn resolve_order(
        &self,
        order: &mut Order,
        at: SimTime,
        rng: &mut RngManager,
    ) -> Result<Option<Fill>, OrderError> {
        if rng.bernoulli(self.config.reject_prob) {
            order.reject(at)?;
            Ok(None)
        } else {
            order.fill(at).map(Some)
        }
    }
}

/// Both venues, addressable by id
#[derive(Debug, Clone)]
pub struct Venues {
    a: Venue,
    b: Venue,
}

impl Venues {
    pub fn new(a: Venue, b: Venue) -> Self {
        debug_assert_eq!(a.id(), VenueId::A);
        debug_assert_eq!(b.id(), VenueId::B);
        Self { a, b }
    }

    pub fn get(&self, venue_id: VenueId) -> &Venue {
        match venue_id {
            VenueId::A => &self.a,
            VenueId::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, venue_id: VenueId) -> &mut Venue {
        match venue_id {
            VenueId::A => &mut self.a,
            VenueId::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_is_bounded() {
        let venue = Venue::new(VenueId::B, OutcomeOdds { a: 2.0, b: 2.0 }, VenueConfig::book_b()).unwrap();
        let mut rng = RngManager::new(5);

        for _ in 0..1000 {
            let delay = venue.sample_latency(&mut rng);
            assert!((90.0..220.0).contains(&delay), "delay {} out of bounds", delay);
        }
    }

    #[test]
    fn test_latency_floored_at_zero() {
        let venue = Venue::new(
            VenueId::A,
            OutcomeOdds { a: 2.0, b: 2.0 },
            VenueConfig::new(10.0, 50.0, 0.0),
        )
        .unwrap();
        let mut rng = RngManager::new(5);

        for _ in 0..1000 {
            assert!(venue.sample_latency(&mut rng) >= 0.0);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Venue::new(
            VenueId::A,
            OutcomeOdds { a: 2.0, b: 2.0 },
            VenueConfig::new(100.0, 10.0, 1.5),
        );
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_invalid_opening_odds_rejected() {
        let result = Venue::new(VenueId::A, OutcomeOdds { a: 0.9, b: 2.0 }, VenueConfig::book_a());
        assert!(matches!(result, Err(SimulationError::Odds(_))));
    }
}
