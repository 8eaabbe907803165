//! Shock generation: abrupt repricing with a lagging second venue.
//!
//! Shocks ("big plays") arrive as a Poisson process: the gap to the next
//! shock is exponential with mean `shock_freq_sec`. Each shock picks a side
//! to become a strong favorite, reprices venue A on the spot and schedules
//! the same prices for venue B `book_update_lag_ms` later. Until B catches
//! up, the two books disagree.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same shocks
//! 2. **Self-perpetuating**: Every shock schedules the next one
//! 3. **One-shot start**: A feed cannot be restarted; build a new one
//!
//! # Example
//!
//! ```
//! use shock_arb_simulator_core_rs::core::SimulationClock;
//! use shock_arb_simulator_core_rs::rng::RngManager;
//! use shock_arb_simulator_core_rs::shocks::{ShockFeed, ShockFeedConfig};
//!
//! let mut clock = SimulationClock::new();
//! let mut rng = RngManager::new(123);
//! let mut feed = ShockFeed::new(ShockFeedConfig::default()).unwrap();
//!
//! let first_shock_at = feed.start(&mut clock, &mut rng).unwrap();
//! assert!(first_shock_at > 0.0);
//! assert!(feed.start(&mut clock, &mut rng).is_err());
//! ```

use crate::core::{SimTime, SimulationClock};
use crate::events::Event;
use crate::models::odds::{Outcome, OutcomeOdds};
use crate::models::quote::VenueId;
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use crate::venue::Venue;
use serde::{Deserialize, Serialize};

/// No quote ever drops below this, whatever the noise draw
pub const ODDS_FLOOR: f64 = 1.05;

/// Shape and timing of generated shocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockFeedConfig {
    /// Mean seconds between shocks
    pub shock_freq_sec: f64,

    /// How long venue B keeps its stale quote after a shock (ms)
    pub book_update_lag_ms: f64,

    /// Favorite's odds are drawn uniformly from this range
    pub favorite_odds_range: (f64, f64),

    /// Each price is scaled by a factor in `[1 - noise, 1 + noise]`
    pub odds_noise: f64,
}

impl Default for ShockFeedConfig {
    fn default() -> Self {
        Self {
            shock_freq_sec: 6.0,
            book_update_lag_ms: 450.0,
            favorite_odds_range: (1.30, 1.70),
            odds_noise: 0.02,
        }
    }
}

impl ShockFeedConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.shock_freq_sec.is_finite() && self.shock_freq_sec > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "shock_freq_sec must be positive, got {}",
                self.shock_freq_sec
            )));
        }
        if !(self.book_update_lag_ms.is_finite() && self.book_update_lag_ms >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "book_update_lag_ms must be non-negative, got {}",
                self.book_update_lag_ms
            )));
        }
        let (low, high) = self.favorite_odds_range;
        if !(low.is_finite() && high.is_finite() && low > 1.0 && low <= high) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "favorite_odds_range must satisfy 1 < low <= high, got ({}, {})",
                low, high
            )));
        }
        if !(0.0..1.0).contains(&self.odds_noise) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "odds_noise must be in [0, 1), got {}",
                self.odds_noise
            )));
        }
        Ok(())
    }

    fn mean_interval_ms(&self) -> f64 {
        self.shock_freq_sec * 1000.0
    }
}

/// What one shock did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shock {
    pub fired_at: SimTime,
    pub favorite: Outcome,
    pub odds: OutcomeOdds,
    /// When venue B will reflect `odds`
    pub lagged_update_at: SimTime,
    pub next_shock_at: SimTime,
}

/// Poisson shock generator
#[derive(Debug, Clone)]
pub struct ShockFeed {
    config: ShockFeedConfig,
    started: bool,
    shocks_fired: u64,
}

impl ShockFeed {
    pub fn new(config: ShockFeedConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            config,
            started: false,
            shocks_fired: 0,
        })
    }

    pub fn config(&self) -> &ShockFeedConfig {
        &self.config
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn shocks_fired(&self) -> u64 {
        self.shocks_fired
    }

    /// Schedule the first shock; returns its due time
    pub fn start(
        &mut self,
        clock: &mut SimulationClock,
        rng: &mut RngManager,
    ) -> Result<SimTime, SimulationError> {
        if self.started {
            return Err(SimulationError::FeedAlreadyStarted);
        }
        self.started = true;
        self.schedule_next(clock, rng)
    }

    /// Draw a new favorite and post-shock prices
    ///
    /// The underdog starts at the fair complement of the favorite, then both
    /// sides get independent margin noise.
    pub fn draw_odds(&self, rng: &mut RngManager) -> (Outcome, OutcomeOdds) {
        let favorite = if rng.coin() { Outcome::A } else { Outcome::B };

        let (low, high) = self.config.favorite_odds_range;
        let fav_fair = rng.uniform(low, high);
        let dog_fair = (1.0 / (1.0 - 1.0 / fav_fair)).max(ODDS_FLOOR);

        let fav = self.with_noise(fav_fair, rng);
        let dog = self.with_noise(dog_fair, rng);

        let odds = match favorite {
            Outcome::A => OutcomeOdds { a: fav, b: dog },
            Outcome::B => OutcomeOdds { a: dog, b: fav },
        };
        (favorite, odds)
    }

    /// Handle a due shock: reprice venue A now, queue venue B's catch-up and
    /// the next shock.
    ///
    /// The caller is responsible for running detection against venue A's new
    /// quote within the same dispatch.
    pub fn fire(
        &mut self,
        venue_a: &mut Venue,
        clock: &mut SimulationClock,
        rng: &mut RngManager,
    ) -> Result<Shock, SimulationError> {
        debug_assert_eq!(venue_a.id(), VenueId::A);
        let fired_at = clock.now();
        let (favorite, odds) = self.draw_odds(rng);

        venue_a.apply_update(odds, fired_at)?;
        let lagged_update_at = clock.schedule(
            Event::VenueUpdate {
                venue: VenueId::B,
                odds,
            },
            self.config.book_update_lag_ms,
        )?;
        let next_shock_at = self.schedule_next(clock, rng)?;
        self.shocks_fired += 1;

        Ok(Shock {
            fired_at,
            favorite,
            odds,
            lagged_update_at,
            next_shock_at,
        })
    }

    fn schedule_next(
        &self,
        clock: &mut SimulationClock,
        rng: &mut RngManager,
    ) -> Result<SimTime, SimulationError> {
        let interval = rng.exponential(self.config.mean_interval_ms());
        Ok(clock.schedule(Event::Shock, interval)?)
    }

    fn with_noise(&self, odds: f64, rng: &mut RngManager) -> f64 {
        let noise = self.config.odds_noise;
        (odds * rng.uniform(1.0 - noise, 1.0 + noise)).max(ODDS_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::VenueConfig;

    fn venue_a() -> Venue {
        Venue::new(VenueId::A, OutcomeOdds { a: 2.0, b: 2.0 }, VenueConfig::book_a()).unwrap()
    }

    #[test]
    fn test_drawn_odds_are_valid_and_skewed() {
        let feed = ShockFeed::new(ShockFeedConfig::default()).unwrap();
        let mut rng = RngManager::new(77);

        for _ in 0..500 {
            let (favorite, odds) = feed.draw_odds(&mut rng);
            assert!(odds.a >= ODDS_FLOOR && odds.b >= ODDS_FLOOR);
            assert!(odds.get(favorite) < odds.get(favorite.other()));
            assert!(odds.get(favorite) <= 1.70 * 1.02);
        }
    }

    #[test]
    fn test_noise_free_odds_are_fair() {
        let config = ShockFeedConfig {
            odds_noise: 0.0,
            ..ShockFeedConfig::default()
        };
        let feed = ShockFeed::new(config).unwrap();
        let mut rng = RngManager::new(3);

        let (_, odds) = feed.draw_odds(&mut rng);
        assert!((odds.implied_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fire_reprices_a_and_schedules_b_after_lag() {
        let mut feed = ShockFeed::new(ShockFeedConfig::default()).unwrap();
        let mut clock = SimulationClock::new();
        let mut rng = RngManager::new(11);
        let mut venue = venue_a();

        feed.start(&mut clock, &mut rng).unwrap();
        let first = clock.pop_next().unwrap();
        assert_eq!(first.event, Event::Shock);

        let shock = feed.fire(&mut venue, &mut clock, &mut rng).unwrap();

        assert_eq!(venue.quote().odds(), shock.odds);
        assert_eq!(venue.quote().last_updated(), first.due_at);
        assert_eq!(shock.lagged_update_at, first.due_at + 450.0);
        assert!(shock.next_shock_at >= first.due_at);
        assert_eq!(clock.pending(), 2);
        assert_eq!(feed.shocks_fired(), 1);
    }

    #[test]
    fn test_invalid_configs() {
        let bad_freq = ShockFeedConfig {
            shock_freq_sec: 0.0,
            ..ShockFeedConfig::default()
        };
        assert!(ShockFeed::new(bad_freq).is_err());

        let bad_range = ShockFeedConfig {
            favorite_odds_range: (1.7, 1.3),
            ..ShockFeedConfig::default()
        };
        assert!(ShockFeed::new(bad_range).is_err());

        let bad_lag = ShockFeedConfig {
            book_update_lag_ms: -1.0,
            ..ShockFeedConfig::default()
        };
        assert!(ShockFeed::new(bad_lag).is_err());
    }
}
