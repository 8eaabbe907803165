//! Simulation configuration
//!
//! Every knob of a run lives in one explicit struct handed to
//! [`Orchestrator::new`](crate::orchestrator::Orchestrator::new), so several
//! independent runs can coexist in one process.
//!
//! # Example
//!
//! ```
//! use shock_arb_simulator_core_rs::SimulationConfig;
//!
//! let config = SimulationConfig::default()
//!     .with_seed(7)
//!     .with_reject_prob(1.0);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.venue_b.reject_prob, 1.0);
//! ```

use crate::models::odds::OutcomeOdds;
use crate::models::quote::VenueId;
use crate::orchestrator::{compute_content_hash, SimulationError};
use crate::shocks::ShockFeedConfig;
use crate::venue::VenueConfig;
use serde::{Deserialize, Serialize};

/// Complete run configuration
///
/// Missing fields fall back to [`SimulationConfig::default`] when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed; same seed + same config = identical run
    pub rng_seed: u64,

    /// Mean seconds between shocks (exponential gaps)
    pub shock_freq_sec: f64,

    /// Delay before venue B reflects a shock (ms)
    pub book_update_lag_ms: f64,

    /// Execution frictions of the fast venue
    pub venue_a: VenueConfig,

    /// Execution frictions of the lagging venue
    pub venue_b: VenueConfig,

    /// Capital committed per attempt, split across both legs
    pub total_outlay: f64,

    /// Minimum edge (0-1) required to act
    pub min_arbitrage_edge: f64,

    /// Both venues quote these before the first shock
    pub opening_odds: OutcomeOdds,

    /// Range the post-shock favorite's odds are drawn from
    pub favorite_odds_range: (f64, f64),

    /// Relative margin noise applied to each post-shock price
    pub odds_noise: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let shocks = ShockFeedConfig::default();
        Self {
            rng_seed: 123,
            shock_freq_sec: shocks.shock_freq_sec,
            book_update_lag_ms: shocks.book_update_lag_ms,
            venue_a: VenueConfig::book_a(),
            venue_b: VenueConfig::book_b(),
            total_outlay: 200.0,
            min_arbitrage_edge: 0.005,
            opening_odds: OutcomeOdds { a: 2.0, b: 2.0 },
            favorite_odds_range: shocks.favorite_odds_range,
            odds_noise: shocks.odds_noise,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Same mean latency and jitter on both venues
    pub fn with_book_latency_ms(mut self, latency_ms: f64, jitter_ms: f64) -> Self {
        for venue in [&mut self.venue_a, &mut self.venue_b] {
            venue.latency_ms = latency_ms;
            venue.latency_jitter_ms = jitter_ms;
        }
        self
    }

    /// Same rejection probability on both venues
    pub fn with_reject_prob(mut self, reject_prob: f64) -> Self {
        self.venue_a.reject_prob = reject_prob;
        self.venue_b.reject_prob = reject_prob;
        self
    }

    pub fn venue_config(&self, venue_id: VenueId) -> &VenueConfig {
        match venue_id {
            VenueId::A => &self.venue_a,
            VenueId::B => &self.venue_b,
        }
    }

    pub fn shock_feed_config(&self) -> ShockFeedConfig {
        ShockFeedConfig {
            shock_freq_sec: self.shock_freq_sec,
            book_update_lag_ms: self.book_update_lag_ms,
            favorite_odds_range: self.favorite_odds_range,
            odds_noise: self.odds_noise,
        }
    }

    /// Reject configurations that would make the run meaningless
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.total_outlay.is_finite() && self.total_outlay > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "total_outlay must be positive, got {}",
                self.total_outlay
            )));
        }
        if !(0.0..1.0).contains(&self.min_arbitrage_edge) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "min_arbitrage_edge must be in [0, 1), got {}",
                self.min_arbitrage_edge
            )));
        }
        if self.opening_odds.validate().is_err() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "opening_odds must both exceed 1.0, got ({}, {})",
                self.opening_odds.a, self.opening_odds.b
            )));
        }

        self.venue_a.validate(VenueId::A)?;
        self.venue_b.validate(VenueId::B)?;
        self.shock_feed_config().validate()
    }

    /// SHA-256 of the configuration, for matching runs to their settings
    pub fn config_hash(&self) -> Result<String, SimulationError> {
        compute_content_hash(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = vec![
            SimulationConfig {
                total_outlay: 0.0,
                ..Default::default()
            },
            SimulationConfig {
                min_arbitrage_edge: 1.0,
                ..Default::default()
            },
            SimulationConfig {
                opening_odds: OutcomeOdds { a: 1.0, b: 2.0 },
                ..Default::default()
            },
            SimulationConfig::default().with_reject_prob(-0.1),
            SimulationConfig::default().with_book_latency_ms(-5.0, 0.0),
            SimulationConfig {
                shock_freq_sec: -1.0,
                ..Default::default()
            },
            SimulationConfig {
                odds_noise: 1.0,
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(SimulationError::InvalidConfiguration(_))),
                "expected rejection for {:?}",
                config
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"rng_seed": 9, "total_outlay": 1000.0}"#).unwrap();

        assert_eq!(config.rng_seed, 9);
        assert_eq!(config.total_outlay, 1000.0);
        assert_eq!(config.book_update_lag_ms, 450.0);
        assert_eq!(config.venue_a, VenueConfig::book_a());
    }

    #[test]
    fn test_config_hash_tracks_content() {
        let base = SimulationConfig::default();
        let same = SimulationConfig::default();
        let other = SimulationConfig::default().with_seed(124);

        assert_eq!(base.config_hash().unwrap(), same.config_hash().unwrap());
        assert_ne!(base.config_hash().unwrap(), other.config_hash().unwrap());
        assert_eq!(base.config_hash().unwrap().len(), 64);
    }
}
