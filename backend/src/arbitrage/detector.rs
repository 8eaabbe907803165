//! Cross-venue arbitrage detection
//!
//! After any quote change the detector pairs outcome A on one venue with
//! outcome B on the other (both pairings) and keeps the cheaper one. It
//! flags an opportunity iff
//!
//! ```text
//! 1/odds_a + 1/odds_b < 1 - min_edge
//! ```
//!
//! Strict: a pair sitting exactly on the threshold is not acted on. There is
//! no deduplication; every update is a fresh check.

use crate::core::SimTime;
use crate::models::odds::implied_probability;
use crate::models::quote::VenueId;
use crate::orchestrator::SimulationError;
use crate::venue::Venues;
use serde::{Deserialize, Serialize};

/// A priced window where backing both outcomes locks a profit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub detected_at: SimTime,
    /// Best price for outcome A and where it is quoted
    pub odds_a: f64,
    pub venue_for_a: VenueId,
    /// Best price for outcome B and where it is quoted
    pub odds_b: f64,
    pub venue_for_b: VenueId,
    pub implied_sum: f64,
    /// `1 - implied_sum`
    pub edge: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrageDetector {
    min_edge: f64,
}

impl ArbitrageDetector {
    /// `min_edge` must lie in `[0, 1)`
    pub fn new(min_edge: f64) -> Result<Self, SimulationError> {
        if !(0.0..1.0).contains(&min_edge) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "min_arbitrage_edge must be in [0, 1), got {}",
                min_edge
            )));
        }
        Ok(Self { min_edge })
    }

    pub fn min_edge(&self) -> f64 {
        self.min_edge
    }

    /// Largest implied-probability sum that still triggers (exclusive)
    pub fn threshold(&self) -> f64 {
        1.0 - self.min_edge
    }

    /// Whether backing A at `odds_a` and B at `odds_b` clears the threshold
    ///
    /// # Example
    /// ```
    /// use shock_arb_simulator_core_rs::arbitrage::ArbitrageDetector;
    ///
    /// let detector = ArbitrageDetector::new(0.005).unwrap();
    /// assert!(detector.is_actionable(1.80, 2.50));
    /// assert!(!detector.is_actionable(1.90, 1.90));
    /// ```
    pub fn is_actionable(&self, odds_a: f64, odds_b: f64) -> bool {
        implied_probability(odds_a) + implied_probability(odds_b) < self.threshold()
    }

    /// Check one specific pairing
    pub fn evaluate_pair(
        &self,
        odds_a: f64,
        venue_for_a: VenueId,
        odds_b: f64,
        venue_for_b: VenueId,
        at: SimTime,
    ) -> Option<ArbitrageOpportunity> {
        if !self.is_actionable(odds_a, odds_b) {
            return None;
        }
        let implied_sum = implied_probability(odds_a) + implied_probability(odds_b);

        Some(ArbitrageOpportunity {
            detected_at: at,
            odds_a,
            venue_for_a,
            odds_b,
            venue_for_b,
            implied_sum,
            edge: 1.0 - implied_sum,
        })
    }

    /// Check both cross-venue pairings against the current quotes
    ///
    /// On a tie the straight pairing (A on venue A, B on venue B) wins.
    pub fn evaluate(&self, venues: &Venues, at: SimTime) -> Option<ArbitrageOpportunity> {
        let quote_a = venues.get(VenueId::A).quote().odds();
        let quote_b = venues.get(VenueId::B).quote().odds();

        let straight = (quote_a.a, VenueId::A, quote_b.b, VenueId::B);
        let crossed = (quote_b.a, VenueId::B, quote_a.b, VenueId::A);

        let implied = |(odds_a, _, odds_b, _): (f64, VenueId, f64, VenueId)| {
            implied_probability(odds_a) + implied_probability(odds_b)
        };
        let (odds_a, venue_for_a, odds_b, venue_for_b) = if implied(crossed) < implied(straight) {
            crossed
        } else {
            straight
        };

        self.evaluate_pair(odds_a, venue_for_a, odds_b, venue_for_b, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        // 1/4 + 1/4 == 0.5 == 1 - 0.5 exactly
        let detector = ArbitrageDetector::new(0.5).unwrap();
        assert!(!detector.is_actionable(4.0, 4.0));
        assert!(detector.is_actionable(4.0, 4.5));

        let zero_edge = ArbitrageDetector::new(0.0).unwrap();
        assert!(!zero_edge.is_actionable(2.0, 2.0));
    }

    #[test]
    fn test_min_edge_range() {
        assert!(ArbitrageDetector::new(-0.1).is_err());
        assert!(ArbitrageDetector::new(1.0).is_err());
        assert!(ArbitrageDetector::new(0.0).is_ok());
    }

    #[test]
    fn test_evaluate_pair_reports_edge() {
        let detector = ArbitrageDetector::new(0.005).unwrap();
        let opp = detector
            .evaluate_pair(1.80, VenueId::A, 2.50, VenueId::B, 1234.0)
            .unwrap();

        assert!((opp.implied_sum - 0.955_555).abs() < 1e-5);
        assert!((opp.edge - 0.044_444).abs() < 1e-5);
        assert_eq!(opp.detected_at, 1234.0);
    }
}
