//! Tests for cross-venue opportunity detection

use proptest::prelude::*;
use shock_arb_simulator_core_rs::arbitrage::ArbitrageDetector;
use shock_arb_simulator_core_rs::models::odds::OutcomeOdds;
use shock_arb_simulator_core_rs::models::quote::VenueId;
use shock_arb_simulator_core_rs::venue::{Venue, VenueConfig, Venues};
use shock_arb_simulator_core_rs::SimulationError;

fn venues(quote_a: OutcomeOdds, quote_b: OutcomeOdds) -> Venues {
    Venues::new(
        Venue::new(VenueId::A, quote_a, VenueConfig::book_a()).unwrap(),
        Venue::new(VenueId::B, quote_b, VenueConfig::book_b()).unwrap(),
    )
}

// ============================================================================
// Threshold
// ============================================================================

#[test]
fn test_worked_example_is_actionable() {
    let detector = ArbitrageDetector::new(0.005).unwrap();
    let opp = detector
        .evaluate_pair(1.80, VenueId::A, 2.50, VenueId::B, 1_000.0)
        .unwrap();

    assert!((opp.implied_sum - 0.95556).abs() < 1e-4);
    assert!((opp.edge - 0.04444).abs() < 1e-4);
    assert_eq!(opp.detected_at, 1_000.0);
    assert_eq!(opp.venue_for_a, VenueId::A);
    assert_eq!(opp.venue_for_b, VenueId::B);
}

#[test]
fn test_fair_and_overround_prices_rejected() {
    let detector = ArbitrageDetector::new(0.005).unwrap();
    assert!(!detector.is_actionable(2.0, 2.0));
    assert!(!detector.is_actionable(1.90, 1.90));
    // 1/2.01 + 1/2.01 = 0.99502, edge just under the threshold
    assert!(!detector.is_actionable(2.01, 2.01));
}

#[test]
fn test_boundary_is_not_actionable() {
    // 1/4 + 1/4 is exactly 0.5 in binary floating point
    let detector = ArbitrageDetector::new(0.5).unwrap();
    assert_eq!(detector.threshold(), 0.5);
    assert!(!detector.is_actionable(4.0, 4.0));
    assert!(detector
        .evaluate_pair(4.0, VenueId::A, 4.0, VenueId::B, 0.0)
        .is_none());
}

#[test]
fn test_min_edge_out_of_range_rejected() {
    assert!(matches!(
        ArbitrageDetector::new(-0.01),
        Err(SimulationError::InvalidConfiguration(_))
    ));
    assert!(ArbitrageDetector::new(1.0).is_err());
    assert!(ArbitrageDetector::new(0.0).is_ok());
}

// ============================================================================
// Venue pairings
// ============================================================================

#[test]
fn test_straight_pairing_after_shock() {
    // Venue A repriced B as the long shot; venue B still quotes evens
    let detector = ArbitrageDetector::new(0.005).unwrap();
    let venues = venues(OutcomeOdds { a: 3.0, b: 1.5 }, OutcomeOdds { a: 2.0, b: 2.0 });

    let opp = detector.evaluate(&venues, 500.0).unwrap();
    // Back A on venue A at 3.0, B on venue B at 2.0
    assert_eq!(opp.venue_for_a, VenueId::A);
    assert_eq!(opp.odds_a, 3.0);
    assert_eq!(opp.venue_for_b, VenueId::B);
    assert_eq!(opp.odds_b, 2.0);
}

#[test]
fn test_crossed_pairing_after_shock() {
    // Venue A made A the favorite; the value on A is now the stale price at B
    let detector = ArbitrageDetector::new(0.005).unwrap();
    let venues = venues(OutcomeOdds { a: 1.5, b: 3.0 }, OutcomeOdds { a: 2.0, b: 2.0 });

    let opp = detector.evaluate(&venues, 500.0).unwrap();
    assert_eq!(opp.venue_for_a, VenueId::B);
    assert_eq!(opp.odds_a, 2.0);
    assert_eq!(opp.venue_for_b, VenueId::A);
    assert_eq!(opp.odds_b, 3.0);
    assert!((opp.edge - (1.0 - 0.5 - 1.0 / 3.0)).abs() < 1e-12);
}

#[test]
fn test_tie_prefers_straight_pairing() {
    let detector = ArbitrageDetector::new(0.0).unwrap();
    let venues = venues(OutcomeOdds { a: 2.2, b: 2.2 }, OutcomeOdds { a: 2.2, b: 2.2 });

    let opp = detector.evaluate(&venues, 0.0).unwrap();
    assert_eq!(opp.venue_for_a, VenueId::A);
    assert_eq!(opp.venue_for_b, VenueId::B);
}

#[test]
fn test_aligned_quotes_have_no_opportunity() {
    let detector = ArbitrageDetector::new(0.005).unwrap();
    let venues = venues(OutcomeOdds { a: 1.5, b: 2.9 }, OutcomeOdds { a: 1.5, b: 2.9 });
    assert!(detector.evaluate(&venues, 0.0).is_none());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_actionable_iff_implied_sum_below_threshold(
        odds_a in 1.01f64..10.0,
        odds_b in 1.01f64..10.0,
        min_edge in 0.0f64..0.2,
    ) {
        let detector = ArbitrageDetector::new(min_edge).unwrap();
        let implied = 1.0 / odds_a + 1.0 / odds_b;
        let opp = detector.evaluate_pair(odds_a, VenueId::A, odds_b, VenueId::B, 0.0);

        prop_assert_eq!(opp.is_some(), implied < 1.0 - min_edge);
        if let Some(opp) = opp {
            prop_assert!(opp.implied_sum < 1.0 - min_edge);
            prop_assert!((opp.edge + opp.implied_sum - 1.0).abs() < 1e-12);
        }
    }
}
