//! Tests for equal-payoff stake allocation

use proptest::prelude::*;
use shock_arb_simulator_core_rs::arbitrage::{equalize_stakes, AllocationError, StakeAllocator};
use shock_arb_simulator_core_rs::models::odds::{OddsError, Outcome};

// ============================================================================
// Worked scenario
// ============================================================================

#[test]
fn test_worked_example_1_80_vs_2_50() {
    let alloc = equalize_stakes(1.80, 2.50, 1000.0).unwrap();

    // stake_a = 1000 * 2.5 / 4.3
    assert!((alloc.stake_a - 581.395).abs() < 0.01);
    assert!((alloc.stake_b - 418.605).abs() < 0.01);

    // Either result returns ~1046.51, a net ~46.51 on the 1000 outlay
    assert!((alloc.stake_a * alloc.odds_a - 1046.51).abs() < 0.01);
    assert!((alloc.stake_b * alloc.odds_b - 1046.51).abs() < 0.01);
    assert!((alloc.payoff_if(Outcome::A) - 46.51).abs() < 0.01);
    assert!((alloc.payoff_if(Outcome::B) - 46.51).abs() < 0.01);
    assert!((alloc.locked - 46.51).abs() < 0.01);
    assert!((alloc.roi() - 0.04651).abs() < 0.0001);
}

#[test]
fn test_no_edge_locks_nothing() {
    let alloc = equalize_stakes(2.0, 2.0, 200.0).unwrap();
    assert_eq!(alloc.stake_a, 100.0);
    assert_eq!(alloc.stake_b, 100.0);
    assert!(alloc.locked.abs() < 1e-9);
}

#[test]
fn test_overround_locks_a_loss() {
    let alloc = equalize_stakes(1.90, 1.90, 200.0).unwrap();
    assert!(alloc.locked < 0.0);
}

#[test]
fn test_stake_for_matches_legs() {
    let alloc = StakeAllocator::new(200.0).unwrap().allocate(1.5, 3.2).unwrap();
    assert_eq!(alloc.stake_for(Outcome::A), alloc.stake_a);
    assert_eq!(alloc.stake_for(Outcome::B), alloc.stake_b);
    assert!(alloc.stake_a > alloc.stake_b, "favorite carries the larger stake");
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_odds_rejected() {
    assert_eq!(
        equalize_stakes(1.0, 2.5, 100.0),
        Err(AllocationError::InvalidOdds(OddsError::InvalidOdds { odds: 1.0 }))
    );
    assert!(equalize_stakes(1.8, f64::NAN, 100.0).is_err());
}

#[test]
fn test_invalid_outlay_rejected() {
    assert_eq!(
        StakeAllocator::new(0.0),
        Err(AllocationError::InvalidOutlay { outlay: 0.0 })
    );
    assert!(StakeAllocator::new(-50.0).is_err());
    assert!(equalize_stakes(1.8, 2.5, f64::INFINITY).is_err());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_stakes_sum_to_outlay(
        odds_a in 1.01f64..20.0,
        odds_b in 1.01f64..20.0,
        outlay in 1.0f64..100_000.0,
    ) {
        let alloc = equalize_stakes(odds_a, odds_b, outlay).unwrap();
        prop_assert!(alloc.stake_a > 0.0);
        prop_assert!(alloc.stake_b > 0.0);
        prop_assert!((alloc.stake_a + alloc.stake_b - outlay).abs() < 1e-6 * outlay);
    }

    #[test]
    fn prop_payoffs_are_equal(
        odds_a in 1.01f64..20.0,
        odds_b in 1.01f64..20.0,
        outlay in 1.0f64..100_000.0,
    ) {
        let alloc = equalize_stakes(odds_a, odds_b, outlay).unwrap();
        let pay_a = alloc.stake_a * odds_a;
        let pay_b = alloc.stake_b * odds_b;
        prop_assert!((pay_a - pay_b).abs() < 1e-6 * pay_a.max(pay_b));
        prop_assert!((alloc.locked - (pay_a - outlay)).abs() < 1e-6 * outlay.max(1.0));
    }

    #[test]
    fn prop_locked_positive_iff_implied_sum_below_one(
        odds_a in 1.01f64..20.0,
        odds_b in 1.01f64..20.0,
    ) {
        let implied = 1.0 / odds_a + 1.0 / odds_b;
        prop_assume!((implied - 1.0).abs() > 1e-9);
        let alloc = equalize_stakes(odds_a, odds_b, 1000.0).unwrap();
        prop_assert_eq!(alloc.locked > 0.0, implied < 1.0);
    }
}
