//! Execution coordinator
//!
//! Turns an opportunity into an attempt: sizes both legs with the stake
//! allocator, places them on their venues in the same simulated instant and
//! waits for both resolution events, in whichever order they arrive.
//!
//! # Capital policy
//!
//! The outlay is a single pool, so at most one attempt is in flight. An
//! opportunity that shows up while legs are still pending is dropped and
//! counted as missed; it is never queued for later.

use crate::arbitrage::{ArbitrageOpportunity, StakeAllocation, StakeAllocator};
use crate::core::{SimTime, SimulationClock};
use crate::models::attempt::{ArbitrageAttempt, AttemptOutcome};
use crate::models::odds::Outcome;
use crate::models::order::{Fill, LegId, Order};
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use crate::venue::Venues;
use log::debug;

/// What happened to an incoming opportunity
#[derive(Debug, Clone, PartialEq)]
pub enum Commitment {
    /// Both legs placed under a new attempt
    Placed {
        attempt_id: u64,
        allocation: StakeAllocation,
        leg_a: Order,
        leg_b: Order,
    },

    /// Capital busy with `blocking_attempt`; opportunity missed
    Dropped { blocking_attempt: u64 },
}

/// Result of one leg resolving
#[derive(Debug, Clone, PartialEq)]
pub struct LegResolution {
    pub order: Order,
    pub fill: Option<Fill>,
    /// Set once the second leg resolves
    pub closed: Option<ArbitrageAttempt>,
}

#[derive(Debug, Clone)]
struct InFlightAttempt {
    attempt_id: u64,
    opportunity: ArbitrageOpportunity,
    allocation: StakeAllocation,
    leg_a: Order,
    leg_b: Order,
    fills: Vec<Fill>,
}

impl InFlightAttempt {
    fn leg_mut(&mut self, leg: Outcome) -> &mut Order {
        match leg {
            Outcome::A => &mut self.leg_a,
            Outcome::B => &mut self.leg_b,
        }
    }

    fn pending_legs(&self) -> usize {
        [&self.leg_a, &self.leg_b]
            .iter()
            .filter(|order| order.is_pending())
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionCoordinator {
    allocator: StakeAllocator,
    in_flight: Option<InFlightAttempt>,
    next_attempt_id: u64,
    orders_created: u64,
    missed_opportunities: u64,
}

impl ExecutionCoordinator {
    pub fn new(allocator: StakeAllocator) -> Self {
        Self {
            allocator,
            in_flight: None,
            next_attempt_id: 0,
            orders_created: 0,
            missed_opportunities: 0,
        }
    }

    pub fn allocator(&self) -> &StakeAllocator {
        &self.allocator
    }

    /// Attempts opened so far
    pub fn attempts_opened(&self) -> u64 {
        self.next_attempt_id
    }

    pub fn orders_created(&self) -> u64 {
        self.orders_created
    }

    pub fn missed_opportunities(&self) -> u64 {
        self.missed_opportunities
    }

    pub fn in_flight_attempt(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|attempt| attempt.attempt_id)
    }

    /// Legs placed but not yet resolved (never more than 2)
    pub fn in_flight_legs(&self) -> usize {
        self.in_flight
            .as_ref()
            .map_or(0, InFlightAttempt::pending_legs)
    }

    /// Commit capital to an opportunity, or drop it if capital is busy
    pub fn on_opportunity(
        &mut self,
        opportunity: &ArbitrageOpportunity,
        venues: &Venues,
        clock: &mut SimulationClock,
        rng: &mut RngManager,
    ) -> Result<Commitment, SimulationError> {
        if let Some(blocking) = &self.in_flight {
            self.missed_opportunities += 1;
            debug!(
                "Missed opportunity at {:.1}ms (edge {:.4}): attempt {} still in flight",
                clock.now(),
                opportunity.edge,
                blocking.attempt_id
            );
            return Ok(Commitment::Dropped {
                blocking_attempt: blocking.attempt_id,
            });
        }

        let allocation = self
            .allocator
            .allocate(opportunity.odds_a, opportunity.odds_b)?;
        let attempt_id = self.next_attempt_id;

        let leg_a = venues.get(opportunity.venue_for_a).place_order(
            LegId::new(attempt_id, Outcome::A),
            allocation.stake_a,
            clock,
            rng,
        )?;
        let leg_b = venues.get(opportunity.venue_for_b).place_order(
            LegId::new(attempt_id, Outcome::B),
            allocation.stake_b,
            clock,
            rng,
        )?;

        self.next_attempt_id += 1;
        self.orders_created += 2;
        debug!(
            "Attempt {} placed at {:.1}ms: A@{:.2} on {} stake {:.2} | B@{:.2} on {} stake {:.2}",
            attempt_id,
            clock.now(),
            leg_a.odds_at_placement(),
            leg_a.venue_id(),
            leg_a.stake(),
            leg_b.odds_at_placement(),
            leg_b.venue_id(),
            leg_b.stake(),
        );

        self.in_flight = Some(InFlightAttempt {
            attempt_id,
            opportunity: *opportunity,
            allocation,
            leg_a: leg_a.clone(),
            leg_b: leg_b.clone(),
            fills: Vec::with_capacity(2),
        });

        Ok(Commitment::Placed {
            attempt_id,
            allocation,
            leg_a,
            leg_b,
        })
    }

    /// Resolve one leg at `at`; closes the attempt once both legs are final
    pub fn on_order_resolution(
        &mut self,
        leg_id: LegId,
        venues: &Venues,
        at: SimTime,
        rng: &mut RngManager,
    ) -> Result<LegResolution, SimulationError> {
        let attempt = match self.in_flight.as_mut() {
            Some(attempt) if attempt.attempt_id == leg_id.attempt_id => attempt,
            _ => return Err(SimulationError::UnknownOrder(leg_id)),
        };

        let order = attempt.leg_mut(leg_id.leg);
        let venue = venues.get(order.venue_id());
        let fill = venue.resolve_order(order, at, rng)?;
        let order = order.clone();

        if let Some(fill) = &fill {
            attempt.fills.push(fill.clone());
        }

        let closed = if attempt.pending_legs() == 0 {
            self.in_flight.take().map(|done| Self::close(done, at))
        } else {
            None
        };

        Ok(LegResolution {
            order,
            fill,
            closed,
        })
    }

    fn close(attempt: InFlightAttempt, at: SimTime) -> ArbitrageAttempt {
        let outcome = AttemptOutcome::classify(attempt.leg_a.is_filled(), attempt.leg_b.is_filled());
        let realized_pnl = outcome.realized_pnl(&attempt.allocation);

        debug!(
            "Attempt {} closed at {:.1}ms: {:?}, realized {:.2}",
            attempt.attempt_id, at, outcome, realized_pnl
        );

        ArbitrageAttempt {
            attempt_id: attempt.attempt_id,
            opportunity: attempt.opportunity,
            allocation: attempt.allocation,
            leg_a: attempt.leg_a,
            leg_b: attempt.leg_b,
            fills: attempt.fills,
            outcome,
            realized_pnl,
            closed_at: at,
        }
    }
}
