//! Orchestrator Engine
//!
//! Owns the clock and every simulation component, and routes each dispatched
//! event to the component that handles it:
//!
//! ```text
//! Shock           → ShockFeed reprices venue A, queues venue B + next shock
//!                   → detector → coordinator (same dispatch)
//! VenueUpdate     → venue applies odds → detector → coordinator
//! OrderResolution → coordinator resolves the leg
//!                   → ledger records the attempt once both legs are final
//! ```
//!
//! # Example
//!
//! ```rust
//! use shock_arb_simulator_core_rs::{Orchestrator, SimulationConfig};
//!
//! let mut orchestrator = Orchestrator::new(SimulationConfig::default()).unwrap();
//! orchestrator.run_for(40_000.0).unwrap();
//!
//! let summary = orchestrator.summary().unwrap();
//! assert_eq!(summary.attempts, orchestrator.ledger().len());
//! ```

use crate::arbitrage::{AllocationError, ArbitrageDetector, StakeAllocator};
use crate::core::{EventHandler, RunStats, ScheduleError, SimTime, SimulationClock, StopCondition};
use crate::events::Event;
use crate::execution::{Commitment, ExecutionCoordinator};
use crate::ledger::ResultLedger;
use crate::models::event::{EventLog, LogEntry};
use crate::models::odds::OddsError;
use crate::models::order::{LegId, OrderError};
use crate::models::quote::VenueId;
use crate::orchestrator::config::SimulationConfig;
use crate::orchestrator::summary::RunSummary;
use crate::rng::RngManager;
use crate::shocks::ShockFeed;
use crate::venue::{Venue, Venues};
use log::info;
use thiserror::Error;

/// Simulation error types
///
/// All of these are precondition violations; they abort the run. Rejected
/// orders and orphan legs are simulated outcomes and never show up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Odds(#[from] OddsError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Shock feed already started; build a new feed to restart")]
    FeedAlreadyStarted,

    #[error("No in-flight order for leg {0}")]
    UnknownOrder(LegId),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Main orchestrator managing simulation state and the event loop
///
/// # Determinism
///
/// All randomness goes through one seeded xorshift64* generator and events
/// with equal timestamps dispatch in scheduling order, so the same config
/// always produces the same ledger.
pub struct Orchestrator {
    config: SimulationConfig,
    clock: SimulationClock,
    runtime: Runtime,
    /// End of the last run window, or the last dispatch time after a budget run
    horizon: SimTime,
}

/// Everything the event handler mutates, kept apart from the clock so the
/// clock can lend itself to the handler during dispatch
struct Runtime {
    rng: RngManager,
    feed: ShockFeed,
    venues: Venues,
    detector: ArbitrageDetector,
    coordinator: ExecutionCoordinator,
    ledger: ResultLedger,
    event_log: EventLog,
    opportunities_detected: u64,
}

impl Orchestrator {
    /// Validate the config, build every component and schedule the first shock
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut clock = SimulationClock::new();
        let mut rng = RngManager::new(config.rng_seed);

        let venues = Venues::new(
            Venue::new(
                VenueId::A,
                config.opening_odds,
                config.venue_config(VenueId::A).clone(),
            )?,
            Venue::new(
                VenueId::B,
                config.opening_odds,
                config.venue_config(VenueId::B).clone(),
            )?,
        );
        let detector = ArbitrageDetector::new(config.min_arbitrage_edge)?;
        let coordinator = ExecutionCoordinator::new(StakeAllocator::new(config.total_outlay)?);

        let mut feed = ShockFeed::new(config.shock_feed_config())?;
        let first_shock_at = feed.start(&mut clock, &mut rng)?;

        info!(
            "Simulation initialised (seed {}, outlay {:.2}, min edge {:.4}); first shock at {:.1}ms",
            config.rng_seed, config.total_outlay, config.min_arbitrage_edge, first_shock_at
        );

        Ok(Self {
            config,
            clock,
            runtime: Runtime {
                rng,
                feed,
                venues,
                detector,
                coordinator,
                ledger: ResultLedger::new(),
                event_log: EventLog::new(),
                opportunities_detected: 0,
            },
            horizon: 0.0,
        })
    }

    /// Dispatch events until `stop`
    pub fn run(&mut self, stop: StopCondition) -> Result<RunStats, SimulationError> {
        let stats = self.clock.run_until(stop, &mut self.runtime)?;
        let reached = match stop {
            StopCondition::Until(end) => end,
            StopCondition::EventBudget(_) => self.clock.now(),
        };
        self.horizon = self.horizon.max(reached);

        info!(
            "Run stopped ({:?}) at {:.1}ms after {} events: {} attempts, realized P&L {:.2}",
            stats.stopped_by,
            self.clock.now(),
            stats.dispatched,
            self.runtime.ledger.len(),
            self.runtime.ledger.total_realized_pnl()
        );
        Ok(stats)
    }

    /// Run another `duration_ms` of simulated time past the previous window
    pub fn run_for(&mut self, duration_ms: f64) -> Result<RunStats, SimulationError> {
        if !(duration_ms.is_finite() && duration_ms >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "run duration must be non-negative, got {}ms",
                duration_ms
            )));
        }
        self.run(StopCondition::Until(self.horizon + duration_ms))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Time of the last dispatched event (ms)
    pub fn current_time(&self) -> SimTime {
        self.clock.now()
    }

    pub fn events_dispatched(&self) -> u64 {
        self.clock.dispatched_count()
    }

    pub fn pending_events(&self) -> usize {
        self.clock.pending()
    }

    pub fn venue(&self, venue_id: VenueId) -> &Venue {
        self.runtime.venues.get(venue_id)
    }

    pub fn ledger(&self) -> &ResultLedger {
        &self.runtime.ledger
    }

    pub fn event_log(&self) -> &EventLog {
        &self.runtime.event_log
    }

    pub fn coordinator(&self) -> &ExecutionCoordinator {
        &self.runtime.coordinator
    }

    pub fn shocks_fired(&self) -> u64 {
        self.runtime.feed.shocks_fired()
    }

    pub fn opportunities_detected(&self) -> u64 {
        self.runtime.opportunities_detected
    }

    /// Aggregate report of the run so far
    pub fn summary(&self) -> Result<RunSummary, SimulationError> {
        let ledger = &self.runtime.ledger;

        Ok(RunSummary {
            sim_time_ms: self.clock.now(),
            events_dispatched: self.clock.dispatched_count(),
            shocks: self.runtime.feed.shocks_fired(),
            opportunities_detected: self.runtime.opportunities_detected,
            opportunities_missed: ledger.missed_opportunities(),
            attempts: ledger.len(),
            counts: ledger.counts(),
            realized_pnl: ledger.total_realized_pnl(),
            hypothetical_pnl: ledger.total_hypothetical_pnl(),
            win_rate: ledger.win_rate(),
            average_locked_roi: ledger.average_locked_roi(),
            config_hash: self.config.config_hash()?,
            ledger_digest: ledger.digest()?,
        })
    }
}

impl EventHandler for Runtime {
    type Error = SimulationError;

    fn handle(&mut self, clock: &mut SimulationClock, event: Event) -> Result<(), SimulationError> {
        let now = clock.now();

        match event {
            Event::Shock => {
                let shock = self
                    .feed
                    .fire(self.venues.get_mut(VenueId::A), clock, &mut self.rng)?;

                self.event_log.log(LogEntry::ShockFired {
                    at: now,
                    favorite: shock.favorite,
                    odds: shock.odds,
                });
                self.event_log.log(LogEntry::QuoteUpdated {
                    at: now,
                    venue: VenueId::A,
                    odds: shock.odds,
                });
                self.on_quote_change(clock)
            }

            Event::VenueUpdate { venue, odds } => {
                self.venues.get_mut(venue).apply_update(odds, now)?;
                self.event_log.log(LogEntry::QuoteUpdated {
                    at: now,
                    venue,
                    odds,
                });
                self.on_quote_change(clock)
            }

            Event::OrderResolution { leg_id, venue } => {
                let resolution =
                    self.coordinator
                        .on_order_resolution(leg_id, &self.venues, now, &mut self.rng)?;

                self.event_log.log(LogEntry::OrderResolved {
                    at: now,
                    leg_id,
                    venue,
                    filled: resolution.fill.is_some(),
                });

                if let Some(attempt) = resolution.closed {
                    self.ledger.record(&attempt);
                    self.event_log.log(LogEntry::AttemptClosed {
                        at: now,
                        attempt_id: attempt.attempt_id,
                        outcome: attempt.outcome,
                        realized_pnl: attempt.realized_pnl,
                    });
                }
                Ok(())
            }
        }
    }
}

impl Runtime {
    /// Re-check the books after any quote change and act on what is found
    fn on_quote_change(&mut self, clock: &mut SimulationClock) -> Result<(), SimulationError> {
        let now = clock.now();
        let Some(opportunity) = self.detector.evaluate(&self.venues, now) else {
            return Ok(());
        };

        self.opportunities_detected += 1;
        self.event_log.log(LogEntry::OpportunityDetected {
            at: now,
            implied_sum: opportunity.implied_sum,
            edge: opportunity.edge,
        });

        match self
            .coordinator
            .on_opportunity(&opportunity, &self.venues, clock, &mut self.rng)?
        {
            Commitment::Placed { leg_a, leg_b, .. } => {
                for order in [leg_a, leg_b] {
                    self.event_log.log(LogEntry::OrderPlaced {
                        at: now,
                        leg_id: order.leg_id(),
                        venue: order.venue_id(),
                        stake: order.stake(),
                        odds: order.odds_at_placement(),
                    });
                }
            }
            Commitment::Dropped { blocking_attempt } => {
                self.ledger.record_missed();
                self.event_log.log(LogEntry::OpportunityMissed {
                    at: now,
                    edge: opportunity.edge,
                    blocking_attempt,
                });
            }
        }
        Ok(())
    }
}
