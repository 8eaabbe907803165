//! Simulation clock
//!
//! Owns simulated time and the schedule of future events. The clock never
//! sleeps: `run_until` pops the earliest event, jumps `now` to its due time
//! and hands it to an [`EventHandler`], which may schedule further events.
//!
//! Dispatch is single-threaded and run-to-completion. Two orders "in flight"
//! at once are simply two resolution events sitting in the heap.
//!
//! # Example
//! ```
//! use shock_arb_simulator_core_rs::core::{EventHandler, SimulationClock, StopCondition};
//! use shock_arb_simulator_core_rs::events::Event;
//!
//! struct Counter(u32);
//!
//! impl EventHandler for Counter {
//!     type Error = std::convert::Infallible;
//!
//!     fn handle(&mut self, clock: &mut SimulationClock, _event: Event) -> Result<(), Self::Error> {
//!         self.0 += 1;
//!         if self.0 < 3 {
//!             clock.schedule(Event::Shock, 100.0).unwrap();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut clock = SimulationClock::new();
//! clock.schedule(Event::Shock, 0.0).unwrap();
//! let stats = clock.run_until(StopCondition::EventBudget(10), &mut Counter(0)).unwrap();
//! assert_eq!(stats.dispatched, 3);
//! assert_eq!(clock.now(), 200.0);
//! ```

use crate::core::SimTime;
use crate::events::{Event, ScheduledEvent};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule delay must be finite and non-negative, got {delay_ms}ms")]
    InvalidDelay { delay_ms: f64 },
}

/// When `run_until` stops dispatching
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopCondition {
    /// Dispatch every event due at or before this time
    Until(SimTime),
    /// Dispatch at most this many events
    EventBudget(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    QueueEmpty,
    ReachedEndTime,
    BudgetExhausted,
}

/// Outcome of one `run_until` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub dispatched: u64,
    pub stopped_by: StopReason,
}

/// Receives events popped by the clock
pub trait EventHandler {
    type Error;

    /// Handle one event; `clock.now()` is already the event's due time
    fn handle(&mut self, clock: &mut SimulationClock, event: Event) -> Result<(), Self::Error>;
}

/// Discrete-event clock with a time-ordered schedule
#[derive(Debug, Default)]
pub struct SimulationClock {
    now: SimTime,
    /// Min-heap on (due_at, seq)
    schedule: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
    dispatched: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time (ms)
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Insert `event` at `now + delay_ms`, returning its due time
    pub fn schedule(&mut self, event: Event, delay_ms: f64) -> Result<SimTime, ScheduleError> {
        if !(delay_ms.is_finite() && delay_ms >= 0.0) {
            return Err(ScheduleError::InvalidDelay { delay_ms });
        }

        let due_at = self.now + delay_ms;
        let seq = self.next_seq;
        self.next_seq += 1;

        self.schedule.push(Reverse(ScheduledEvent { due_at, seq, event }));
        Ok(due_at)
    }

    /// Pop the earliest event and advance `now` to its due time
    pub fn pop_next(&mut self) -> Option<ScheduledEvent> {
        let Reverse(next) = self.schedule.pop()?;
        debug_assert!(next.due_at >= self.now, "schedule went backwards");
        self.now = next.due_at;
        self.dispatched += 1;
        Some(next)
    }

    /// Due time of the earliest scheduled event
    pub fn peek_due_at(&self) -> Option<SimTime> {
        self.schedule.peek().map(|Reverse(next)| next.due_at)
    }

    /// Number of events waiting in the schedule
    pub fn pending(&self) -> usize {
        self.schedule.len()
    }

    /// Total events popped over the clock's lifetime
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch events in `(due_at, seq)` order until the queue drains or
    /// `stop` is reached.
    ///
    /// With [`StopCondition::Until`], events due strictly after the end time
    /// stay queued and `now` stays at the last dispatched event. A handler
    /// error aborts the run immediately.
    pub fn run_until<H: EventHandler>(
        &mut self,
        stop: StopCondition,
        handler: &mut H,
    ) -> Result<RunStats, H::Error> {
        let mut dispatched = 0u64;

        loop {
            let stopped_by = match stop {
                StopCondition::EventBudget(budget) if dispatched >= budget => {
                    Some(StopReason::BudgetExhausted)
                }
                StopCondition::Until(end) => match self.peek_due_at() {
                    Some(due_at) if due_at > end => Some(StopReason::ReachedEndTime),
                    _ => None,
                },
                _ => None,
            };
            if let Some(stopped_by) = stopped_by {
                return Ok(RunStats {
                    dispatched,
                    stopped_by,
                });
            }

            let Some(next) = self.pop_next() else {
                return Ok(RunStats {
                    dispatched,
                    stopped_by: StopReason::QueueEmpty,
                });
            };

            handler.handle(self, next.event)?;
            dispatched += 1;
        }
    }
}
