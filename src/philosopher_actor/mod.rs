//! # Philosopher Actor
//!
//! One concurrent participant at the table. Each philosopher runs in its own
//! Tokio task and loops through the same cycle until shutdown:
//!
//! ```text
//! Thinking ──▶ AwaitingFirst ──▶ AwaitingSecond ──▶ Eating ──┐
//!    ▲              │                  │                      │
//!    └──────────────┴──── put down ────┴──────────────────────┘
//! ```
//!
//! ## Structure
//!
//! - [`context`] - [`TableContext`], the shared handles injected at seating time
//! - [`phase`] - [`Phase`], the observable state of the loop
//! - [`timing`] - [`DurationSource`] capabilities for think/eat durations
//!
//! ## The Acquisition Protocol
//!
//! 1. Block on the **lower**-indexed utensil of the pair.
//! 2. Probe (or wait a bounded time for) the **higher**-indexed one.
//! 3. If the second is unavailable, put the first down at once and go back to thinking.
//!
//! Step 1 is what rules out deadlock: everyone orders the same way, so there is
//! no cycle. Step 2/3 bound how long a utensil sits idle in one hand.
//!
//! ## Shutdown
//!
//! Thinking, eating and the blocking acquisition all select on the shutdown
//! coordinator. After each acquisition the flag is re-checked. Every exit path
//! puts down held utensils in reverse order, and because utensils are held as
//! guards, even a cancelled task drops them.
//!
//! ## Usage
//!
//! ```rust
//! use dining_table::philosopher_actor::{Philosopher, TableContext, Timing};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = TableContext::new(2, Timing::fixed(Duration::from_millis(1), Duration::from_millis(1)))?;
//!     let philosopher = Philosopher::new(0, ctx.clone())?;
//!     let handle = tokio::spawn(philosopher.run());
//!
//!     tokio::time::sleep(Duration::from_millis(20)).await;
//!     ctx.shutdown.request_shutdown();
//!     let report = handle.await?;
//!     assert!(ctx.pool.all_free());
//!     println!("ate {} times", report.meals);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod phase;
pub mod timing;

pub use context::*;
pub use phase::*;
pub use timing::*;

use crate::framework::{SleepOutcome, TableError};
use crate::model::{EventKind, PhilosopherReport};
use crate::resource::{AcquireError, Resource, ResourceGuard, SeatPair};
use tracing::{debug, info, Instrument};

/// How one pass through the cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Course {
    Eaten,
    /// Could not get both utensils; think and try again.
    Abandoned,
    Interrupted,
}

/// A seated philosopher, ready to run.
#[derive(Debug)]
pub struct Philosopher {
    index: usize,
    pair: SeatPair,
    ctx: TableContext,
}

impl Philosopher {
    /// Seats philosopher `index`. Fails if the seat does not exist at this table.
    pub fn new(index: usize, ctx: TableContext) -> Result<Self, TableError> {
        let pair = ctx.pool.pair_for(index)?;
        Ok(Self { index, pair, ctx })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pair(&self) -> SeatPair {
        self.pair
    }

    /// Runs the think/eat loop until shutdown and reports what happened.
    pub async fn run(self) -> PhilosopherReport {
        let span = tracing::info_span!("philosopher", seat = self.index);
        self.dine().instrument(span).await
    }

    async fn dine(self) -> PhilosopherReport {
        let ctx = &self.ctx;
        info!(low = self.pair.low, high = self.pair.high, "Seated");

        while ctx.shutdown.is_running() {
            self.enter(Phase::Thinking);
            let think = ctx.timing.think.next_duration();
            self.emit(EventKind::Thinking { duration: think });
            if ctx.shutdown.sleep(think).await == SleepOutcome::Interrupted {
                break;
            }

            match self.attempt_meal().await {
                Course::Eaten => ctx.stats.record_meal(self.index),
                Course::Abandoned => ctx.stats.record_aborted(self.index),
                Course::Interrupted => break,
            }
        }

        self.enter(Phase::ShuttingDown);
        self.emit(EventKind::ShutdownObserved);
        self.enter(Phase::Finished);
        self.emit(EventKind::Finished);

        let report = PhilosopherReport {
            index: self.index,
            meals: ctx.stats.meals(self.index),
            aborted_attempts: ctx.stats.aborted_attempts(self.index),
        };
        info!(meals = report.meals, aborted = report.aborted_attempts, "Left the table");
        report
    }

    /// One acquire → eat → release pass. Holds nothing on return.
    async fn attempt_meal(&self) -> Course {
        let ctx = &self.ctx;
        let low = &ctx.pool[self.pair.low];
        let high = &ctx.pool[self.pair.high];

        self.enter(Phase::AwaitingFirst);
        self.emit(EventKind::Trying { utensil: low.index() });
        let first = match low.acquire_blocking(self.index).await {
            Ok(guard) => guard,
            Err(reason) => return self.give_up(low.index(), reason),
        };
        self.emit(EventKind::Acquired { utensil: low.index() });

        if !ctx.shutdown.is_running() {
            self.enter(Phase::ShuttingDown);
            self.put_down(first);
            return Course::Interrupted;
        }

        self.enter(Phase::AwaitingSecond);
        self.emit(EventKind::Trying { utensil: high.index() });
        let second = match self.acquire_second(high).await {
            Ok(guard) => guard,
            Err(reason) => {
                let course = self.give_up(high.index(), reason);
                self.put_down(first);
                return course;
            }
        };
        self.emit(EventKind::Acquired { utensil: high.index() });

        if !ctx.shutdown.is_running() {
            self.enter(Phase::ShuttingDown);
            self.put_down(second);
            self.put_down(first);
            return Course::Interrupted;
        }

        self.enter(Phase::Eating);
        let eat = ctx.timing.eat.next_duration();
        self.emit(EventKind::Eating {
            first: low.index(),
            second: high.index(),
            duration: eat,
        });
        let outcome = ctx.shutdown.sleep(eat).await;
        if outcome == SleepOutcome::Interrupted {
            self.enter(Phase::ShuttingDown);
        }

        self.put_down(second);
        self.put_down(first);
        match outcome {
            SleepOutcome::Completed => Course::Eaten,
            SleepOutcome::Interrupted => Course::Interrupted,
        }
    }

    async fn acquire_second<'a>(
        &self,
        utensil: &'a Resource,
    ) -> Result<ResourceGuard<'a>, AcquireError> {
        match self.ctx.second_acquire {
            SecondAcquire::Probe => utensil.try_acquire(self.index).ok_or(AcquireError::Busy),
            SecondAcquire::Bounded(limit) => utensil.acquire_with_timeout(self.index, limit).await,
        }
    }

    fn give_up(&self, utensil: usize, reason: AcquireError) -> Course {
        debug!(utensil, %reason, "Acquire failed");
        self.emit(EventKind::AcquireFailed { utensil, reason });
        if reason.is_shutdown() {
            self.enter(Phase::ShuttingDown);
            Course::Interrupted
        } else {
            Course::Abandoned
        }
    }

    fn put_down(&self, guard: ResourceGuard<'_>) {
        self.emit(EventKind::Releasing {
            utensil: guard.index(),
        });
        guard.release();
    }

    fn enter(&self, phase: Phase) {
        debug!(%phase, "Phase");
        self.ctx.stats.set_phase(self.index, phase);
    }

    fn emit(&self, kind: EventKind) {
        self.ctx.events.emit(self.index, kind);
    }
}
