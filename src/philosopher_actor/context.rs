//! The shared context every philosopher is seated with.

use super::timing::Timing;
use crate::framework::{ShutdownCoordinator, TableError};
use crate::model::{EventSink, TableStats};
use crate::resource::ResourcePool;
use std::sync::Arc;
use std::time::Duration;

/// How a philosopher goes after its second (higher-ordered) utensil.
///
/// Neither variant waits forever while holding the first utensil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecondAcquire {
    /// `try_acquire` once; put the first utensil down if it is busy.
    #[default]
    Probe,
    /// Wait up to the given duration, then give up.
    Bounded(Duration),
}

/// Everything a philosopher shares with the rest of the table.
///
/// Built once, cloned into every philosopher. The shutdown coordinator inside is
/// the only writer-side handle; everything else is read or per-seat.
#[derive(Debug, Clone)]
pub struct TableContext {
    pub pool: Arc<ResourcePool>,
    pub shutdown: ShutdownCoordinator,
    pub timing: Timing,
    pub events: EventSink,
    pub stats: Arc<TableStats>,
    pub second_acquire: SecondAcquire,
}

impl TableContext {
    /// Lays a table of `seats` utensils wired to a fresh shutdown coordinator.
    pub fn new(seats: usize, timing: Timing) -> Result<Self, TableError> {
        let shutdown = ShutdownCoordinator::new();
        let pool = ResourcePool::new(seats, shutdown.clone())?;
        Ok(Self {
            pool: Arc::new(pool),
            shutdown,
            timing,
            events: EventSink::disabled(),
            stats: Arc::new(TableStats::new(seats)),
            second_acquire: SecondAcquire::default(),
        })
    }

    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn with_second_acquire(mut self, policy: SecondAcquire) -> Self {
        self.second_acquire = policy;
        self
    }

    pub fn seats(&self) -> usize {
        self.pool.len()
    }
}
