//! # Utensils
//!
//! A [`Resource`] is one exclusively-held utensil on the table. It owns its
//! held-state and the queue of philosophers waiting for it; nothing outside this
//! module can flip either.
//!
//! ## Acquisition
//!
//! Three ways in, all sharing the same compare-and-swap on the owner slot:
//!
//! | Method | Blocks? | Fails with |
//! |--------|---------|------------|
//! | [`Resource::try_acquire`] | never | `None` when busy |
//! | [`Resource::acquire_blocking`] | until free | [`AcquireError::ShuttingDown`] |
//! | [`Resource::acquire_with_timeout`] | up to the duration | `TimedOut` or `ShuttingDown` |
//!
//! ## Release
//!
//! A successful acquisition hands back a [`ResourceGuard`]. Dropping it frees the
//! utensil and wakes one waiter. There is no other release path, so releasing a
//! utensil you do not hold (or releasing twice) cannot be written.
//!
//! Waiters always re-check the owner slot after a wake: another philosopher may
//! have probed the utensil with `try_acquire` between the release and the wake.

pub mod error;
pub mod pool;

pub use error::*;
pub use pool::*;

use crate::framework::ShutdownCoordinator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::trace;

const FREE: usize = usize::MAX;

/// A single exclusive utensil.
#[derive(Debug)]
pub struct Resource {
    index: usize,
    owner: AtomicUsize,
    released: Notify,
    shutdown: ShutdownCoordinator,
}

impl Resource {
    pub fn new(index: usize, shutdown: ShutdownCoordinator) -> Self {
        Self {
            index,
            owner: AtomicUsize::new(FREE),
            released: Notify::new(),
            shutdown,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_held(&self) -> bool {
        self.owner.load(Ordering::Acquire) != FREE
    }

    /// The philosopher currently holding this utensil, if any.
    pub fn holder(&self) -> Option<usize> {
        match self.owner.load(Ordering::Acquire) {
            FREE => None,
            owner => Some(owner),
        }
    }

    /// Takes the utensil iff it is free right now. Never waits.
    pub fn try_acquire(&self, owner: usize) -> Option<ResourceGuard<'_>> {
        debug_assert_ne!(owner, FREE, "owner id collides with the free marker");
        self.owner
            .compare_exchange(FREE, owner, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ResourceGuard {
                resource: self,
                owner,
            })
    }

    /// Waits until the utensil is free or shutdown is requested.
    ///
    /// Returns [`AcquireError::ShuttingDown`] without acquiring if shutdown was
    /// already requested on entry, even when the utensil is free.
    pub async fn acquire_blocking(&self, owner: usize) -> Result<ResourceGuard<'_>, AcquireError> {
        loop {
            if !self.shutdown.is_running() {
                return Err(AcquireError::ShuttingDown);
            }

            // Register interest before probing so a release between the probe
            // and the await cannot be missed.
            let notified = self.released.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(guard) = self.try_acquire(owner) {
                return Ok(guard);
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Err(AcquireError::ShuttingDown),
                _ = &mut notified => {}
            }
        }
    }

    /// Like [`acquire_blocking`](Self::acquire_blocking) but gives up after `duration`.
    pub async fn acquire_with_timeout(
        &self,
        owner: usize,
        duration: Duration,
    ) -> Result<ResourceGuard<'_>, AcquireError> {
        match tokio::time::timeout(duration, self.acquire_blocking(owner)).await {
            Ok(result) => result,
            Err(_) => Err(AcquireError::TimedOut(duration)),
        }
    }
}

/// Proof of ownership of one utensil. Dropping it releases the utensil.
#[derive(Debug)]
#[must_use = "dropping the guard releases the utensil immediately"]
pub struct ResourceGuard<'a> {
    resource: &'a Resource,
    owner: usize,
}

impl ResourceGuard<'_> {
    pub fn index(&self) -> usize {
        self.resource.index
    }

    pub fn owner(&self) -> usize {
        self.owner
    }

    /// Puts the utensil down. Same as dropping the guard, spelled out.
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for ResourceGuard<'_> {
    fn drop(&mut self) {
        let previous = self.resource.owner.swap(FREE, Ordering::AcqRel);
        debug_assert_eq!(previous, self.owner, "utensil released by a non-holder");
        trace!(utensil = self.resource.index, owner = self.owner, "Released");
        self.resource.released.notify_one();
    }
}
