//! # Shutdown Coordination
//!
//! A single process-wide cancellation point shared by every philosopher and
//! every utensil. It replaces the classic `static bool running` flag that a
//! signal handler flips behind everyone's back.
//!
//! ## Contract
//!
//! - [`ShutdownCoordinator::request_shutdown`] flips the running flag exactly once.
//!   Later calls are no-ops and return `false`.
//! - [`ShutdownCoordinator::is_running`] is a lock-free read used at every phase boundary.
//! - [`ShutdownCoordinator::cancelled`] is the suspension point every blocking wait
//!   selects on, so a single request wakes all of them at once.
//!
//! ```rust
//! use dining_table::framework::ShutdownCoordinator;
//!
//! let shutdown = ShutdownCoordinator::new();
//! assert!(shutdown.is_running());
//! assert!(shutdown.request_shutdown());
//! assert!(!shutdown.request_shutdown());
//! assert!(!shutdown.is_running());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// How an interruptible sleep ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    Completed,
    Interrupted,
}

/// Broadcast cancellation shared by the whole table.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
    initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the table and wakes every philosopher blocked on a utensil or a sleep.
    ///
    /// Returns `true` for the call that actually initiated shutdown.
    pub fn request_shutdown(&self) -> bool {
        if self.initiated.swap(true, Ordering::AcqRel) {
            return false;
        }
        info!("Shutdown requested");
        self.token.cancel();
        true
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Completes once shutdown has been requested. Returns immediately if it already was.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Sleeps for `duration` unless shutdown arrives first.
    ///
    /// Shutdown latency for a thinking or eating philosopher is bounded by this
    /// select, not by the length of the sleep.
    pub async fn sleep(&self, duration: Duration) -> SleepOutcome {
        if !self.is_running() {
            return SleepOutcome::Interrupted;
        }
        tokio::select! {
            _ = self.token.cancelled() => SleepOutcome::Interrupted,
            _ = tokio::time::sleep(duration) => SleepOutcome::Completed,
        }
    }
}
