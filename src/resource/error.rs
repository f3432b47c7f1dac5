//! Error types for utensil acquisition.

use std::time::Duration;
use thiserror::Error;

/// Why an acquisition attempt came back empty-handed.
///
/// `Busy` and `TimedOut` are transient: the philosopher puts down whatever it
/// holds and goes back to thinking. `ShuttingDown` is a control signal, not a failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AcquireError {
    #[error("Utensil busy")]
    Busy,

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Shutdown requested while waiting")]
    ShuttingDown,
}

impl AcquireError {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, AcquireError::ShuttingDown)
    }
}
