//! # Table Errors
//!
//! Construction and lifecycle errors for the dining table. Transient
//! acquisition failures live in [`AcquireError`](crate::resource::AcquireError)
//! because they never leave the philosopher loop.

use std::time::Duration;

/// Errors that prevent the table from starting or that surface while tearing it down.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A ring needs at least two seats so every philosopher has two neighbours' utensils.
    #[error("Invalid seat count: {0} (need at least 2)")]
    InvalidSeatCount(usize),

    #[error("Seat {index} out of range for a table of {seats}")]
    SeatOutOfRange { index: usize, seats: usize },

    #[error("Invalid {name} duration range: {min:?} > {max:?}")]
    InvalidDurationRange {
        name: &'static str,
        min: Duration,
        max: Duration,
    },

    #[error("Config not readable at {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Philosopher {index} failed: {reason}")]
    ActorFailed { index: usize, reason: String },

    /// Shutdown finished but a utensil still reports an owner.
    #[error("Utensil {index} still held by philosopher {holder} after shutdown")]
    LeakedHold { index: usize, holder: usize },
}
