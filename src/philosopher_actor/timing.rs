//! Think/eat duration capabilities.
//!
//! The philosopher never decides how long to think or eat; it asks a
//! [`DurationSource`]. The binary plugs in [`RandomDuration`], tests plug in
//! fixed or scripted sources.

use crate::framework::TableError;
use rand::Rng;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Supplies the next think or eat duration.
pub trait DurationSource: Send + Sync + Debug {
    fn next_duration(&self) -> Duration;
}

/// Always the same duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDuration(pub Duration);

impl DurationSource for FixedDuration {
    fn next_duration(&self) -> Duration {
        self.0
    }
}

/// Uniformly random in `[min, max]`, microsecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDuration {
    min: Duration,
    max: Duration,
}

impl RandomDuration {
    /// `name` only labels the error when `min > max`.
    pub fn new(name: &'static str, min: Duration, max: Duration) -> Result<Self, TableError> {
        if min > max {
            return Err(TableError::InvalidDurationRange { name, min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

impl DurationSource for RandomDuration {
    fn next_duration(&self) -> Duration {
        let min = micros(self.min);
        let max = micros(self.max);
        Duration::from_micros(rand::rng().random_range(min..=max))
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// The pair of sources a philosopher draws from.
#[derive(Debug, Clone)]
pub struct Timing {
    pub think: Arc<dyn DurationSource>,
    pub eat: Arc<dyn DurationSource>,
}

impl Timing {
    pub fn new(think: impl DurationSource + 'static, eat: impl DurationSource + 'static) -> Self {
        Self {
            think: Arc::new(think),
            eat: Arc::new(eat),
        }
    }

    pub fn fixed(think: Duration, eat: Duration) -> Self {
        Self::new(FixedDuration(think), FixedDuration(eat))
    }
}
