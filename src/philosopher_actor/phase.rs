//! Philosopher phases.

use std::fmt;

/// Where a philosopher is in its think → acquire → eat → release cycle.
///
/// Held utensils by phase: none in `Thinking`, `AwaitingFirst`, `Finished`;
/// at most the lower one in `AwaitingSecond`; both in `Eating`. `ShuttingDown`
/// may still hold what it had while it puts things down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Thinking = 0,
    AwaitingFirst = 1,
    AwaitingSecond = 2,
    Eating = 3,
    ShuttingDown = 4,
    Finished = 5,
}

impl Phase {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Phase::Thinking,
            1 => Phase::AwaitingFirst,
            2 => Phase::AwaitingSecond,
            3 => Phase::Eating,
            4 => Phase::ShuttingDown,
            _ => Phase::Finished,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Thinking => "thinking",
            Phase::AwaitingFirst => "awaiting-first",
            Phase::AwaitingSecond => "awaiting-second",
            Phase::Eating => "eating",
            Phase::ShuttingDown => "shutting-down",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_survives_atomic_encoding() {
        for phase in [
            Phase::Thinking,
            Phase::AwaitingFirst,
            Phase::AwaitingSecond,
            Phase::Eating,
            Phase::ShuttingDown,
            Phase::Finished,
        ] {
            assert_eq!(Phase::from_u8(phase as u8), phase);
        }
    }
}
