//! Live counters and final reports.

use crate::philosopher_actor::Phase;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

#[derive(Debug)]
struct SeatStats {
    meals: AtomicU64,
    aborted: AtomicU64,
    phase: AtomicU8,
}

impl SeatStats {
    fn new() -> Self {
        Self {
            meals: AtomicU64::new(0),
            aborted: AtomicU64::new(0),
            phase: AtomicU8::new(Phase::Thinking as u8),
        }
    }
}

/// Per-seat counters, readable while the table runs.
///
/// Each seat is written only by its own philosopher.
#[derive(Debug)]
pub struct TableStats {
    seats: Vec<SeatStats>,
}

impl TableStats {
    pub fn new(seats: usize) -> Self {
        Self {
            seats: (0..seats).map(|_| SeatStats::new()).collect(),
        }
    }

    pub fn seats(&self) -> usize {
        self.seats.len()
    }

    pub fn meals(&self, seat: usize) -> u64 {
        self.seats
            .get(seat)
            .map_or(0, |s| s.meals.load(Ordering::Relaxed))
    }

    pub fn aborted_attempts(&self, seat: usize) -> u64 {
        self.seats
            .get(seat)
            .map_or(0, |s| s.aborted.load(Ordering::Relaxed))
    }

    pub fn phase(&self, seat: usize) -> Option<Phase> {
        self.seats
            .get(seat)
            .map(|s| Phase::from_u8(s.phase.load(Ordering::Acquire)))
    }

    pub fn total_meals(&self) -> u64 {
        (0..self.seats()).map(|seat| self.meals(seat)).sum()
    }

    /// Every seat has eaten at least `meals` times.
    pub fn everyone_ate(&self, meals: u64) -> bool {
        (0..self.seats()).all(|seat| self.meals(seat) >= meals)
    }

    pub(crate) fn record_meal(&self, seat: usize) {
        if let Some(s) = self.seats.get(seat) {
            s.meals.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_aborted(&self, seat: usize) {
        if let Some(s) = self.seats.get(seat) {
            s.aborted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn set_phase(&self, seat: usize, phase: Phase) {
        if let Some(s) = self.seats.get(seat) {
            s.phase.store(phase as u8, Ordering::Release);
        }
    }
}

/// What a philosopher hands back when it leaves the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhilosopherReport {
    pub index: usize,
    pub meals: u64,
    pub aborted_attempts: u64,
}

/// All reports, in seat order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DinnerSummary {
    pub reports: Vec<PhilosopherReport>,
}

impl DinnerSummary {
    pub fn total_meals(&self) -> u64 {
        self.reports.iter().map(|r| r.meals).sum()
    }
}
