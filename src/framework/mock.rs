//! # Mock Capabilities & Event Audit
//!
//! Test helpers for driving a table deterministically and for checking what it did.
//!
//! - [`ScriptedDuration`] replays a fixed list of durations, cycling when it runs out.
//! - [`TableAudit`] replays a [`TableEvent`] stream and rejects any history in
//!   which a utensil had two owners, a philosopher ate without both of its
//!   utensils, or two neighbours ate at the same time.
//!
//! ## Auditing a Run
//!
//! ```rust
//! use dining_table::framework::mock::TableAudit;
//! use dining_table::model::{EventKind, TableEvent};
//!
//! let events = vec![
//!     TableEvent { philosopher: 0, kind: EventKind::Acquired { utensil: 0 } },
//!     TableEvent { philosopher: 0, kind: EventKind::Acquired { utensil: 1 } },
//!     TableEvent { philosopher: 1, kind: EventKind::Acquired { utensil: 1 } },
//! ];
//! let err = TableAudit::replay(3, events).unwrap_err();
//! assert!(err.to_string().contains("utensil 1"));
//! ```

use crate::model::{EventKind, TableEvent};
use crate::philosopher_actor::DurationSource;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Durations handed out in order, wrapping around at the end.
#[derive(Debug)]
pub struct ScriptedDuration {
    script: Vec<Duration>,
    cursor: AtomicUsize,
}

impl ScriptedDuration {
    /// An empty script always yields `Duration::ZERO`.
    pub fn new(script: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn millis(script: &[u64]) -> Self {
        Self::new(script.iter().copied().map(Duration::from_millis))
    }

    /// How many durations have been handed out.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl DurationSource for ScriptedDuration {
    fn next_duration(&self) -> Duration {
        if self.script.is_empty() {
            return Duration::ZERO;
        }
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.script[n % self.script.len()]
    }
}

/// A history the table must never produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditViolation {
    #[error("Philosopher {philosopher} took utensil {utensil} while philosopher {holder} held it")]
    DoubleAcquire {
        philosopher: usize,
        utensil: usize,
        holder: usize,
    },

    #[error("Philosopher {philosopher} reached for utensil {utensil}, which is not beside its seat")]
    WrongUtensil { philosopher: usize, utensil: usize },

    #[error("Philosopher {philosopher} released utensil {utensil} it did not hold")]
    ForeignRelease { philosopher: usize, utensil: usize },

    #[error("Philosopher {philosopher} ate without holding utensils {first} and {second}")]
    EatingUnarmed {
        philosopher: usize,
        first: usize,
        second: usize,
    },

    #[error("Philosopher {philosopher} ate while neighbour {neighbour} was eating")]
    NeighbourEating { philosopher: usize, neighbour: usize },

    #[error("Philosopher {philosopher} left holding utensil {utensil}")]
    LeftHolding { philosopher: usize, utensil: usize },

    #[error("Event from unknown seat {0}")]
    UnknownSeat(usize),
}

/// What a clean replay saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub meals: Vec<u64>,
    pub finished: usize,
    /// Utensil → philosopher, for whatever is still held at the end of the stream.
    pub still_held: HashMap<usize, usize>,
}

/// Incremental replay of a table's event stream.
#[derive(Debug)]
pub struct TableAudit {
    seats: usize,
    held: HashMap<usize, usize>,
    eating: HashSet<usize>,
    meals: Vec<u64>,
    finished: usize,
}

impl TableAudit {
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            held: HashMap::new(),
            eating: HashSet::new(),
            meals: vec![0; seats],
            finished: 0,
        }
    }

    /// Replays a whole stream, stopping at the first violation.
    pub fn replay(
        seats: usize,
        events: impl IntoIterator<Item = TableEvent>,
    ) -> Result<AuditSummary, AuditViolation> {
        let mut audit = Self::new(seats);
        for event in events {
            audit.observe(&event)?;
        }
        Ok(audit.summary())
    }

    pub fn observe(&mut self, event: &TableEvent) -> Result<(), AuditViolation> {
        let p = event.philosopher;
        if p >= self.seats {
            return Err(AuditViolation::UnknownSeat(p));
        }

        match event.kind {
            EventKind::Acquired { utensil } => {
                if !self.beside(p, utensil) {
                    return Err(AuditViolation::WrongUtensil {
                        philosopher: p,
                        utensil,
                    });
                }
                if let Some(&holder) = self.held.get(&utensil) {
                    return Err(AuditViolation::DoubleAcquire {
                        philosopher: p,
                        utensil,
                        holder,
                    });
                }
                self.held.insert(utensil, p);
            }
            EventKind::Releasing { utensil } => {
                if self.held.get(&utensil) != Some(&p) {
                    return Err(AuditViolation::ForeignRelease {
                        philosopher: p,
                        utensil,
                    });
                }
                self.held.remove(&utensil);
                self.eating.remove(&p);
            }
            EventKind::Eating { first, second, .. } => {
                if self.held.get(&first) != Some(&p) || self.held.get(&second) != Some(&p) {
                    return Err(AuditViolation::EatingUnarmed {
                        philosopher: p,
                        first,
                        second,
                    });
                }
                for neighbour in self.neighbours(p) {
                    if neighbour != p && self.eating.contains(&neighbour) {
                        return Err(AuditViolation::NeighbourEating {
                            philosopher: p,
                            neighbour,
                        });
                    }
                }
                self.eating.insert(p);
                self.meals[p] += 1;
            }
            EventKind::Finished => {
                if let Some((&utensil, _)) = self.held.iter().find(|(_, &holder)| holder == p) {
                    return Err(AuditViolation::LeftHolding {
                        philosopher: p,
                        utensil,
                    });
                }
                self.finished += 1;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            meals: self.meals.clone(),
            finished: self.finished,
            still_held: self.held.clone(),
        }
    }

    fn beside(&self, p: usize, utensil: usize) -> bool {
        utensil == p || utensil == (p + 1) % self.seats
    }

    fn neighbours(&self, p: usize) -> [usize; 2] {
        [(p + self.seats - 1) % self.seats, (p + 1) % self.seats]
    }
}
