//! The fixed ring of utensils and the lock-ordering rule.

use super::Resource;
use crate::framework::{ShutdownCoordinator, TableError};
use std::ops::Index;

/// The two utensils a philosopher needs, already in acquisition order.
///
/// `low < high` always holds. Every philosopher takes `low` before `high`, so
/// no cycle of "waiting for the next utensil" edges can form around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPair {
    pub low: usize,
    pub high: usize,
}

impl SeatPair {
    pub fn contains(&self, index: usize) -> bool {
        self.low == index || self.high == index
    }
}

/// The ordered, fixed-size set of utensils on the table.
#[derive(Debug)]
pub struct ResourcePool {
    resources: Vec<Resource>,
}

impl ResourcePool {
    /// Lays `size` utensils on the table. Every utensil observes `shutdown`.
    pub fn new(size: usize, shutdown: ShutdownCoordinator) -> Result<Self, TableError> {
        if size < 2 {
            return Err(TableError::InvalidSeatCount(size));
        }
        let resources = (0..size)
            .map(|index| Resource::new(index, shutdown.clone()))
            .collect();
        Ok(Self { resources })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resource_at(&self, index: usize) -> Result<&Resource, TableError> {
        self.resources.get(index).ok_or(TableError::SeatOutOfRange {
            index,
            seats: self.len(),
        })
    }

    /// Utensils for the philosopher in seat `actor_index`: its own and the next one
    /// round the ring, lower index first.
    pub fn pair_for(&self, actor_index: usize) -> Result<SeatPair, TableError> {
        let seats = self.len();
        if actor_index >= seats {
            return Err(TableError::SeatOutOfRange {
                index: actor_index,
                seats,
            });
        }
        let left = actor_index;
        let right = (actor_index + 1) % seats;
        Ok(SeatPair {
            low: left.min(right),
            high: left.max(right),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Point-in-time owner of every utensil, by index.
    pub fn holders(&self) -> Vec<Option<usize>> {
        self.resources.iter().map(Resource::holder).collect()
    }

    pub fn all_free(&self) -> bool {
        self.resources.iter().all(|r| !r.is_held())
    }
}

/// Panics on an out-of-range index; use [`ResourcePool::resource_at`] for unchecked input.
impl Index<usize> for ResourcePool {
    type Output = Resource;

    fn index(&self, index: usize) -> &Resource {
        &self.resources[index]
    }
}
