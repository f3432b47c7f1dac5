//! Table events: the structured side channel philosophers report through.

use crate::resource::AcquireError;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Something a philosopher did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Thinking { duration: Duration },
    Trying { utensil: usize },
    /// Emitted after the utensil is held.
    Acquired { utensil: usize },
    AcquireFailed { utensil: usize, reason: AcquireError },
    Eating {
        first: usize,
        second: usize,
        duration: Duration,
    },
    /// Emitted while the utensil is still held, just before it is put down.
    Releasing { utensil: usize },
    ShutdownObserved,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEvent {
    pub philosopher: usize,
    pub kind: EventKind,
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.philosopher;
        match &self.kind {
            EventKind::Thinking { duration } => {
                write!(f, "Philosopher {p} is thinking for {} ms", duration.as_millis())
            }
            EventKind::Trying { utensil } => {
                write!(f, "Philosopher {p} is trying to acquire utensil {utensil}")
            }
            EventKind::Acquired { utensil } => {
                write!(f, "Philosopher {p} has acquired utensil {utensil}")
            }
            EventKind::AcquireFailed { utensil, reason } => {
                write!(f, "Philosopher {p} failed to acquire utensil {utensil}: {reason}")
            }
            EventKind::Eating {
                first,
                second,
                duration,
            } => write!(
                f,
                "Philosopher {p} started eating with utensils {first} and {second} for {} ms",
                duration.as_millis()
            ),
            EventKind::Releasing { utensil } => {
                write!(f, "Philosopher {p} is releasing utensil {utensil}")
            }
            EventKind::ShutdownObserved => write!(f, "Philosopher {p} observed shutdown"),
            EventKind::Finished => write!(f, "Philosopher {p} has left the table"),
        }
    }
}

/// Where philosophers send their [`TableEvent`]s.
///
/// A disabled sink drops everything. A closed receiver is not an error; the
/// table keeps running without an audience.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<TableEvent>>,
}

impl EventSink {
    /// A sink plus the receiving end. Events from one philosopher arrive in the
    /// order they were emitted, and events ordered by a utensil hand-off arrive
    /// in hand-off order.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TableEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn emit(&self, philosopher: usize, kind: EventKind) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(TableEvent { philosopher, kind });
        }
    }
}
