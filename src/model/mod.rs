//! Data that flows out of the table: events, live stats, final reports.

pub mod event;
pub mod stats;

pub use event::*;
pub use stats::*;
