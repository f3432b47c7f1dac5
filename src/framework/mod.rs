//! Table-wide building blocks shared by utensils and philosophers.
//!
//! # Main Components
//!
//! - [`ShutdownCoordinator`] - Broadcast cancellation observed by every wait
//! - [`TableError`] - Construction and lifecycle errors
//!
//! # Testing
//!
//! See [`mock`] for scripted duration sources and the event-stream audit.

pub mod error;
pub mod mock;
pub mod shutdown;

pub use error::*;
pub use shutdown::*;
