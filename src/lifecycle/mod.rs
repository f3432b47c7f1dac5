//! # Dinner Lifecycle & Orchestration
//!
//! Philosophers are simple on their own. Seating them, stopping them, and
//! making sure the table is clean afterwards is where the care goes.
//!
//! **Key Responsibilities:**
//! 1. **Seating** - Validate every seat, then spawn one task per philosopher
//! 2. **Context Injection** - Hand every philosopher the same [`TableContext`](crate::philosopher_actor::TableContext)
//! 3. **Signals** - Turn SIGINT/SIGTERM into a single shutdown request
//! 4. **Graceful Shutdown** - Request shutdown, join everyone, then clear the table
//! 5. **Observability Setup** - Initialize tracing
//!
//! ## Graceful Shutdown
//!
//! 1. **Request** - [`ShutdownCoordinator::request_shutdown`](crate::framework::ShutdownCoordinator::request_shutdown) flips the flag and wakes every wait
//! 2. **Philosophers notice** - thinking, eating and blocked acquisitions all return
//! 3. **Philosophers put down** - held utensils are released in reverse order
//! 4. **Join** - [`DiningSystem::join`] awaits every task
//! 5. **Check** - every utensil must report free before the pool is dropped
//!
//! ```rust,ignore
//! let system = DiningSystem::from_config(&config, events)?;
//! tokio::spawn(shutdown_on_signal(system.shutdown_handle()));
//! let summary = system.join().await?;
//! ```

pub mod dining_system;
pub mod signals;
pub mod tracing;

pub use dining_system::*;
pub use signals::*;
pub use self::tracing::*;
