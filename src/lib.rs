//! # Dining Table
//!
//! > **Deadlock-free sharing of exclusive utensils among concurrent philosophers.**
//!
//! N philosophers sit in a ring with one utensil between each pair of neighbours.
//! Each one loops think → pick up two utensils → eat → put them down, until the
//! table is told to stop. This crate implements that loop on Tokio so that it
//! cannot deadlock and so that shutdown never strands or double-releases a utensil.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Lock Ordering
//! Every philosopher picks up the **lower-indexed** utensil of its pair first.
//! With one global order there is no cycle of "waiting for the next utensil", so
//! there is no deadlock. See [`ResourcePool::pair_for`](resource::ResourcePool::pair_for).
//!
//! ### Block for One, Probe for the Other
//! The first utensil is a blocking wait; the second is a non-blocking probe (or a
//! bounded wait). A philosopher that cannot get the second puts the first down at
//! once instead of sitting on it.
//!
//! ### Guards, Not Unlock Calls
//! Acquiring a utensil returns a [`ResourceGuard`](resource::ResourceGuard). Dropping
//! it is the only way to release, so every exit path (including a cancelled task)
//! releases exactly once.
//!
//! ### One Shutdown Signal
//! A [`ShutdownCoordinator`](framework::ShutdownCoordinator) is injected into every
//! utensil and philosopher. Thinking, eating and blocked acquisitions all select on
//! it, so one request wakes everybody.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Primitives ([`framework`], [`resource`])
//! - **Role**: Shutdown broadcast, errors, utensils with three acquisition modes, the ordered pool.
//! - **Key items**: [`ShutdownCoordinator`](framework::ShutdownCoordinator), [`Resource`](resource::Resource), [`ResourcePool`](resource::ResourcePool).
//!
//! ### 2. The Actor ([`philosopher_actor`])
//! - **Role**: The think/eat state machine and the capabilities it draws on.
//! - **Key items**: [`Philosopher`](philosopher_actor::Philosopher), [`TableContext`](philosopher_actor::TableContext), [`DurationSource`](philosopher_actor::DurationSource).
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Role**: Seats everyone, maps signals to shutdown, joins everyone, checks the table is clean.
//! - **Key items**: [`DiningSystem`](lifecycle::DiningSystem), [`shutdown_on_signal`](lifecycle::shutdown_on_signal).
//!
//! ### 4. The Outputs ([`model`], [`config`])
//! - **Role**: Event stream, live counters, reports; TOML configuration.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Classic five-seat table, 1-5 s think/eat, until Ctrl-C
//! RUST_LOG=info cargo run
//!
//! # Fast table that stops itself
//! cargo run -- --seats 3 --think-max-ms 50 --eat-max-ms 50 --think-min-ms 5 --eat-min-ms 5 --run-for-ms 2000
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod philosopher_actor;
pub mod resource;
