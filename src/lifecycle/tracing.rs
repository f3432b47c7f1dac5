//! # Observability & Tracing
//!
//! Structured logging for the whole table, via the `tracing` crate.
//!
//! ## Overview
//!
//! Every philosopher runs inside a `philosopher{seat=N}` span, so each log line
//! carries the seat it came from without repeating it as a field.
//!
//! Logs go to **stderr**. Stdout is left to the console event printer, so the
//! two can be piped separately.
//!
//! ## What Gets Traced
//!
//! - **Lifecycle** (`info`): dinner start, seating, shutdown request, each philosopher leaving
//! - **Phases** (`debug`): every transition of the think/eat state machine
//! - **Acquisition failures** (`debug`): busy, timed out, interrupted by shutdown
//! - **Releases** (`trace`): each utensil put down
//! - **Failures** (`error`/`warn`): panicked tasks, leaked holds, signal setup problems
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every phase transition
//! RUST_LOG=debug cargo run -- --seats 3 --quiet
//!
//! # Filter to one module
//! RUST_LOG=dining_table::resource=trace cargo run
//! ```
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO philosopher: Seated seat=2 low=2 high=3
//! DEBUG philosopher: Phase seat=2 phase=thinking
//! DEBUG philosopher: Phase seat=2 phase=awaiting-first
//! DEBUG philosopher: Phase seat=2 phase=awaiting-second
//! DEBUG philosopher: Acquire failed seat=2 utensil=3 reason=Utensil busy
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
