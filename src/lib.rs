// src/lib.rs
//! Pausable event timing.
//!
//! [`EventTimer`] accumulates the net duration of repeated before/after
//! cycles around a code region, excluding paused sub-regions. It sits on an
//! [`IntervalClock`], by default the host's monotonic clock.
pub use clock::{IntervalClock, ManualClock, MonotonicClock};
pub use config::{DEFAULT_LABEL, TimerConfig};
pub use error::{TimerError, TimerMisuse};
pub use guard::{EventScope, PauseScope};
pub use timer::{EventTimer, TimerState, TimerSummary};

mod clock;
mod config;
mod error;
mod guard;
mod timer;

#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "bench-internal")]
pub mod bench_helpers;

#[cfg(test)]
mod tests;
