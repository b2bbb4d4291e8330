//! Monotonic interval clocks.
//!
//! A clock captures two timestamps and reports the seconds between them.
//! [`MonotonicClock`] reads the host's monotonic source through
//! [`std::time::Instant`], so the platform query (`clock_gettime`,
//! `QueryPerformanceCounter`, ...) is chosen at build time. [`ManualClock`]
//! only moves when told to and is meant for deterministic tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Capture-start / capture-stop interval source.
///
/// `elapsed_seconds` is only meaningful after a start and a stop capture, in
/// that order. Implementations must not panic when called early; a missing
/// capture counts as a zero delta.
pub trait IntervalClock {
    /// Record "now" as the start of the interval.
    fn capture_start(&mut self);

    /// Record "now" as the end of the interval.
    fn capture_stop(&mut self);

    /// Seconds between the last start and stop captures.
    fn elapsed_seconds(&self) -> f64;
}

/// Clock backed by [`Instant`]; never affected by wall-clock adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock {
    start: Option<Instant>,
    stop: Option<Instant>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntervalClock for MonotonicClock {
    #[inline]
    fn capture_start(&mut self) {
        self.start = Some(Instant::now());
    }

    #[inline]
    fn capture_stop(&mut self) {
        self.stop = Some(Instant::now());
    }

    fn elapsed_seconds(&self) -> f64 {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => stop.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Clones share the same notion of "now", so a test can keep a handle and
/// call [`ManualClock::advance`] while an [`EventTimer`](crate::EventTimer)
/// owns another clone.
///
/// ```rust
/// use std::time::Duration;
/// use event_timer::{EventTimer, ManualClock};
///
/// let clock = ManualClock::new();
/// let mut timer = EventTimer::with_clock("render", clock.clone());
/// timer.before();
/// clock.advance(Duration::from_millis(250));
/// timer.after();
/// assert_eq!(timer.duration(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_nanos: Arc<AtomicU64>,
    start_nanos: u64,
    stop_nanos: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the shared "now" forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        // Saturate rather than wrap so "now" never runs backwards.
        let _ = self
            .now_nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |now| {
                Some(now.saturating_add(nanos))
            });
    }

    /// Current reading of the shared "now", measured from clock creation.
    pub fn now(&self) -> Duration {
        Duration::from_nanos(self.now_nanos.load(Ordering::Relaxed))
    }
}

impl IntervalClock for ManualClock {
    fn capture_start(&mut self) {
        self.start_nanos = self.now_nanos.load(Ordering::Relaxed);
    }

    fn capture_stop(&mut self) {
        self.stop_nanos = self.now_nanos.load(Ordering::Relaxed);
    }

    fn elapsed_seconds(&self) -> f64 {
        Duration::from_nanos(self.stop_nanos.saturating_sub(self.start_nanos)).as_secs_f64()
    }
}
