#[cfg(feature = "observability")]
use std::sync::Arc;
#[cfg(feature = "observability")]
use std::sync::LazyLock;
#[cfg(feature = "observability")]
use std::sync::atomic::{AtomicU64, Ordering};

use crate::clock::{IntervalClock, MonotonicClock};
#[cfg(feature = "observability")]
use crate::metrics::{CycleStats, MetricsSink, MisuseStats};
use crate::timer::EventTimer;

// This module exists to keep benchmarks small, targeted, and stable.
// - Bench code lives in benches/ and calls these wrappers so every bench
//   measures the same loop bodies.
// - The module is behind the `bench-internal` feature and never built in
//   normal builds.

/// Raw clock cost: one start and one stop capture per iteration.
pub fn clock_capture(iters: usize) -> f64 {
    let mut clock = MonotonicClock::new();
    let mut total = 0.0;
    for _ in 0..iters {
        clock.capture_start();
        clock.capture_stop();
        total += clock.elapsed_seconds();
    }
    total
}

/// Plain before/after cycles.
pub fn before_after(iters: usize) -> u64 {
    let mut timer = EventTimer::with_label("bench");
    for _ in 0..iters {
        timer.before();
        timer.after();
    }
    timer.call_count()
}

/// Cycles with one pause/unpause inside each.
pub fn before_pause_after(iters: usize) -> u64 {
    let mut timer = EventTimer::with_label("bench");
    for _ in 0..iters {
        timer.before();
        timer.pause();
        timer.unpause();
        timer.after();
    }
    timer.call_count()
}

/// Cycles opened and closed through [`EventTimer::scope`].
pub fn scoped_cycle(iters: usize) -> u64 {
    let mut timer = EventTimer::with_label("bench");
    for _ in 0..iters {
        let _scope = timer.scope();
    }
    timer.call_count()
}

/// Calls on a disabled timer, which should cost next to nothing.
pub fn disabled_cycle(iters: usize) -> u64 {
    let mut timer = EventTimer::with_label("bench");
    timer.set_enabled(false);
    for _ in 0..iters {
        timer.before();
        timer.pause();
        timer.unpause();
        timer.after();
    }
    timer.call_count()
}

#[cfg(feature = "observability")]
#[derive(Default)]
struct CountingSink {
    cycle_count: AtomicU64,
    misuse_count: AtomicU64,
}

#[cfg(feature = "observability")]
impl MetricsSink for CountingSink {
    fn on_cycle(&self, _stats: &CycleStats) {
        self.cycle_count.fetch_add(1, Ordering::Relaxed);
    }

    fn on_misuse(&self, _stats: &MisuseStats) {
        self.misuse_count.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(feature = "observability")]
static METRICS_SINK: LazyLock<Arc<CountingSink>> = LazyLock::new(|| {
    let sink = Arc::new(CountingSink::default());
    crate::metrics::set_sink(sink.clone());
    sink
});

/// Before/after cycles with a sink installed, so each cycle is forwarded.
#[cfg(feature = "observability")]
pub fn metrics_record_cycle(iters: usize) -> u64 {
    let _sink = &*METRICS_SINK;
    before_after(iters);
    METRICS_SINK.cycle_count.load(Ordering::Relaxed)
}

/// Orphan `after` calls with a sink installed, so each misuse is forwarded.
#[cfg(feature = "observability")]
pub fn metrics_record_misuse(iters: usize) -> u64 {
    let _sink = &*METRICS_SINK;
    let mut timer = EventTimer::with_label("bench");
    for _ in 0..iters {
        timer.after();
    }
    METRICS_SINK.misuse_count.load(Ordering::Relaxed)
}
