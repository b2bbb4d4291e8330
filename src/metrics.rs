//! Forwarding of timer events to a pluggable sink.
//!
//! Timers report each completed cycle and each detected misuse to a
//! process-wide [`MetricsSink`], so consumers can feed them into whatever
//! backend they already run (Prometheus, OpenTelemetry, logs) without this
//! crate depending on one. Nothing is aggregated here; the sink decides.
//!
//! **Note:** This module is only available when the `observability` feature is enabled.
//!
//! ## Usage
//!
//! ```ignore
//! use event_timer::metrics::{CycleStats, MetricsSink};
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct CycleCounter {
//!     cycles: AtomicU64,
//! }
//!
//! impl MetricsSink for CycleCounter {
//!     fn on_cycle(&self, stats: &CycleStats) {
//!         self.cycles.fetch_add(1, Ordering::Relaxed);
//!         eprintln!("{} took {:?}", stats.label, stats.net);
//!     }
//! }
//!
//! event_timer::metrics::set_sink(Arc::new(CycleCounter { cycles: AtomicU64::new(0) }));
//! ```

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::warn;

use crate::error::TimerMisuse;

/// One completed before/after cycle, passed to [`MetricsSink::on_cycle`].
#[derive(Debug, Clone, Serialize)]
pub struct CycleStats {
    /// Label of the timer that closed the cycle
    pub label: String,
    /// Cycle duration with pauses removed
    pub net: Duration,
    /// Time spent paused inside the cycle
    pub paused: Duration,
    /// The timer's call count after this cycle
    pub call_count: u64,
}

/// A detected ordering mistake, passed to [`MetricsSink::on_misuse`].
#[derive(Debug, Clone, Serialize)]
pub struct MisuseStats {
    pub label: String,
    pub misuse: TimerMisuse,
}

/// Consumer of timer events.
///
/// Sinks are called synchronously from inside `EventTimer::after` and the
/// misuse path, so they should return quickly. They must be thread-safe since
/// timers on different threads share the one installed sink.
pub trait MetricsSink: Send + Sync {
    /// Called after each completed cycle.
    fn on_cycle(&self, stats: &CycleStats);

    /// Called for each misuse the timer detects and repairs.
    ///
    /// The default implementation does nothing.
    fn on_misuse(&self, _stats: &MisuseStats) {
        // Default: no-op
    }
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

/// Set the global metrics sink.
///
/// Call this **once at application startup**. The sink cannot be replaced;
/// later calls are ignored with a warning.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!(
            "Metrics sink was already initialized. Ignoring subsequent set_sink call. Set the sink before the first timed event."
        );
    }
}

pub(crate) fn get_sink() -> Option<&'static Arc<dyn MetricsSink>> {
    SINK.get()
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::ZERO)
}

/// Forward a completed cycle. Does nothing until a sink is installed.
pub(crate) fn record_cycle(label: &str, net_seconds: f64, paused_seconds: f64, call_count: u64) {
    let Some(sink) = get_sink() else {
        return;
    };
    sink.on_cycle(&CycleStats {
        label: label.to_string(),
        net: seconds(net_seconds),
        paused: seconds(paused_seconds),
        call_count,
    });
}

/// Forward a misuse report. Does nothing until a sink is installed.
pub(crate) fn record_misuse(label: &str, misuse: TimerMisuse) {
    let Some(sink) = get_sink() else {
        return;
    };
    sink.on_misuse(&MisuseStats {
        label: label.to_string(),
        misuse,
    });
}
