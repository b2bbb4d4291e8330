//! Pausable event timer.
//!
//! An [`EventTimer`] measures a code region through repeated
//! [`before`](EventTimer::before) / [`after`](EventTimer::after) cycles and
//! keeps a running total of their net durations. Sub-regions bracketed by
//! [`pause`](EventTimer::pause) / [`unpause`](EventTimer::unpause) are
//! subtracted from the cycle they occur in.
//!
//! Ordering mistakes never panic. They are logged through [`tracing`] and the
//! timer repairs its own state, so a misplaced call costs at most one
//! measurement.

use std::fmt::{self, Formatter};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::{error, info, trace, warn};

use crate::clock::{IntervalClock, MonotonicClock};
use crate::config::{DEFAULT_LABEL, TimerConfig};
use crate::error::TimerMisuse;

/// Where a timer is in its before/after cycle.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "PascalCase")]
pub enum TimerState {
    /// No cycle open.
    #[default]
    Idle,
    /// Between `before` and `after`.
    InProgress,
    /// Inside a cycle, with the clock excluded until `unpause`.
    Paused,
}

/// Times repeated events, with pause support.
///
/// The timer owns its clock. `C` defaults to [`MonotonicClock`]; tests can
/// plug in a [`ManualClock`](crate::ManualClock) instead.
///
/// A single timer is not meant to be shared between threads; give each thread
/// its own.
///
/// # Example
///
/// ```rust
/// use event_timer::EventTimer;
///
/// let mut timer = EventTimer::with_label("parse");
/// for _ in 0..3 {
///     timer.before();
///     // ... measured work ...
///     timer.pause();
///     // ... excluded work ...
///     timer.unpause();
///     timer.after();
/// }
/// assert_eq!(timer.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EventTimer<C = MonotonicClock> {
    label: String,
    enabled: bool,
    state: TimerState,
    call_count: u64,
    accumulated: f64,
    pending_pause: f64,
    // Offsets are seconds since the last reset.
    cycle_start: f64,
    pause_start: f64,
    clock: C,
}

impl EventTimer<MonotonicClock> {
    /// Create an enabled timer labelled `"noname"`.
    pub fn new() -> Self {
        Self::with_label(DEFAULT_LABEL)
    }

    /// Create an enabled timer with a display label.
    pub fn with_label<T: Into<String>>(label: T) -> Self {
        Self::with_clock(label, MonotonicClock::new())
    }

    /// Create a timer from [`TimerConfig`] options.
    pub fn from_config(config: &TimerConfig) -> Self {
        Self::from_config_with_clock(config, MonotonicClock::new())
    }
}

impl Default for EventTimer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: IntervalClock> EventTimer<C> {
    /// Create an enabled timer driven by `clock`.
    pub fn with_clock<T: Into<String>>(label: T, clock: C) -> Self {
        let mut timer = Self {
            label: label.into(),
            enabled: true,
            state: TimerState::Idle,
            call_count: 0,
            accumulated: 0.0,
            pending_pause: 0.0,
            cycle_start: 0.0,
            pause_start: 0.0,
            clock,
        };
        timer.reset();
        timer
    }

    pub fn from_config_with_clock(config: &TimerConfig, clock: C) -> Self {
        let mut timer = Self::with_clock(config.label.clone(), clock);
        timer.enabled = config.enabled;
        timer
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the timer. Accumulated values are kept either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// True while a cycle is open, paused or not.
    pub fn is_started(&self) -> bool {
        self.state != TimerState::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    /// Clear all counters, close any open cycle and re-arm the clock.
    pub fn reset(&mut self) {
        if !self.enabled {
            return;
        }
        self.state = TimerState::Idle;
        self.call_count = 0;
        self.accumulated = 0.0;
        self.pending_pause = 0.0;
        self.cycle_start = 0.0;
        self.pause_start = 0.0;
        self.clock.capture_start();
    }

    /// Open a measurement cycle.
    pub fn before(&mut self) {
        if !self.enabled {
            return;
        }
        match self.state {
            TimerState::Idle => {}
            TimerState::InProgress => {
                self.report("Before", TimerMisuse::RestartedWhileInProgress);
            }
            TimerState::Paused => {
                self.report("Before", TimerMisuse::BeforeWhilePaused);
                self.resume();
            }
        }
        self.cycle_start = self.elapsed_so_far();
        self.pending_pause = 0.0;
        self.state = TimerState::InProgress;
    }

    /// Close the open cycle and add its net duration to the total.
    pub fn after(&mut self) {
        if !self.enabled {
            return;
        }
        match self.state {
            TimerState::Idle => {
                self.report("After", TimerMisuse::AfterWithoutBefore);
                return;
            }
            TimerState::InProgress => {}
            TimerState::Paused => {
                self.report("After", TimerMisuse::AfterWhilePaused);
                self.resume();
            }
        }
        let cycle_end = self.elapsed_so_far();
        let net = (cycle_end - self.cycle_start) - self.pending_pause;
        self.accumulated += net;
        self.call_count += 1;
        self.state = TimerState::Idle;

        trace!(
            timer = %self.label,
            event = "After",
            net_seconds = net,
            paused_seconds = self.pending_pause,
            calls = self.call_count
        );

        #[cfg(feature = "observability")]
        crate::metrics::record_cycle(&self.label, net, self.pending_pause, self.call_count);
    }

    /// Stop counting time toward the open cycle until [`unpause`](Self::unpause).
    pub fn pause(&mut self) {
        if !self.enabled {
            return;
        }
        match self.state {
            TimerState::Idle => self.report("Pause", TimerMisuse::PauseWithoutEvent),
            // Keeps the first pause start so the whole pause is excluded.
            TimerState::Paused => self.report("Pause", TimerMisuse::AlreadyPaused),
            TimerState::InProgress => {
                self.pause_start = self.elapsed_so_far();
                self.state = TimerState::Paused;
            }
        }
    }

    /// Resume counting time toward the open cycle.
    pub fn unpause(&mut self) {
        if !self.enabled {
            return;
        }
        if self.state == TimerState::Paused {
            self.resume();
        } else {
            self.report("Unpause", TimerMisuse::UnpauseWithoutPause);
        }
    }

    /// Total net seconds over all completed cycles.
    pub fn duration(&self) -> f64 {
        self.accumulated
    }

    /// [`duration`](Self::duration) as a [`Duration`], clamped at zero.
    pub fn total(&self) -> Duration {
        Duration::try_from_secs_f64(self.accumulated.max(0.0)).unwrap_or(Duration::ZERO)
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Mean net seconds per completed cycle; `0.0` before the first one.
    pub fn average_duration(&self) -> f64 {
        average(self.accumulated, self.call_count)
    }

    /// Run `f` inside one before/after cycle.
    pub fn time<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.before();
        let output = f();
        self.after();
        output
    }

    pub fn summary(&self) -> TimerSummary {
        TimerSummary {
            label: self.label.clone(),
            enabled: self.enabled,
            state: self.state,
            call_count: self.call_count,
            total_seconds: self.accumulated,
            average_seconds: self.average_duration(),
        }
    }

    /// Log the human-readable summary at info level.
    pub fn dump(&self) {
        if !self.enabled {
            return;
        }
        info!(timer = %self.label, event = "Dump", "{self}");
    }

    fn elapsed_so_far(&mut self) -> f64 {
        self.clock.capture_stop();
        self.clock.elapsed_seconds()
    }

    fn resume(&mut self) {
        let pause_end = self.elapsed_so_far();
        self.pending_pause += pause_end - self.pause_start;
        self.state = TimerState::InProgress;
    }

    fn report(&self, event: &'static str, misuse: TimerMisuse) {
        if misuse.is_error() {
            error!(timer = %self.label, event, "{misuse}");
        } else {
            warn!(timer = %self.label, event, "{misuse}");
        }

        #[cfg(feature = "observability")]
        crate::metrics::record_misuse(&self.label, misuse);
    }
}

/// Mean of `total` over `calls`, zero when there are no calls.
fn average(total: f64, calls: u64) -> f64 {
    if calls == 0 { 0.0 } else { total / calls as f64 }
}

impl<C> fmt::Display for EventTimer<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let average = average(self.accumulated, self.call_count);
        writeln!(f, "EventTimer[{}]", self.label)?;
        writeln!(f, "  - enabled: {}", self.enabled)?;
        writeln!(f, "  - state: {}", self.state)?;
        writeln!(f, "  - calls: {}", self.call_count)?;
        writeln!(f, "  - total: {:.6}s", self.accumulated)?;
        write!(f, "  - per event: {average:.6}s")
    }
}

/// Point-in-time snapshot of an [`EventTimer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSummary {
    pub label: String,
    pub enabled: bool,
    pub state: TimerState,
    pub call_count: u64,
    /// Net seconds over all completed cycles.
    pub total_seconds: f64,
    /// Net seconds per completed cycle, zero before the first.
    pub average_seconds: f64,
}
