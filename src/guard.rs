//! Drop-driven cycle and pause scopes.
//!
//! An [`EventScope`] opens a cycle when created and closes it when dropped,
//! so the measurement is recorded even if the region exits early through
//! `?`, `return` or a panic.
//!
//! ```rust
//! use event_timer::EventTimer;
//!
//! let mut timer = EventTimer::with_label("load");
//! {
//!     let mut scope = timer.scope();
//!     // ... measured work ...
//!     {
//!         let _paused = scope.pause_scope();
//!         // ... excluded work ...
//!     }
//! } // cycle closed here
//! assert_eq!(timer.call_count(), 1);
//! ```

use crate::clock::IntervalClock;
use crate::timer::{EventTimer, TimerState};

/// Open cycle on an [`EventTimer`], closed on drop.
pub struct EventScope<'a, C: IntervalClock> {
    timer: &'a mut EventTimer<C>,
}

impl<'a, C: IntervalClock> EventScope<'a, C> {
    fn new(timer: &'a mut EventTimer<C>) -> Self {
        timer.before();
        Self { timer }
    }

    /// Pause the cycle until the returned scope is dropped.
    pub fn pause_scope(&mut self) -> PauseScope<'_, C> {
        PauseScope::new(self.timer)
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    pub fn unpause(&mut self) {
        self.timer.unpause();
    }

    pub fn timer(&self) -> &EventTimer<C> {
        &*self.timer
    }
}

impl<C: IntervalClock> Drop for EventScope<'_, C> {
    fn drop(&mut self) {
        self.timer.after();
    }
}

/// Pause on an [`EventTimer`], lifted on drop.
///
/// Only a scope whose own pause took effect unpauses; one opened inside an
/// existing pause leaves that pause in place.
pub struct PauseScope<'a, C: IntervalClock> {
    timer: &'a mut EventTimer<C>,
    owns_pause: bool,
}

impl<'a, C: IntervalClock> PauseScope<'a, C> {
    fn new(timer: &'a mut EventTimer<C>) -> Self {
        let was_running = timer.state() == TimerState::InProgress;
        timer.pause();
        let owns_pause = was_running && timer.is_paused();
        Self { timer, owns_pause }
    }
}

impl<C: IntervalClock> Drop for PauseScope<'_, C> {
    fn drop(&mut self) {
        if self.owns_pause && self.timer.is_paused() {
            self.timer.unpause();
        }
    }
}

impl<C: IntervalClock> EventTimer<C> {
    /// Open a cycle that closes when the returned scope is dropped.
    pub fn scope(&mut self) -> EventScope<'_, C> {
        EventScope::new(self)
    }

    /// Pause the open cycle until the returned scope is dropped.
    pub fn pause_scope(&mut self) -> PauseScope<'_, C> {
        PauseScope::new(self)
    }
}
