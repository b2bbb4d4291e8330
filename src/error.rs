use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordering violations detected by [`EventTimer`](crate::EventTimer).
///
/// These are never returned to the caller. The timer logs them and heals its
/// own state; the `Display` text is the logged message.
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimerMisuse {
    #[error("event restarted without being stopped")]
    RestartedWhileInProgress,

    #[error("before called while paused, resuming first")]
    BeforeWhilePaused,

    #[error("event not started")]
    AfterWithoutBefore,

    #[error("after called while paused, resuming first")]
    AfterWhilePaused,

    #[error("pause called without an event in progress")]
    PauseWithoutEvent,

    #[error("pause called while already paused, ignoring")]
    AlreadyPaused,

    #[error("unpause called while not paused, ignoring")]
    UnpauseWithoutPause,
}

impl TimerMisuse {
    /// Whether the misuse is logged at error level rather than warn.
    ///
    /// Only an `after` with nothing to close loses a measurement; everything
    /// else is repaired in place.
    pub fn is_error(&self) -> bool {
        matches!(self, TimerMisuse::AfterWithoutBefore)
    }
}

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("invalid timer configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for TimerError {
    fn from(err: serde_json::Error) -> Self {
        TimerError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        restarted = { TimerMisuse::RestartedWhileInProgress, false },
        before_paused = { TimerMisuse::BeforeWhilePaused, false },
        after_without_before = { TimerMisuse::AfterWithoutBefore, true },
        after_paused = { TimerMisuse::AfterWhilePaused, false },
        pause_idle = { TimerMisuse::PauseWithoutEvent, false },
        double_pause = { TimerMisuse::AlreadyPaused, false },
        stray_unpause = { TimerMisuse::UnpauseWithoutPause, false },
    )]
    fn test_misuse_severity(misuse: TimerMisuse, expected: bool) {
        assert_eq!(misuse.is_error(), expected);
    }

    #[test]
    fn test_misuse_display() {
        assert_eq!(TimerMisuse::AfterWithoutBefore.to_string(), "event not started");
        assert!(
            TimerMisuse::RestartedWhileInProgress
                .to_string()
                .contains("restarted")
        );
    }

    #[test]
    fn test_misuse_serializes_as_variant_name() {
        let json = serde_json::to_string(&TimerMisuse::AlreadyPaused).unwrap();
        assert_eq!(json, "\"AlreadyPaused\"");
    }

    #[test]
    fn test_timer_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TimerError = err.into();
        assert!(matches!(err, TimerError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid timer configuration"));
    }
}
