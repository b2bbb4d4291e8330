//! Misuse must always leave a trace in the log, and a disabled timer must
//! stay silent.

use std::time::Duration;

use yare::parameterized;

use super::capture_logs;
use crate::{EventTimer, ManualClock, TimerMisuse};

fn manual_timer(label: &str) -> (EventTimer<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (EventTimer::with_clock(label, clock.clone()), clock)
}

#[test]
fn test_after_without_before_logs_error() {
    let (mut timer, _clock) = manual_timer("orphan");
    let ((), logs) = capture_logs(|| timer.after());
    assert!(logs.contains("ERROR"), "logs: {logs}");
    assert!(logs.contains(&TimerMisuse::AfterWithoutBefore.to_string()));
    assert!(logs.contains("orphan"));
    assert_eq!(timer.call_count(), 0);
    assert_eq!(timer.duration(), 0.0);
}

#[parameterized(
    double_before = { &["before", "before"], TimerMisuse::RestartedWhileInProgress },
    before_while_paused = { &["before", "pause", "before"], TimerMisuse::BeforeWhilePaused },
    after_while_paused = { &["before", "pause", "after"], TimerMisuse::AfterWhilePaused },
    pause_while_idle = { &["pause"], TimerMisuse::PauseWithoutEvent },
    double_pause = { &["before", "pause", "pause"], TimerMisuse::AlreadyPaused },
    stray_unpause = { &["before", "unpause"], TimerMisuse::UnpauseWithoutPause },
)]
fn test_misuse_logs_warning(calls: &[&str], expected: TimerMisuse) {
    let (mut timer, clock) = manual_timer("misused");
    let ((), logs) = capture_logs(|| {
        for call in calls {
            clock.advance(Duration::from_millis(125));
            match *call {
                "before" => timer.before(),
                "after" => timer.after(),
                "pause" => timer.pause(),
                "unpause" => timer.unpause(),
                other => panic!("unknown call {other}"),
            }
        }
    });
    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains(&expected.to_string()), "logs: {logs}");
    assert!(!logs.contains("ERROR"), "logs: {logs}");
}

#[test]
fn test_correct_usage_logs_no_warnings() {
    let (mut timer, clock) = manual_timer("tidy");
    let ((), logs) = capture_logs(|| {
        timer.before();
        clock.advance(Duration::from_millis(125));
        timer.pause();
        timer.unpause();
        timer.after();
    });
    assert!(!logs.contains("WARN"), "logs: {logs}");
    assert!(!logs.contains("ERROR"), "logs: {logs}");
}

#[test]
fn test_disabled_timer_logs_nothing() {
    let (mut timer, _clock) = manual_timer("quiet");
    timer.set_enabled(false);
    let ((), logs) = capture_logs(|| {
        timer.after();
        timer.pause();
        timer.unpause();
        timer.before();
        timer.before();
        timer.dump();
    });
    assert!(logs.is_empty(), "logs: {logs}");
}

#[test]
fn test_dump_logs_summary_at_info() {
    let (mut timer, clock) = manual_timer("dumped");
    timer.before();
    clock.advance(Duration::from_millis(500));
    timer.after();
    let ((), logs) = capture_logs(|| timer.dump());
    assert!(logs.contains("INFO"), "logs: {logs}");
    assert!(logs.contains("EventTimer[dumped]"), "logs: {logs}");
    assert!(logs.contains("calls: 1"), "logs: {logs}");
}

#[test]
fn test_completed_cycle_traces_net_seconds() {
    let (mut timer, clock) = manual_timer("traced");
    let ((), logs) = capture_logs(|| {
        timer.before();
        clock.advance(Duration::from_millis(250));
        timer.after();
    });
    assert!(logs.contains("TRACE"), "logs: {logs}");
    assert!(logs.contains("net_seconds=0.25"), "logs: {logs}");
}
