//! Example: timing a loop while excluding I/O-like waits.
//!
//! Each iteration does some "work", then pretends to wait on a device. The
//! wait is bracketed by a pause so only the work is measured. The second
//! half of the loop does the same with the drop-driven scopes.
//!
//! To run (set `RUST_LOG=event_timer=trace` to see every cycle):
//! ```bash
//! cargo run --example pause_resume
//! ```

use std::error::Error;
use std::thread;
use std::time::Duration;

use event_timer::{EventTimer, TimerConfig};
use tracing_subscriber::EnvFilter;

fn work(millis: u64) {
    thread::sleep(Duration::from_millis(millis));
}

fn main() -> Result<(), Box<dyn Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("event_timer=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let config = TimerConfig::from_json(r#"{ "label": "frame" }"#)?;
    let mut timer = EventTimer::from_config(&config);

    for _ in 0..3 {
        timer.before();
        work(10);
        timer.pause();
        work(5);
        timer.unpause();
        work(10);
        timer.after();
    }

    for _ in 0..3 {
        let mut scope = timer.scope();
        work(10);
        {
            let _waiting = scope.pause_scope();
            work(5);
        }
        work(10);
    }

    // Deliberate misuse: logged, not fatal.
    timer.after();

    timer.dump();
    println!("{}", serde_json::to_string_pretty(&timer.summary())?);
    Ok(())
}
