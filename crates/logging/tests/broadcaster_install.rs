//! Integration tests for the process-wide broadcaster slot.

use std::sync::{Arc, Mutex};

use logging::{
    Broadcaster, BroadcasterAlreadyInstalled, LogLevel, NoBroadcaster, broadcaster, debug_log,
    error_log, install_broadcaster, set_thread_name,
};

#[derive(Default)]
struct Recorder {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl Broadcaster for Recorder {
    fn has_subscriber_at_or_above(&self, level: LogLevel) -> bool {
        level.passes(LogLevel::Error)
    }

    fn deliver(&self, level: LogLevel, line: &str) {
        self.lines
            .lock()
            .expect("recorder lock")
            .push((level, line.to_owned()));
    }
}

/// Verifies the slot accepts one broadcaster and routes global logging to it.
#[test]
fn install_once_and_route_global_logging() {
    let recorder = Arc::new(Recorder::default());

    assert!(!broadcaster().has_subscriber_at_or_above(LogLevel::Error));
    install_broadcaster(Arc::clone(&recorder)).expect("first install succeeds");
    assert_eq!(
        install_broadcaster(NoBroadcaster),
        Err(BroadcasterAlreadyInstalled)
    );

    std::thread::spawn(|| {
        set_thread_name!("remote-test");
        error_log!("shipped {}", "upstream");
        debug_log!("not wanted remotely or locally");
    })
    .join()
    .expect("thread completes");

    let lines = recorder.lines.lock().expect("recorder lock");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, LogLevel::Error);
    assert!(lines[0].1.ends_with(": [remote-test] shipped upstream\n"));
}
