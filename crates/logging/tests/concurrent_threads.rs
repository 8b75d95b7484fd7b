//! Integration tests for concurrent logging from labelled threads.
//!
//! Every thread renders into its own stack buffer and writes whole lines to
//! one shared sink, so no line may be interleaved or mislabelled.

use std::sync::Arc;

use logging::{LevelGate, LogLevel, Logger, NoBroadcaster, get_current_thread_name, set_thread_name};
use logging_sink::CaptureSink;

const THREADS: usize = 8;
const LINES_PER_THREAD: usize = 50;

// ============================================================================
// Label Isolation Tests
// ============================================================================

/// Verifies each line carries the label of the thread that logged it.
#[test]
fn lines_keep_their_thread_labels() {
    let sink = Arc::new(CaptureSink::new());
    let gate = Arc::new(LevelGate::new(LogLevel::Error));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let sink = Arc::clone(&sink);
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                set_thread_name!("worker-{worker}");
                let logger = Logger::new(gate.as_ref(), sink.as_ref(), &NoBroadcaster);
                for sequence in 0..LINES_PER_THREAD {
                    logger.emit(LogLevel::Error, format_args!("worker {worker} line {sequence}"));
                    logger.emit(LogLevel::Debug, format_args!("suppressed"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker completes");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), THREADS * LINES_PER_THREAD);
    assert_eq!(sink.write_count(), THREADS * LINES_PER_THREAD);

    for line in &lines {
        let (_, rest) = line.split_once(": [worker-").expect("labelled line");
        let (label, message) = rest.split_once("] ").expect("label terminator");
        assert!(message.starts_with(&format!("worker {label} line ")));
    }

    for worker in 0..THREADS {
        let count = lines
            .iter()
            .filter(|line| line.contains(&format!("[worker-{worker}] ")))
            .count();
        assert_eq!(count, LINES_PER_THREAD);
    }
}

/// Verifies unnamed threads get distinct default labels.
#[test]
fn default_labels_are_distinct() {
    let (tx, rx) = std::sync::mpsc::channel();
    let barrier = Arc::new(std::sync::Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let tx = tx.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                tx.send(get_current_thread_name()).expect("send label");
                barrier.wait();
            })
        })
        .collect();
    drop(tx);
    for handle in handles {
        handle.join().expect("thread completes");
    }

    let mut labels: Vec<String> = rx.iter().collect();
    assert!(labels.iter().all(|label| label.parse::<u64>().is_ok()));
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), THREADS);
}
