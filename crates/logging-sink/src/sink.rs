//! crates/logging-sink/src/sink.rs
//! Local destinations for rendered diagnostic lines.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Destination for lines that pass the local level gate.
///
/// Implementations must not fail loudly: the dispatcher hands over a fully
/// rendered line and never inspects the outcome. Delivery is best-effort so
/// that logging cannot raise a secondary fault while reporting a primary one.
pub trait LocalSink: Send + Sync {
    /// Writes one rendered line, including its trailing newline.
    fn write_line(&self, line: &[u8]);
}

impl<S> LocalSink for &S
where
    S: LocalSink + ?Sized,
{
    fn write_line(&self, line: &[u8]) {
        (**self).write_line(line);
    }
}

/// Sink that writes each line to the process's standard error stream.
///
/// Standard error is unbuffered, so every line reaches the file descriptor
/// with a single `write_all` before the call returns. Write failures (closed
/// descriptor, full pipe) are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl LocalSink for StderrSink {
    fn write_line(&self, line: &[u8]) {
        let _ = io::stderr().write_all(line);
    }
}

/// In-memory sink that records every line it receives.
///
/// Used by tests and by embedders that want to inspect local output without
/// touching standard error.
///
/// # Examples
///
/// ```
/// use logging_sink::{CaptureSink, LocalSink};
///
/// let sink = CaptureSink::new();
/// sink.write_line(b"first\n");
/// sink.write_line(b"second\n");
///
/// assert_eq!(sink.lines(), vec!["first".to_string(), "second".to_string()]);
/// assert_eq!(sink.write_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CaptureSink {
    state: Mutex<CaptureState>,
}

#[derive(Debug, Default)]
struct CaptureState {
    bytes: Vec<u8>,
    writes: usize,
}

impl CaptureSink {
    /// Creates an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CaptureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of every byte written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.state().bytes.clone()
    }

    /// Returns the captured output split into lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.state().bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Number of [`write_line`](LocalSink::write_line) calls received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Removes and returns everything captured so far.
    pub fn take(&self) -> Vec<u8> {
        let mut state = self.state();
        state.writes = 0;
        std::mem::take(&mut state.bytes)
    }
}

impl LocalSink for CaptureSink {
    fn write_line(&self, line: &[u8]) {
        let mut state = self.state();
        state.bytes.extend_from_slice(line);
        state.writes += 1;
    }
}
