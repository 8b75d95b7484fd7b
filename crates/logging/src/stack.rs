//! crates/logging/src/stack.rs
//! Best-effort call-stack snapshots for fatal diagnostics.
//!
//! Capture goes through [`std::backtrace::Backtrace::force_capture`], which
//! ignores `RUST_BACKTRACE`. Frames are recovered from the backtrace's
//! textual form because the standard library does not expose them
//! individually. Capture allocates and resolves symbols, so it is not
//! async-signal-safe; it only runs on the path that is about to abort.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Maximum number of frames reported after a fatal error.
pub const MAX_FRAMES: usize = 24;

/// One resolved stack frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackFrame {
    symbol: String,
    location: Option<String>,
}

impl StackFrame {
    /// Demangled symbol name, or `<unknown>` when unresolved.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// `file:line[:column]` of the frame, when debug info was available.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} at {location}", self.symbol),
            None => f.write_str(&self.symbol),
        }
    }
}

/// Captures up to `limit` frames of the calling thread's stack.
///
/// Returns an empty list when the platform cannot capture backtraces.
/// Frames belonging to this module are omitted.
#[must_use]
pub fn capture_frames(limit: usize) -> Vec<StackFrame> {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    parse_frames(&backtrace.to_string(), limit)
}

fn is_capture_frame(symbol: &str) -> bool {
    symbol.starts_with("logging::stack::") || symbol.contains("std::backtrace")
}

/// Recovers frames from the textual form of a [`Backtrace`].
///
/// Indexed lines (`  3: symbol`) and the unindexed lines of inlined callers
/// each start a frame; an `at file:line` line attaches to the frame above it.
fn parse_frames(text: &str, limit: usize) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    let mut skipping = true;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                frame.location.get_or_insert_with(|| location.to_owned());
            }
            continue;
        }

        let symbol = match line.split_once(": ") {
            Some((index, symbol)) if index.bytes().all(|b| b.is_ascii_digit()) => symbol,
            _ => line,
        };

        if skipping && is_capture_frame(symbol) {
            continue;
        }
        skipping = false;

        if frames.len() == limit {
            break;
        }
        frames.push(StackFrame {
            symbol: symbol.to_owned(),
            location: None,
        });
    }

    frames
}
