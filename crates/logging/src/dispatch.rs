//! crates/logging/src/dispatch.rs
//! Line rendering and dual delivery to the local sink and the broadcaster.

use std::fmt::{self, Write as _};

use logging_sink::{LINE_CAPACITY, LineBuffer, LocalSink, StderrSink};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::broadcaster::{Broadcaster, broadcaster};
use crate::gate::{LevelGate, global_gate};
use crate::levels::LogLevel;
use crate::stack::{MAX_FRAMES, capture_frames};
use crate::thread_name::with_current_thread_name;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Outcome of a single [`Logger::emit`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Emission {
    /// The line was written to the local sink.
    pub local: bool,
    /// The line was handed to the broadcaster.
    pub remote: bool,
    /// The call was made at [`LogLevel::Fatal`].
    pub fatal: bool,
}

impl Emission {
    /// Returns `true` when the message was formatted at all.
    #[must_use]
    pub const fn was_formatted(&self) -> bool {
        self.local || self.remote
    }
}

/// Dispatcher bound to a gate, a local sink, and a broadcaster.
///
/// [`Logger::global`] wires the process-wide gate, standard error, and the
/// installed broadcaster; tests build their own from local parts.
///
/// # Examples
///
/// ```
/// use logging::{LevelGate, LogLevel, Logger, NoBroadcaster};
/// use logging_sink::CaptureSink;
///
/// let gate = LevelGate::new(LogLevel::Error);
/// let sink = CaptureSink::new();
/// let logger = Logger::new(&gate, &sink, &NoBroadcaster);
///
/// logger.emit(LogLevel::Error, format_args!("disk {} failed", 2));
/// logger.emit(LogLevel::Debug, format_args!("not shown"));
///
/// let lines = sink.lines();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].ends_with("] disk 2 failed"));
/// ```
#[derive(Clone, Copy)]
pub struct Logger<'a> {
    gate: &'a LevelGate,
    sink: &'a dyn LocalSink,
    broadcaster: &'a dyn Broadcaster,
}

impl<'a> Logger<'a> {
    /// Builds a dispatcher over the given parts.
    #[must_use]
    pub const fn new(
        gate: &'a LevelGate,
        sink: &'a dyn LocalSink,
        broadcaster: &'a dyn Broadcaster,
    ) -> Self {
        Self {
            gate,
            sink,
            broadcaster,
        }
    }

    /// Returns `true` when a message at `level` would reach any destination.
    #[must_use]
    pub fn wants(&self, level: LogLevel) -> bool {
        self.gate.should_emit(level) || self.broadcaster.has_subscriber_at_or_above(level)
    }

    /// Formats and delivers one message without terminating the process.
    ///
    /// Nothing is formatted when neither the gate nor the broadcaster wants
    /// `level`. Fatal messages are rendered and delivered as
    /// [`LogLevel::Error`]; the returned [`Emission`] records that the call
    /// was fatal so the caller can finish the job.
    pub fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Emission {
        let local = self.gate.should_emit(level);
        let remote = self.broadcaster.has_subscriber_at_or_above(level);
        if !local && !remote {
            return Emission::default();
        }

        let fatal = level == LogLevel::Fatal;
        let delivered_level = if fatal { LogLevel::Error } else { level };

        let mut line = LineBuffer::<LINE_CAPACITY>::new();
        render_line(&mut line, local_now(), args);

        if local {
            self.sink.write_line(line.as_bytes());
        }
        if remote {
            self.broadcaster.deliver(delivered_level, line.as_str());
        }

        Emission {
            local,
            remote,
            fatal,
        }
    }

    /// Formats and delivers one message; a fatal message never returns.
    ///
    /// After a fatal message the stack is captured and logged, then the
    /// process aborts.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.emit(level, args).fatal {
            self.log_stack_trace();
            std::process::abort();
        }
    }

    /// Logs the calling thread's stack at [`LogLevel::Error`].
    ///
    /// Emits `Fatal error detected at:` followed by one line per frame, up
    /// to [`MAX_FRAMES`]. Does nothing when no frames can be captured.
    pub fn log_stack_trace(&self) {
        if !self.wants(LogLevel::Error) {
            return;
        }
        let frames = capture_frames(MAX_FRAMES);
        if frames.is_empty() {
            return;
        }
        self.emit(LogLevel::Error, format_args!("Fatal error detected at:"));
        for (index, frame) in frames.iter().enumerate() {
            self.emit(LogLevel::Error, format_args!("#{index} {frame}"));
        }
    }
}

impl Logger<'static> {
    /// Dispatcher over the process-wide gate, standard error, and the
    /// installed broadcaster.
    #[must_use]
    pub fn global() -> Self {
        static STDERR: StderrSink = StderrSink;
        Self::new(global_gate(), &STDERR, broadcaster())
    }
}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.gate.level())
            .finish_non_exhaustive()
    }
}

/// Logs through the process-wide dispatcher.
///
/// A [`LogLevel::Fatal`] call logs the message and the stack, then aborts.
/// Prefer the [`log!`](crate::log!) family of macros.
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) {
    Logger::global().log(level, args);
}

/// Logs `args` as a fatal message, captures the stack, and aborts.
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    log(LogLevel::Fatal, args);
    std::process::abort()
}

fn local_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    platform::time::local_utc_offset(now.unix_timestamp())
        .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
        .map_or(now, |offset| now.to_offset(offset))
}

/// Renders `<timestamp>,<millis>: [<thread label>] <message>` and terminates
/// the line.
fn render_line<const N: usize>(
    line: &mut LineBuffer<N>,
    at: OffsetDateTime,
    args: fmt::Arguments<'_>,
) {
    let mut stamp = [0_u8; 32];
    let written = {
        let mut cursor: &mut [u8] = &mut stamp;
        at.format_into(&mut cursor, TIMESTAMP_FORMAT).unwrap_or(0)
    };
    line.push_str(std::str::from_utf8(&stamp[..written]).unwrap_or_default());

    // Formatting errors only signal truncation, which `finish_line` repairs.
    let _ = write!(line, ",{:03}: [", at.millisecond());
    with_current_thread_name(|label| line.push_str(label));
    line.push_str("] ");
    let _ = line.write_fmt(args);

    line.finish_line();
}
