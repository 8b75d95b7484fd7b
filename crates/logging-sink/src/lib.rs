#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output-side primitives used by the faultline
//! dispatcher: a fixed-capacity [`LineBuffer`] that each log call renders into,
//! and the [`LocalSink`] trait describing where lines that pass the local level
//! gate are written.
//!
//! # Design
//!
//! [`LineBuffer`] lives on the caller's stack, so concurrent log calls never
//! share rendering state. It implements [`std::fmt::Write`], letting the
//! dispatcher format timestamps, thread labels, and user messages directly into
//! it without intermediate allocations. [`StderrSink`] is the production local
//! sink; [`CaptureSink`] records lines in memory for tests.
//!
//! # Invariants
//!
//! - A [`LineBuffer`] never holds more than its capacity minus one content
//!   bytes; the byte after the contents is always `0`.
//! - After [`LineBuffer::finish_line`] the contents end in a newline, even when
//!   the message was truncated.
//! - Truncation happens on UTF-8 character boundaries, so the rendered line is
//!   always valid text.
//!
//! # Errors
//!
//! Nothing in this crate reports errors to callers. Truncation is recorded on
//! the buffer and write failures in [`StderrSink`] are discarded.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{CaptureSink, LineBuffer, LocalSink};
//! use std::fmt::Write as _;
//!
//! let sink = CaptureSink::new();
//! let mut line = LineBuffer::<64>::new();
//! let _ = write!(line, "[{}] {}", "main", "ready");
//! line.finish_line();
//! sink.write_line(line.as_bytes());
//!
//! assert_eq!(sink.lines(), vec!["[main] ready".to_string()]);
//! ```
//!
//! # See also
//!
//! - `logging` crate for the level gate, thread labels, and dispatcher.

mod line_buffer;
mod sink;

pub use line_buffer::{LINE_CAPACITY, LineBuffer};
pub use sink::{CaptureSink, LocalSink, StderrSink};
