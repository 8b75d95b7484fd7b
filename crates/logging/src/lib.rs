#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the process-wide diagnostic front end: a severity gate,
//! per-thread labels, a line formatter, and a dispatcher that delivers each
//! line to standard error and to an optional remote [`Broadcaster`].
//!
//! # Design
//!
//! - [`LevelGate`] holds the threshold in an `AtomicI32`; [`log_level`],
//!   [`set_log_level`], and [`should_emit`] operate on the process-wide gate.
//! - Thread labels live in a `thread_local!` slot. The first lookup assigns
//!   the platform thread id; [`set_thread_name!`] replaces it.
//! - [`Logger`] renders `YYYY-MM-DDTHH:MM:SS,mmm: [label] message\n` into a
//!   fixed 4096-byte [`LineBuffer`](logging_sink::LineBuffer) on the stack
//!   and hands the bytes to the local sink and the broadcaster.
//! - A [`LogLevel::Fatal`] message is delivered as an error, followed by a
//!   stack trace, and then the process aborts.
//!
//! # Invariants
//!
//! - Nothing is formatted unless the gate or a remote subscriber wants the
//!   level.
//! - Every delivered line ends in exactly one newline added by the
//!   formatter, fits in 4096 bytes including its NUL terminator, and is cut
//!   on a UTF-8 boundary when the message is too long.
//! - The formatting path takes no lock.
//!
//! # Errors
//!
//! Delivery never fails from the caller's point of view: sink write errors
//! are dropped. Setup reports [`ParseLevelError`] for bad level names and
//! [`BroadcasterAlreadyInstalled`] when a second broadcaster is offered.
//!
//! # Examples
//!
//! ```no_run
//! use logging::{LogConfig, LogLevel, debug_log, error_log, set_thread_name};
//!
//! logging::init(LogConfig::from_env().unwrap_or_default());
//! set_thread_name!("loader-{}", 1);
//!
//! error_log!("failed to open {}", "/var/db/index");
//! debug_log!("suppressed unless the threshold is debug");
//! logging::set_log_level(LogLevel::Debug);
//! ```
//!
//! # See also
//!
//! - `logging_sink` for the line buffer and local sinks.
//! - `crash` for the fatal-signal handler that reports through this crate.

mod broadcaster;
mod config;
mod dispatch;
mod error;
mod gate;
mod levels;
mod macros;
pub mod stack;
mod thread_name;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use broadcaster::{Broadcaster, NoBroadcaster, broadcaster, install_broadcaster};
pub use config::{LEVEL_ENV_VAR, LogConfig, init};
pub use dispatch::{Emission, Logger, fatal, log};
pub use error::{BroadcasterAlreadyInstalled, ParseLevelError};
pub use gate::{LevelGate, global_gate, log_level, set_log_level, should_emit};
pub use levels::LogLevel;
pub use thread_name::{get_current_thread_name, set_current_thread_name, with_current_thread_name};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{FaultlineLayer, init_tracing, init_tracing_with_filter};
