#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `platform` isolates every operating-system call the diagnostic subsystem
//! needs behind safe functions. Higher crates stay `#![deny(unsafe_code)]`
//! and reach the kernel only through this crate.
//!
//! # Design
//!
//! - [`signal`] installs the fatal-signal handler with `sigaction`
//!   (`SA_SIGINFO`), snapshots `siginfo_t` into a plain
//!   [`signal::SignalInfo`], and forwards it to a registered callback.
//! - [`thread`] reports the OS identifier of the calling thread.
//! - [`time`] looks up the local UTC offset through `localtime_r`, which
//!   stays usable in multithreaded processes.
//!
//! # Errors
//!
//! Fallible calls return [`Error`]. On platforms without POSIX signals the
//! signal functions return [`Error::Unsupported`].
//!
//! # Examples
//!
//! ```
//! let id = platform::thread::current_thread_id();
//! assert_eq!(id, platform::thread::current_thread_id());
//! ```

mod error;
pub mod signal;
pub mod thread;
pub mod time;

pub use error::Error;
