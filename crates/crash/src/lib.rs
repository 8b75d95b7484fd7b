#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `crash` turns a fatal signal into one last diagnostic line. After
//! [`install_crash_handlers`], a SIGSEGV, SIGBUS, SIGFPE, or SIGILL is
//! decoded into a human-readable cause and logged as a fatal message; the
//! logging crate then records the stack and aborts the process.
//!
//! # Design
//!
//! - [`decode`] holds the `(signal, si_code)` table with per-platform code
//!   numbering.
//! - [`CrashReport`] renders the final line.
//! - The handler is a two-state machine (Armed, Terminating). The first fatal
//!   signal wins the transition; a fault raised while reporting aborts
//!   without logging again.
//!
//! # Errors
//!
//! Installation surfaces [`platform::Error`] when `sigaction` fails.
//!
//! # Examples
//!
//! ```
//! use crash::{FatalSignal, reason};
//!
//! assert_eq!(reason(FatalSignal::Bus, 1), "invalid address alignment");
//! ```

pub mod decode;
mod handler;
mod report;

pub use decode::{FatalSignal, SubCode, reason, reason_for_raw, sub_codes};
pub use handler::{CrashState, fault_on_unmapped_read, install_crash_handlers, is_installed, state};
pub use report::CrashReport;
