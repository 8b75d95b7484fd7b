//! Fatal-signal interception.
//!
//! # Safety
//!
//! This module installs raw `sigaction` handlers and reads the kernel-provided
//! `siginfo_t`. The handler itself only copies plain data out of `siginfo_t`
//! and forwards it to the registered callback; whatever the callback does is
//! its own responsibility.
#![allow(unsafe_code)]
//!
//! Handlers are installed for SIGSEGV, SIGBUS (where the platform defines it),
//! SIGFPE, and SIGILL. They run on the faulting thread's own stack, so a
//! callback may format text and capture a backtrace.
//!
//! # Platform Support
//!
//! - **Unix**: full support via `sigaction` with `SA_SIGINFO`.
//! - **Other**: installation reports [`Error::Unsupported`](crate::Error::Unsupported).

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{
    FATAL_SIGNALS, SIGBUS, SIGFPE, SIGILL, SIGSEGV, UNMAPPED_ADDRESS, install_fatal_handler,
    raise_signal, read_unmapped_address, signal_description,
};

#[cfg(not(unix))]
mod stub;
#[cfg(not(unix))]
pub use stub::{
    FATAL_SIGNALS, SIGBUS, SIGFPE, SIGILL, SIGSEGV, UNMAPPED_ADDRESS, install_fatal_handler,
    raise_signal, read_unmapped_address, signal_description,
};

use std::sync::OnceLock;

/// Plain-data snapshot of a delivered signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalInfo {
    /// Signal number.
    pub signo: i32,
    /// Signal-specific sub-code (`si_code`).
    pub code: i32,
    /// Faulting address, when the kernel reported one.
    pub address: Option<usize>,
}

impl SignalInfo {
    /// Builds a snapshot without a faulting address.
    #[must_use]
    pub const fn new(signo: i32, code: i32) -> Self {
        Self {
            signo,
            code,
            address: None,
        }
    }

    /// Attaches a faulting address.
    #[must_use]
    pub const fn with_address(mut self, address: usize) -> Self {
        self.address = Some(address);
        self
    }
}

/// Callback invoked from inside the fatal-signal handler.
///
/// The callback is expected not to return. If it does, the handler aborts the
/// process so the faulting instruction is never re-executed.
pub type FatalCallback = fn(&SignalInfo);

static CALLBACK: OnceLock<FatalCallback> = OnceLock::new();

/// Records `callback`. The first registration wins.
fn register_callback(callback: FatalCallback) {
    let _ = CALLBACK.set(callback);
}

#[cfg_attr(not(unix), allow(dead_code))]
fn deliver(info: &SignalInfo) -> ! {
    if let Some(callback) = CALLBACK.get() {
        callback(info);
    }
    std::process::abort()
}
