//! crates/platform/src/signal/stub.rs
//! Fallback for platforms without POSIX signals.

use super::{FatalCallback, register_callback};
use crate::Error;

/// Segmentation violation (C runtime numbering).
pub const SIGSEGV: i32 = 11;
/// Bus errors do not exist on this platform.
pub const SIGBUS: Option<i32> = None;
/// Arithmetic exception (C runtime numbering).
pub const SIGFPE: i32 = 8;
/// Illegal instruction (C runtime numbering).
pub const SIGILL: i32 = 4;

/// Address [`read_unmapped_address`] would read on Unix.
pub const UNMAPPED_ADDRESS: usize = 0x40;

/// Signals routed to the fatal callback.
pub const FATAL_SIGNALS: &[i32] = &[SIGSEGV, SIGFPE, SIGILL];

/// Records `callback` but cannot route signals to it.
pub fn install_fatal_handler(callback: FatalCallback) -> Result<(), Error> {
    register_callback(callback);
    Err(Error::Unsupported)
}

/// Returns a generic description of `signo`.
#[must_use]
pub fn signal_description(signo: i32) -> String {
    match signo {
        SIGSEGV => "Segmentation fault".to_owned(),
        SIGFPE => "Floating point exception".to_owned(),
        SIGILL => "Illegal instruction".to_owned(),
        _ => format!("Unknown signal {signo}"),
    }
}

/// Signal delivery is not available on this platform.
pub fn raise_signal(_signo: i32) -> Result<(), Error> {
    Err(Error::Unsupported)
}

/// Faults are not intercepted on this platform, so none is provoked.
pub fn read_unmapped_address() -> Result<(), Error> {
    Err(Error::Unsupported)
}
