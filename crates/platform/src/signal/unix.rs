//! crates/platform/src/signal/unix.rs
//! Unix fatal-signal handling.
//!
//! The handler copies `signo`, `si_code`, and the faulting address out of the
//! kernel-provided `siginfo_t` and hands them to the registered callback.

use std::ffi::CStr;

use libc::{c_int, c_void};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use super::{FatalCallback, SignalInfo, deliver, register_callback};
use crate::Error;

/// Segmentation violation.
pub const SIGSEGV: i32 = libc::SIGSEGV;
/// Bus error.
pub const SIGBUS: Option<i32> = Some(libc::SIGBUS);
/// Arithmetic exception.
pub const SIGFPE: i32 = libc::SIGFPE;
/// Illegal instruction.
pub const SIGILL: i32 = libc::SIGILL;

/// Signals routed to the fatal callback.
pub const FATAL_SIGNALS: &[i32] = &[libc::SIGSEGV, libc::SIGBUS, libc::SIGFPE, libc::SIGILL];

/// Address read by [`read_unmapped_address`]. The first page is never mapped.
pub const UNMAPPED_ADDRESS: usize = 0x40;

/// The handler runs on the faulting thread's own stack. The runtime's
/// per-thread alternate stack is too small for formatting and a backtrace.
const HANDLER_FLAGS: SaFlags = SaFlags::SA_SIGINFO;

/// Kernel-generated fault codes are small positive values; user-sent signals
/// use zero, negative codes, or (on Darwin) values from 0x10001 upwards.
const fn is_fault_code(code: i32) -> bool {
    code > 0 && code < 0x1_0000
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn fault_address(info: &libc::siginfo_t) -> usize {
    // SAFETY: only called for kernel-generated fault codes, where the union
    // member holding the address is the active one.
    let address = unsafe { info.si_addr() };
    address.addr()
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn fault_address(info: &libc::siginfo_t) -> usize {
    info.si_addr.addr()
}

fn snapshot(signo: c_int, info: *const libc::siginfo_t) -> SignalInfo {
    // SAFETY: the kernel passes either null or a valid siginfo_t for
    // SA_SIGINFO handlers, valid for the duration of the handler.
    let Some(info) = (unsafe { info.as_ref() }) else {
        return SignalInfo::new(signo, 0);
    };

    let snapshot = SignalInfo::new(signo, info.si_code);
    if !is_fault_code(info.si_code) {
        return snapshot;
    }
    match fault_address(info) {
        0 => snapshot,
        address => snapshot.with_address(address),
    }
}

extern "C" fn handle_fatal_signal(signo: c_int, info: *mut libc::siginfo_t, _context: *mut c_void) {
    deliver(&snapshot(signo, info));
}

/// Installs the fatal-signal handler for every signal in [`FATAL_SIGNALS`].
///
/// The first `callback` ever registered is the one invoked; later calls only
/// re-assert the `sigaction` registration.
///
/// # Examples
///
/// ```no_run
/// use platform::signal::{SignalInfo, install_fatal_handler};
///
/// fn on_fatal(info: &SignalInfo) {
///     eprintln!("fatal signal {}", info.signo);
///     std::process::abort();
/// }
///
/// install_fatal_handler(on_fatal).expect("handlers installed");
/// ```
pub fn install_fatal_handler(callback: FatalCallback) -> Result<(), Error> {
    register_callback(callback);

    let action = SigAction::new(
        SigHandler::SigAction(handle_fatal_signal),
        HANDLER_FLAGS,
        SigSet::empty(),
    );

    for &signo in FATAL_SIGNALS {
        let install_error = |source: std::io::Error| Error::InstallHandler {
            signal: signo,
            source,
        };
        let target = Signal::try_from(signo).map_err(|errno| install_error(errno.into()))?;
        // SAFETY: the handler only reads plain data from siginfo_t before
        // calling the registered callback, and never returns normally.
        let installed = unsafe { signal::sigaction(target, &action) };
        installed.map_err(|errno| install_error(errno.into()))?;
    }

    Ok(())
}

/// Returns the platform's description of `signo` (as `strsignal(3)` reports it).
#[must_use]
pub fn signal_description(signo: i32) -> String {
    // SAFETY: strsignal returns null or a pointer to a NUL-terminated string
    // that stays valid until the next strsignal call on this thread; it is
    // copied out immediately.
    let description = unsafe { libc::strsignal(signo) };
    if description.is_null() {
        return format!("Unknown signal {signo}");
    }
    // SAFETY: non-null strsignal results are NUL-terminated.
    let description = unsafe { CStr::from_ptr(description) };
    description.to_string_lossy().into_owned()
}

/// Delivers `signo` to the calling thread.
pub fn raise_signal(signo: i32) -> Result<(), Error> {
    let raise_error = |source: std::io::Error| Error::Raise {
        signal: signo,
        source,
    };
    let target = Signal::try_from(signo).map_err(|errno| raise_error(errno.into()))?;
    signal::raise(target).map_err(|errno| raise_error(errno.into()))
}

/// Reads one byte from [`UNMAPPED_ADDRESS`], raising a genuine SIGSEGV.
///
/// The kernel fills in a fault code and the address, unlike
/// [`raise_signal`]. Returns only if the fault was somehow survived.
pub fn read_unmapped_address() -> Result<(), Error> {
    let target = std::ptr::without_provenance::<u8>(UNMAPPED_ADDRESS);
    // SAFETY: the read never completes. The first page is unmapped, so the
    // kernel stops the thread and delivers SIGSEGV before any value exists.
    let _ = unsafe { std::ptr::read_volatile(target) };
    Ok(())
}
