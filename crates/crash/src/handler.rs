//! crates/crash/src/handler.rs
//! Armed/Terminating state machine behind the fatal-signal handler.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use platform::signal::{SignalInfo, install_fatal_handler};

use crate::report::CrashReport;

/// Lifecycle of the crash handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CrashState {
    /// Waiting for a fatal signal.
    Armed = 0,
    /// A fatal signal is being reported; the process is about to abort.
    Terminating = 1,
}

impl CrashState {
    const fn from_u8(code: u8) -> Self {
        match code {
            0 => Self::Armed,
            _ => Self::Terminating,
        }
    }
}

/// Atomic cell that moves from Armed to Terminating exactly once.
#[derive(Debug)]
pub(crate) struct StateCell {
    state: AtomicU8,
}

impl StateCell {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(CrashState::Armed as u8),
        }
    }

    pub(crate) fn get(&self) -> CrashState {
        CrashState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Returns `true` for the single caller that wins the transition.
    pub(crate) fn begin_terminating(&self) -> bool {
        self.state
            .compare_exchange(
                CrashState::Armed as u8,
                CrashState::Terminating as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

static STATE: StateCell = StateCell::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Current state of the process-wide crash handler.
#[must_use]
pub fn state() -> CrashState {
    STATE.get()
}

/// Returns `true` once [`install_crash_handlers`] has succeeded.
#[must_use]
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

/// Installs the crash handler for SIGSEGV, SIGBUS, SIGFPE, and SIGILL.
///
/// Safe to call repeatedly; only the first successful call does any work.
/// On a fatal signal the handler logs
/// `Terminating due to signal <n> <description>. <reason> (<address>)` as a
/// fatal message, which logs the stack and aborts. A second fatal signal
/// raised while that report is being written aborts immediately.
///
/// # Examples
///
/// ```no_run
/// crash::install_crash_handlers().expect("crash handlers installed");
/// assert!(crash::is_installed());
/// ```
pub fn install_crash_handlers() -> Result<(), platform::Error> {
    if is_installed() {
        return Ok(());
    }
    install_fatal_handler(on_fatal_signal)?;
    INSTALLED.store(true, Ordering::Release);
    Ok(())
}

/// Reads an unmapped address so the kernel delivers a genuine SIGSEGV.
///
/// Unlike [`FatalSignal::raise`](crate::FatalSignal::raise), the resulting
/// report carries a kernel fault code and the faulting address. With the
/// crash handler installed this does not return.
pub fn fault_on_unmapped_read() -> Result<(), platform::Error> {
    platform::signal::read_unmapped_address()
}

fn on_fatal_signal(info: &SignalInfo) {
    if !STATE.begin_terminating() {
        std::process::abort();
    }
    let report = CrashReport::from_info(info);
    logging::fatal(format_args!("{report}"));
}
