//! crates/crash/src/decode.rs
//! Fatal signals and the sub-code table that explains them.
//!
//! Sub-code numbering differs between kernels. Darwin reorders the SIGILL
//! and SIGFPE codes; every other supported platform uses the Linux values.

use std::fmt;

use platform::signal::{SIGBUS, SIGFPE, SIGILL, SIGSEGV};

/// Signals the crash handler intercepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FatalSignal {
    /// Invalid memory reference.
    Segv,
    /// Bus error.
    Bus,
    /// Arithmetic exception.
    Fpe,
    /// Illegal instruction.
    Ill,
}

impl FatalSignal {
    /// Every fatal signal, in table order.
    pub const ALL: [Self; 4] = [Self::Ill, Self::Fpe, Self::Segv, Self::Bus];

    /// Platform signal number, or `None` when the platform lacks the signal.
    #[must_use]
    pub const fn as_raw(self) -> Option<i32> {
        match self {
            Self::Segv => Some(SIGSEGV),
            Self::Bus => SIGBUS,
            Self::Fpe => Some(SIGFPE),
            Self::Ill => Some(SIGILL),
        }
    }

    /// Maps a platform signal number onto a fatal signal.
    #[must_use]
    pub fn from_raw(signo: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.as_raw() == Some(signo))
    }

    /// Delivers this signal to the calling thread.
    ///
    /// With the crash handler installed this does not return.
    pub fn raise(self) -> Result<(), platform::Error> {
        let signo = self.as_raw().ok_or(platform::Error::Unsupported)?;
        platform::signal::raise_signal(signo)
    }

    /// Conventional `SIGxxx` name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Segv => "SIGSEGV",
            Self::Bus => "SIGBUS",
            Self::Fpe => "SIGFPE",
            Self::Ill => "SIGILL",
        }
    }
}

impl fmt::Display for FatalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the decode table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubCode {
    /// Signal the code belongs to.
    pub signal: FatalSignal,
    /// Platform value of `si_code`.
    pub code: i32,
    /// Symbolic name of the code, e.g. `SEGV_MAPERR`.
    pub name: &'static str,
    /// Human-readable cause.
    pub reason: &'static str,
}

const fn row(signal: FatalSignal, code: i32, name: &'static str, reason: &'static str) -> SubCode {
    SubCode {
        signal,
        code,
        name,
        reason,
    }
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "tvos", target_os = "watchos"))]
mod numbering {
    pub(super) const ILL_ILLOPC: i32 = 1;
    pub(super) const ILL_ILLTRP: i32 = 2;
    pub(super) const ILL_PRVOPC: i32 = 3;
    pub(super) const ILL_ILLOPN: i32 = 4;
    pub(super) const ILL_ILLADR: i32 = 5;
    pub(super) const ILL_PRVREG: i32 = 6;
    pub(super) const ILL_COPROC: i32 = 7;
    pub(super) const ILL_BADSTK: i32 = 8;

    pub(super) const FPE_FLTDIV: i32 = 1;
    pub(super) const FPE_FLTOVF: i32 = 2;
    pub(super) const FPE_FLTUND: i32 = 3;
    pub(super) const FPE_FLTRES: i32 = 4;
    pub(super) const FPE_FLTINV: i32 = 5;
    pub(super) const FPE_FLTSUB: i32 = 6;
    pub(super) const FPE_INTDIV: i32 = 7;
    pub(super) const FPE_INTOVF: i32 = 8;
}

#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
mod numbering {
    pub(super) const ILL_ILLOPC: i32 = 1;
    pub(super) const ILL_ILLOPN: i32 = 2;
    pub(super) const ILL_ILLADR: i32 = 3;
    pub(super) const ILL_ILLTRP: i32 = 4;
    pub(super) const ILL_PRVOPC: i32 = 5;
    pub(super) const ILL_PRVREG: i32 = 6;
    pub(super) const ILL_COPROC: i32 = 7;
    pub(super) const ILL_BADSTK: i32 = 8;

    pub(super) const FPE_INTOVF: i32 = 1;
    pub(super) const FPE_INTDIV: i32 = 2;
    pub(super) const FPE_FLTDIV: i32 = 3;
    pub(super) const FPE_FLTOVF: i32 = 4;
    pub(super) const FPE_FLTUND: i32 = 5;
    pub(super) const FPE_FLTRES: i32 = 6;
    pub(super) const FPE_FLTINV: i32 = 7;
    pub(super) const FPE_FLTSUB: i32 = 8;
}

#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "freebsd",
    target_os = "dragonfly"
)))]
mod numbering {
    pub(super) const ILL_ILLOPC: i32 = 1;
    pub(super) const ILL_ILLOPN: i32 = 2;
    pub(super) const ILL_ILLADR: i32 = 3;
    pub(super) const ILL_ILLTRP: i32 = 4;
    pub(super) const ILL_PRVOPC: i32 = 5;
    pub(super) const ILL_PRVREG: i32 = 6;
    pub(super) const ILL_COPROC: i32 = 7;
    pub(super) const ILL_BADSTK: i32 = 8;

    pub(super) const FPE_INTDIV: i32 = 1;
    pub(super) const FPE_INTOVF: i32 = 2;
    pub(super) const FPE_FLTDIV: i32 = 3;
    pub(super) const FPE_FLTOVF: i32 = 4;
    pub(super) const FPE_FLTUND: i32 = 5;
    pub(super) const FPE_FLTRES: i32 = 6;
    pub(super) const FPE_FLTINV: i32 = 7;
    pub(super) const FPE_FLTSUB: i32 = 8;
}

use numbering::{
    FPE_FLTDIV, FPE_FLTINV, FPE_FLTOVF, FPE_FLTRES, FPE_FLTSUB, FPE_FLTUND, FPE_INTDIV, FPE_INTOVF,
    ILL_BADSTK, ILL_COPROC, ILL_ILLADR, ILL_ILLOPC, ILL_ILLOPN, ILL_ILLTRP, ILL_PRVOPC, ILL_PRVREG,
};

const SEGV_MAPERR: i32 = 1;
const SEGV_ACCERR: i32 = 2;
const BUS_ADRALN: i32 = 1;
const BUS_ADRERR: i32 = 2;
const BUS_OBJERR: i32 = 3;

static TABLE: [SubCode; 21] = [
    row(FatalSignal::Ill, ILL_ILLOPC, "ILL_ILLOPC", "illegal opcode"),
    row(FatalSignal::Ill, ILL_ILLOPN, "ILL_ILLOPN", "illegal operand"),
    row(FatalSignal::Ill, ILL_ILLADR, "ILL_ILLADR", "illegal addressing mode"),
    row(FatalSignal::Ill, ILL_ILLTRP, "ILL_ILLTRP", "illegal trap"),
    row(FatalSignal::Ill, ILL_PRVOPC, "ILL_PRVOPC", "privileged opcode"),
    row(FatalSignal::Ill, ILL_PRVREG, "ILL_PRVREG", "privileged register"),
    row(FatalSignal::Ill, ILL_COPROC, "ILL_COPROC", "co-processor error"),
    row(FatalSignal::Ill, ILL_BADSTK, "ILL_BADSTK", "internal stack error"),
    row(FatalSignal::Fpe, FPE_INTDIV, "FPE_INTDIV", "integer divide by zero"),
    row(FatalSignal::Fpe, FPE_INTOVF, "FPE_INTOVF", "integer overflow"),
    row(FatalSignal::Fpe, FPE_FLTDIV, "FPE_FLTDIV", "floating point divide by zero"),
    row(FatalSignal::Fpe, FPE_FLTOVF, "FPE_FLTOVF", "floating point overflow"),
    row(FatalSignal::Fpe, FPE_FLTUND, "FPE_FLTUND", "floating point underflow"),
    row(FatalSignal::Fpe, FPE_FLTRES, "FPE_FLTRES", "floating point inexact result"),
    row(FatalSignal::Fpe, FPE_FLTINV, "FPE_FLTINV", "invalid floating point operation"),
    row(FatalSignal::Fpe, FPE_FLTSUB, "FPE_FLTSUB", "subscript out of range"),
    row(FatalSignal::Segv, SEGV_MAPERR, "SEGV_MAPERR", "address not mapped to object"),
    row(FatalSignal::Segv, SEGV_ACCERR, "SEGV_ACCERR", "invalid permissions for mapped object"),
    row(FatalSignal::Bus, BUS_ADRALN, "BUS_ADRALN", "invalid address alignment"),
    row(FatalSignal::Bus, BUS_ADRERR, "BUS_ADRERR", "non-existent physical address"),
    row(FatalSignal::Bus, BUS_OBJERR, "BUS_OBJERR", "object-specific hardware error"),
];

/// Every known `(signal, sub-code)` pair.
#[must_use]
pub fn sub_codes() -> &'static [SubCode] {
    &TABLE
}

/// Looks up the table row for `signal` and `code`.
#[must_use]
pub fn lookup(signal: FatalSignal, code: i32) -> Option<&'static SubCode> {
    TABLE
        .iter()
        .find(|entry| entry.signal == signal && entry.code == code)
}

/// Explains `code` for `signal`; unknown pairs yield an empty string.
///
/// # Examples
///
/// ```
/// use crash::{FatalSignal, reason};
///
/// assert_eq!(reason(FatalSignal::Segv, 1), "address not mapped to object");
/// assert_eq!(reason(FatalSignal::Segv, 0), "");
/// ```
#[must_use]
pub fn reason(signal: FatalSignal, code: i32) -> &'static str {
    lookup(signal, code).map_or("", |entry| entry.reason)
}

/// Explains a raw `(signo, si_code)` pair as delivered by the kernel.
#[must_use]
pub fn reason_for_raw(signo: i32, code: i32) -> &'static str {
    FatalSignal::from_raw(signo).map_or("", |signal| reason(signal, code))
}
