//! crates/crash/src/report.rs
//! The single diagnostic line produced for a fatal signal.

use std::fmt;

use platform::signal::{SignalInfo, signal_description};

use crate::decode::reason_for_raw;

/// Decoded fatal-signal context.
///
/// Renders as `Terminating due to signal <n> <description>. <reason> (<address>)`.
/// The address is printed in hex and is `0x0` when the kernel reported none.
///
/// # Examples
///
/// ```
/// use crash::CrashReport;
///
/// let report = CrashReport::new(11, "Segmentation fault", 1, Some(0x10));
/// assert_eq!(
///     report.to_string(),
///     "Terminating due to signal 11 Segmentation fault. address not mapped to object (0x10)"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrashReport {
    signo: i32,
    description: String,
    reason: &'static str,
    address: Option<usize>,
}

impl CrashReport {
    /// Builds a report from explicit parts.
    #[must_use]
    pub fn new(signo: i32, description: impl Into<String>, code: i32, address: Option<usize>) -> Self {
        Self {
            signo,
            description: description.into(),
            reason: reason_for_raw(signo, code),
            address,
        }
    }

    /// Builds a report from a kernel signal snapshot.
    #[must_use]
    pub fn from_info(info: &SignalInfo) -> Self {
        Self::new(info.signo, signal_description(info.signo), info.code, info.address)
    }

    /// Signal number.
    #[must_use]
    pub const fn signo(&self) -> i32 {
        self.signo
    }

    /// Decoded cause, or an empty string for unknown sub-codes.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason
    }

    /// Faulting address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<usize> {
        self.address
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Terminating due to signal {} {}. {} ({:#x})",
            self.signo,
            self.description,
            self.reason,
            self.address.unwrap_or(0)
        )
    }
}
