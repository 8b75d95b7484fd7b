//! crates/platform/src/error.rs
//! Errors surfaced by platform setup calls.

use std::io;

/// Failures reported by the platform layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `sigaction` rejected the handler for `signal`.
    #[error("failed to install handler for signal {signal}: {source}")]
    InstallHandler {
        /// Raw signal number.
        signal: i32,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Delivering `signal` to the current thread failed.
    #[error("failed to raise signal {signal}: {source}")]
    Raise {
        /// Raw signal number.
        signal: i32,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The operation has no implementation on this platform.
    #[error("signal handling is not supported on this platform")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_error_names_signal() {
        let error = Error::InstallHandler {
            signal: 11,
            source: io::Error::from_raw_os_error(22),
        };
        let text = error.to_string();
        assert!(text.starts_with("failed to install handler for signal 11"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn unsupported_has_no_source() {
        let error = Error::Unsupported;
        assert!(std::error::Error::source(&error).is_none());
        assert_eq!(
            error.to_string(),
            "signal handling is not supported on this platform"
        );
    }
}
