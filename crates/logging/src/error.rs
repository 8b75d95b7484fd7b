//! crates/logging/src/error.rs
//! Error types for logging configuration.

/// A log level name or number was not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid log level '{input}': expected fatal, off, error, debug, or -1..=2")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A broadcaster was already installed for this process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("a log broadcaster is already installed")]
pub struct BroadcasterAlreadyInstalled;
