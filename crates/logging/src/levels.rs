//! crates/logging/src/levels.rs
//! Severity levels shared by the gate, the dispatcher, and broadcasters.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseLevelError;

/// Ordered severity of a diagnostic.
///
/// Lower numeric values are more severe. A message passes a threshold when
/// its numeric value is less than or equal to the threshold's. [`Off`]
/// only makes sense as a threshold: with it set, only [`Fatal`] messages
/// are emitted locally.
///
/// [`Off`]: LogLevel::Off
/// [`Fatal`]: LogLevel::Fatal
///
/// # Examples
///
/// ```
/// use logging::LogLevel;
///
/// assert!(LogLevel::Fatal < LogLevel::Error);
/// assert_eq!("dbg".parse::<LogLevel>(), Ok(LogLevel::Debug));
/// assert_eq!(LogLevel::Error.as_i32(), 1);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(i32)]
pub enum LogLevel {
    /// Unrecoverable condition; the process aborts after the message.
    Fatal = -1,
    /// Threshold that silences everything except fatal messages.
    Off = 0,
    /// Error conditions. Default threshold.
    #[default]
    Error = 1,
    /// Verbose diagnostics.
    Debug = 2,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [Self; 4] = [Self::Fatal, Self::Off, Self::Error, Self::Debug];

    /// Numeric value of the level.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Converts a numeric value back into a level.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            -1 => Some(Self::Fatal),
            0 => Some(Self::Off),
            1 => Some(Self::Error),
            2 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Lower-case name of the level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Off => "off",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }

    /// Returns `true` when a message at `self` passes a `threshold`.
    #[must_use]
    pub const fn passes(self, threshold: Self) -> bool {
        self.as_i32() <= threshold.as_i32()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let level = match trimmed.to_ascii_lowercase().as_str() {
            "fatal" => Some(Self::Fatal),
            "off" => Some(Self::Off),
            "error" | "err" => Some(Self::Error),
            "debug" | "dbg" => Some(Self::Debug),
            other => other.parse::<i32>().ok().and_then(Self::from_i32),
        };
        level.ok_or_else(|| ParseLevelError::new(trimmed))
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = ParseLevelError;

    fn try_from(value: i32) -> Result<Self, ParseLevelError> {
        Self::from_i32(value).ok_or_else(|| ParseLevelError::new(value.to_string()))
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level.as_i32()
    }
}
