//! crates/logging/src/config.rs
//! Startup configuration for the diagnostic subsystem.

use std::sync::Once;

use crate::error::ParseLevelError;
use crate::gate::set_log_level;
use crate::levels::LogLevel;

/// Environment variable consulted by [`LogConfig::from_env`].
pub const LEVEL_ENV_VAR: &str = "FAULTLINE_LOG_LEVEL";

/// Settings applied once by [`init`].
///
/// # Examples
///
/// ```
/// use logging::{LogConfig, LogLevel};
///
/// assert_eq!(LogConfig::default().level, LogLevel::Error);
/// assert_eq!(LogConfig::from_verbose_level(1).level, LogLevel::Debug);
///
/// let config = LogConfig::from_lookup(|_| Some("off".to_owned())).unwrap();
/// assert_eq!(config.level, LogLevel::Off);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Threshold for the process-wide level gate.
    pub level: LogLevel,
}

impl LogConfig {
    /// Configuration with the given threshold.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Maps a `-v` count onto a threshold: `0` keeps errors only, anything
    /// higher enables debug output.
    #[must_use]
    pub const fn from_verbose_level(verbose: u8) -> Self {
        match verbose {
            0 => Self::new(LogLevel::Error),
            _ => Self::new(LogLevel::Debug),
        }
    }

    /// Reads [`LEVEL_ENV_VAR`] from the process environment.
    ///
    /// An unset or empty variable yields the default configuration.
    pub fn from_env() -> Result<Self, ParseLevelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ParseLevelError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(LEVEL_ENV_VAR) {
            Some(value) if !value.trim().is_empty() => Ok(Self::new(value.parse()?)),
            _ => Ok(Self::default()),
        }
    }

    /// Returns a copy with `level` as the threshold.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

static INIT: Once = Once::new();

/// Applies `config` to the process-wide state.
///
/// Only the first call has an effect; it returns `true`. Later calls return
/// `false` and leave the current settings alone, so use
/// [`set_log_level`](crate::set_log_level) to change the threshold at run
/// time.
pub fn init(config: LogConfig) -> bool {
    let mut applied = false;
    INIT.call_once(|| {
        set_log_level(config.level);
        applied = true;
    });
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_levels_map_to_thresholds() {
        assert_eq!(LogConfig::from_verbose_level(0).level, LogLevel::Error);
        assert_eq!(LogConfig::from_verbose_level(1).level, LogLevel::Debug);
        assert_eq!(LogConfig::from_verbose_level(5).level, LogLevel::Debug);
    }

    #[test]
    fn lookup_reads_the_level_variable() {
        let config = LogConfig::from_lookup(|key| {
            assert_eq!(key, LEVEL_ENV_VAR);
            Some("debug".to_owned())
        })
        .expect("valid level");
        assert_eq!(config, LogConfig::new(LogLevel::Debug));
    }

    #[test]
    fn missing_or_blank_variable_uses_default() {
        assert_eq!(LogConfig::from_lookup(|_| None), Ok(LogConfig::default()));
        assert_eq!(
            LogConfig::from_lookup(|_| Some("  ".to_owned())),
            Ok(LogConfig::default())
        );
    }

    #[test]
    fn invalid_variable_is_reported() {
        let error = LogConfig::from_lookup(|_| Some("chatty".to_owned())).unwrap_err();
        assert_eq!(error.input(), "chatty");
    }

    #[test]
    fn with_level_overrides() {
        let config = LogConfig::default().with_level(LogLevel::Off);
        assert_eq!(config.level, LogLevel::Off);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_level_names() {
        let json = serde_json::to_string(&LogConfig::new(LogLevel::Debug)).expect("serialize");
        assert_eq!(json, r#"{"level":"debug"}"#);
        let parsed: LogConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(parsed, LogConfig::default());
    }
}
