//! crates/logging/src/gate.rs
//! Process-wide severity threshold.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::levels::LogLevel;

/// Atomic severity threshold.
///
/// Reads and writes use `Relaxed` ordering: the threshold is a single word,
/// and a logging call racing a level change may observe either value.
///
/// # Examples
///
/// ```
/// use logging::{LevelGate, LogLevel};
///
/// let gate = LevelGate::new(LogLevel::Error);
/// assert!(gate.should_emit(LogLevel::Error));
/// assert!(!gate.should_emit(LogLevel::Debug));
///
/// gate.set_level(LogLevel::Debug);
/// assert!(gate.should_emit(LogLevel::Debug));
/// ```
#[derive(Debug)]
pub struct LevelGate {
    level: AtomicI32,
}

impl LevelGate {
    /// Creates a gate with the given threshold.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicI32::new(level.as_i32()),
        }
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_i32(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Replaces the threshold.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_i32(), Ordering::Relaxed);
    }

    /// Returns `true` when a message at `requested` passes the threshold.
    #[must_use]
    pub fn should_emit(&self, requested: LogLevel) -> bool {
        requested.as_i32() <= self.level.load(Ordering::Relaxed)
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

static GLOBAL_GATE: LevelGate = LevelGate::new(LogLevel::Error);

/// The process-wide gate consulted by [`log`](crate::log()).
#[must_use]
pub fn global_gate() -> &'static LevelGate {
    &GLOBAL_GATE
}

/// Current process-wide threshold.
#[must_use]
pub fn log_level() -> LogLevel {
    GLOBAL_GATE.level()
}

/// Replaces the process-wide threshold.
pub fn set_log_level(level: LogLevel) {
    GLOBAL_GATE.set_level(level);
}

/// Returns `true` when a message at `requested` passes the process-wide threshold.
#[must_use]
pub fn should_emit(requested: LogLevel) -> bool {
    GLOBAL_GATE.should_emit(requested)
}
