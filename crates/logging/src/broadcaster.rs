//! crates/logging/src/broadcaster.rs
//! Contract for remote log observers.

use std::sync::{Arc, OnceLock};

use crate::error::BroadcasterAlreadyInstalled;
use crate::levels::LogLevel;

/// Delivers rendered lines to remote observers.
///
/// The dispatcher asks [`has_subscriber_at_or_above`] before formatting and
/// calls [`deliver`] once per line that some subscriber wants. Subscription
/// bookkeeping and any locking belong to the implementation; the dispatcher
/// holds no lock while calling in.
///
/// [`has_subscriber_at_or_above`]: Broadcaster::has_subscriber_at_or_above
/// [`deliver`]: Broadcaster::deliver
pub trait Broadcaster: Send + Sync {
    /// Returns `true` when any subscriber wants messages of `level`.
    fn has_subscriber_at_or_above(&self, level: LogLevel) -> bool;

    /// Hands one rendered line, including its trailing newline, to subscribers.
    fn deliver(&self, level: LogLevel, line: &str);
}

impl<B> Broadcaster for &B
where
    B: Broadcaster + ?Sized,
{
    fn has_subscriber_at_or_above(&self, level: LogLevel) -> bool {
        (**self).has_subscriber_at_or_above(level)
    }

    fn deliver(&self, level: LogLevel, line: &str) {
        (**self).deliver(level, line);
    }
}

impl<B> Broadcaster for Arc<B>
where
    B: Broadcaster + ?Sized,
{
    fn has_subscriber_at_or_above(&self, level: LogLevel) -> bool {
        (**self).has_subscriber_at_or_above(level)
    }

    fn deliver(&self, level: LogLevel, line: &str) {
        (**self).deliver(level, line);
    }
}

/// Broadcaster with no subscribers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBroadcaster;

impl Broadcaster for NoBroadcaster {
    fn has_subscriber_at_or_above(&self, _level: LogLevel) -> bool {
        false
    }

    fn deliver(&self, _level: LogLevel, _line: &str) {}
}

static BROADCASTER: OnceLock<Box<dyn Broadcaster>> = OnceLock::new();

/// Installs the process-wide broadcaster used by [`log`](crate::log()).
///
/// Only one broadcaster can be installed per process; later attempts return
/// [`BroadcasterAlreadyInstalled`] and drop the rejected value.
pub fn install_broadcaster(
    broadcaster: impl Broadcaster + 'static,
) -> Result<(), BroadcasterAlreadyInstalled> {
    BROADCASTER
        .set(Box::new(broadcaster))
        .map_err(|_| BroadcasterAlreadyInstalled)
}

/// The installed broadcaster, or [`NoBroadcaster`] when none was installed.
#[must_use]
pub fn broadcaster() -> &'static dyn Broadcaster {
    static NONE: NoBroadcaster = NoBroadcaster;
    match BROADCASTER.get() {
        Some(installed) => installed.as_ref(),
        None => &NONE,
    }
}
