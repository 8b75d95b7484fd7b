//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the faultline dispatcher.
//!
//! [`FaultlineLayer`] is a tracing-subscriber layer that renders tracing
//! events as ordinary diagnostic lines, so libraries instrumented with
//! `tracing` share the level gate, thread labels, and broadcaster.
//!
//! # Level mapping
//!
//! - `ERROR` and `WARN` become [`LogLevel::Error`].
//! - `INFO`, `DEBUG`, and `TRACE` become [`LogLevel::Debug`].
//!
//! Tracing has no fatal level, so events never terminate the process.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LogConfig, init_tracing};
//!
//! init_tracing(LogConfig::from_verbose_level(1))?;
//! tracing::warn!("cache miss rate {}", 0.4);
//! ```

use std::sync::Arc;

use logging_sink::LocalSink;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::broadcaster::NoBroadcaster;
use crate::config::{LogConfig, init};
use crate::dispatch::{Logger, log};
use crate::gate::global_gate;
use crate::levels::LogLevel;

/// A tracing layer that forwards events to the diagnostic dispatcher.
#[derive(Clone, Default)]
pub struct FaultlineLayer {
    /// Local-only destination replacing the process-wide dispatcher.
    sink: Option<Arc<dyn LocalSink>>,
}

impl FaultlineLayer {
    /// Layer that logs through the process-wide dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer that writes to `sink` instead of standard error and skips the
    /// broadcaster. The process-wide gate still applies.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn LocalSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Map a tracing level to a diagnostic level.
    const fn map_level(level: &Level) -> LogLevel {
        match *level {
            Level::ERROR | Level::WARN => LogLevel::Error,
            Level::INFO | Level::DEBUG | Level::TRACE => LogLevel::Debug,
        }
    }
}

impl std::fmt::Debug for FaultlineLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultlineLayer")
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}

impl<S> Layer<S> for FaultlineLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = Self::map_level(event.metadata().level());

        match &self.sink {
            None => {
                if !Logger::global().wants(level) {
                    return;
                }
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    log(level, format_args!("{message}"));
                }
            }
            Some(sink) => {
                let logger = Logger::new(global_gate(), sink.as_ref(), &NoBroadcaster);
                if !logger.wants(level) {
                    return;
                }
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    logger.emit(level, format_args!("{message}"));
                }
            }
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Applies `config` with [`init`] and installs [`FaultlineLayer`] as the
/// global tracing subscriber.
///
/// Fails when another global subscriber is already set.
pub fn init_tracing(config: LogConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    init(config);

    tracing_subscriber::registry()
        .with(FaultlineLayer::new())
        .try_init()
}

/// Like [`init_tracing`], with an additional filter layer in front of the bridge.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{LogConfig, init_tracing_with_filter};
/// use tracing_subscriber::filter::Targets;
///
/// let filter = Targets::new().with_target("storage", tracing::Level::DEBUG);
/// init_tracing_with_filter(LogConfig::from_verbose_level(1), filter)?;
/// ```
pub fn init_tracing_with_filter<F>(config: LogConfig, filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    init(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(FaultlineLayer::new())
        .try_init()
}
