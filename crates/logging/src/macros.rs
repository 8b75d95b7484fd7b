//! crates/logging/src/macros.rs
//! `format!`-style front ends for the process-wide dispatcher.

/// Logs a message at the given [`LogLevel`](crate::LogLevel).
///
/// Arguments are only formatted when the gate or a remote subscriber wants
/// the level.
///
/// # Example
/// ```no_run
/// use logging::LogLevel;
///
/// logging::log!(LogLevel::Error, "lost connection to {}", "db-1");
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log($level, ::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Error`](crate::LogLevel::Error).
///
/// # Example
/// ```no_run
/// logging::error_log!("checksum mismatch in block {}", 12);
/// ```
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)+) => {
        $crate::log($crate::LogLevel::Error, ::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Debug`](crate::LogLevel::Debug).
///
/// # Example
/// ```no_run
/// logging::debug_log!("retrying in {} ms", 250);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)+) => {
        $crate::log($crate::LogLevel::Debug, ::std::format_args!($($arg)+))
    };
}

/// Logs a fatal message, logs the stack, and aborts the process.
///
/// Evaluates to `!`.
///
/// # Example
/// ```no_run
/// logging::fatal_log!("invariant violated: {}", "queue underflow");
/// ```
#[macro_export]
macro_rules! fatal_log {
    ($($arg:tt)+) => {
        $crate::fatal(::std::format_args!($($arg)+))
    };
}
