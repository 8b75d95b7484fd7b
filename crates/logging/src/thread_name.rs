//! crates/logging/src/thread_name.rs
//! Per-thread labels used to tag diagnostic lines.
//!
//! Each thread owns at most one label. The slot lives in a `thread_local!`,
//! so it is created on first use and dropped when the thread exits; labels
//! are never shared across threads.

use std::cell::RefCell;
use std::fmt::{self, Write as _};

thread_local! {
    static THREAD_NAME: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn default_name() -> String {
    platform::thread::current_thread_id().to_string()
}

/// Borrows the calling thread's label, assigning the default first if needed.
///
/// The default label is the decimal platform thread identifier. Used on the
/// formatting hot path to avoid cloning the label.
///
/// While the thread's locals are being destroyed the slot is unreachable;
/// `f` then sees the default label, which is not stored.
pub fn with_current_thread_name<R>(f: impl FnOnce(&str) -> R) -> R {
    if THREAD_NAME.try_with(|_| ()).is_err() {
        return f(&default_name());
    }
    THREAD_NAME.with(|slot| {
        if slot.borrow().is_none() {
            *slot.borrow_mut() = Some(default_name());
        }
        let name = slot.borrow();
        f(name.as_deref().unwrap_or_default())
    })
}

/// Returns the calling thread's label, assigning the default first if needed.
///
/// Idempotent: once a label exists, every call returns it unchanged.
///
/// # Examples
///
/// ```
/// use logging::{get_current_thread_name, set_thread_name};
///
/// let first = get_current_thread_name();
/// assert_eq!(first, get_current_thread_name());
///
/// set_thread_name!("io-{}", 3);
/// assert_eq!(get_current_thread_name(), "io-3");
/// ```
#[must_use]
pub fn get_current_thread_name() -> String {
    with_current_thread_name(str::to_owned)
}

/// Replaces the calling thread's label with `args` and returns the new label.
///
/// The previous label is dropped. Prefer the [`set_thread_name!`] macro.
/// A failing `Display` argument leaves the label with whatever was written
/// before the error. Renaming during thread teardown is a no-op.
///
/// [`set_thread_name!`]: crate::set_thread_name
pub fn set_current_thread_name(args: fmt::Arguments<'_>) -> String {
    let name = match args.as_str() {
        Some(literal) => literal.to_owned(),
        None => {
            let mut rendered = String::new();
            let _ = rendered.write_fmt(args);
            rendered
        }
    };
    let _ = THREAD_NAME.try_with(|slot| {
        slot.borrow_mut().replace(name.clone());
    });
    name
}

/// Names the calling thread using `format!` syntax and returns the label.
///
/// # Examples
///
/// ```
/// let label = logging::set_thread_name!("worker-{}", 7);
/// assert_eq!(label, "worker-7");
/// ```
#[macro_export]
macro_rules! set_thread_name {
    ($($arg:tt)*) => {
        $crate::set_current_thread_name(::std::format_args!($($arg)*))
    };
}
