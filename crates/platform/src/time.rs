//! crates/platform/src/time.rs
//! Local-time offset lookup.
//!
//! `time::UtcOffset::current_local_offset` refuses to run once a process has
//! more than one thread, which is the normal state for a logging process.
//! This module asks the C library directly instead.
#![allow(unsafe_code)]

/// Offset of local time from UTC, in seconds, at `unix_seconds`.
///
/// Returns `None` when the C library cannot convert the instant or the
/// platform has no notion of a local time zone; callers fall back to UTC.
#[cfg(unix)]
#[must_use]
pub fn local_utc_offset(unix_seconds: i64) -> Option<i32> {
    use std::mem::MaybeUninit;

    let instant = libc::time_t::try_from(unix_seconds).ok()?;
    let mut broken_down = MaybeUninit::<libc::tm>::uninit();
    // SAFETY: both pointers are valid for the duration of the call and
    // localtime_r is the reentrant variant.
    let converted = unsafe { libc::localtime_r(&instant, broken_down.as_mut_ptr()) };
    if converted.is_null() {
        return None;
    }
    // SAFETY: localtime_r initialised the structure on success.
    let broken_down = unsafe { broken_down.assume_init() };
    i32::try_from(broken_down.tm_gmtoff).ok()
}

/// Offset of local time from UTC, in seconds, at `unix_seconds`.
#[cfg(not(unix))]
#[must_use]
pub fn local_utc_offset(_unix_seconds: i64) -> Option<i32> {
    None
}
