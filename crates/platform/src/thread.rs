//! crates/platform/src/thread.rs
//! Platform thread identifiers.
#![allow(unsafe_code)]

/// Returns the operating system's identifier for the calling thread.
///
/// On Linux and Android this is the kernel thread id (as shown by `ps -L`);
/// on other Unix systems it is the `pthread_t` value; elsewhere it is a hash
/// of the standard library's [`ThreadId`](std::thread::ThreadId). The value
/// is stable for the lifetime of the thread.
#[cfg(any(target_os = "linux", target_os = "android"))]
#[must_use]
pub fn current_thread_id() -> u64 {
    let tid = nix::unistd::gettid().as_raw();
    u64::from(tid.unsigned_abs())
}

/// Returns the operating system's identifier for the calling thread.
#[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
#[must_use]
pub fn current_thread_id() -> u64 {
    // SAFETY: pthread_self has no preconditions and cannot fail.
    let thread = unsafe { libc::pthread_self() };
    thread as usize as u64
}

/// Returns a stable identifier for the calling thread.
#[cfg(not(unix))]
#[must_use]
pub fn current_thread_id() -> u64 {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_stable_within_a_thread() {
        assert_eq!(current_thread_id(), current_thread_id());
    }

    #[test]
    fn identifiers_differ_between_live_threads() {
        let here = current_thread_id();
        let (tx, rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let handle = std::thread::spawn(move || {
            tx.send(current_thread_id()).expect("send id");
            let _ = release_rx.recv();
        });
        let there = rx.recv().expect("receive id");
        release_tx.send(()).expect("release thread");
        handle.join().expect("thread completes");
        assert_ne!(here, there);
    }
}
