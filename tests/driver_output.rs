//! End-to-end tests for the `faultline` driver's normal output.
//!
//! Each test runs the binary and inspects the raw bytes written to standard
//! error (local sink) and standard output (the echo broadcaster).

use assert_cmd::Command;
use predicates::prelude::*;

const LINE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2},\d{3}: \[[^\]]+\] ";

fn faultline() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_faultline"));
    command.env_remove("FAULTLINE_LOG_LEVEL");
    command
}

fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes).lines().map(str::to_owned).collect()
}

// ============================================================================
// Local Output Tests
// ============================================================================

/// Verifies the default threshold writes one error line and drops debug.
#[test]
fn default_level_writes_error_only() {
    let output = faultline()
        .args(["--thread-name", "main", "hello"])
        .output()
        .expect("run faultline");

    assert!(output.status.success());
    let stderr = lines(&output.stderr);
    assert_eq!(stderr.len(), 1, "{stderr:?}");
    assert!(predicate::str::is_match(LINE_PATTERN).expect("regex").eval(&stderr[0]));
    assert!(stderr[0].ends_with(": [main] hello"));
    assert!(output.stderr.ends_with(b"hello\n"));
    assert!(output.stdout.is_empty());
}

/// Verifies the debug threshold writes both messages.
#[test]
fn debug_level_writes_both() {
    faultline()
        .args(["--log-level", "debug", "--thread-name", "main", "hi"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[main] hi\n").count(2));
}

/// Verifies the off threshold silences non-fatal output.
#[test]
fn off_level_is_silent() {
    faultline()
        .args(["--log-level", "off", "quiet"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

/// Verifies the environment variable sets the threshold.
#[test]
fn environment_sets_level() {
    faultline()
        .env("FAULTLINE_LOG_LEVEL", "debug")
        .args(["--thread-name", "env", "msg"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[env] msg\n").count(2));
}

/// Verifies the command-line level overrides the environment.
#[test]
fn flag_overrides_environment() {
    faultline()
        .env("FAULTLINE_LOG_LEVEL", "debug")
        .args(["--log-level", "error", "msg"])
        .assert()
        .success()
        .stderr(predicate::str::contains("] msg\n").count(1));
}

/// Verifies a message that already ends in a newline is not doubled.
#[test]
fn trailing_newline_is_not_doubled() {
    let output = faultline()
        .args(["--thread-name", "nl", "line\n"])
        .output()
        .expect("run faultline");

    assert!(output.stderr.ends_with(b"[nl] line\n"));
    assert!(!output.stderr.ends_with(b"\n\n"));
}

/// Verifies oversized messages are truncated to one 4095-byte line.
#[test]
fn long_message_is_truncated() {
    let message = "x".repeat(10_000);
    let output = faultline()
        .arg(&message)
        .output()
        .expect("run faultline");

    assert_eq!(output.stderr.len(), 4095);
    assert!(output.stderr.ends_with(b"x\n"));
    assert_eq!(output.stderr.iter().filter(|&&byte| byte == b'\n').count(), 1);
}

// ============================================================================
// Remote Delivery Tests
// ============================================================================

/// Verifies a subscribed observer receives the same line as standard error.
#[test]
fn remote_observer_receives_error_lines() {
    let output = faultline()
        .args(["--remote-level", "error", "--thread-name", "main", "shared"])
        .output()
        .expect("run faultline");

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert_eq!(stdout, format!("remote error: {stderr}"));
}

/// Verifies remote-only interest still formats lines the gate rejects.
#[test]
fn remote_debug_subscription_bypasses_local_gate() {
    faultline()
        .args(["--log-level", "off", "--remote-level", "debug", "both"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(
            predicate::str::contains("remote error: ")
                .and(predicate::str::contains("remote debug: "))
                .and(predicate::str::contains("] both\n").count(2)),
        );
}

// ============================================================================
// Thread Label Tests
// ============================================================================

/// Verifies worker threads tag their own lines.
#[test]
fn worker_threads_are_labelled() {
    let output = faultline()
        .args(["--threads", "3", "work"])
        .output()
        .expect("run faultline");

    let stderr = lines(&output.stderr);
    assert_eq!(stderr.len(), 3);
    for index in 0..3 {
        let label = format!(": [worker-{index}] work");
        assert_eq!(stderr.iter().filter(|line| line.ends_with(&label)).count(), 1);
    }
}

/// Verifies an unnamed main thread is labelled with a numeric thread id.
#[test]
fn unnamed_thread_uses_numeric_label() {
    let output = faultline().arg("anon").output().expect("run faultline");
    let stderr = lines(&output.stderr);
    let (_, rest) = stderr[0].split_once(": [").expect("label start");
    let (label, _) = rest.split_once(']').expect("label end");
    assert!(label.parse::<u64>().is_ok(), "label {label:?}");
}

// ============================================================================
// Argument Error Tests
// ============================================================================

/// Verifies an invalid level is reported with exit code 1.
#[test]
fn invalid_level_exits_with_one() {
    faultline()
        .args(["--log-level", "loud"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid log level 'loud'"));
}

/// Verifies an invalid environment level is reported with exit code 1.
#[test]
fn invalid_environment_level_exits_with_one() {
    faultline()
        .env("FAULTLINE_LOG_LEVEL", "7")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("faultline: invalid log level '7'"));
}
