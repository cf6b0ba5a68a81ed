//! Integration tests for fatal emission.
//!
//! A fatal call ends the process, so each case re-executes this test binary
//! with `GOOSE_FATAL_CASE` set and filters it down to [`fatal_child`]. The
//! parent inspects the child's exit status and standard error.

use std::env;
use std::process::{Command, Output};

use logging::{Alert, FATAL_EXIT_STATUS, GATED_FATAL_EXIT_STATUS, alert_fatal, sink};

const CASE_VARIABLE: &str = "GOOSE_FATAL_CASE";

/// Child entry point; a no-op unless launched by [`run_case`].
#[test]
fn fatal_child() {
    let Ok(case) = env::var(CASE_VARIABLE) else {
        return;
    };
    sink::set_decoration(sink::Decoration::Plain);

    let alert = Alert::new(2);
    match case.as_str() {
        "written" => alert.fatal(2, format_args!("fatal: {} failed", "bind")),
        "gated" => alert.fatal(3, format_args!("fatal: hidden")),
        "deep" => alert.deep_fatal(0, 1, format_args!("fatal: deep")),
        "macro" => alert_fatal!(alert, 1, "fatal: via {}", "macro"),
        other => panic!("unknown fatal case {other}"),
    }
}

fn run_case(case: &str) -> Output {
    let exe = env::current_exe().expect("test binary path");
    Command::new(exe)
        .args(["fatal_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CASE_VARIABLE, case)
        .output()
        .expect("spawn child")
}

// ============================================================================
// Exit Status
// ============================================================================

/// A fatal message that passes the gate is written and exits with status 1.
#[test]
fn written_fatal_exits_with_status_one() {
    let output = run_case("written");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_STATUS));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fatal: bind failed\n"), "stderr: {stderr}");
}

/// A gated fatal message is not written but still terminates with status 255.
#[test]
fn gated_fatal_still_terminates() {
    let output = run_case("gated");
    assert_eq!(output.status.code(), Some(GATED_FATAL_EXIT_STATUS));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("fatal: hidden"), "stderr: {stderr}");
}

/// The deep variant terminates the same way.
#[test]
fn deep_fatal_exits_with_status_one() {
    let output = run_case("deep");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_STATUS));
    assert!(String::from_utf8_lossy(&output.stderr).contains("fatal: deep\n"));
}

/// The macro form renders its arguments before terminating.
#[test]
fn macro_fatal_exits_with_status_one() {
    let output = run_case("macro");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_STATUS));
    assert!(String::from_utf8_lossy(&output.stderr).contains("fatal: via macro\n"));
}
