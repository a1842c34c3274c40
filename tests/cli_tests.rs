//! Command line behaviour of the binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn traffic() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_manhattan_traffic"));
    command.env("RUST_LOG", "warn,manhattan_traffic=info");
    command
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = traffic()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start binary");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for binary")
}

#[test]
fn test_path_command_prints_route() {
    let output = traffic()
        .args(["path", "0", "0", "2", "2"])
        .output()
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "path failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let hops: Vec<&str> = stdout.trim().split(" -> ").collect();
    assert_eq!(hops.len(), 5, "unexpected path: {}", stdout);
    assert_eq!(hops.first(), Some(&"(0,0)"));
    assert_eq!(hops.last(), Some(&"(2,2)"));
}

#[test]
fn test_path_command_rejects_out_of_grid() {
    let output = traffic()
        .args(["path", "0", "0", "7", "7"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside the 3x3 grid"), "stderr: {}", stderr);
}

#[test]
fn test_headless_run_logs_summary() {
    let output = traffic()
        .args(["run", "--seed", "3", "--minutes", "100", "--vehicles", "5"])
        .output()
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "run failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Total vehicles spawned:"),
        "Missing 'Total vehicles spawned' statistic"
    );
    assert!(
        stderr.contains("Success rate:"),
        "Missing 'Success rate' statistic"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="));
}

#[test]
fn test_repl_answers_until_exit() {
    let output = run_with_stdin(&["repl"], "path 0 0 2 2\nfly\npath 1\nexit\npath 0 0 1 1\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(0,0) -> "), "stdout: {}", stdout);
    assert!(stdout.contains("Unknown command"));
    assert!(stdout.contains("Usage: path x1 y1 x2 y2"));
    // Nothing after `exit` is answered
    assert_eq!(stdout.matches(" -> ").count(), 4);
}

#[test]
fn test_repl_stops_at_end_of_input() {
    let output = run_with_stdin(&["--width", "2", "--height", "1", "repl"], "path 0 0 1 0\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2x1 grid"));
    assert!(stdout.contains("(0,0) -> (1,0)"));
}
