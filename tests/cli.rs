//! Integration tests for the irredenta binary.
//!
//! Spawns the binary, feeds it line commands on stdin, and checks the
//! stdout responses — the same seam a pointer-input collaborator would use.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the binary and collects stdout lines.
fn run_session(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_irredenta");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start irredenta");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

#[test]
fn new_reports_the_region_count() {
    let lines = run_session(&["new 42", "quit"]);
    assert_eq!(lines, vec!["field 100 regions"]);
}

#[test]
fn regions_lists_every_region() {
    let lines = run_session(&["new 42", "regions", "quit"]);
    let regions: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("region "))
        .collect();
    assert_eq!(regions.len(), 100);

    // One region per faction at start.
    assert_eq!(regions.iter().filter(|l| l.contains("owner R")).count(), 1);
    assert_eq!(regions.iter().filter(|l| l.contains("owner B")).count(), 1);
    assert_eq!(regions.iter().filter(|l| l.contains("owner N")).count(), 98);
}

#[test]
fn tick_counts_down_and_resolves() {
    let lines = run_session(&["new 42", "tick 6", "quit"]);
    assert_eq!(lines.len(), 7); // field line + 5 countdown + 1 turn

    assert_eq!(
        lines[1..6],
        ["countdown 5", "countdown 4", "countdown 3", "countdown 2", "countdown 1"]
            .map(String::from)
    );
    assert!(lines[6].starts_with("turn 1 resolved moves 0 reinforced "));
}

#[test]
fn invalid_moves_are_rejected() {
    let lines = run_session(&[
        "new 42",
        "move 0 0",       // self target
        "move 99999 0",   // unknown source
        "pending",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec!["field 100 regions", "rejected", "rejected", "pending 0"]
    );
}

#[test]
fn accepted_move_shows_up_pending_and_resolves() {
    // Find the Red start region and one of its neighbors from the region
    // listing, then queue a move between them.
    let listing = run_session(&["new 42", "regions", "quit"]);
    let red_line = listing
        .iter()
        .find(|l| l.contains("owner R"))
        .expect("a red region");
    let tokens: Vec<&str> = red_line.split_whitespace().collect();
    let source = tokens[1];
    let neighbors = tokens.last().unwrap();
    let target = neighbors.split(',').next().unwrap();

    let lines = run_session(&[
        "new 42",
        &format!("move {} {}", source, target),
        "pending",
        "tick 6",
        "pending",
        "quit",
    ]);
    assert_eq!(lines[1], "accepted");
    assert_eq!(lines[2], "pending 1");
    assert_eq!(lines[3], format!("move {} {} R", source, target));
    // After the resolving tick the ledger is empty again.
    assert!(lines[9].starts_with("turn 1 resolved moves 1"));
    assert_eq!(lines[10], "pending 0");
}

#[test]
fn snapshot_is_one_json_line() {
    let lines = run_session(&["new 42", "snapshot", "quit"]);
    assert_eq!(lines.len(), 2);
    let value: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(value["regions"].as_array().unwrap().len(), 100);
    assert_eq!(value["turn"], 0);
    assert_eq!(value["countdown"], 6);
}

#[test]
fn commands_before_new_do_not_crash() {
    let lines = run_session(&["regions", "tick", "move 0 1", "quit"]);
    assert!(lines.is_empty());
}
