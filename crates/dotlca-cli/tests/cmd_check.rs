//! Integration tests for `dotlca check`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `dotlca` binary.
fn dotlca_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("dotlca");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

fn run_check(args: &[&str]) -> std::process::Output {
    Command::new(dotlca_bin())
        .arg("check")
        .args(args)
        .output()
        .expect("run dotlca check")
}

// ---------------------------------------------------------------------------
// check: acyclic graphs
// ---------------------------------------------------------------------------

#[test]
fn acyclic_graph_exits_0_and_reports_size() {
    let out = run_check(&[fixture("diamond.dot").to_str().expect("path")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "acyclic: 4 vertices, 4 edges\n");
}

#[test]
fn json_mode_reports_acyclic_with_counts() {
    let out = run_check(&[
        fixture("diamond.dot").to_str().expect("path"),
        "--format",
        "json",
    ]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());

    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout must be JSON");
    assert_eq!(value["acyclic"], true);
    assert_eq!(value["vertices"], 4);
    assert_eq!(value["edges"], 4);
}

// ---------------------------------------------------------------------------
// check: cyclic graphs
// ---------------------------------------------------------------------------

#[test]
fn cyclic_graph_exits_1_with_a_closed_witness() {
    let out = run_check(&[fixture("cyclic.dot").to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cycle"), "stderr: {stderr}");
    // The witness names all three participants of a -> b -> c -> a.
    for id in ["a", "b", "c"] {
        assert!(stderr.contains(id), "stderr should mention {id}: {stderr}");
    }
    // Nothing is written to stdout on failure.
    assert!(out.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// check: input failures
// ---------------------------------------------------------------------------

#[test]
fn malformed_document_exits_2_with_position() {
    let out = run_check(&[fixture("malformed.dot").to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line"), "stderr: {stderr}");
}

#[test]
fn missing_file_exits_2() {
    let out = run_check(&["/no/such/file.dot"]);
    assert_eq!(out.status.code(), Some(2));
}
