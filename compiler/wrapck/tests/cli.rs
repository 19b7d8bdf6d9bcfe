//! Exit codes and output of the `wrapck` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn wrapck(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_wrapck"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("WRAPCK_LOG")
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn clean_dump_exits_zero() {
    let config = fixture("wrapck.toml");
    let dump = fixture("simple_wrap.json");
    let output = wrapck(&["check", path_str(&dump), "--config", path_str(&config)]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn diagnostics_exit_one() {
    let config = fixture("wrapck.toml");
    let dump = fixture("simple_no_wrap.json");
    let output = wrapck(&[
        "check",
        path_str(&dump),
        "--config",
        path_str(&config),
        "--color",
        "never",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("error[E1002]"));
    assert!(stdout.contains("simple/main.go:7:2"));
}

#[test]
fn facts_flag_lists_verdicts() {
    let dump = fixture("chain_wrapped.json");
    let output = wrapck(&[
        "check",
        path_str(&dump),
        "--scope",
        "chain",
        "--wrapper",
        "func github.com/cockroachdb/errors.WithStack(err error) error",
        "--facts",
    ]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("chain/b:\n  B: \"wrapped\"\n"));
}

#[test]
fn missing_scope_exits_two() {
    // The working directory has no wrapck.toml.
    let dump = fixture("simple_wrap.json");
    let output = wrapck(&["check", path_str(&dump)]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no analysis scope configured"));
}

#[test]
fn unreadable_dump_exits_two() {
    let output = wrapck(&["check", "missing.json", "--scope", "svc"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing.json"));
}

#[test]
fn explain_prints_docs() {
    let output = wrapck(&["explain", "E1001"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("# E1001"));

    let output = wrapck(&["explain", "E0000"]);
    assert_eq!(output.status.code(), Some(2));
}
