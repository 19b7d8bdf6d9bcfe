use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use super::*;
use crate::cli::ColorChoice;
use crate::config::ConfigError;
use crate::render::OutputFormat;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn args(dump: &str, scope: Option<&str>) -> CheckArgs {
    CheckArgs {
        dump: fixture(dump),
        config: Some(fixture("wrapck.toml")),
        scope: scope.map(str::to_string),
        wrappers: Vec::new(),
        format: OutputFormat::Human,
        facts: false,
        emit_facts: None,
        jobs: 1,
        color: ColorChoice::Never,
    }
}

#[test]
fn clean_and_dirty_outcomes() {
    let mut out = Vec::new();
    let clean = check(&args("simple_wrap.json", None), &mut out, false).unwrap();
    assert_eq!(clean, Outcome::Clean);
    assert!(out.is_empty());

    let dirty = check(&args("simple_no_wrap.json", None), &mut out, false).unwrap();
    assert_eq!(dirty, Outcome::Diagnostics);
    assert!(!out.is_empty());
}

#[test]
fn scope_flag_overrides_config() {
    let mut out = Vec::new();
    let outcome = check(&args("chain_naked.json", Some("chain")), &mut out, false).unwrap();
    assert_eq!(outcome, Outcome::Diagnostics);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("found 2 unwrapped errors"));
}

#[test]
fn missing_scope_fails_before_loading() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("empty.toml");
    std::fs::write(&config, "wrappers = []\n").unwrap();
    let mut args = args("does-not-exist.json", None);
    args.config = Some(config);

    let err = check(&args, &mut Vec::new(), false).unwrap_err();
    assert!(matches!(err, DriverError::Config(ConfigError::MissingScope)));
}

#[test]
fn emits_fact_file() {
    let dir = tempfile::tempdir().unwrap();
    let facts = dir.path().join("facts.json");
    let mut args = args("simple_no_wrap.json", None);
    args.emit_facts = Some(facts.clone());
    args.jobs = 0;

    check(&args, &mut Vec::new(), false).unwrap();
    let text = std::fs::read_to_string(facts).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["simple/main.do"], "naked");
}
