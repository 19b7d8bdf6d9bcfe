use pretty_assertions::assert_eq;
use wrapck_analysis::WrapVerdict;

use super::*;
use crate::input;

const CHAIN_NAKED: &str = include_str!("../../tests/fixtures/chain_naked.json");
const CHAIN_WRAPPED: &str = include_str!("../../tests/fixtures/chain_wrapped.json");
const WITH_STACK: &str = "func github.com/cockroachdb/errors.WithStack(err error) error";

fn policy(scope: &str) -> WrapPolicy {
    WrapPolicy::new(scope, [WITH_STACK]).unwrap()
}

fn run_fixture(text: &str, scope: &str, jobs: usize) -> (Program, RunResult) {
    let program = input::parse(text).unwrap();
    let policy = policy(scope);
    let schedule = Schedule::build(&program, &policy);
    let result = run(&program, &policy, &schedule, jobs);
    (program, result)
}

fn verdict_lines(result: &RunResult) -> Vec<String> {
    result
        .reports
        .iter()
        .flat_map(|report| report.verdicts.iter().map(ToString::to_string))
        .collect()
}

#[test]
fn dependencies_are_checked_first() {
    let (_, result) = run_fixture(CHAIN_NAKED, "chain", 1);
    let units: Vec<&str> = result.reports.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(units, vec!["chain/a", "chain/b"]);
    assert_eq!(verdict_lines(&result), vec!["A: \"naked\"", "B: \"naked\""]);
    assert_eq!(result.diagnostic_count(), 2);
    assert!(!result.is_clean());
}

#[test]
fn wrapped_dependency_keeps_dependent_clean() {
    let (_, result) = run_fixture(CHAIN_WRAPPED, "chain", 1);
    assert_eq!(verdict_lines(&result), vec!["A: \"wrapped\"", "B: \"wrapped\""]);
    assert!(result.is_clean());
    assert_eq!(result.facts.len(), 2);
}

#[test]
fn parallel_run_matches_sequential() {
    for fixture in [CHAIN_NAKED, CHAIN_WRAPPED] {
        let (_, sequential) = run_fixture(fixture, "chain", 1);
        let (_, parallel) = run_fixture(fixture, "chain", 4);
        assert_eq!(sequential.reports, parallel.reports);
        assert_eq!(sequential.facts, parallel.facts);
    }
}

#[test]
fn facts_cover_every_declared_function() {
    let (program, result) = run_fixture(CHAIN_NAKED, "chain", 2);
    let verdicts: Vec<(String, WrapVerdict)> = result
        .facts
        .entries()
        .into_iter()
        .map(|(symbol, verdict)| {
            let name = program.symbol(symbol).unwrap().qualified(&program.interner);
            (name, verdict)
        })
        .collect();
    assert!(verdicts.contains(&("chain/a.A".to_string(), WrapVerdict::Naked)));
    assert!(verdicts.contains(&("chain/b.B".to_string(), WrapVerdict::Naked)));
}

#[test]
fn nothing_in_scope_runs_nothing() {
    let (_, result) = run_fixture(CHAIN_NAKED, "elsewhere", 1);
    assert!(result.reports.is_empty());
    assert!(result.facts.is_empty());
    assert!(result.is_clean());
}
