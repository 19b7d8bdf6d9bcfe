//! Runs the analysis over a scheduled program.
//!
//! With one job the units run in schedule order against a single fact
//! table. With more, each level runs on a scoped rayon pool: units write
//! into private [`LayeredFacts`] layers over the facts of earlier levels,
//! and the layers are merged before the next level starts.

use rayon::prelude::*;
use tracing::{debug, info_span, warn};
use wrapck_analysis::{check_unit, FactTable, LayeredFacts, UnitReport, WrapPolicy};
use wrapck_ir::{Program, UnitId};

use crate::schedule::Schedule;

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct RunResult {
    /// One report per scheduled unit, in schedule order.
    pub reports: Vec<UnitReport>,
    /// Facts of every analyzed function.
    pub facts: FactTable,
}

impl RunResult {
    pub fn diagnostic_count(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.reports.iter().all(UnitReport::is_clean)
    }
}

/// Check every scheduled unit.
pub fn run(program: &Program, policy: &WrapPolicy, schedule: &Schedule, jobs: usize) -> RunResult {
    let _span = info_span!("run", units = schedule.len(), jobs).entered();
    if jobs <= 1 {
        return run_sequential(program, policy, schedule);
    }

    let result = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| run_levels(program, policy, schedule))
        });
    result.unwrap_or_else(|e| {
        warn!("failed to create thread pool ({e}), running sequentially");
        run_sequential(program, policy, schedule)
    })
}

fn run_sequential(program: &Program, policy: &WrapPolicy, schedule: &Schedule) -> RunResult {
    let mut result = RunResult::default();
    for unit in schedule.units() {
        let report = check_unit(program, unit, policy, &mut result.facts);
        result.reports.push(report);
    }
    result
}

fn run_levels(program: &Program, policy: &WrapPolicy, schedule: &Schedule) -> RunResult {
    let mut result = RunResult::default();
    for (index, level) in schedule.levels.iter().enumerate() {
        let published = &result.facts;
        let outcomes: Vec<(UnitReport, FactTable)> = level
            .par_iter()
            .map(|&unit| check_layered(program, unit, policy, published))
            .collect();

        for (report, local) in outcomes {
            if let Err(err) = result.facts.merge(local) {
                warn!(unit = %report.unit, %err, "conflicting facts while merging");
            }
            result.reports.push(report);
        }
        debug!(level = index, facts = result.facts.len(), "level merged");
    }
    result
}

fn check_layered(
    program: &Program,
    unit: UnitId,
    policy: &WrapPolicy,
    published: &FactTable,
) -> (UnitReport, FactTable) {
    let mut layer = LayeredFacts::new(published);
    let report = check_unit(program, unit, policy, &mut layer);
    (report, layer.into_local())
}

#[cfg(test)]
mod tests;
