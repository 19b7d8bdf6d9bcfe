//! wrapck analysis - inter-procedural error wrapping checker.
//!
//! For every function that returns an `error`, the analysis finds each
//! `return` that lets an error escape, traces the error back to the call
//! that produced it, and decides whether that call wraps the error. The
//! per-function verdict is recorded in a [`FactStore`] so that units
//! analyzed later can rely on it instead of re-analyzing the callee.
//!
//! # Module Organization
//!
//! - `facade`: queries over types and symbols of one unit
//! - `shape`: where a function's results carry an error
//! - `resolve`: variable definitions reaching a `return`
//! - `classify`: wrapped/naked decision for one call
//! - `facts`: cross-unit verdict storage
//! - `summary`: per-function error sources and verdicts
//! - `report`: diagnostics for naked sources
//!
//! # Entry Point
//!
//! [`check_unit`] analyzes one unit. Callers are expected to analyze units
//! in dependency order, sharing one fact store.

mod classify;
mod facade;
mod facts;
mod policy;
pub mod report;
mod resolve;
mod shape;
mod summary;

#[cfg(test)]
mod testing;

use tracing::{debug, instrument, warn};
use wrapck_diagnostic::Diagnostic;
use wrapck_ir::{Program, UnitId};

pub use classify::{classify_call, CallClass, Classification, NakedReason, WrapRule};
pub use facade::Facade;
pub use facts::{FactError, FactStore, FactTable, LayeredFacts, WrapVerdict};
pub use policy::{PolicyError, WrapPolicy};
pub use resolve::{Definition, DefinitionIndex};
pub use shape::ErrorShape;
pub use summary::{ErrorSource, FunctionSummary, FunctionVerdict, SummaryBuilder};

/// Outcome of analyzing one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitReport {
    /// Import path of the unit.
    pub unit: String,
    /// One verdict per error-returning function, in source order.
    pub verdicts: Vec<FunctionVerdict>,
    /// One diagnostic per naked error source.
    pub diagnostics: Vec<Diagnostic>,
}

impl UnitReport {
    fn empty(unit: &str) -> Self {
        UnitReport {
            unit: unit.to_string(),
            ..UnitReport::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Verdict of a function by display name.
    pub fn verdict(&self, name: &str) -> Option<WrapVerdict> {
        self.verdicts
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.verdict)
    }
}

/// Analyze one unit, recording verdicts of its functions into `facts`.
///
/// Units outside the policy scope are never walked and yield an empty
/// report.
#[instrument(level = "debug", skip_all, fields(unit = ?unit_id))]
pub fn check_unit<F: FactStore + ?Sized>(
    program: &Program,
    unit_id: UnitId,
    policy: &WrapPolicy,
    facts: &mut F,
) -> UnitReport {
    let Some(unit) = program.unit(unit_id) else {
        warn!("unknown unit");
        return UnitReport::default();
    };
    let path = program.name(unit.path);
    if !policy.in_scope(path) {
        debug!(path, "outside scope");
        return UnitReport::empty(path);
    }

    let facade = Facade::new(program, unit);
    let summaries = SummaryBuilder::new(facade, policy, facts).run();

    let mut out = UnitReport::empty(path);
    for summary in &summaries {
        out.verdicts.push(summary.to_verdict());
        out.diagnostics.extend(
            summary
                .naked_sources()
                .map(|source| report::naked_source_diagnostic(&facade, policy, summary, source)),
        );
    }
    debug!(
        path,
        functions = out.verdicts.len(),
        diagnostics = out.diagnostics.len(),
        "unit checked"
    );
    out
}
