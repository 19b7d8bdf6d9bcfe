//! Diagnostic Emitters
//!
//! - Terminal: colored, human-readable output
//! - JSON: machine-readable output for tooling
//!
//! Both resolve spans through an optional [`SourceMap`](wrapck_ir::SourceMap)
//! so output shows `path:line:column` instead of raw offsets.

mod json;
mod terminal;

pub use json::{JsonEmitter, JsonPosition};
pub use terminal::{ColorMode, TerminalEmitter};

use wrapck_ir::{SourceMap, Span};

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Render a span as `path:line:column`, or as a raw offset range when it
/// cannot be located.
pub(crate) fn describe_span(source_map: Option<&SourceMap>, span: Span) -> String {
    source_map
        .and_then(|map| map.locate(span.start))
        .map_or_else(|| format!("{span:?}"), |loc| loc.to_string())
}

#[cfg(test)]
mod tests;
