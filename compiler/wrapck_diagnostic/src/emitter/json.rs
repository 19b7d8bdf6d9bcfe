//! JSON Emitter
//!
//! Machine-readable output: one JSON object per line (JSON Lines), so the
//! stream can be consumed incrementally and mixed with other records.

use std::io::Write;

use serde::Serialize;
use wrapck_ir::{SourceMap, Span};

use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// Serialized position of a span.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonPosition {
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl JsonPosition {
    pub fn new(span: Span, source_map: Option<&SourceMap>) -> Self {
        let location = source_map.and_then(|map| map.locate(span.start));
        JsonPosition {
            start: span.start,
            end: span.end,
            file: location.map(|loc| loc.path.to_string()),
            line: location.map(|loc| loc.line),
            column: location.map(|loc| loc.column),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonLabel<'d> {
    pub message: &'d str,
    pub primary: bool,
    #[serde(flatten)]
    pub position: JsonPosition,
}

/// Serialized view of a [`Diagnostic`].
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic<'d> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: &'static str,
    pub severity: &'static str,
    pub message: &'d str,
    pub labels: Vec<JsonLabel<'d>>,
    pub notes: &'d [String],
    pub suggestions: &'d [String],
}

impl<'d> JsonDiagnostic<'d> {
    pub fn new(diagnostic: &'d Diagnostic, source_map: Option<&SourceMap>) -> Self {
        let label = |label: &'d Label| JsonLabel {
            message: &label.message,
            primary: label.is_primary,
            position: JsonPosition::new(label.span, source_map),
        };
        JsonDiagnostic {
            kind: "diagnostic",
            code: diagnostic.code.as_str(),
            severity: diagnostic.severity.as_str(),
            message: &diagnostic.message,
            labels: diagnostic.labels.iter().map(label).collect(),
            notes: &diagnostic.notes,
            suggestions: &diagnostic.suggestions,
        }
    }
}

/// JSON Lines emitter.
pub struct JsonEmitter<'a, W: Write> {
    writer: W,
    source_map: Option<&'a SourceMap>,
}

impl<'a, W: Write> JsonEmitter<'a, W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            source_map: None,
        }
    }

    #[must_use]
    pub fn with_source_map(mut self, source_map: &'a SourceMap) -> Self {
        self.source_map = Some(source_map);
        self
    }

    /// Write any serializable record as one line.
    pub fn emit_record<T: Serialize>(&mut self, record: &T) {
        if serde_json::to_writer(&mut self.writer, record).is_ok() {
            let _ = writeln!(self.writer);
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let record = JsonDiagnostic::new(diagnostic, self.source_map);
        self.emit_record(&record);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        #[derive(Serialize)]
        struct Summary {
            #[serde(rename = "type")]
            kind: &'static str,
            errors: usize,
            warnings: usize,
        }
        self.emit_record(&Summary {
            kind: "summary",
            errors: error_count,
            warnings: warning_count,
        });
    }
}
