//! Output rendering.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use wrapck_analysis::FactTable;
use wrapck_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, JsonPosition, TerminalEmitter};
use wrapck_ir::Program;

use crate::driver::RunResult;

/// Report format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable diagnostics.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Whether the output is a terminal.
    pub is_tty: bool,
    /// Also list every function's verdict.
    pub show_facts: bool,
}

#[derive(Serialize)]
struct VerdictRecord<'r> {
    #[serde(rename = "type")]
    kind: &'static str,
    unit: &'r str,
    function: &'r str,
    verdict: &'static str,
    #[serde(flatten)]
    position: JsonPosition,
}

/// Write diagnostics, and optionally verdicts, for a finished run.
pub fn render<W: Write>(
    out: &mut W,
    program: &Program,
    result: &RunResult,
    options: &RenderOptions,
) -> io::Result<()> {
    match options.format {
        OutputFormat::Human => render_human(out, program, result, options),
        OutputFormat::Json => {
            render_json(out, program, result, options);
            out.flush()
        }
    }
}

fn counts(result: &RunResult) -> (usize, usize) {
    result
        .reports
        .iter()
        .flat_map(|report| &report.diagnostics)
        .fold((0, 0), |(errors, warnings), diag| {
            if diag.is_error() {
                (errors + 1, warnings)
            } else {
                (errors, warnings + 1)
            }
        })
}

fn render_human<W: Write>(
    out: &mut W,
    program: &Program,
    result: &RunResult,
    options: &RenderOptions,
) -> io::Result<()> {
    if options.show_facts {
        for report in result.reports.iter().filter(|r| !r.verdicts.is_empty()) {
            writeln!(out, "{}:", report.unit)?;
            for verdict in &report.verdicts {
                writeln!(out, "  {verdict}")?;
            }
        }
        writeln!(out)?;
    }

    let (errors, warnings) = counts(result);
    let mut emitter = TerminalEmitter::with_color_mode(&mut *out, options.color, options.is_tty)
        .with_source_map(&program.source_map);
    for report in &result.reports {
        emitter.emit_all(&report.diagnostics);
    }
    emitter.emit_summary(errors, warnings);
    emitter.flush();
    Ok(())
}

fn render_json<W: Write>(out: &mut W, program: &Program, result: &RunResult, options: &RenderOptions) {
    let source_map = &program.source_map;
    let (errors, warnings) = counts(result);
    let mut emitter = JsonEmitter::new(out).with_source_map(source_map);
    for report in &result.reports {
        if options.show_facts {
            for verdict in &report.verdicts {
                emitter.emit_record(&VerdictRecord {
                    kind: "verdict",
                    unit: &report.unit,
                    function: &verdict.name,
                    verdict: verdict.verdict.as_str(),
                    position: JsonPosition::new(verdict.span, Some(source_map)),
                });
            }
        }
        emitter.emit_all(&report.diagnostics);
    }
    emitter.emit_summary(errors, warnings);
    emitter.flush();
}

/// The fact table keyed by qualified symbol name.
pub fn facts_by_name(program: &Program, facts: &FactTable) -> BTreeMap<String, &'static str> {
    facts
        .entries()
        .into_iter()
        .filter_map(|(symbol, verdict)| {
            let symbol = program.symbol(symbol)?;
            Some((symbol.qualified(&program.interner), verdict.as_str()))
        })
        .collect()
}

/// Write the fact table as a JSON object.
pub fn write_facts(path: &Path, program: &Program, facts: &FactTable) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &facts_by_name(program, facts))?;
    writeln!(writer)?;
    writer.flush()
}
