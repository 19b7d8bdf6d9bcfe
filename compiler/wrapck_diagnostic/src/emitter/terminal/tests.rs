use pretty_assertions::assert_eq;
use wrapck_ir::Span;

use super::*;
use crate::ErrorCode;

const MAIN_GO: &str = "package main\n\nfunc do() error {\n\t_, err := json.Marshal(struct{}{})\n\treturn err\n}\n";

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message("error returned from an external/unanalyzed unit is not wrapped")
        .with_label(Span::new(10, 15), "returned here without wrapping")
        .with_secondary_label(Span::new(0, 5), "error produced by this call")
        .with_note("`encoding/json` is outside the analysis scope")
        .with_suggestion("wrap it with `errors.WithStack`")
}

fn render(diag: &Diagnostic, mode: ColorMode, is_tty: bool) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, is_tty);
    emitter.emit(diag);
    emitter.flush();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_terminal_emitter_no_color() {
    let text = render(&sample_diagnostic(), ColorMode::Never, false);
    assert!(text.contains("error[E1002]: error returned from an external/unanalyzed unit"));
    assert!(text.contains("--> 10..15: returned here without wrapping"));
    assert!(text.contains("0..5: error produced by this call"));
    assert!(text.contains("= note: `encoding/json`"));
    assert!(text.contains("= help: wrap it"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_terminal_emitter_with_color() {
    let text = render(&sample_diagnostic(), ColorMode::Always, false);
    assert!(text.contains("\x1b["));
    assert!(text.contains("E1002"));
}

#[test]
fn test_source_map_locations_and_snippet() {
    let mut map = SourceMap::new();
    let file = map.add_file("main/main.go", MAIN_GO);
    let ret = map.span_at(file, 5, 2);
    let call = map.span_at(file, 4, 12);
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("error returned from an external/unanalyzed unit is not wrapped")
        .with_label(ret, "returned here without wrapping")
        .with_secondary_label(call, "error produced by this call");

    let mut output = Vec::new();
    let mut emitter =
        TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false).with_source_map(&map);
    emitter.emit(&diag);
    emitter.flush();
    let text = String::from_utf8(output).unwrap();

    let expected = "\
error[E1002]: error returned from an external/unanalyzed unit is not wrapped
  --> main/main.go:5:2: returned here without wrapping
   | \treturn err
      main/main.go:4:12: error produced by this call

";
    assert_eq!(text, expected);
}

#[test]
fn test_emit_all() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    let diagnostics = vec![
        Diagnostic::error(ErrorCode::E1001).with_message("error 1"),
        Diagnostic::error(ErrorCode::E1003).with_message("error 2"),
    ];
    emitter.emit_all(&diagnostics);
    emitter.flush();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("error 1"));
    assert!(text.contains("error 2"));
}

fn summary(errors: usize, warnings: usize) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
    emitter.emit_summary(errors, warnings);
    emitter.flush();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_emit_summary() {
    assert_eq!(summary(0, 0), "");
    assert_eq!(summary(1, 0), "error: found 1 unwrapped error\n");
    assert_eq!(summary(2, 1), "error: found 2 unwrapped errors; 1 warning emitted\n");
    assert_eq!(summary(0, 3), "warning: 3 warnings emitted\n");
}

#[test]
fn test_color_modes() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}
