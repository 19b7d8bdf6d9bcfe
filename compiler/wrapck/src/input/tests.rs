use pretty_assertions::assert_eq;
use wrapck_ir::{Binding, ExprKind, Program, StmtKind, TypeId};

use super::*;

const SIMPLE: &str = r#"{
  "files": [{"path": "a/a.go", "lines": [
    "package a",
    "",
    "func A() error {",
    "\treturn errors.New(\"x\")",
    "}"
  ]}],
  "symbols": [
    {"package": "errors", "name": "New",
     "signature": "func errors.New(text string) error", "results": ["error"]}
  ],
  "units": [{
    "path": "svc/a",
    "files": ["a/a.go"],
    "imports": ["errors"],
    "functions": [{
      "name": "A", "at": [3, 1],
      "results": [{"type": "error"}],
      "body": [{"kind": "return", "at": [4, 2], "results": [
        {"kind": "call", "at": [4, 9],
         "callee": {"kind": "select", "base": {"kind": "package", "path": "errors"},
                    "symbol": "errors.New"},
         "args": [{"kind": "literal", "type": "string"}]}
      ]}]
    }]
  }]
}"#;

fn first_return(program: &Program) -> &wrapck_ir::Stmt {
    let unit = &program.units[0];
    let func = unit.arena.get_function(unit.decls[0]);
    let body = unit.arena.get_stmt_list(func.body.unwrap());
    unit.arena.get_stmt(body[0])
}

#[test]
fn lowers_functions_with_positions() {
    let program = parse(SIMPLE).unwrap();
    assert_eq!(program.units.len(), 1);
    let unit = program.unit_by_path("svc/a").unwrap();
    assert_eq!(unit.decls.len(), 1);
    assert_eq!(unit.imports.len(), 1);

    let ret = first_return(&program);
    let location = program.source_map.locate(ret.span.start).unwrap();
    assert_eq!(location.to_string(), "a/a.go:4:2");

    let StmtKind::Return { results } = ret.kind else {
        panic!("expected a return, got {:?}", ret.kind);
    };
    let call = unit.arena.get_expr(unit.arena.get_expr_list(results)[0]);
    assert!(matches!(call.kind, ExprKind::Call { .. }));
    assert_eq!(call.ty, TypeId::ERROR);
}

#[test]
fn declared_functions_get_a_symbol() {
    let program = parse(SIMPLE).unwrap();
    let unit = &program.units[0];
    let func = unit.arena.get_function(unit.decls[0]);
    let symbol = program.symbol(func.symbol.unwrap()).unwrap();
    assert_eq!(symbol.signature, "func svc/a.A() error");
    assert_eq!(symbol.results, vec![TypeId::ERROR]);
}

#[test]
fn synthesized_signatures() {
    let func = FunctionDump {
        name: "Get".to_string(),
        receiver: Some("Store".to_string()),
        results: vec![
            ResultDump {
                ty: "[]byte".to_string(),
                var: None,
            },
            ResultDump {
                ty: "error".to_string(),
                var: None,
            },
        ],
        ..FunctionDump::default()
    };
    assert_eq!(
        synthesize_signature("svc/db", &func),
        "func (svc/db.Store).Get() ([]byte, error)"
    );
    assert_eq!(symbol_key("svc/db", Some("Store"), "Get"), "svc/db.Store.Get");
    assert_eq!(symbol_key("svc/db", None, "Open"), "svc/db.Open");
}

#[test]
fn unknown_references_degrade() {
    let text = r#"{
      "units": [{
        "path": "svc/a",
        "functions": [{
          "name": "A",
          "results": [{"type": "error"}],
          "body": [{"kind": "return", "results": [
            {"kind": "call", "callee": {"kind": "func", "symbol": "svc/a.Missing"},
             "type": "Mystery"},
            {"kind": "var", "var": "ghost"}
          ]}]
        }]
      }]
    }"#;
    let program = parse(text).unwrap();
    let unit = &program.units[0];
    let StmtKind::Return { results } = first_return(&program).kind else {
        panic!("expected a return");
    };
    let results = unit.arena.get_expr_list(results);

    let call = unit.arena.get_expr(results[0]);
    assert_eq!(call.ty, TypeId::INVALID);
    let ExprKind::Call { callee, .. } = call.kind else {
        panic!("expected a call");
    };
    assert!(matches!(
        unit.arena.get_expr(callee).kind,
        ExprKind::Ident {
            binding: Binding::Unresolved,
            ..
        }
    ));
    assert!(matches!(
        unit.arena.get_expr(results[1]).kind,
        ExprKind::Ident {
            binding: Binding::Unresolved,
            ..
        }
    ));
    // no file: positions are dummy
    assert!(call.span.is_dummy());
}

#[test]
fn declared_types_resolve() {
    let text = r#"{
      "types": [
        {"kind": "interface", "name": "svc/a.Store", "methods": ["Get"]},
        {"kind": "struct", "name": "svc/a.Impl"},
        {"kind": "named", "name": "svc/a.Loop", "underlying": "svc/a.Loop"}
      ],
      "units": [{
        "path": "svc/a",
        "vars": [
          {"id": "s", "kind": "param", "type": "svc/a.Store"},
          {"id": "p", "kind": "param", "type": "*svc/a.Impl"},
          {"id": "l", "type": "svc/a.Loop"},
          {"id": "m", "type": "map[string]int"}
        ]
      }]
    }"#;
    let program = parse(text).unwrap();
    let unit = &program.units[0];
    let ty = |index: u32| unit.arena.get_var(wrapck_ir::VarId::new(index)).ty;

    assert!(program.types.is_interface(ty(0)));
    assert!(!program.types.is_interface(ty(1)));
    assert_ne!(ty(1), TypeId::INVALID);
    assert!(matches!(
        program.types.get(ty(2)),
        Some(wrapck_ir::TypeData::Named {
            underlying: TypeId::INVALID,
            ..
        })
    ));
    assert!(matches!(
        program.types.get(ty(3)),
        Some(wrapck_ir::TypeData::Basic(_))
    ));
}

#[test]
fn duplicate_units_are_rejected() {
    let text = r#"{"units": [{"path": "svc/a"}, {"path": "svc/a"}]}"#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, LoadError::Malformed(_)));
    assert!(err.to_string().contains("svc/a"));
}

#[test]
fn duplicate_var_ids_are_rejected() {
    let text = r#"{"units": [{"path": "svc/a", "vars": [
        {"id": "x", "type": "int"}, {"id": "x", "type": "error"}
    ]}]}"#;
    assert!(matches!(parse(text), Err(LoadError::Malformed(_))));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = parse(r#"{"unitz": []}"#).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}
