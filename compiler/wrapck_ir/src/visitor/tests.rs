use super::*;
use crate::{FunctionSpec, ProgramBuilder, ResultSlot, Span, TypeId, VarKind};

#[derive(Default)]
struct CountCalls {
    calls: usize,
    literals: usize,
}

impl<'ast> Visitor<'ast> for CountCalls {
    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast UnitArena) {
        if let ExprKind::Call { .. } = expr.kind {
            self.calls += 1;
        }
        walk_expr(self, expr, arena);
    }

    fn visit_func_lit(&mut self, id: FuncId, arena: &'ast UnitArena) {
        self.literals += 1;
        self.visit_function(arena.get_function(id), arena);
    }
}

/// Calls inside a literal are only counted when the visitor descends.
struct Shallow(usize);

impl<'ast> Visitor<'ast> for Shallow {
    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast UnitArena) {
        if let ExprKind::Call { .. } = expr.kind {
            self.0 += 1;
        }
        walk_expr(self, expr, arena);
    }

    fn visit_func_lit(&mut self, _id: FuncId, _arena: &'ast UnitArena) {}
}

#[test]
fn walks_nested_statements_and_literals() {
    let sp = |n: u32| Span::new(n, n + 1);
    let mut pb = ProgramBuilder::new();
    let foo = pb.symbol("a", None, "foo", "func a.foo() error", &[TypeId::ERROR]);
    let mut ub = pb.unit("a");

    let outer = ub.function(FunctionSpec {
        name: "Outer",
        results: vec![ResultSlot::unnamed(TypeId::ERROR)],
        ..FunctionSpec::default()
    });
    let lit = ub.function(FunctionSpec {
        parent: Some(outer),
        results: vec![ResultSlot::unnamed(TypeId::ERROR)],
        ..FunctionSpec::default()
    });

    // func() error { return foo() }
    let f1 = ub.func_ref(foo, sp(1));
    let c1 = ub.call(f1, &[], sp(2));
    let r1 = ub.ret(&[c1], sp(3));
    ub.set_body(lit, &[r1]);

    // err := foo(); if err != nil { for { g := func...; g() } }; switch { case: return err }
    let err = ub.var("err", VarKind::Local, TypeId::ERROR, sp(4));
    let lhs = ub.var_ref(err, sp(4));
    let f2 = ub.func_ref(foo, sp(5));
    let c2 = ub.call(f2, &[], sp(6));
    let def = ub.define(&[lhs], &[c2], sp(4));

    let lit_expr = ub.func_lit(lit, sp(7));
    let lit_ty = ub.arena().get_expr(lit_expr).ty;
    let g = ub.var("g", VarKind::Local, lit_ty, sp(8));
    let g_lhs = ub.var_ref(g, sp(8));
    let g_def = ub.define(&[g_lhs], &[lit_expr], sp(8));
    let g_use = ub.var_ref(g, sp(9));
    let c3 = ub.call(g_use, &[], sp(10));
    let c3_stmt = ub.expr_stmt(c3, sp(10));
    let lp = ub.loop_stmt(None, &[g_def, c3_stmt], sp(11));

    let err_use = ub.var_ref(err, sp(12));
    let nil = ub.nil(sp(13));
    let cond = ub.other(&[err_use, nil], TypeId::INVALID, sp(12));
    let iff = ub.if_stmt(None, cond, &[lp], None, sp(12));

    let err_ret = ub.var_ref(err, sp(14));
    let r2 = ub.ret(&[err_ret], sp(14));
    let case = ub.block(&[r2], sp(14));
    let sw = ub.switch_stmt(None, None, &[case], sp(15));
    ub.set_body(outer, &[def, iff, sw]);
    ub.declare(outer);
    ub.finish();

    let program = pb.finish();
    let unit = &program.units[0];
    let function = unit.arena.get_function(outer);

    let mut deep = CountCalls::default();
    deep.visit_function(function, &unit.arena);
    assert_eq!(deep.calls, 3);
    assert_eq!(deep.literals, 1);

    let mut shallow = Shallow(0);
    shallow.visit_function(function, &unit.arena);
    assert_eq!(shallow.0, 2);
}
