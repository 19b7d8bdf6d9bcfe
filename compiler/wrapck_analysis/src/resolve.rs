//! Definition resolution.
//!
//! Maps each error-typed variable of a unit to the assignments that give it
//! a value produced by a call. Identity is the declaration site
//! ([`VarId`]); two variables that share a name never alias.
//!
//! Qualifying statements:
//! - `err := f()` and `err = f()`
//! - `var err = f()` and `var err error = f()`
//!
//! A declaration without initializer, or any right-hand side that is not a
//! call, never qualifies.

use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use wrapck_ir::visitor::{walk_stmt, Visitor};
use wrapck_ir::{ExprId, ExprKind, ExprRange, Span, Stmt, StmtKind, UnitArena, VarId};

use crate::Facade;

/// One qualifying assignment to a variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// Span of the assignment statement.
    pub span: Span,
    /// The call whose result is assigned.
    pub call: ExprId,
    /// The identifier on the left-hand side.
    pub target: ExprId,
}

/// All qualifying definitions of a unit, keyed by variable.
#[derive(Debug, Default)]
pub struct DefinitionIndex {
    defs: FxHashMap<VarId, Vec<Definition>>,
}

impl DefinitionIndex {
    /// Index every assignment in the unit, including those inside function
    /// literals and package-level declarations.
    #[instrument(level = "debug", skip_all, fields(unit = facade.unit_path()))]
    pub fn build(facade: &Facade<'_>) -> Self {
        let mut collector = DefinitionCollector {
            facade: *facade,
            defs: FxHashMap::default(),
        };
        let arena = facade.arena();
        for &decl in &facade.unit().decls {
            collector.visit_function(arena.get_function(decl), arena);
        }
        for &global in &facade.unit().globals {
            collector.visit_stmt_id(global, arena);
        }

        let mut defs = collector.defs;
        for list in defs.values_mut() {
            list.sort_by_key(|def| (def.span.start, def.target));
            list.dedup();
        }
        debug!(variables = defs.len(), "definitions indexed");
        DefinitionIndex { defs }
    }

    /// Qualifying definitions of `var`, ordered by position.
    pub fn resolve(&self, var: VarId) -> &[Definition] {
        self.defs.get(&var).map_or(&[], Vec::as_slice)
    }

    /// Number of variables with at least one definition.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

struct DefinitionCollector<'a> {
    facade: Facade<'a>,
    defs: FxHashMap<VarId, Vec<Definition>>,
}

impl DefinitionCollector<'_> {
    fn record(&mut self, stmt: &Stmt, lhs: ExprRange, rhs: ExprRange) {
        let arena = self.facade.arena();
        let targets = arena.get_expr_list(lhs);
        let values = arena.get_expr_list(rhs);
        for (index, &target) in targets.iter().enumerate() {
            if !self.facade.is_error_expr(target) {
                continue;
            }
            let Some(var) = self.facade.var_of(target) else {
                continue;
            };
            // `a, err := f(), g()` pairs by index; `v, err := f()` uses the single call.
            let value = if targets.len() == values.len() {
                values.get(index)
            } else if values.len() == 1 {
                values.first()
            } else {
                None
            };
            let Some(&value) = value else {
                continue;
            };
            if matches!(self.facade.expr(value).kind, ExprKind::Call { .. }) {
                self.defs.entry(var).or_default().push(Definition {
                    span: stmt.span,
                    call: value,
                    target,
                });
            }
        }
    }
}

impl<'ast> Visitor<'ast> for DefinitionCollector<'_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast UnitArena) {
        match stmt.kind {
            StmtKind::Assign { lhs, rhs, .. } => self.record(stmt, lhs, rhs),
            StmtKind::VarDecl { names, values } => self.record(stmt, names, values),
            _ => {}
        }
        walk_stmt(self, stmt, arena);
    }
}
