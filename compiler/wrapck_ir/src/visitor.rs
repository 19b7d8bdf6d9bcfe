//! Tree visitor.
//!
//! Default implementations call `walk_*` functions that traverse children.
//! Override `visit_*` methods to add behavior at specific nodes. Function
//! literals are reached through [`Visitor::visit_func_lit`]; override it to
//! stop descent at literal boundaries.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast UnitArena) {
//!         if let ExprKind::Call { .. } = expr.kind {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr, arena);
//!     }
//! }
//! ```

use crate::ast::{Expr, ExprKind, Function, Stmt, StmtKind};
use crate::{ExprId, ExprRange, FuncId, StmtId, StmtRange, UnitArena};

/// Tree visitor trait.
///
/// The visitor can mutate its own state during traversal; the tree itself
/// remains immutable.
pub trait Visitor<'ast> {
    /// Visit a function declaration or literal.
    fn visit_function(&mut self, function: &'ast Function, arena: &'ast UnitArena) {
        walk_function(self, function, arena);
    }

    /// Visit a function literal by ID.
    fn visit_func_lit(&mut self, id: FuncId, arena: &'ast UnitArena) {
        self.visit_function(arena.get_function(id), arena);
    }

    /// Visit a statement by ID.
    fn visit_stmt_id(&mut self, id: StmtId, arena: &'ast UnitArena) {
        self.visit_stmt(arena.get_stmt(id), arena);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast UnitArena) {
        walk_stmt(self, stmt, arena);
    }

    /// Visit an expression by ID.
    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast UnitArena) {
        self.visit_expr(arena.get_expr(id), arena);
    }

    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast UnitArena) {
        walk_expr(self, expr, arena);
    }
}

/// Walk a function body.
pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    function: &'ast Function,
    arena: &'ast UnitArena,
) {
    if let Some(body) = function.body {
        walk_stmt_list(visitor, body, arena);
    }
}

pub fn walk_stmt_list<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    range: StmtRange,
    arena: &'ast UnitArena,
) {
    for &id in arena.get_stmt_list(range) {
        visitor.visit_stmt_id(id, arena);
    }
}

pub fn walk_expr_list<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    range: ExprRange,
    arena: &'ast UnitArena,
) {
    for &id in arena.get_expr_list(range) {
        visitor.visit_expr_id(id, arena);
    }
}

/// Walk a statement's children.
pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    stmt: &'ast Stmt,
    arena: &'ast UnitArena,
) {
    match &stmt.kind {
        StmtKind::Assign { lhs, rhs, .. } => {
            walk_expr_list(visitor, *lhs, arena);
            walk_expr_list(visitor, *rhs, arena);
        }
        StmtKind::VarDecl { names, values } => {
            walk_expr_list(visitor, *names, arena);
            walk_expr_list(visitor, *values, arena);
        }
        StmtKind::Return { results } => walk_expr_list(visitor, *results, arena),
        StmtKind::Expr(expr) => visitor.visit_expr_id(*expr, arena),
        StmtKind::Block(body) => walk_stmt_list(visitor, *body, arena),
        StmtKind::If {
            init,
            cond,
            then_branch,
            else_branch,
        } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            visitor.visit_expr_id(*cond, arena);
            walk_stmt_list(visitor, *then_branch, arena);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt_id(*else_branch, arena);
            }
        }
        StmtKind::Loop { init, body } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            walk_stmt_list(visitor, *body, arena);
        }
        StmtKind::Switch { init, tag, cases } => {
            if let Some(init) = init {
                visitor.visit_stmt_id(*init, arena);
            }
            if let Some(tag) = tag {
                visitor.visit_expr_id(*tag, arena);
            }
            walk_stmt_list(visitor, *cases, arena);
        }
    }
}

/// Walk an expression's children.
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast UnitArena,
) {
    match &expr.kind {
        ExprKind::Ident { .. } | ExprKind::Nil | ExprKind::Literal => {}
        ExprKind::Selector { base, .. } => visitor.visit_expr_id(*base, arena),
        ExprKind::Call { callee, args } => {
            visitor.visit_expr_id(*callee, arena);
            walk_expr_list(visitor, *args, arena);
        }
        ExprKind::FuncLit(func) => visitor.visit_func_lit(*func, arena),
        ExprKind::Other { operands } => walk_expr_list(visitor, *operands, arena),
    }
}

#[cfg(test)]
mod tests;
