//! Arena allocation for a unit's flat tree.
//!
//! All expressions, statements, functions and variables of one unit sit in
//! contiguous vectors. Child lists are ranges into `expr_lists` and
//! `stmt_lists`.

use crate::ast::{Expr, Function, Stmt, VarInfo};
use crate::{ExprId, ExprRange, FuncId, StmtId, StmtRange, VarId};

fn next_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena exceeded u32::MAX entries"))
}

/// Contiguous storage for one unit.
#[derive(Clone, Debug, Default)]
pub struct UnitArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    functions: Vec<Function>,
    vars: Vec<VarInfo>,
    /// Flattened expression lists (call args, assignment sides, results).
    expr_lists: Vec<ExprId>,
    /// Flattened statement lists (block bodies).
    stmt_lists: Vec<StmtId>,
}

impl UnitArena {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate an expression list, return its range.
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = next_index(self.expr_lists.len());
        self.expr_lists.extend(ids);
        let len = next_index(self.expr_lists.len()) - start;
        ExprRange::new(start, len)
    }

    /// Get an expression list.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // ===== Statements =====

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Get statement by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = next_index(self.stmt_lists.len());
        self.stmt_lists.extend(ids);
        let len = next_index(self.stmt_lists.len()) - start;
        StmtRange::new(start, len)
    }

    /// Get a statement list.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    // ===== Functions =====

    pub fn alloc_function(&mut self, function: Function) -> FuncId {
        let id = FuncId::new(next_index(self.functions.len()));
        self.functions.push(function);
        id
    }

    /// Get function by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_function(&self, id: FuncId) -> &Function {
        &self.functions[id.index()]
    }

    /// Mutable access, used to attach a body after the signature is known.
    #[inline]
    #[track_caller]
    pub fn get_function_mut(&mut self, id: FuncId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    // ===== Variables =====

    pub fn alloc_var(&mut self, var: VarInfo) -> VarId {
        let id = VarId::new(next_index(self.vars.len()));
        self.vars.push(var);
        id
    }

    /// Get variable by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_var(&self, id: VarId) -> &VarInfo {
        &self.vars[id.index()]
    }

    /// Variable lookup for ids that did not come from this arena's builder.
    pub fn try_var(&self, id: VarId) -> Option<&VarInfo> {
        self.vars.get(id.index())
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }
}
