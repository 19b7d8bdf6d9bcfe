//! Construction API for programs.
//!
//! Front ends (the JSON loader, tests) build a [`Program`] through a
//! [`ProgramBuilder`]. Units are built one at a time with a
//! [`UnitBuilder`], which allocates nodes into the unit's arena and fills
//! in expression types from the program tables where they follow from the
//! callee.

use crate::ast::{
    AssignOp, Binding, Expr, ExprKind, Function, ResultSlot, Stmt, StmtKind, VarInfo, VarKind,
};
use crate::{
    ExprId, FileId, FuncId, FunctionSymbol, Name, Program, Span, StmtId, SymbolId, TypeData,
    TypeId, Unit, UnitArena, UnitId, VarId,
};

/// Builds a [`Program`].
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Name {
        self.program.interner.intern(s)
    }

    /// Register a source file.
    pub fn file(&mut self, path: &str, text: &str) -> FileId {
        self.program.source_map.add_file(path, text)
    }

    /// One-byte span at a 1-based position, [`Span::DUMMY`] if out of range.
    pub fn span_at(&self, file: FileId, line: u32, column: u32) -> Span {
        self.program.source_map.span_at(file, line, column)
    }

    pub fn ty(&mut self, data: TypeData) -> TypeId {
        self.program.types.intern(data)
    }

    pub fn basic(&mut self, name: &str) -> TypeId {
        let name = self.intern(name);
        self.ty(TypeData::Basic(name))
    }

    pub fn named(&mut self, name: &str, underlying: TypeId) -> TypeId {
        let name = self.intern(name);
        self.ty(TypeData::Named { name, underlying })
    }

    pub fn interface(&mut self, methods: &[&str]) -> TypeId {
        let methods = methods.iter().map(|m| self.intern(m)).collect();
        self.ty(TypeData::Interface { methods })
    }

    /// Register a function symbol.
    pub fn symbol(
        &mut self,
        package: &str,
        receiver: Option<&str>,
        name: &str,
        signature: &str,
        results: &[TypeId],
    ) -> SymbolId {
        let symbol = FunctionSymbol {
            package: self.intern(package),
            name: self.intern(name),
            receiver: receiver.map(|r| self.intern(r)),
            signature: signature.to_string(),
            results: results.to_vec(),
        };
        self.program.symbols.push(symbol)
    }

    /// Start a new unit.
    pub fn unit(&mut self, path: &str) -> UnitBuilder<'_> {
        let path = self.intern(path);
        let id = UnitId::new(u32::try_from(self.program.units.len()).unwrap_or(u32::MAX));
        UnitBuilder {
            program: &mut self.program,
            unit: Unit {
                id,
                path,
                files: Vec::new(),
                imports: Vec::new(),
                arena: UnitArena::new(),
                decls: Vec::new(),
                globals: Vec::new(),
            },
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn finish(self) -> Program {
        self.program
    }
}

/// Signature of a function to allocate.
#[derive(Clone, Debug, Default)]
pub struct FunctionSpec<'a> {
    /// Empty for literals.
    pub name: &'a str,
    pub symbol: Option<SymbolId>,
    pub parent: Option<FuncId>,
    pub params: Vec<VarId>,
    pub results: Vec<ResultSlot>,
    pub span: Span,
}

/// Builds one [`Unit`]. Call [`UnitBuilder::finish`] to add it to the
/// program.
pub struct UnitBuilder<'p> {
    program: &'p mut Program,
    unit: Unit,
}

impl UnitBuilder<'_> {
    pub fn id(&self) -> UnitId {
        self.unit.id
    }

    pub fn intern(&self, s: &str) -> Name {
        self.program.interner.intern(s)
    }

    pub fn import(&mut self, path: &str) {
        let path = self.intern(path);
        if !self.unit.imports.contains(&path) {
            self.unit.imports.push(path);
        }
    }

    pub fn add_file(&mut self, file: FileId) {
        self.unit.files.push(file);
    }

    pub fn arena(&self) -> &UnitArena {
        &self.unit.arena
    }

    pub fn ty(&mut self, data: TypeData) -> TypeId {
        self.program.types.intern(data)
    }

    /// One-byte span at a 1-based position, [`Span::DUMMY`] if out of range.
    pub fn span_at(&self, file: FileId, line: u32, column: u32) -> Span {
        self.program.source_map.span_at(file, line, column)
    }

    // ===== Variables =====

    pub fn var(&mut self, name: &str, kind: VarKind, ty: TypeId, span: Span) -> VarId {
        let name = self.intern(name);
        self.unit.arena.alloc_var(VarInfo {
            name,
            kind,
            ty,
            span,
        })
    }

    // ===== Expressions =====

    fn expr(&mut self, kind: ExprKind, ty: TypeId, span: Span) -> ExprId {
        self.unit.arena.alloc_expr(Expr { kind, span, ty })
    }

    /// Identifier with an explicit binding.
    pub fn ident(&mut self, name: &str, binding: Binding, ty: TypeId, span: Span) -> ExprId {
        let name = self.intern(name);
        self.expr(ExprKind::Ident { name, binding }, ty, span)
    }

    /// Use of a variable of this unit; takes the variable's type.
    pub fn var_ref(&mut self, var: VarId, span: Span) -> ExprId {
        let (name, ty) = self
            .unit
            .arena
            .try_var(var)
            .map_or((Name::EMPTY, TypeId::INVALID), |info| (info.name, info.ty));
        self.expr(
            ExprKind::Ident {
                name,
                binding: Binding::Var(var),
            },
            ty,
            span,
        )
    }

    /// Package qualifier identifier.
    pub fn package(&mut self, path: &str, span: Span) -> ExprId {
        let path = self.intern(path);
        self.expr(
            ExprKind::Ident {
                name: path,
                binding: Binding::Package(path),
            },
            TypeId::INVALID,
            span,
        )
    }

    fn symbol_parts(&mut self, symbol: SymbolId) -> (Name, TypeId) {
        let (name, results) = self
            .program
            .symbols
            .get(symbol)
            .map_or((Name::EMPTY, Vec::new()), |sym| (sym.name, sym.results.clone()));
        let ty = self.program.types.intern(TypeData::Func {
            params: Vec::new(),
            results,
        });
        (name, ty)
    }

    /// Unqualified reference to a package-level function.
    pub fn func_ref(&mut self, symbol: SymbolId, span: Span) -> ExprId {
        let (name, ty) = self.symbol_parts(symbol);
        self.expr(
            ExprKind::Ident {
                name,
                binding: Binding::Func(symbol),
            },
            ty,
            span,
        )
    }

    /// `base.F` where `F` denotes a function or method.
    pub fn select(&mut self, base: ExprId, symbol: SymbolId, span: Span) -> ExprId {
        let (field, ty) = self.symbol_parts(symbol);
        self.expr(
            ExprKind::Selector {
                base,
                field,
                symbol: Some(symbol),
            },
            ty,
            span,
        )
    }

    /// `base.field` for a field or an unresolved member.
    pub fn field(&mut self, base: ExprId, field: &str, ty: TypeId, span: Span) -> ExprId {
        let field = self.intern(field);
        self.expr(
            ExprKind::Selector {
                base,
                field,
                symbol: None,
            },
            ty,
            span,
        )
    }

    /// Call expression typed from the callee.
    ///
    /// The result type comes from the callee's symbol when it names one,
    /// otherwise from the callee's function type, otherwise it is invalid.
    pub fn call(&mut self, callee: ExprId, args: &[ExprId], span: Span) -> ExprId {
        let callee_expr = self.unit.arena.get_expr(callee);
        let symbol = match callee_expr.kind {
            ExprKind::Ident {
                binding: Binding::Func(symbol),
                ..
            }
            | ExprKind::Selector {
                symbol: Some(symbol),
                ..
            } => Some(symbol),
            _ => None,
        };
        let results = match symbol.and_then(|s| self.program.symbols.get(s)) {
            Some(sym) => Some(sym.results.clone()),
            None => match self.program.types.get(callee_expr.ty) {
                Some(TypeData::Func { results, .. }) => Some(results.clone()),
                _ => None,
            },
        };
        let ty = results.map_or(TypeId::INVALID, |results| {
            self.program.types.results_type(&results)
        });
        self.call_typed(callee, args, ty, span)
    }

    /// Call expression with an explicit result type.
    pub fn call_typed(&mut self, callee: ExprId, args: &[ExprId], ty: TypeId, span: Span) -> ExprId {
        let args = self.unit.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::Call { callee, args }, ty, span)
    }

    pub fn nil(&mut self, span: Span) -> ExprId {
        self.expr(ExprKind::Nil, TypeId::INVALID, span)
    }

    pub fn literal(&mut self, ty: TypeId, span: Span) -> ExprId {
        self.expr(ExprKind::Literal, ty, span)
    }

    pub fn other(&mut self, operands: &[ExprId], ty: TypeId, span: Span) -> ExprId {
        let operands = self.unit.arena.alloc_expr_list(operands.iter().copied());
        self.expr(ExprKind::Other { operands }, ty, span)
    }

    pub fn func_lit(&mut self, func: FuncId, span: Span) -> ExprId {
        let results = self
            .unit
            .arena
            .get_function(func)
            .results
            .iter()
            .map(|slot| slot.ty)
            .collect();
        let ty = self.program.types.intern(TypeData::Func {
            params: Vec::new(),
            results,
        });
        self.expr(ExprKind::FuncLit(func), ty, span)
    }

    // ===== Statements =====

    fn stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.unit.arena.alloc_stmt(Stmt { kind, span })
    }

    fn assignment(&mut self, lhs: &[ExprId], rhs: &[ExprId], op: AssignOp, span: Span) -> StmtId {
        let lhs = self.unit.arena.alloc_expr_list(lhs.iter().copied());
        let rhs = self.unit.arena.alloc_expr_list(rhs.iter().copied());
        self.stmt(StmtKind::Assign { lhs, rhs, op }, span)
    }

    /// `lhs := rhs`
    pub fn define(&mut self, lhs: &[ExprId], rhs: &[ExprId], span: Span) -> StmtId {
        self.assignment(lhs, rhs, AssignOp::Define, span)
    }

    /// `lhs = rhs`
    pub fn assign(&mut self, lhs: &[ExprId], rhs: &[ExprId], span: Span) -> StmtId {
        self.assignment(lhs, rhs, AssignOp::Assign, span)
    }

    /// `var names = values`
    pub fn var_decl(&mut self, names: &[ExprId], values: &[ExprId], span: Span) -> StmtId {
        let names = self.unit.arena.alloc_expr_list(names.iter().copied());
        let values = self.unit.arena.alloc_expr_list(values.iter().copied());
        self.stmt(StmtKind::VarDecl { names, values }, span)
    }

    pub fn ret(&mut self, results: &[ExprId], span: Span) -> StmtId {
        let results = self.unit.arena.alloc_expr_list(results.iter().copied());
        self.stmt(StmtKind::Return { results }, span)
    }

    pub fn expr_stmt(&mut self, expr: ExprId, span: Span) -> StmtId {
        self.stmt(StmtKind::Expr(expr), span)
    }

    pub fn block(&mut self, stmts: &[StmtId], span: Span) -> StmtId {
        let body = self.unit.arena.alloc_stmt_list(stmts.iter().copied());
        self.stmt(StmtKind::Block(body), span)
    }

    pub fn if_stmt(
        &mut self,
        init: Option<StmtId>,
        cond: ExprId,
        then_branch: &[StmtId],
        else_branch: Option<StmtId>,
        span: Span,
    ) -> StmtId {
        let then_branch = self.unit.arena.alloc_stmt_list(then_branch.iter().copied());
        self.stmt(
            StmtKind::If {
                init,
                cond,
                then_branch,
                else_branch,
            },
            span,
        )
    }

    pub fn loop_stmt(&mut self, init: Option<StmtId>, body: &[StmtId], span: Span) -> StmtId {
        let body = self.unit.arena.alloc_stmt_list(body.iter().copied());
        self.stmt(StmtKind::Loop { init, body }, span)
    }

    /// `switch`; each case should be a block statement.
    pub fn switch_stmt(
        &mut self,
        init: Option<StmtId>,
        tag: Option<ExprId>,
        cases: &[StmtId],
        span: Span,
    ) -> StmtId {
        let cases = self.unit.arena.alloc_stmt_list(cases.iter().copied());
        self.stmt(StmtKind::Switch { init, tag, cases }, span)
    }

    // ===== Functions =====

    /// Allocate a function signature. Attach its body with
    /// [`UnitBuilder::set_body`].
    pub fn function(&mut self, spec: FunctionSpec<'_>) -> FuncId {
        let name = self.intern(spec.name);
        self.unit.arena.alloc_function(Function {
            name,
            symbol: spec.symbol,
            parent: spec.parent,
            params: spec.params,
            results: spec.results,
            body: None,
            span: spec.span,
        })
    }

    pub fn set_body(&mut self, func: FuncId, stmts: &[StmtId]) {
        let body = self.unit.arena.alloc_stmt_list(stmts.iter().copied());
        self.unit.arena.get_function_mut(func).body = Some(body);
    }

    /// Mark a function as a top-level declaration of this unit.
    pub fn declare(&mut self, func: FuncId) {
        self.unit.decls.push(func);
    }

    /// Record a package-level variable declaration.
    pub fn global(&mut self, stmt: StmtId) {
        self.unit.globals.push(stmt);
    }

    /// Add the unit to the program.
    pub fn finish(self) -> UnitId {
        let id = self.unit.id;
        self.program.units.push(self.unit);
        id
    }
}
