//! Flat syntax tree handed over by the front end.
//!
//! Nodes live in a [`UnitArena`](crate::UnitArena) and reference their
//! children by id. Every expression already carries its resolved type and
//! every identifier its binding, so nothing downstream re-runs name
//! resolution or type inference.
//!
//! Only the constructs error flow cares about are modelled precisely:
//! identifiers, selectors, calls, function literals, assignments and
//! returns. Everything else collapses into [`ExprKind::Other`] or a nested
//! block so traversal still reaches embedded calls and literals.

use crate::{ExprId, ExprRange, FuncId, Name, Span, StmtId, StmtRange, SymbolId, TypeId, VarId};

/// What an identifier refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A variable declared in this unit.
    Var(VarId),
    /// A package-level function.
    Func(SymbolId),
    /// An imported package qualifier.
    Package(Name),
    /// Anything the front end could not resolve (blank identifier, builtin,
    /// cross-unit variable).
    Unresolved,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ident {
        name: Name,
        binding: Binding,
    },
    /// `base.field`: qualified function, method value or field access.
    Selector {
        base: ExprId,
        field: Name,
        /// Set when the selector denotes a function or method.
        symbol: Option<SymbolId>,
    },
    Call {
        callee: ExprId,
        args: ExprRange,
    },
    FuncLit(FuncId),
    Nil,
    Literal,
    /// Any other expression; operands are still traversed.
    Other {
        operands: ExprRange,
    },
}

/// Expression node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Static type, [`TypeId::INVALID`] when untyped.
    pub ty: TypeId,
}

/// Assignment flavour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `:=`
    Define,
    /// `=`
    Assign,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    Assign {
        lhs: ExprRange,
        rhs: ExprRange,
        op: AssignOp,
    },
    /// `var a, b T = x, y`. `names` are identifier expressions.
    VarDecl {
        names: ExprRange,
        values: ExprRange,
    },
    Return {
        results: ExprRange,
    },
    Expr(ExprId),
    Block(StmtRange),
    If {
        init: Option<StmtId>,
        cond: ExprId,
        then_branch: StmtRange,
        else_branch: Option<StmtId>,
    },
    /// `for` and `range` loops.
    Loop {
        init: Option<StmtId>,
        body: StmtRange,
    },
    /// `switch`/`select`; each case is a [`StmtKind::Block`].
    Switch {
        init: Option<StmtId>,
        tag: Option<ExprId>,
        cases: StmtRange,
    },
}

/// Statement node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// One declared result of a function.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResultSlot {
    pub ty: TypeId,
    /// Set for named results.
    pub var: Option<VarId>,
}

impl ResultSlot {
    pub const fn unnamed(ty: TypeId) -> Self {
        ResultSlot { ty, var: None }
    }

    pub const fn named(ty: TypeId, var: VarId) -> Self {
        ResultSlot { ty, var: Some(var) }
    }
}

/// A function declaration, method declaration or function literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    /// Declared name; [`Name::EMPTY`] for literals.
    pub name: Name,
    /// Symbol of a declared function. Literals have none.
    pub symbol: Option<SymbolId>,
    /// Enclosing function of a literal.
    pub parent: Option<FuncId>,
    pub params: Vec<VarId>,
    pub results: Vec<ResultSlot>,
    /// `None` for bodiless declarations.
    pub body: Option<StmtRange>,
    pub span: Span,
}

impl Function {
    /// Whether any declared result is exactly `error`.
    pub fn returns_error(&self, types: &crate::TypeTable) -> bool {
        self.results.iter().any(|slot| types.is_error(slot.ty))
    }

    /// Whether this is a function literal.
    pub fn is_literal(&self) -> bool {
        self.symbol.is_none() && self.name == Name::EMPTY
    }
}

/// Variable kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Param,
    /// Named result.
    Result,
    Local,
    /// Package-level variable.
    Global,
}

/// Declaration-site information of a variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VarInfo {
    pub name: Name,
    pub kind: VarKind,
    pub ty: TypeId,
    pub span: Span,
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ResultSlot, VarInfo};
    crate::static_assert_size!(ResultSlot, 12);
    crate::static_assert_size!(VarInfo, 20);
}
