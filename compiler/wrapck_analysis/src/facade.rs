//! Query surface over the front end's output.
//!
//! Everything the analysis asks of types and symbols goes through
//! [`Facade`]. Lookups that can fail on a malformed front end return
//! `Option`, and the failure is logged rather than propagated.

use tracing::warn;
use wrapck_ir::{
    Binding, Expr, ExprId, ExprKind, FuncId, Function, FunctionSymbol, Name, Program, SymbolId,
    TypeId, Unit, UnitArena, VarId,
};

/// Read-only view of one unit inside a program.
#[derive(Copy, Clone)]
pub struct Facade<'a> {
    program: &'a Program,
    unit: &'a Unit,
}

impl<'a> Facade<'a> {
    pub fn new(program: &'a Program, unit: &'a Unit) -> Self {
        Facade { program, unit }
    }

    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn unit(&self) -> &'a Unit {
        self.unit
    }

    pub fn arena(&self) -> &'a UnitArena {
        &self.unit.arena
    }

    pub fn expr(&self, id: ExprId) -> &'a Expr {
        self.unit.arena.get_expr(id)
    }

    pub fn function(&self, id: FuncId) -> &'a Function {
        self.unit.arena.get_function(id)
    }

    pub fn name(&self, name: Name) -> &'static str {
        self.program.interner.lookup(name)
    }

    /// Import path of the unit being analyzed.
    pub fn unit_path(&self) -> &'static str {
        self.name(self.unit.path)
    }

    pub fn type_of(&self, id: ExprId) -> TypeId {
        self.expr(id).ty
    }

    /// Exactly the predeclared `error` type.
    pub fn is_error_type(&self, ty: TypeId) -> bool {
        self.program.types.is_error(ty)
    }

    pub fn is_error_expr(&self, id: ExprId) -> bool {
        self.is_error_type(self.type_of(id))
    }

    /// Whether the expression is a multi-value with an `error` element.
    pub fn tuple_has_error(&self, id: ExprId) -> bool {
        !self
            .program
            .types
            .tuple_error_positions(self.type_of(id))
            .is_empty()
    }

    /// Function symbol a call expression invokes.
    ///
    /// `None` for calls through function values, builtins, conversions, and
    /// symbol ids the front end left dangling.
    pub fn callee_symbol(&self, call: ExprId) -> Option<SymbolId> {
        let ExprKind::Call { callee, .. } = self.expr(call).kind else {
            return None;
        };
        let symbol = match self.expr(callee).kind {
            ExprKind::Ident {
                binding: Binding::Func(symbol),
                ..
            }
            | ExprKind::Selector {
                symbol: Some(symbol),
                ..
            } => symbol,
            _ => return None,
        };
        if self.program.symbols.get(symbol).is_none() {
            warn!(?symbol, unit = self.unit_path(), "call references an unknown symbol");
            return None;
        }
        Some(symbol)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&'a FunctionSymbol> {
        self.program.symbols.get(id)
    }

    /// Whether a call dispatches through an interface.
    ///
    /// True when the callee is `x.M` and the underlying type of `x` is an
    /// interface. Package qualifiers are not receivers.
    pub fn receiver_is_interface(&self, call: ExprId) -> bool {
        let ExprKind::Call { callee, .. } = self.expr(call).kind else {
            return false;
        };
        let ExprKind::Selector { base, .. } = self.expr(callee).kind else {
            return false;
        };
        let receiver = self.expr(base);
        if let ExprKind::Ident {
            binding: Binding::Package(_),
            ..
        } = receiver.kind
        {
            return false;
        }
        self.program.types.is_interface(receiver.ty)
    }

    /// Import path of the package declaring `symbol`.
    pub fn symbol_scope(&self, symbol: SymbolId) -> Option<&'static str> {
        self.symbol(symbol).map(|sym| self.name(sym.package))
    }

    /// Declared variable an identifier expression refers to.
    pub fn var_of(&self, id: ExprId) -> Option<VarId> {
        match self.expr(id).kind {
            ExprKind::Ident {
                binding: Binding::Var(var),
                ..
            } if self.unit.arena.try_var(var).is_some() => Some(var),
            ExprKind::Ident {
                binding: Binding::Var(var),
                ..
            } => {
                warn!(?var, unit = self.unit_path(), "identifier bound to an unknown variable");
                None
            }
            _ => None,
        }
    }

    /// Display name of a symbol, `pkg.Name` or `pkg.(Recv).Name`.
    pub fn qualified(&self, symbol: SymbolId) -> Option<String> {
        self.symbol(symbol)
            .map(|sym| sym.qualified(&self.program.interner))
    }
}
