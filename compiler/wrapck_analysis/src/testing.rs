//! Fixtures shared by the unit tests.

use wrapck_ir::{
    ExprId, FuncId, FunctionSpec, ProgramBuilder, ResultSlot, Span, SymbolId, TypeId,
    UnitBuilder,
};

use crate::WrapPolicy;

pub(crate) const ERRORS: &str = "github.com/cockroachdb/errors";
pub(crate) const WITH_STACK: &str = "func github.com/cockroachdb/errors.WithStack(err error) error";
pub(crate) const ERRORS_NEW: &str = "func github.com/cockroachdb/errors.New(msg string) error";
pub(crate) const MARSHAL: &str = "func encoding/json.Marshal(v any) ([]byte, error)";

pub(crate) fn policy(scope: &str) -> WrapPolicy {
    WrapPolicy::new(scope, [WITH_STACK]).unwrap()
}

/// Hands out distinct, increasing spans.
#[derive(Default)]
pub(crate) struct Spans {
    next: u32,
}

impl Spans {
    pub(crate) fn next(&mut self) -> Span {
        self.next += 10;
        Span::new(self.next, self.next + 5)
    }
}

/// Symbols of packages outside every test scope.
pub(crate) struct Library {
    pub with_stack: SymbolId,
    pub errors_new: SymbolId,
    pub marshal: SymbolId,
}

pub(crate) fn library(pb: &mut ProgramBuilder) -> Library {
    let bytes = pb.basic("[]byte");
    Library {
        with_stack: pb.symbol(ERRORS, None, "WithStack", WITH_STACK, &[TypeId::ERROR]),
        errors_new: pb.symbol(ERRORS, None, "New", ERRORS_NEW, &[TypeId::ERROR]),
        marshal: pb.symbol("encoding/json", None, "Marshal", MARSHAL, &[bytes, TypeId::ERROR]),
    }
}

/// Symbol for `func pkg.name() error`.
pub(crate) fn error_symbol(pb: &mut ProgramBuilder, package: &str, name: &str) -> SymbolId {
    let signature = format!("func {package}.{name}() error");
    pb.symbol(package, None, name, &signature, &[TypeId::ERROR])
}

/// `pkg.F(args)`
pub(crate) fn call_pkg(
    ub: &mut UnitBuilder<'_>,
    package: &str,
    symbol: SymbolId,
    args: &[ExprId],
    spans: &mut Spans,
) -> ExprId {
    let base = ub.package(package, spans.next());
    let callee = ub.select(base, symbol, spans.next());
    ub.call(callee, args, spans.next())
}

/// `F(args)` for a function of the same package.
pub(crate) fn call_local(
    ub: &mut UnitBuilder<'_>,
    symbol: SymbolId,
    args: &[ExprId],
    spans: &mut Spans,
) -> ExprId {
    let callee = ub.func_ref(symbol, spans.next());
    ub.call(callee, args, spans.next())
}

/// A declared `func name() error`.
pub(crate) fn error_func(ub: &mut UnitBuilder<'_>, name: &str, symbol: SymbolId, span: Span) -> FuncId {
    let func = ub.function(FunctionSpec {
        name,
        symbol: Some(symbol),
        results: vec![ResultSlot::unnamed(TypeId::ERROR)],
        span,
        ..FunctionSpec::default()
    });
    ub.declare(func);
    func
}
