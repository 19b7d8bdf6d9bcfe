//! Per-function summaries.
//!
//! A summary lists every place an error leaves a function through a
//! `return`, each classified as wrapped or naked. The function's verdict
//! is the conjunction over those sources, and is recorded as a fact as
//! soon as it is known so later functions of the same unit can use it.
//!
//! Function literals are summarized on their own: a `return` belongs to
//! the innermost enclosing function, so the return collector never crosses
//! into a literal.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, warn};
use wrapck_ir::visitor::{walk_function, walk_stmt, Visitor};
use wrapck_ir::{ExprId, ExprKind, ExprRange, FuncId, Span, Stmt, StmtKind, SymbolId, UnitArena, VarId};
use wrapck_stack::ensure_sufficient_stack;

use crate::classify::{classify_call, CallClass, Classification, NakedReason};
use crate::resolve::DefinitionIndex;
use crate::shape::ErrorShape;
use crate::{Facade, FactStore, WrapPolicy, WrapVerdict};

/// One error leaving a function through a `return`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ErrorSource {
    /// The function whose call produced the error, when known.
    pub producer: Option<SymbolId>,
    pub classification: Classification,
    /// The `return` statement.
    pub site: Span,
    /// The producing call, when it was found through an assignment.
    pub origin: Option<Span>,
}

impl ErrorSource {
    pub fn is_wrapped(&self) -> bool {
        self.classification.is_wrapped()
    }

    fn unresolved(site: Span) -> Self {
        ErrorSource {
            producer: None,
            classification: Classification::Naked(NakedReason::Unresolved),
            site,
            origin: None,
        }
    }
}

/// Error sources of one function, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSummary {
    pub func: FuncId,
    /// Display name: the declared name, or `Outer.funcN` for literals.
    pub name: String,
    pub symbol: Option<SymbolId>,
    pub span: Span,
    pub sources: Vec<ErrorSource>,
}

impl FunctionSummary {
    /// Wrapped iff every source is wrapped; a function with no sources
    /// is wrapped.
    pub fn verdict(&self) -> WrapVerdict {
        self.sources
            .iter()
            .fold(WrapVerdict::Wrapped, |acc, source| {
                acc.and(source.classification.verdict())
            })
    }

    pub fn naked_sources(&self) -> impl Iterator<Item = &ErrorSource> {
        self.sources.iter().filter(|source| !source.is_wrapped())
    }

    pub fn to_verdict(&self) -> FunctionVerdict {
        FunctionVerdict {
            name: self.name.clone(),
            symbol: self.symbol,
            verdict: self.verdict(),
            span: self.span,
        }
    }
}

/// The published outcome for one function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionVerdict {
    pub name: String,
    pub symbol: Option<SymbolId>,
    pub verdict: WrapVerdict,
    pub span: Span,
}

impl fmt::Display for FunctionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"{}\"", self.name, self.verdict)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Unvisited,
    InProgress,
    Summarized,
}

/// Summarizes every function of one unit.
///
/// Declarations are processed in source order. A call to a same-unit
/// function that has not been summarized yet summarizes that function
/// first; a call back into a function still in progress stays naked.
/// Nesting grows with the length of a forward call chain, so each
/// on-demand summary runs behind a stack guard.
pub struct SummaryBuilder<'a, 'f, F: FactStore + ?Sized> {
    facade: Facade<'a>,
    policy: &'a WrapPolicy,
    facts: &'f mut F,
    defs: DefinitionIndex,
    states: Vec<State>,
    /// Same-unit declarations by symbol.
    local_decls: FxHashMap<SymbolId, FuncId>,
    /// Every function to consider, declarations first, then literals.
    order: Vec<(FuncId, String)>,
    summaries: Vec<FunctionSummary>,
}

impl<'a, 'f, F: FactStore + ?Sized> SummaryBuilder<'a, 'f, F> {
    pub fn new(facade: Facade<'a>, policy: &'a WrapPolicy, facts: &'f mut F) -> Self {
        let unit = facade.unit();
        let defs = DefinitionIndex::build(&facade);
        let local_decls = unit
            .decls
            .iter()
            .filter_map(|&func| facade.function(func).symbol.map(|symbol| (symbol, func)))
            .collect();
        let order = function_order(&facade);
        SummaryBuilder {
            facade,
            policy,
            facts,
            defs,
            states: vec![State::Unvisited; unit.arena.function_count()],
            local_decls,
            order,
            summaries: Vec::new(),
        }
    }

    /// Summarize all functions. Results are ordered by position.
    pub fn run(mut self) -> Vec<FunctionSummary> {
        let order = std::mem::take(&mut self.order);
        let names: FxHashMap<FuncId, &str> =
            order.iter().map(|(func, name)| (*func, name.as_str())).collect();
        for (func, _) in &order {
            self.summarize(*func, &names);
        }
        let mut summaries = self.summaries;
        summaries.sort_by_key(|summary| (summary.span.start, summary.func));
        summaries
    }

    fn state(&self, func: FuncId) -> State {
        self.states
            .get(func.index())
            .copied()
            .unwrap_or(State::Summarized)
    }

    fn set_state(&mut self, func: FuncId, state: State) {
        if let Some(slot) = self.states.get_mut(func.index()) {
            *slot = state;
        }
    }

    fn summarize(&mut self, func: FuncId, names: &FxHashMap<FuncId, &str>) {
        if self.state(func) != State::Unvisited {
            return;
        }
        let function = self.facade.function(func);
        let shape = ErrorShape::of(function, &self.facade.program().types);
        if !shape.has_error() {
            self.set_state(func, State::Summarized);
            return;
        }
        self.set_state(func, State::InProgress);

        let name = names
            .get(&func)
            .map_or_else(|| self.facade.name(function.name).to_string(), |n| (*n).to_string());
        let _span = debug_span!("summarize", function = %name).entered();

        let mut collector = ReturnCollector::default();
        walk_function(&mut collector, function, self.facade.arena());

        let mut sources = Vec::new();
        for site in collector.returns {
            let results = self.facade.arena().get_expr_list(site.results);
            if results.is_empty() {
                for &position in shape.positions() {
                    match function.results.get(position).and_then(|slot| slot.var) {
                        Some(var) => self.var_sources(var, site.span, names, &mut sources),
                        None => sources.push(ErrorSource::unresolved(site.span)),
                    }
                }
            } else {
                for &expr in results {
                    self.expr_sources(expr, site.span, names, &mut sources);
                }
            }
        }

        let summary = FunctionSummary {
            func,
            name,
            symbol: function.symbol,
            span: function.span,
            sources,
        };
        let verdict = summary.verdict();
        debug!(%verdict, sources = summary.sources.len(), "summarized");
        if let Some(symbol) = summary.symbol {
            if let Err(err) = self.facts.record(symbol, verdict) {
                warn!(function = %summary.name, %err, "verdict not recorded");
            }
        }
        self.set_state(func, State::Summarized);
        self.summaries.push(summary);
    }

    fn expr_sources(
        &mut self,
        expr: ExprId,
        site: Span,
        names: &FxHashMap<FuncId, &str>,
        out: &mut Vec<ErrorSource>,
    ) {
        let is_error = self.facade.is_error_expr(expr);
        match self.facade.expr(expr).kind {
            ExprKind::Call { .. } if is_error || self.facade.tuple_has_error(expr) => {
                let class = self.classify(expr, names);
                out.push(ErrorSource {
                    producer: class.symbol,
                    classification: class.classification,
                    site,
                    origin: None,
                });
            }
            _ if !is_error => {}
            _ => match self.facade.var_of(expr) {
                Some(var) => self.var_sources(var, site, names, out),
                None => out.push(ErrorSource::unresolved(site)),
            },
        }
    }

    fn var_sources(
        &mut self,
        var: VarId,
        site: Span,
        names: &FxHashMap<FuncId, &str>,
        out: &mut Vec<ErrorSource>,
    ) {
        let defs = self.defs.resolve(var).to_vec();
        if defs.is_empty() {
            out.push(ErrorSource::unresolved(site));
            return;
        }
        for def in defs {
            let class = self.classify(def.call, names);
            out.push(ErrorSource {
                producer: class.symbol,
                classification: class.classification,
                site,
                origin: Some(self.facade.expr(def.call).span),
            });
        }
    }

    /// Classify a call, summarizing an unvisited same-unit callee first.
    fn classify(&mut self, call: ExprId, names: &FxHashMap<FuncId, &str>) -> CallClass {
        let class = classify_call(&self.facade, self.policy, &*self.facts, call);
        if class.classification != Classification::Naked(NakedReason::Pending) {
            return class;
        }
        let callee = class
            .symbol
            .and_then(|symbol| self.local_decls.get(&symbol).copied())
            .filter(|&callee| self.state(callee) == State::Unvisited);
        match callee {
            Some(callee) => {
                ensure_sufficient_stack(|| self.summarize(callee, names));
                classify_call(&self.facade, self.policy, &*self.facts, call)
            }
            None => class,
        }
    }
}

/// Declarations in source order, each followed by the literals nested in
/// it, then literals in package-level initializers.
fn function_order(facade: &Facade<'_>) -> Vec<(FuncId, String)> {
    let unit = facade.unit();
    let arena = facade.arena();
    let mut order = Vec::new();
    for &decl in &unit.decls {
        let function = arena.get_function(decl);
        let outer = facade.name(function.name);
        order.push((decl, outer.to_string()));
        let mut namer = LiteralNamer::new(outer);
        walk_function(&mut namer, function, arena);
        order.append(&mut namer.literals);
    }
    let mut namer = LiteralNamer::new("glob");
    for &global in &unit.globals {
        namer.visit_stmt_id(global, arena);
    }
    order.append(&mut namer.literals);
    order
}

/// Names literals `Outer.func1`, `Outer.func2`, ... in discovery order.
struct LiteralNamer<'n> {
    outer: &'n str,
    literals: Vec<(FuncId, String)>,
}

impl<'n> LiteralNamer<'n> {
    fn new(outer: &'n str) -> Self {
        LiteralNamer {
            outer,
            literals: Vec::new(),
        }
    }
}

impl<'ast> Visitor<'ast> for LiteralNamer<'_> {
    fn visit_func_lit(&mut self, id: FuncId, arena: &'ast UnitArena) {
        let name = format!("{}.func{}", self.outer, self.literals.len() + 1);
        self.literals.push((id, name));
        self.visit_function(arena.get_function(id), arena);
    }
}

struct ReturnSite {
    span: Span,
    results: ExprRange,
}

/// Collects the `return` statements of one function body.
#[derive(Default)]
struct ReturnCollector {
    returns: Vec<ReturnSite>,
}

impl<'ast> Visitor<'ast> for ReturnCollector {
    fn visit_func_lit(&mut self, _id: FuncId, _arena: &'ast UnitArena) {}

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast UnitArena) {
        if let StmtKind::Return { results } = stmt.kind {
            self.returns.push(ReturnSite {
                span: stmt.span,
                results,
            });
        }
        walk_stmt(self, stmt, arena);
    }
}
