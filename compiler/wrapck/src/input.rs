//! Front-end dump loading.
//!
//! The checker does not parse or type-check source itself. A front end
//! writes a JSON dump of the program with every identifier already
//! resolved, and this module lowers it into a [`Program`].
//!
//! References inside the dump are strings:
//! - types by name (`"error"`, `"int"`, `"github.com/acme/svc.Store"`,
//!   `"*T"`)
//! - function symbols by key, `pkg.Name` or `pkg.Recv.Name`
//! - variables by an id unique within their unit
//!
//! A reference that does not resolve lowers to an invalid type or an
//! unresolved identifier, with a warning. Only structural problems that
//! make the dump ambiguous (duplicate units or variable ids) are errors.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use wrapck_ir::{
    Binding, ExprId, FileId, FuncId, FunctionSpec, Name, Program, ProgramBuilder, ResultSlot,
    Span, StmtId, SymbolId, TypeData, TypeId, UnitBuilder, UnitId, VarId, VarKind,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dump `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dump: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed dump: {0}")]
    Malformed(String),
}

// ===== Dump schema =====

/// A line/column pair, both 1-based.
pub type Pos = [u32; 2];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dump {
    #[serde(default)]
    pub files: Vec<FileDump>,
    #[serde(default)]
    pub types: Vec<TypeDump>,
    #[serde(default)]
    pub symbols: Vec<SymbolDump>,
    #[serde(default)]
    pub units: Vec<UnitDump>,
}

/// A source file, given as full text or as lines.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDump {
    pub path: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// A declared type.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum TypeDump {
    Basic {
        name: String,
    },
    Named {
        name: String,
        underlying: String,
    },
    Interface {
        name: String,
        #[serde(default)]
        methods: Vec<String>,
    },
    Struct {
        name: String,
    },
}

impl TypeDump {
    fn name(&self) -> &str {
        match self {
            TypeDump::Basic { name }
            | TypeDump::Named { name, .. }
            | TypeDump::Interface { name, .. }
            | TypeDump::Struct { name } => name,
        }
    }
}

/// A function symbol of any package, analyzed or not.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolDump {
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub receiver: Option<String>,
    pub signature: String,
    #[serde(default)]
    pub results: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDump {
    pub path: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub vars: Vec<VarDump>,
    #[serde(default)]
    pub functions: Vec<FunctionDump>,
    #[serde(default)]
    pub globals: Vec<StmtDump>,
}

#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VarKindDump {
    Param,
    Result,
    #[default]
    Local,
    Global,
}

impl From<VarKindDump> for VarKind {
    fn from(kind: VarKindDump) -> Self {
        match kind {
            VarKindDump::Param => VarKind::Param,
            VarKindDump::Result => VarKind::Result,
            VarKindDump::Local => VarKind::Local,
            VarKindDump::Global => VarKind::Global,
        }
    }
}

/// A declared variable. `name` defaults to `id`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarDump {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: VarKindDump,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub at: Option<Pos>,
}

/// A function declaration, or the body of a function literal.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDump {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub receiver: Option<String>,
    /// Signature to register when no symbol is given for this function.
    #[serde(default)]
    pub signature: Option<String>,
    /// File the positions refer to; defaults to the unit's first file.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub at: Option<Pos>,
    /// Parameter variable ids.
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub results: Vec<ResultDump>,
    #[serde(default)]
    pub body: Option<Vec<StmtDump>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultDump {
    #[serde(rename = "type")]
    pub ty: String,
    /// Variable id of a named result.
    #[serde(default)]
    pub var: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum StmtDump {
    Define {
        lhs: Vec<ExprDump>,
        rhs: Vec<ExprDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Assign {
        lhs: Vec<ExprDump>,
        rhs: Vec<ExprDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Var {
        names: Vec<ExprDump>,
        #[serde(default)]
        values: Vec<ExprDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Return {
        #[serde(default)]
        results: Vec<ExprDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Expr {
        expr: ExprDump,
        #[serde(default)]
        at: Option<Pos>,
    },
    Block {
        body: Vec<StmtDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    If {
        #[serde(default)]
        init: Option<Box<StmtDump>>,
        cond: ExprDump,
        #[serde(default)]
        then: Vec<StmtDump>,
        #[serde(default, rename = "else")]
        else_branch: Option<Box<StmtDump>>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Loop {
        #[serde(default)]
        init: Option<Box<StmtDump>>,
        #[serde(default)]
        body: Vec<StmtDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Switch {
        #[serde(default)]
        init: Option<Box<StmtDump>>,
        #[serde(default)]
        tag: Option<ExprDump>,
        #[serde(default)]
        cases: Vec<Vec<StmtDump>>,
        #[serde(default)]
        at: Option<Pos>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ExprDump {
    Var {
        var: String,
        #[serde(default)]
        at: Option<Pos>,
    },
    Blank {
        #[serde(default)]
        at: Option<Pos>,
    },
    Func {
        symbol: String,
        #[serde(default)]
        at: Option<Pos>,
    },
    Package {
        path: String,
        #[serde(default)]
        at: Option<Pos>,
    },
    Select {
        base: Box<ExprDump>,
        symbol: String,
        #[serde(default)]
        at: Option<Pos>,
    },
    Field {
        base: Box<ExprDump>,
        name: String,
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Call {
        callee: Box<ExprDump>,
        #[serde(default)]
        args: Vec<ExprDump>,
        /// Explicit result type; derived from the callee when absent.
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Nil {
        #[serde(default)]
        at: Option<Pos>,
    },
    Literal {
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        at: Option<Pos>,
    },
    FuncLit {
        function: Box<FunctionDump>,
        #[serde(default)]
        at: Option<Pos>,
    },
    Other {
        #[serde(default)]
        operands: Vec<ExprDump>,
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        at: Option<Pos>,
    },
}

// ===== Loading =====

/// Read and lower a dump file.
pub fn load(path: &Path) -> Result<Program, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parse and lower dump text.
pub fn parse(text: &str) -> Result<Program, LoadError> {
    let dump: Dump = serde_json::from_str(text)?;
    lower(&dump)
}

/// Symbol key: `pkg.Name` or `pkg.Recv.Name`.
pub fn symbol_key(package: &str, receiver: Option<&str>, name: &str) -> String {
    match receiver {
        Some(recv) => format!("{package}.{recv}.{name}"),
        None => format!("{package}.{name}"),
    }
}

/// Lower a parsed dump into a program.
#[instrument(level = "debug", skip_all, fields(units = dump.units.len()))]
pub fn lower(dump: &Dump) -> Result<Program, LoadError> {
    let mut pb = ProgramBuilder::new();
    let mut tables = Tables {
        types: TypeNames::new(&dump.types),
        symbols: FxHashMap::default(),
        files: FxHashMap::default(),
    };

    for file in &dump.files {
        let text = file.text.clone().unwrap_or_else(|| file.lines.join("\n"));
        let id = pb.file(&file.path, &text);
        tables.files.insert(file.path.clone(), id);
    }

    for sym in &dump.symbols {
        let results: Vec<TypeId> = sym
            .results
            .iter()
            .map(|ty| tables.types.resolve(&mut pb, ty))
            .collect();
        let id = pb.symbol(
            &sym.package,
            sym.receiver.as_deref(),
            &sym.name,
            &sym.signature,
            &results,
        );
        let key = symbol_key(&sym.package, sym.receiver.as_deref(), &sym.name);
        if tables.symbols.insert(key, id).is_some() {
            warn!(package = %sym.package, name = %sym.name, "duplicate symbol; the last one wins");
        }
    }

    // Declared functions without an explicit symbol get one, so that every
    // declaration can carry a verdict.
    for unit in &dump.units {
        for func in &unit.functions {
            let key = symbol_key(&unit.path, func.receiver.as_deref(), &func.name);
            if tables.symbols.contains_key(&key) {
                continue;
            }
            let results: Vec<TypeId> = func
                .results
                .iter()
                .map(|slot| tables.types.resolve(&mut pb, &slot.ty))
                .collect();
            let signature = func
                .signature
                .clone()
                .unwrap_or_else(|| synthesize_signature(&unit.path, func));
            let id = pb.symbol(
                &unit.path,
                func.receiver.as_deref(),
                &func.name,
                &signature,
                &results,
            );
            tables.symbols.insert(key, id);
        }
    }

    let mut seen = FxHashSet::default();
    for unit in &dump.units {
        if !seen.insert(unit.path.as_str()) {
            return Err(LoadError::Malformed(format!(
                "unit `{}` appears more than once",
                unit.path
            )));
        }
        let lowerer = UnitLowerer {
            ub: pb.unit(&unit.path),
            tables: &mut tables,
            vars: FxHashMap::default(),
            file: None,
            current: None,
            path: &unit.path,
        };
        let id = lowerer.lower(unit)?;
        debug!(unit = %unit.path, ?id, "unit lowered");
    }

    Ok(pb.finish())
}

/// `func pkg.Name() error` or `func (pkg.Recv).Name() (T, error)`.
fn synthesize_signature(package: &str, func: &FunctionDump) -> String {
    let head = match &func.receiver {
        Some(recv) => format!("func ({package}.{recv}).{}", func.name),
        None => format!("func {package}.{}", func.name),
    };
    let results: Vec<&str> = func.results.iter().map(|slot| slot.ty.as_str()).collect();
    match results.as_slice() {
        [] => format!("{head}()"),
        [single] => format!("{head}() {single}"),
        many => format!("{head}() ({})", many.join(", ")),
    }
}

// ===== Type names =====

/// Where lowered types are interned.
trait TypeSink {
    fn intern_name(&self, s: &str) -> Name;
    fn intern_type(&mut self, data: TypeData) -> TypeId;
}

impl TypeSink for ProgramBuilder {
    fn intern_name(&self, s: &str) -> Name {
        self.intern(s)
    }

    fn intern_type(&mut self, data: TypeData) -> TypeId {
        self.ty(data)
    }
}

impl TypeSink for UnitBuilder<'_> {
    fn intern_name(&self, s: &str) -> Name {
        self.intern(s)
    }

    fn intern_type(&mut self, data: TypeData) -> TypeId {
        self.ty(data)
    }
}

const PREDECLARED: &[&str] = &[
    "bool",
    "string",
    "byte",
    "rune",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

/// Composite type spellings that are opaque to the analysis.
const OPAQUE_PREFIXES: &[&str] = &["[]", "[", "map[", "chan ", "<-chan ", "func("];

/// Resolves type names against the dump's declarations.
struct TypeNames<'d> {
    decls: FxHashMap<&'d str, &'d TypeDump>,
    resolved: FxHashMap<String, TypeId>,
    resolving: FxHashSet<String>,
}

impl<'d> TypeNames<'d> {
    fn new(decls: &'d [TypeDump]) -> Self {
        TypeNames {
            decls: decls.iter().map(|decl| (decl.name(), decl)).collect(),
            resolved: FxHashMap::default(),
            resolving: FxHashSet::default(),
        }
    }

    fn resolve<S: TypeSink>(&mut self, sink: &mut S, name: &str) -> TypeId {
        let name = name.trim();
        if name == "error" {
            return TypeId::ERROR;
        }
        if let Some(&id) = self.resolved.get(name) {
            return id;
        }

        let id = if let Some(decl) = self.decls.get(name).copied() {
            if !self.resolving.insert(name.to_string()) {
                warn!(ty = name, "cyclic type declaration");
                return TypeId::INVALID;
            }
            let id = self.declare(sink, decl);
            self.resolving.remove(name);
            id
        } else if let Some(elem) = name.strip_prefix('*') {
            let elem = self.resolve(sink, elem);
            sink.intern_type(TypeData::Pointer(elem))
        } else if name == "any" || name == "interface{}" {
            sink.intern_type(TypeData::Interface {
                methods: Vec::new(),
            })
        } else if PREDECLARED.contains(&name)
            || OPAQUE_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        {
            let basic = sink.intern_name(name);
            sink.intern_type(TypeData::Basic(basic))
        } else {
            warn!(ty = name, "unknown type");
            TypeId::INVALID
        };

        self.resolved.insert(name.to_string(), id);
        id
    }

    fn declare<S: TypeSink>(&mut self, sink: &mut S, decl: &TypeDump) -> TypeId {
        let name = sink.intern_name(decl.name());
        match decl {
            TypeDump::Basic { .. } => sink.intern_type(TypeData::Basic(name)),
            TypeDump::Named { underlying, .. } => {
                let underlying = self.resolve(sink, underlying);
                sink.intern_type(TypeData::Named { name, underlying })
            }
            TypeDump::Interface { methods, .. } => {
                let methods = methods.iter().map(|m| sink.intern_name(m)).collect();
                let underlying = sink.intern_type(TypeData::Interface { methods });
                sink.intern_type(TypeData::Named { name, underlying })
            }
            TypeDump::Struct { .. } => {
                let underlying = sink.intern_type(TypeData::Struct);
                sink.intern_type(TypeData::Named { name, underlying })
            }
        }
    }
}

// ===== Unit lowering =====

struct Tables<'d> {
    types: TypeNames<'d>,
    symbols: FxHashMap<String, SymbolId>,
    files: FxHashMap<String, FileId>,
}

struct UnitLowerer<'d, 'p, 't> {
    ub: UnitBuilder<'p>,
    tables: &'t mut Tables<'d>,
    vars: FxHashMap<&'d str, VarId>,
    /// File positions refer to.
    file: Option<FileId>,
    /// Function whose body is being lowered.
    current: Option<FuncId>,
    path: &'d str,
}

impl<'d> UnitLowerer<'d, '_, '_> {
    fn lower(mut self, unit: &'d UnitDump) -> Result<UnitId, LoadError> {
        for import in &unit.imports {
            self.ub.import(import);
        }
        for path in &unit.files {
            match self.tables.files.get(path) {
                Some(&file) => {
                    self.ub.add_file(file);
                    self.file.get_or_insert(file);
                }
                None => warn!(unit = self.path, file = %path, "unit lists an unknown file"),
            }
        }
        let unit_file = self.file;

        for var in &unit.vars {
            let ty = self.ty(&var.ty);
            let span = self.pos(var.at);
            let name = var.name.as_deref().unwrap_or(&var.id);
            let id = self.ub.var(name, var.kind.into(), ty, span);
            if self.vars.insert(var.id.as_str(), id).is_some() {
                return Err(LoadError::Malformed(format!(
                    "variable id `{}` declared twice in unit `{}`",
                    var.id, self.path
                )));
            }
        }

        for func in &unit.functions {
            let id = self.function(func, None, true);
            self.ub.declare(id);
            self.file = unit_file;
        }
        for stmt in &unit.globals {
            let id = self.stmt(stmt);
            self.ub.global(id);
        }
        Ok(self.ub.finish())
    }

    fn ty(&mut self, name: &str) -> TypeId {
        self.tables.types.resolve(&mut self.ub, name)
    }

    fn opt_ty(&mut self, name: Option<&str>) -> TypeId {
        name.map_or(TypeId::INVALID, |name| self.ty(name))
    }

    fn pos(&self, at: Option<Pos>) -> Span {
        match (self.file, at) {
            (Some(file), Some([line, column])) => self.ub.span_at(file, line, column),
            _ => Span::DUMMY,
        }
    }

    fn symbol(&self, key: &str) -> Option<SymbolId> {
        let symbol = self.tables.symbols.get(key).copied();
        if symbol.is_none() {
            warn!(unit = self.path, symbol = key, "unknown symbol");
        }
        symbol
    }

    fn var(&self, id: &str) -> Option<VarId> {
        let var = self.vars.get(id).copied();
        if var.is_none() {
            warn!(unit = self.path, var = id, "unknown variable");
        }
        var
    }

    fn function(&mut self, func: &'d FunctionDump, parent: Option<FuncId>, declared: bool) -> FuncId {
        if let Some(path) = &func.file {
            match self.tables.files.get(path) {
                Some(&file) => self.file = Some(file),
                None => warn!(unit = self.path, file = %path, "function in an unknown file"),
            }
        }
        let symbol = if declared {
            self.symbol(&symbol_key(self.path, func.receiver.as_deref(), &func.name))
        } else {
            None
        };
        let params = func.params.iter().filter_map(|id| self.var(id)).collect();
        let results = func
            .results
            .iter()
            .map(|slot| {
                let ty = self.ty(&slot.ty);
                match slot.var.as_deref().and_then(|id| self.var(id)) {
                    Some(var) => ResultSlot::named(ty, var),
                    None => ResultSlot::unnamed(ty),
                }
            })
            .collect();
        let span = self.pos(func.at);
        let id = self.ub.function(FunctionSpec {
            name: &func.name,
            symbol,
            parent,
            params,
            results,
            span,
        });

        if let Some(body) = &func.body {
            let outer = self.current.replace(id);
            let stmts = self.stmts(body);
            self.ub.set_body(id, &stmts);
            self.current = outer;
        }
        id
    }

    fn stmts(&mut self, stmts: &'d [StmtDump]) -> Vec<StmtId> {
        stmts.iter().map(|stmt| self.stmt(stmt)).collect()
    }

    fn exprs(&mut self, exprs: &'d [ExprDump]) -> Vec<ExprId> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    fn stmt(&mut self, stmt: &'d StmtDump) -> StmtId {
        match stmt {
            StmtDump::Define { lhs, rhs, at } => {
                let lhs = self.exprs(lhs);
                let rhs = self.exprs(rhs);
                self.ub.define(&lhs, &rhs, self.pos(*at))
            }
            StmtDump::Assign { lhs, rhs, at } => {
                let lhs = self.exprs(lhs);
                let rhs = self.exprs(rhs);
                self.ub.assign(&lhs, &rhs, self.pos(*at))
            }
            StmtDump::Var { names, values, at } => {
                let names = self.exprs(names);
                let values = self.exprs(values);
                self.ub.var_decl(&names, &values, self.pos(*at))
            }
            StmtDump::Return { results, at } => {
                let results = self.exprs(results);
                self.ub.ret(&results, self.pos(*at))
            }
            StmtDump::Expr { expr, at } => {
                let expr = self.expr(expr);
                self.ub.expr_stmt(expr, self.pos(*at))
            }
            StmtDump::Block { body, at } => {
                let body = self.stmts(body);
                self.ub.block(&body, self.pos(*at))
            }
            StmtDump::If {
                init,
                cond,
                then,
                else_branch,
                at,
            } => {
                let init = init.as_deref().map(|init| self.stmt(init));
                let cond = self.expr(cond);
                let then = self.stmts(then);
                let else_branch = else_branch.as_deref().map(|stmt| self.stmt(stmt));
                self.ub.if_stmt(init, cond, &then, else_branch, self.pos(*at))
            }
            StmtDump::Loop { init, body, at } => {
                let init = init.as_deref().map(|init| self.stmt(init));
                let body = self.stmts(body);
                self.ub.loop_stmt(init, &body, self.pos(*at))
            }
            StmtDump::Switch {
                init,
                tag,
                cases,
                at,
            } => {
                let init = init.as_deref().map(|init| self.stmt(init));
                let tag = tag.as_ref().map(|tag| self.expr(tag));
                let cases: Vec<StmtId> = cases
                    .iter()
                    .map(|case| {
                        let body = self.stmts(case);
                        self.ub.block(&body, Span::DUMMY)
                    })
                    .collect();
                self.ub.switch_stmt(init, tag, &cases, self.pos(*at))
            }
        }
    }

    fn expr(&mut self, expr: &'d ExprDump) -> ExprId {
        match expr {
            ExprDump::Var { var, at } => {
                let span = self.pos(*at);
                match self.var(var) {
                    Some(id) => self.ub.var_ref(id, span),
                    None => self.ub.ident(var, Binding::Unresolved, TypeId::INVALID, span),
                }
            }
            ExprDump::Blank { at } => {
                let span = self.pos(*at);
                self.ub.ident("_", Binding::Unresolved, TypeId::INVALID, span)
            }
            ExprDump::Func { symbol, at } => {
                let span = self.pos(*at);
                match self.symbol(symbol) {
                    Some(id) => self.ub.func_ref(id, span),
                    None => self.ub.ident(symbol, Binding::Unresolved, TypeId::INVALID, span),
                }
            }
            ExprDump::Package { path, at } => {
                let span = self.pos(*at);
                self.ub.package(path, span)
            }
            ExprDump::Select { base, symbol, at } => {
                let base = self.expr(base);
                let span = self.pos(*at);
                match self.symbol(symbol) {
                    Some(id) => self.ub.select(base, id, span),
                    None => {
                        let field = symbol.rsplit('.').next().unwrap_or(symbol);
                        self.ub.field(base, field, TypeId::INVALID, span)
                    }
                }
            }
            ExprDump::Field { base, name, ty, at } => {
                let base = self.expr(base);
                let ty = self.opt_ty(ty.as_deref());
                let span = self.pos(*at);
                self.ub.field(base, name, ty, span)
            }
            ExprDump::Call {
                callee,
                args,
                ty,
                at,
            } => {
                let callee = self.expr(callee);
                let args = self.exprs(args);
                let span = self.pos(*at);
                match ty {
                    Some(ty) => {
                        let ty = self.ty(ty);
                        self.ub.call_typed(callee, &args, ty, span)
                    }
                    None => self.ub.call(callee, &args, span),
                }
            }
            ExprDump::Nil { at } => {
                let span = self.pos(*at);
                self.ub.nil(span)
            }
            ExprDump::Literal { ty, at } => {
                let ty = self.opt_ty(ty.as_deref());
                let span = self.pos(*at);
                self.ub.literal(ty, span)
            }
            ExprDump::FuncLit { function, at } => {
                let span = self.pos(*at);
                let file = self.file;
                let func = self.function(function, self.current, false);
                self.file = file;
                self.ub.func_lit(func, span)
            }
            ExprDump::Other { operands, ty, at } => {
                let operands = self.exprs(operands);
                let ty = self.opt_ty(ty.as_deref());
                let span = self.pos(*at);
                self.ub.other(&operands, ty, span)
            }
        }
    }
}

#[cfg(test)]
mod tests;
