//! Whole-program container.

use crate::{
    FileId, FuncId, FunctionSymbol, Name, SourceMap, StmtId, StringInterner, SymbolId,
    SymbolTable, TypeTable, UnitArena, UnitId,
};

/// One compilation unit (a package).
#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    /// Import path.
    pub path: Name,
    /// Files this unit was built from.
    pub files: Vec<FileId>,
    /// Import paths this unit depends on.
    pub imports: Vec<Name>,
    pub arena: UnitArena,
    /// Top-level function and method declarations, in source order.
    pub decls: Vec<FuncId>,
    /// Package-level variable declarations.
    pub globals: Vec<StmtId>,
}

/// A loaded program: shared tables plus every unit.
///
/// Read-only once built, so it can be shared across worker threads.
#[derive(Debug, Default)]
pub struct Program {
    pub interner: StringInterner,
    pub types: TypeTable,
    pub symbols: SymbolTable,
    pub units: Vec<Unit>,
    pub source_map: SourceMap,
}

impl Program {
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    /// Find a unit by import path.
    pub fn unit_by_path(&self, path: &str) -> Option<&Unit> {
        let name = self.interner.get(path)?;
        self.units.iter().find(|unit| unit.path == name)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&FunctionSymbol> {
        self.symbols.get(id)
    }

    /// Resolve an interned name.
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }
}
