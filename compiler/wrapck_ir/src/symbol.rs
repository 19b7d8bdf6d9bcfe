//! Function symbols.
//!
//! A symbol is the program-wide identity of a declared function or method.
//! It is what facts are keyed by and what the allow-list matches against.

use crate::{Name, StringInterner, SymbolId, TypeId};

/// A declared function or method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSymbol {
    /// Import path of the declaring package.
    pub package: Name,
    pub name: Name,
    /// Receiver type name for methods, without pointer marker.
    pub receiver: Option<Name>,
    /// Canonical signature text, e.g.
    /// `func github.com/cockroachdb/errors.WithStack(err error) error`.
    ///
    /// Compared byte-for-byte against allow-list entries.
    pub signature: String,
    /// Declared result types.
    pub results: Vec<TypeId>,
}

impl FunctionSymbol {
    /// Qualified display name: `pkg.Name` or `pkg.(Recv).Name`.
    pub fn qualified(&self, interner: &StringInterner) -> String {
        let package = interner.lookup(self.package);
        let name = interner.lookup(self.name);
        match self.receiver {
            Some(recv) => format!("{package}.({}).{name}", interner.lookup(recv)),
            None => format!("{package}.{name}"),
        }
    }

    /// Whether this symbol is a method.
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Program-wide table of function symbols.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<FunctionSymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol.
    pub fn push(&mut self, symbol: FunctionSymbol) -> SymbolId {
        let id = SymbolId::new(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.symbols.push(symbol);
        id
    }

    /// Look up a symbol. Dangling ids return `None`.
    pub fn get(&self, id: SymbolId) -> Option<&FunctionSymbol> {
        self.symbols.get(id.index())
    }

    /// Iterate symbols in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &FunctionSymbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, sym)| (SymbolId::new(u32::try_from(i).unwrap_or(u32::MAX)), sym))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
