//! Cross-unit fact storage.
//!
//! A fact is the wrap verdict of one function symbol. Facts are written by
//! the unit that declares the function and read by every unit analyzed
//! after it. Stores are append-only: a verdict, once recorded, is final.

use std::fmt;

use rustc_hash::FxHashMap;
use thiserror::Error;
use wrapck_ir::SymbolId;

/// Whether every error a function returns is wrapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WrapVerdict {
    Wrapped,
    Naked,
}

impl WrapVerdict {
    pub fn from_wrapped(wrapped: bool) -> Self {
        if wrapped {
            WrapVerdict::Wrapped
        } else {
            WrapVerdict::Naked
        }
    }

    pub fn is_wrapped(self) -> bool {
        self == WrapVerdict::Wrapped
    }

    /// Conjunction: naked if either side is.
    #[must_use]
    pub fn and(self, other: WrapVerdict) -> WrapVerdict {
        WrapVerdict::from_wrapped(self.is_wrapped() && other.is_wrapped())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WrapVerdict::Wrapped => "wrapped",
            WrapVerdict::Naked => "naked",
        }
    }
}

impl fmt::Display for WrapVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactError {
    #[error("verdict for {symbol:?} already recorded as {existing}")]
    AlreadyRecorded {
        symbol: SymbolId,
        existing: WrapVerdict,
    },
}

/// Injected verdict storage.
pub trait FactStore {
    /// The recorded verdict for `symbol`, if any.
    fn verdict(&self, symbol: SymbolId) -> Option<WrapVerdict>;

    /// Record a verdict. Fails if one is already recorded.
    fn record(&mut self, symbol: SymbolId, verdict: WrapVerdict) -> Result<(), FactError>;
}

/// Append-only in-memory fact table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactTable {
    facts: FxHashMap<SymbolId, WrapVerdict>,
}

impl FactTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// All facts ordered by symbol.
    pub fn entries(&self) -> Vec<(SymbolId, WrapVerdict)> {
        let mut entries: Vec<_> = self.facts.iter().map(|(&s, &v)| (s, v)).collect();
        entries.sort_unstable();
        entries
    }

    /// Move every fact of `other` into this table.
    ///
    /// Non-conflicting facts are always merged; the first conflict, in
    /// symbol order, is returned.
    pub fn merge(&mut self, other: FactTable) -> Result<(), FactError> {
        let mut first_conflict = None;
        for (symbol, verdict) in other.entries() {
            if let Err(err) = self.record(symbol, verdict) {
                first_conflict.get_or_insert(err);
            }
        }
        first_conflict.map_or(Ok(()), Err)
    }
}

impl FactStore for FactTable {
    fn verdict(&self, symbol: SymbolId) -> Option<WrapVerdict> {
        self.facts.get(&symbol).copied()
    }

    fn record(&mut self, symbol: SymbolId, verdict: WrapVerdict) -> Result<(), FactError> {
        if let Some(&existing) = self.facts.get(&symbol) {
            return Err(FactError::AlreadyRecorded { symbol, existing });
        }
        self.facts.insert(symbol, verdict);
        Ok(())
    }
}

/// A read-only published table with a private layer of new facts.
///
/// Used when several units are analyzed at once: each writes into its own
/// layer, and the layers are merged into the base afterwards.
#[derive(Debug)]
pub struct LayeredFacts<'a> {
    base: &'a FactTable,
    local: FactTable,
}

impl<'a> LayeredFacts<'a> {
    pub fn new(base: &'a FactTable) -> Self {
        LayeredFacts {
            base,
            local: FactTable::new(),
        }
    }

    /// Facts recorded through this layer.
    pub fn into_local(self) -> FactTable {
        self.local
    }
}

impl FactStore for LayeredFacts<'_> {
    fn verdict(&self, symbol: SymbolId) -> Option<WrapVerdict> {
        self.local
            .verdict(symbol)
            .or_else(|| self.base.verdict(symbol))
    }

    fn record(&mut self, symbol: SymbolId, verdict: WrapVerdict) -> Result<(), FactError> {
        if let Some(existing) = self.base.verdict(symbol) {
            return Err(FactError::AlreadyRecorded { symbol, existing });
        }
        self.local.record(symbol, verdict)
    }
}

#[cfg(test)]
mod tests;
