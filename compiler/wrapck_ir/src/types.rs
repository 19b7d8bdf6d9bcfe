//! Program-wide type table.
//!
//! The front end resolves every expression to a [`TypeId`]. Only a few
//! questions are ever asked of a type here: is it the predeclared `error`
//! type, is its underlying type an interface, and which positions of a
//! result tuple are errors.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Name, StringInterner};

/// Handle into the [`TypeTable`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Unknown or untyped (package qualifiers, `nil`, failed inference).
    pub const INVALID: TypeId = TypeId(0);
    /// The predeclared `error` interface.
    pub const ERROR: TypeId = TypeId(1);

    /// Get the index into the table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::INVALID => write!(f, "TypeId::INVALID"),
            TypeId::ERROR => write!(f, "TypeId::ERROR"),
            TypeId(raw) => write!(f, "TypeId({raw})"),
        }
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Structural type data.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeData {
    Invalid,
    /// The predeclared `error` interface.
    Error,
    /// Any type the checker does not need to look inside (`int`, `[]byte`).
    Basic(Name),
    /// A declared type with its underlying type.
    Named { name: Name, underlying: TypeId },
    Interface { methods: Vec<Name> },
    Struct,
    Pointer(TypeId),
    /// Multi-value result of a call.
    Tuple(Vec<TypeId>),
    Func {
        params: Vec<TypeId>,
        results: Vec<TypeId>,
    },
}

/// Bound on `Named` chains, guards against cyclic input.
const MAX_UNDERLYING_DEPTH: usize = 32;

/// Interning table for types.
#[derive(Clone, Debug)]
pub struct TypeTable {
    data: Vec<TypeData>,
    map: FxHashMap<TypeData, TypeId>,
}

impl TypeTable {
    /// Create a table with `INVALID` and `ERROR` pre-interned.
    pub fn new() -> Self {
        let mut table = TypeTable {
            data: Vec::new(),
            map: FxHashMap::default(),
        };
        table.intern(TypeData::Invalid);
        table.intern(TypeData::Error);
        table
    }

    /// Intern a type, returning the existing id for structurally equal data.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let raw = u32::try_from(self.data.len()).unwrap_or(u32::MAX);
        let id = TypeId(raw);
        self.data.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// Look up type data. Foreign ids return `None`.
    pub fn get(&self, id: TypeId) -> Option<&TypeData> {
        self.data.get(id.index())
    }

    /// Follow `Named` links to the underlying type.
    pub fn underlying(&self, mut id: TypeId) -> TypeId {
        for _ in 0..MAX_UNDERLYING_DEPTH {
            match self.get(id) {
                Some(TypeData::Named { underlying, .. }) => id = *underlying,
                _ => return id,
            }
        }
        TypeId::INVALID
    }

    /// Whether `id` is exactly the predeclared `error` type.
    ///
    /// Named types that merely implement `error` do not count.
    pub fn is_error(&self, id: TypeId) -> bool {
        matches!(self.get(id), Some(TypeData::Error))
    }

    /// Whether the underlying type of `id` is an interface.
    ///
    /// `error` is itself an interface.
    pub fn is_interface(&self, id: TypeId) -> bool {
        matches!(
            self.get(self.underlying(id)),
            Some(TypeData::Interface { .. } | TypeData::Error)
        )
    }

    /// Positions of `error` values inside a tuple type.
    ///
    /// Non-tuple types yield an empty list.
    pub fn tuple_error_positions(&self, id: TypeId) -> Vec<usize> {
        match self.get(id) {
            Some(TypeData::Tuple(elems)) => elems
                .iter()
                .enumerate()
                .filter(|(_, &elem)| self.is_error(elem))
                .map(|(i, _)| i)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The type a call with these results evaluates to.
    pub fn results_type(&mut self, results: &[TypeId]) -> TypeId {
        match results {
            [] => TypeId::INVALID,
            [single] => *single,
            many => self.intern(TypeData::Tuple(many.to_vec())),
        }
    }

    /// Render a type for messages.
    pub fn display(&self, id: TypeId, interner: &StringInterner) -> String {
        match self.get(id) {
            None | Some(TypeData::Invalid) => "invalid type".to_string(),
            Some(TypeData::Error) => "error".to_string(),
            Some(TypeData::Basic(name) | TypeData::Named { name, .. }) => {
                interner.lookup(*name).to_string()
            }
            Some(TypeData::Interface { .. }) => "interface{...}".to_string(),
            Some(TypeData::Struct) => "struct{...}".to_string(),
            Some(TypeData::Pointer(inner)) => format!("*{}", self.display(*inner, interner)),
            Some(TypeData::Tuple(elems)) => {
                let parts: Vec<String> = elems.iter().map(|e| self.display(*e, interner)).collect();
                format!("({})", parts.join(", "))
            }
            Some(TypeData::Func { .. }) => "func(...)".to_string(),
        }
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: `INVALID` and `ERROR` are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
