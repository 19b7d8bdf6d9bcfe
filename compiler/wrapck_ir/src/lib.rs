//! wrapck IR - the checker's view of a type-checked program
//!
//! This crate holds what the front end hands over to the analysis:
//! - Spans over a global offset space, resolved by the [`SourceMap`]
//! - Names for interned identifiers and package paths
//! - A program-wide [`TypeTable`] and [`SymbolTable`]
//! - One flat tree per compilation unit, stored in a [`UnitArena`]
//! - A [`Visitor`](visitor::Visitor) for traversal
//! - A [`ProgramBuilder`] to construct all of the above
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → TypeId(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//! - **Resolve Up Front**: identifiers carry their binding, expressions
//!   their type, so analysis never guesses by name

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod builder;
mod ids;
mod interner;
mod name;
mod program;
mod source_map;
mod span;
mod symbol;
mod types;
pub mod visitor;

pub use arena::UnitArena;
pub use ast::{
    AssignOp, Binding, Expr, ExprKind, Function, ResultSlot, Stmt, StmtKind, VarInfo, VarKind,
};
pub use builder::{FunctionSpec, ProgramBuilder, UnitBuilder};
pub use ids::{ExprId, ExprRange, FileId, FuncId, StmtId, StmtRange, SymbolId, UnitId, VarId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use program::{Program, Unit};
pub use source_map::{Location, SourceMap};
pub use span::Span;
pub use symbol::{FunctionSymbol, SymbolTable};
pub use types::{TypeData, TypeId, TypeTable};
