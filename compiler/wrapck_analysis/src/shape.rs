//! Where a function's declared results carry an error.

use wrapck_ir::{Function, TypeTable};

/// Error positions among a function's declared results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorShape {
    /// No `error` result; the function is not checked.
    None,
    /// A single result, and it is `error`.
    Single { position: usize },
    /// `error` among several results.
    InTuple { positions: Vec<usize>, arity: usize },
}

impl ErrorShape {
    pub fn of(function: &Function, types: &TypeTable) -> Self {
        let positions: Vec<usize> = function
            .results
            .iter()
            .enumerate()
            .filter(|(_, slot)| types.is_error(slot.ty))
            .map(|(i, _)| i)
            .collect();
        let arity = function.results.len();
        match positions.as_slice() {
            [] => return ErrorShape::None,
            [position] if arity == 1 => {
                return ErrorShape::Single {
                    position: *position,
                }
            }
            _ => {}
        }
        ErrorShape::InTuple { positions, arity }
    }

    pub fn has_error(&self) -> bool {
        !matches!(self, ErrorShape::None)
    }

    pub fn positions(&self) -> &[usize] {
        match self {
            ErrorShape::None => &[],
            ErrorShape::Single { position } => std::slice::from_ref(position),
            ErrorShape::InTuple { positions, .. } => positions,
        }
    }
}
