//! Subcommand implementations.

mod check;
mod explain;

pub use check::{check, Outcome};
pub use explain::explain;
