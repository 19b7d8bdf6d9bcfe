//! Diagnostic system for wrapck.
//!
//! A diagnostic carries:
//! - An error code for searchability (`wrapck explain E1001`)
//! - A message naming what is not wrapped
//! - A primary span at the return site
//! - Secondary labels pointing at the producing call
//! - Notes and suggestions on how to wrap

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::{ErrorCode, UnknownErrorCode};
pub use errors::ErrorDocs;
