//! The `explain` command: documentation for diagnostic codes.

use wrapck_diagnostic::{ErrorCode, ErrorDocs};

use crate::DriverError;

/// Documentation for a code such as `E1002`, falling back to its one-line
/// description.
pub fn explain(code: &str) -> Result<&'static str, DriverError> {
    let code: ErrorCode = code.parse()?;
    Ok(ErrorDocs::get(code).unwrap_or_else(|| code.description()))
}

#[cfg(test)]
mod tests;
