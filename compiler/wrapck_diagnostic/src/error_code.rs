use std::fmt;
use std::str::FromStr;

/// Error codes for all wrapck diagnostics.
///
/// Format: E#### where the first digit is the family:
/// - E1xxx: error wrapping
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Error returned from an interface method is not wrapped
    E1001,
    /// Error returned from an external or unanalyzed unit is not wrapped
    E1002,
    /// Error returned is not wrapped
    E1003,
}

impl ErrorCode {
    /// Every code, in order.
    pub const ALL: [ErrorCode; 3] = [ErrorCode::E1001, ErrorCode::E1002, ErrorCode::E1003];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "error returned from an interface method is not wrapped",
            ErrorCode::E1002 => "error returned from an external/unanalyzed unit is not wrapped",
            ErrorCode::E1003 => "error returned is not wrapped",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known error code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownErrorCode(pub String);

impl fmt::Display for UnknownErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code `{}`", self.0)
    }
}

impl std::error::Error for UnknownErrorCode {}

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    /// Parse `E1001` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests;
