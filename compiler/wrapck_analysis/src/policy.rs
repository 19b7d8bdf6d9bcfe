//! Wrapping policy: the analysis scope and the wrapper allow-list.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("no analysis scope configured")]
    MissingScope,
}

/// Which units are analyzed, and which functions count as wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapPolicy {
    scope: String,
    wrappers: Vec<String>,
}

impl WrapPolicy {
    /// Build a policy. An empty or blank scope is rejected.
    pub fn new<S: Into<String>>(
        scope: impl Into<String>,
        wrappers: impl IntoIterator<Item = S>,
    ) -> Result<Self, PolicyError> {
        let scope = scope.into().trim().trim_end_matches('/').to_string();
        if scope.is_empty() {
            return Err(PolicyError::MissingScope);
        }
        let mut deduped: Vec<String> = Vec::new();
        for wrapper in wrappers {
            let wrapper = wrapper.into();
            if !deduped.contains(&wrapper) {
                deduped.push(wrapper);
            }
        }
        Ok(WrapPolicy {
            scope,
            wrappers: deduped,
        })
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Allow-listed signatures, in configuration order.
    pub fn wrappers(&self) -> &[String] {
        &self.wrappers
    }

    /// Whether a package path lies inside the scope.
    ///
    /// The scope is a path prefix matched on segment boundaries:
    /// `example.com/svc` covers `example.com/svc` and `example.com/svc/db`
    /// but not `example.com/svc2`.
    pub fn in_scope(&self, path: &str) -> bool {
        match path.strip_prefix(self.scope.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Exact match against the allow-list.
    pub fn is_wrapper(&self, signature: &str) -> bool {
        self.wrappers.iter().any(|w| w == signature)
    }
}

#[cfg(test)]
mod tests;
