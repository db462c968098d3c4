//!
//! Defines error types for building an access tree.

/// Errors raised while loading a declaration or constructing a [`Registry`](crate::Registry).
///
/// Once a registry exists every operation on it is infallible; unknown scopes are
/// simply ignored or reported as absent.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// A declaration entry is neither a description string nor a nested table.
    #[error("Invalid access declaration at `{path}`: expected a description string or a nested table, found {found}")]
    InvalidDeclaration {
        /// Dotted key path of the offending entry (`<root>` for the document itself).
        path: String,
        /// Kind of value that was found instead.
        found: &'static str,
    },
    /// Two leaves compose to the same scope string, e.g. a key containing the spacer.
    #[error("Duplicate scope `{0}` produced by access declaration")]
    DuplicateScope(String),
    /// The configured spacer is empty, so scope segments would have no boundary.
    #[error("Scope spacer must not be empty")]
    EmptySpacer,
    /// The declaration could not be parsed as JSON.
    #[error("Failed to parse access declaration: {0}")]
    Json(#[from] serde_json::Error),
    /// The declaration file could not be read.
    #[error("Failed to read access declaration: {0}")]
    Io(#[from] std::io::Error),
}
