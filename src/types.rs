//! Shared configuration and export types.

use serde::{Deserialize, Serialize};

/// Options applied when a [`Registry`](crate::Registry) flattens its declaration.
///
/// Every field has a default, so a partial JSON object such as
/// `{"prefix": "com.example"}` deserializes into a complete set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlOptions {
    /// Prepended to every scope. Empty means no leading segment.
    pub prefix: String,
    /// Joins path segments. Defaults to `.`.
    pub spacer: String,
    /// Scopes that start enabled after every reset.
    pub default: Vec<String>,
}

impl Default for AccessControlOptions {
    fn default() -> Self {
        AccessControlOptions {
            prefix: String::new(),
            spacer: ".".to_string(),
            default: Vec::new(),
        }
    }
}

impl AccessControlOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_spacer(mut self, spacer: impl Into<String>) -> Self {
        self.spacer = spacer.into();
        self
    }

    pub fn with_default<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = scopes.into_iter().map(Into::into).collect();
        self
    }
}

/// Which nodes [`Registry::export`](crate::Registry::export) includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// Only enabled nodes.
    #[default]
    Enabled,
    /// Every node regardless of state.
    All,
}

/// A `{scope, desc}` snapshot of one node, as handed to external consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedScope {
    pub scope: String,
    pub desc: String,
}
