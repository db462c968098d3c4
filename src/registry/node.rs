use serde::{Deserialize, Serialize};

use crate::registry::core::Registry;
use crate::types::ExportedScope;

/// One declared capability: its fully-qualified scope, description and current state.
///
/// Nodes handed out by [`Registry::nodes`] are snapshots. Flipping one goes through
/// the owning registry, keyed by scope, so a node taken before a `reset` can never
/// write into state it no longer describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessNode {
    scope: String,
    desc: String,
    enabled: bool,
}

impl AccessNode {
    pub(crate) fn new(scope: &str, desc: &str, enabled: bool) -> Self {
        AccessNode {
            scope: scope.to_string(),
            desc: desc.to_string(),
            enabled,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flips this node's scope in `registry`. See [`Registry::toggle`].
    pub fn toggle(&self, registry: &mut Registry) -> Option<bool> {
        registry.toggle(&self.scope)
    }

    pub fn export(&self) -> ExportedScope {
        ExportedScope {
            scope: self.scope.clone(),
            desc: self.desc.clone(),
        }
    }
}
