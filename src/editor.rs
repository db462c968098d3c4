//!
//! Editing operations for permission-management screens: group toggles,
//! bulk enable/disable, and a flat listing of every branch and leaf with its
//! aggregate state.

use serde::Serialize;

use crate::declaration::Declaration;
use crate::registry::{AccessNode, Registry};
use crate::tree::traverse::{traverse, Visitor};

/// Aggregate state of a listed scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeValue {
    /// Leaf: the node's flag. Branch: at least one node beneath and all enabled.
    pub enabled: bool,
    /// Branch only: some but not all nodes beneath are enabled.
    pub partial_child: bool,
}

/// One row of [`AccessEditor::scopes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeItem {
    pub scope: String,
    /// `None` for branches.
    pub desc: Option<String>,
    pub parent: String,
    pub has_child: bool,
    pub value: ScopeValue,
}

/// Mutable editing view over a [`Registry`].
#[derive(Debug)]
pub struct AccessEditor<'a> {
    registry: &'a mut Registry,
}

impl<'a> AccessEditor<'a> {
    pub fn new(registry: &'a mut Registry) -> Self {
        AccessEditor { registry }
    }

    /// Toggles `scope`.
    ///
    /// With `as_parent`, `scope` names a group: everything equal to it or nested
    /// under it on a spacer boundary. A fully enabled group is disabled, any other
    /// group is fully enabled.
    pub fn toggle(&mut self, scope: &str, as_parent: bool) {
        if !as_parent {
            self.registry.toggle(scope);
            return;
        }

        let (total, enabled) = count_enabled(self.registry, scope);
        if total == 0 {
            tracing::trace!(scope, "ignoring group toggle with no declared scopes");
            return;
        }
        let enable = enabled < total;
        self.registry.set_descendants(scope, enable);
        tracing::debug!(scope, total, enable, "toggled access group");
    }

    pub fn get_child(&self, scope: &str) -> Vec<&AccessNode> {
        self.registry.get_child(scope)
    }

    pub fn enable_all(&mut self) {
        self.registry.set_all(true);
    }

    pub fn disable_all(&mut self) {
        self.registry.set_all(false);
    }

    /// Enabled scope strings in registry order.
    pub fn enabled(&self) -> Vec<String> {
        self.registry.enabled().into_iter().map(|n| n.scope().to_string()).collect()
    }

    pub fn disabled(&self) -> Vec<String> {
        self.registry.disabled().into_iter().map(|n| n.scope().to_string()).collect()
    }

    /// Every branch and leaf in pre-order, each with its aggregate state.
    pub fn scopes(&self) -> Vec<ScopeItem> {
        let registry: &Registry = &*self.registry;
        let declaration = registry.declaration_ref();
        let options = registry.options();
        let mut collector = ScopeCollector {
            registry,
            items: Vec::with_capacity(declaration.leaf_count()),
        };
        traverse(declaration, &options.prefix, &options.spacer, &mut collector);
        collector.items
    }
}

fn count_enabled(registry: &Registry, scope: &str) -> (usize, usize) {
    registry
        .descendants(scope)
        .fold((0, 0), |(total, enabled), node| (total + 1, enabled + usize::from(node.enabled())))
}

struct ScopeCollector<'r> {
    registry: &'r Registry,
    items: Vec<ScopeItem>,
}

impl Visitor for ScopeCollector<'_> {
    fn visit_leaf(&mut self, desc: &str, scope: &str, parent: &str) {
        self.items.push(ScopeItem {
            scope: scope.to_string(),
            desc: Some(desc.to_string()),
            parent: parent.to_string(),
            has_child: false,
            value: ScopeValue {
                enabled: self.registry.is_enabled(scope),
                partial_child: false,
            },
        });
    }

    fn visit_branch(&mut self, branch: &Declaration, scope: &str, parent: &str) {
        let (total, enabled) = count_enabled(self.registry, scope);
        self.items.push(ScopeItem {
            scope: scope.to_string(),
            desc: None,
            parent: parent.to_string(),
            has_child: !branch.is_empty(),
            value: ScopeValue {
                enabled: total > 0 && enabled == total,
                partial_child: enabled > 0 && enabled < total,
            },
        });
    }
}
