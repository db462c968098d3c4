//!
//! The registry: a flat, insertion-ordered map from scope string to [`AccessNode`],
//! built from a [`Declaration`] and the only owner of mutable access state.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::declaration::Declaration;
use crate::error::AccessError;
use crate::registry::node::AccessNode;
use crate::tree::projection::{project, Projection};
use crate::tree::traverse::for_each_leaf;
use crate::types::{AccessControlOptions, ExportScope, ExportedScope};

/// Flattened access state for one declaration.
///
/// Nothing is locked internally; a host sharing a registry between threads must
/// serialize `grant`/`toggle`/`reset` against reads itself.
#[derive(Debug, Clone)]
pub struct Registry {
    declaration: Declaration,
    options: AccessControlOptions,
    defaults: HashSet<String>,
    scopes: IndexMap<String, AccessNode>,
}

/// Builds a registry from `declaration`. Shorthand for [`Registry::new`].
pub fn create(declaration: Declaration, options: AccessControlOptions) -> Result<Registry, AccessError> {
    Registry::new(declaration, options)
}

impl Registry {
    /// Flattens `declaration` under `options` and enables `options.default`.
    ///
    /// Fails with [`AccessError::EmptySpacer`] for an empty spacer and with
    /// [`AccessError::DuplicateScope`] when two leaves compose to the same scope string.
    pub fn new(declaration: Declaration, options: AccessControlOptions) -> Result<Self, AccessError> {
        if options.spacer.is_empty() {
            return Err(AccessError::EmptySpacer);
        }
        ensure_unique_scopes(&declaration, &options)?;

        let defaults: HashSet<String> = options.default.iter().cloned().collect();
        let mut registry = Registry {
            declaration,
            options,
            defaults,
            scopes: IndexMap::new(),
        };
        registry.reset();

        for scope in &registry.options.default {
            if !registry.scopes.contains_key(scope) {
                tracing::warn!(scope = %scope, "default scope is not declared and will never be enabled");
            }
        }
        Ok(registry)
    }

    /// Builds a registry with default options (no prefix, `.` spacer).
    pub fn from_declaration(declaration: Declaration) -> Result<Self, AccessError> {
        Self::new(declaration, AccessControlOptions::default())
    }

    /// Recreates every node from the declaration. Only `options.default` is
    /// enabled afterwards; grants and toggles since the last reset are dropped.
    pub fn reset(&mut self) {
        let Registry {
            declaration,
            options,
            defaults,
            scopes,
        } = self;

        scopes.clear();
        scopes.reserve(declaration.leaf_count());
        for_each_leaf(declaration, &options.prefix, &options.spacer, |desc, scope, _| {
            scopes.insert(scope.to_string(), AccessNode::new(scope, desc, defaults.contains(scope)));
        });

        tracing::debug!(
            prefix = %options.prefix,
            nodes = scopes.len(),
            enabled = scopes.values().filter(|n| n.enabled()).count(),
            "access registry reset"
        );
    }

    /// Enables each listed scope. Undeclared scopes are ignored.
    pub fn grant<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requested = 0usize;
        let mut applied = 0usize;
        for scope in scopes {
            requested += 1;
            let scope = scope.as_ref();
            match self.scopes.get_mut(scope) {
                Some(node) => {
                    node.set_enabled(true);
                    applied += 1;
                }
                None => tracing::trace!(scope, "ignoring grant for undeclared scope"),
            }
        }
        tracing::debug!(requested, applied, "granted access scopes");
    }

    /// Flips the node for exactly `scope` and returns its new state, or `None`
    /// (changing nothing) when no such node exists.
    pub fn toggle(&mut self, scope: &str) -> Option<bool> {
        match self.scopes.get_mut(scope) {
            Some(node) => {
                node.set_enabled(!node.enabled());
                Some(node.enabled())
            }
            None => {
                tracing::trace!(scope, "ignoring toggle for undeclared scope");
                None
            }
        }
    }

    pub fn has(&self, scope: &str) -> bool {
        self.scopes.contains_key(scope)
    }

    pub fn get(&self, scope: &str) -> Option<&AccessNode> {
        self.scopes.get(scope)
    }

    /// Whether `scope` is declared and currently enabled.
    pub fn is_enabled(&self, scope: &str) -> bool {
        self.scopes.get(scope).is_some_and(AccessNode::enabled)
    }

    /// Every node whose scope starts with `scope`, the exact match included.
    ///
    /// This is a plain string-prefix match: `todo.crud` also matches `todo.crudx`.
    pub fn get_child(&self, scope: &str) -> Vec<&AccessNode> {
        self.scopes
            .values()
            .filter(|node| node.scope().starts_with(scope))
            .collect()
    }

    /// Nodes whose scope or description contains `substring`.
    pub fn search(&self, substring: &str) -> Vec<&AccessNode> {
        self.search_by(|node| node.scope().contains(substring) || node.desc().contains(substring))
    }

    /// Nodes accepted by `predicate`, in registry order.
    pub fn search_by<P>(&self, mut predicate: P) -> Vec<&AccessNode>
    where
        P: FnMut(&AccessNode) -> bool,
    {
        self.scopes.values().filter(|node| predicate(node)).collect()
    }

    /// `{scope, desc}` snapshots in registry order.
    pub fn export(&self, which: ExportScope) -> Vec<ExportedScope> {
        self.scopes
            .values()
            .filter(|node| which == ExportScope::All || node.enabled())
            .map(AccessNode::export)
            .collect()
    }

    pub fn enabled(&self) -> Vec<&AccessNode> {
        self.search_by(AccessNode::enabled)
    }

    pub fn disabled(&self) -> Vec<&AccessNode> {
        self.search_by(|node| !node.enabled())
    }

    /// The declaration's shape with every leaf replaced by its current node.
    pub fn nodes(&self) -> Projection<AccessNode> {
        project(&self.declaration, &self.options.prefix, &self.options.spacer, |desc, scope, _| {
            match self.scopes.get(scope) {
                Some(node) => node.clone(),
                // every declared leaf is inserted by `reset`; a fresh node is only a fallback
                None => AccessNode::new(scope, desc, self.defaults.contains(scope)),
            }
        })
    }

    /// The declaration's shape with every leaf replaced by its enabled flag.
    pub fn can(&self) -> Projection<bool> {
        project(&self.declaration, &self.options.prefix, &self.options.spacer, |_, scope, _| {
            self.is_enabled(scope)
        })
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// All nodes in registry (declaration traversal) order.
    pub fn iter(&self) -> impl Iterator<Item = &AccessNode> {
        self.scopes.values()
    }

    pub fn options(&self) -> &AccessControlOptions {
        &self.options
    }

    /// A copy of the schema this registry was built from.
    pub fn declaration(&self) -> Declaration {
        self.declaration.clone()
    }

    pub(crate) fn declaration_ref(&self) -> &Declaration {
        &self.declaration
    }

    /// Nodes equal to `scope` or nested under it on a spacer boundary.
    pub(crate) fn descendants<'a>(&'a self, scope: &'a str) -> impl Iterator<Item = &'a AccessNode> + 'a {
        let spacer = self.options.spacer.as_str();
        self.scopes
            .values()
            .filter(move |node| is_under(node.scope(), scope, spacer))
    }

    /// Sets every node under `scope` (see [`Self::descendants`]) to `enabled`.
    pub(crate) fn set_descendants(&mut self, scope: &str, enabled: bool) {
        let spacer = self.options.spacer.as_str();
        self.scopes
            .values_mut()
            .filter(|node| is_under(node.scope(), scope, spacer))
            .for_each(|node| node.set_enabled(enabled));
    }

    pub(crate) fn set_all(&mut self, enabled: bool) {
        self.scopes.values_mut().for_each(|node| node.set_enabled(enabled));
    }
}

fn is_under(candidate: &str, scope: &str, spacer: &str) -> bool {
    match candidate.strip_prefix(scope) {
        Some(rest) => rest.is_empty() || rest.starts_with(spacer),
        None => false,
    }
}

fn ensure_unique_scopes(declaration: &Declaration, options: &AccessControlOptions) -> Result<(), AccessError> {
    let mut seen = HashSet::with_capacity(declaration.leaf_count());
    let mut duplicate = None;
    for_each_leaf(declaration, &options.prefix, &options.spacer, |_, scope, _| {
        if !seen.insert(scope.to_string()) && duplicate.is_none() {
            duplicate = Some(scope.to_string());
        }
    });
    match duplicate {
        Some(scope) => Err(AccessError::DuplicateScope(scope)),
        None => Ok(()),
    }
}
