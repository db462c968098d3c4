//!
//! Depth-first, pre-order flattening of a declaration into scope strings.

use crate::declaration::{Declaration, Entry};

/// Joins `key` onto `parent` with `spacer`. An empty parent is the root case and
/// introduces no leading spacer.
pub fn compose_scope(parent: &str, spacer: &str, key: &str) -> String {
    if parent.is_empty() {
        return key.to_string();
    }
    let mut scope = String::with_capacity(parent.len() + spacer.len() + key.len());
    scope.push_str(parent);
    scope.push_str(spacer);
    scope.push_str(key);
    scope
}

/// Callbacks fired by [`traverse`]. Both default to no-ops.
pub trait Visitor {
    /// Called for every description leaf with its fully-qualified scope and the
    /// scope of its immediate parent.
    fn visit_leaf(&mut self, _desc: &str, _scope: &str, _parent: &str) {}

    /// Called for every branch before descending into it.
    fn visit_branch(&mut self, _branch: &Declaration, _scope: &str, _parent: &str) {}
}

/// Visits every entry under `declaration`, children in key order.
///
/// `parent` is the scope the entries hang from; pass the configured prefix for a
/// whole declaration. An empty branch fires `visit_branch` and nothing beneath it.
pub fn traverse<V: Visitor + ?Sized>(declaration: &Declaration, parent: &str, spacer: &str, visitor: &mut V) {
    for (key, entry) in declaration {
        let scope = compose_scope(parent, spacer, key);
        match entry {
            Entry::Leaf(desc) => visitor.visit_leaf(desc, &scope, parent),
            Entry::Branch(branch) => {
                visitor.visit_branch(branch, &scope, parent);
                traverse(branch, &scope, spacer, visitor);
            }
        }
    }
}

struct LeafFn<F>(F);

impl<F: FnMut(&str, &str, &str)> Visitor for LeafFn<F> {
    fn visit_leaf(&mut self, desc: &str, scope: &str, parent: &str) {
        (self.0)(desc, scope, parent)
    }
}

/// Leaf-only traversal with a closure taking `(desc, scope, parent)`.
pub fn for_each_leaf<F>(declaration: &Declaration, parent: &str, spacer: &str, on_leaf: F)
where
    F: FnMut(&str, &str, &str),
{
    traverse(declaration, parent, spacer, &mut LeafFn(on_leaf));
}
