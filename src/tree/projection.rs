//!
//! Shape-preserving projection: rebuilds a declaration's exact key structure
//! with every description leaf replaced by a computed value.
//!
//! This backs the mirrored views `Registry::nodes` (leaves are `AccessNode`s)
//! and `Registry::can` (leaves are booleans), which allow path lookups such as
//! `can["todo"]["view"]`.

use std::ops::Index;

use indexmap::IndexMap;
use serde::Serialize;

use crate::declaration::{Declaration, Entry};
use crate::tree::traverse::compose_scope;

/// A tree shaped exactly like the declaration it was projected from.
///
/// Serializes untagged, so a `Projection<bool>` renders as the nested JSON object
/// a UI layer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Projection<T> {
    Leaf(T),
    Branch(IndexMap<String, Projection<T>>),
}

impl<T> Projection<T> {
    /// Child under `key`; always `None` for a leaf.
    pub fn get(&self, key: &str) -> Option<&Projection<T>> {
        match self {
            Projection::Branch(children) => children.get(key),
            Projection::Leaf(_) => None,
        }
    }

    /// Leaf payload at the end of `path`, if the path names a leaf.
    pub fn at(&self, path: &[&str]) -> Option<&T> {
        let mut current = self;
        for key in path {
            current = current.get(key)?;
        }
        current.leaf()
    }

    pub fn leaf(&self) -> Option<&T> {
        match self {
            Projection::Leaf(value) => Some(value),
            Projection::Branch(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Projection::Leaf(_))
    }

    /// Child keys in declaration order; empty for a leaf.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Projection::Branch(children) => children.keys().map(String::as_str).collect(),
            Projection::Leaf(_) => Vec::new(),
        }
    }

    /// All leaf payloads, depth-first in declaration order.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            Projection::Leaf(value) => out.push(value),
            Projection::Branch(children) => children.values().for_each(|child| child.collect_leaves(out)),
        }
    }

    /// True when this tree has the same keys, order and leaf/branch positions as
    /// `declaration` at every depth.
    pub fn same_shape(&self, declaration: &Declaration) -> bool {
        let Projection::Branch(children) = self else {
            return false;
        };
        children.len() == declaration.len()
            && children.iter().zip(declaration).all(|((key, child), (decl_key, entry))| {
                key == decl_key
                    && match (child, entry) {
                        (Projection::Leaf(_), Entry::Leaf(_)) => true,
                        (Projection::Branch(_), Entry::Branch(decl)) => child.same_shape(decl),
                        _ => false,
                    }
            })
    }
}

impl Projection<bool> {
    /// Whether this node is a leaf holding `true`.
    pub fn granted(&self) -> bool {
        matches!(self, Projection::Leaf(true))
    }

    /// Reads the permission at `path`; absent paths and branches read as denied.
    pub fn allows(&self, path: &[&str]) -> bool {
        self.at(path).copied().unwrap_or(false)
    }
}

impl<T> Index<&str> for Projection<T> {
    type Output = Projection<T>;

    /// # Panics
    /// When `key` is not a child of this node.
    fn index(&self, key: &str) -> &Self::Output {
        match self.get(key) {
            Some(child) => child,
            None => panic!("no entry `{key}` in projection"),
        }
    }
}

/// Projects `declaration` into a new tree, calling `on_leaf(desc, scope, key)`
/// for every leaf. `parent` is the scope the top-level entries hang from.
///
/// The schema is only read; every level of the result is freshly allocated.
pub fn project<T, F>(declaration: &Declaration, parent: &str, spacer: &str, mut on_leaf: F) -> Projection<T>
where
    F: FnMut(&str, &str, &str) -> T,
{
    project_branch(declaration, parent, spacer, &mut on_leaf)
}

fn project_branch<T, F>(declaration: &Declaration, parent: &str, spacer: &str, on_leaf: &mut F) -> Projection<T>
where
    F: FnMut(&str, &str, &str) -> T,
{
    let mut children = IndexMap::with_capacity(declaration.len());
    for (key, entry) in declaration {
        let scope = compose_scope(parent, spacer, key);
        let child = match entry {
            Entry::Leaf(desc) => Projection::Leaf(on_leaf(desc.as_str(), scope.as_str(), key.as_str())),
            Entry::Branch(branch) => project_branch(branch, &scope, spacer, on_leaf),
        };
        children.insert(key.clone(), child);
    }
    Projection::Branch(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access;

    #[test]
    fn test_projection_mirrors_shape() {
        let decl = access! { todo: { view: "V", crud: { edit: "E" }, none: {} }, top: "T" };
        let scopes: Projection<String> = project(&decl, "app", ".", |_, scope, _| scope.to_string());

        assert!(scopes.same_shape(&decl));
        assert_eq!(scopes.keys(), vec!["todo", "top"]);
        assert_eq!(scopes["todo"]["crud"]["edit"].leaf().map(String::as_str), Some("app.todo.crud.edit"));
        assert_eq!(scopes["todo"]["none"].keys(), Vec::<&str>::new());
        assert!(!scopes["todo"]["none"].is_leaf());
    }

    #[test]
    fn test_leaf_callback_receives_local_key() {
        let decl = access! { a: { b: "desc-b" } };
        let keys = project(&decl, "", ".", |desc, _, key| format!("{key}:{desc}"));
        assert_eq!(keys.at(&["a", "b"]).map(String::as_str), Some("b:desc-b"));
    }

    #[test]
    fn test_bool_projection_helpers() {
        let decl = access! { a: { yes: "y", no: "n" } };
        let can = project(&decl, "", ".", |_, scope, _| scope == "a.yes");
        assert!(can["a"]["yes"].granted());
        assert!(!can["a"]["no"].granted());
        assert!(can.allows(&["a", "yes"]));
        assert!(!can.allows(&["a", "missing"]));
        assert!(!can.allows(&["a"]));
        assert_eq!(serde_json::to_string(&can).unwrap(), r#"{"a":{"yes":true,"no":false}}"#);
    }

    #[test]
    fn test_shape_mismatch_detected() {
        let decl = access! { a: "A", b: "B" };
        let other = access! { b: "B", a: "A" };
        let projected = project(&other, "", ".", |_, _, _| ());
        assert!(!projected.same_shape(&decl));
    }

    #[test]
    #[should_panic(expected = "no entry `missing`")]
    fn test_index_missing_key_panics() {
        let decl = access! { a: "A" };
        let projected = project(&decl, "", ".", |_, _, _| 0u8);
        let _ = &projected["missing"];
    }
}
