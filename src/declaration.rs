//!
//! The declaration tree: the caller's nested schema of named capabilities.
//!
//! Every leaf is a human-readable description and every branch is a further
//! [`Declaration`]. Key order is insertion order, which fixes the order of every
//! traversal, export and projection built from the schema.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::AccessError;
use crate::tree::traverse;

/// One value in a declaration: a description (leaf) or a nested table (branch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Leaf(String),
    Branch(Declaration),
}

impl Entry {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf(_))
    }
}

impl From<&str> for Entry {
    fn from(desc: &str) -> Self {
        Entry::Leaf(desc.to_string())
    }
}

impl From<String> for Entry {
    fn from(desc: String) -> Self {
        Entry::Leaf(desc)
    }
}

impl From<Declaration> for Entry {
    fn from(branch: Declaration) -> Self {
        Entry::Branch(branch)
    }
}

/// An insertion-ordered mapping from key to [`Entry`].
///
/// Equality is order-sensitive: two declarations with the same keys in a
/// different order flatten, export and project differently.
#[derive(Debug, Clone, Default, Eq)]
pub struct Declaration {
    entries: IndexMap<String, Entry>,
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the previous value for `key`.
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        self.entries.insert(key.into(), entry.into())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of description leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|entry| match entry {
                Entry::Leaf(_) => 1,
                Entry::Branch(branch) => branch.leaf_count(),
            })
            .sum()
    }

    /// Every scope string this schema produces under `prefix`, in traversal order.
    ///
    /// Hosts use this once at startup to publish the valid scope names instead of
    /// hard-coding them.
    pub fn scopes(&self, prefix: &str, spacer: &str) -> Vec<String> {
        let mut scopes = Vec::with_capacity(self.leaf_count());
        traverse::for_each_leaf(self, prefix, spacer, |_, scope, _| scopes.push(scope.to_string()));
        scopes
    }

    /// Parses and validates a declaration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, AccessError> {
        let value: Value = serde_json::from_str(json)?;
        Declaration::try_from(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AccessError> {
        let value: Value = serde_json::from_reader(reader)?;
        Declaration::try_from(value)
    }

    /// Loads a declaration file, e.g. the host's `access.control.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AccessError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_object(
        object: serde_json::Map<String, Value>,
        path: &mut Vec<String>,
    ) -> Result<Self, AccessError> {
        let mut entries = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            path.push(key.clone());
            let entry = match value {
                Value::String(desc) => Entry::Leaf(desc),
                Value::Object(inner) => Entry::Branch(Self::from_object(inner, path)?),
                other => {
                    return Err(AccessError::InvalidDeclaration {
                        path: path.join("."),
                        found: kind_of(&other),
                    })
                }
            };
            path.pop();
            entries.insert(key, entry);
        }
        Ok(Declaration { entries })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Declaration {
    type Error = AccessError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Self::from_object(object, &mut Vec::new()),
            other => Err(AccessError::InvalidDeclaration {
                path: "<root>".to_string(),
                found: kind_of(&other),
            }),
        }
    }
}

impl Serialize for Declaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Declaration::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<K: Into<String>, E: Into<Entry>> FromIterator<(K, E)> for Declaration {
    fn from_iter<T: IntoIterator<Item = (K, E)>>(iter: T) -> Self {
        Declaration {
            entries: iter.into_iter().map(|(k, e)| (k.into(), e.into())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Declaration {
    type Item = (&'a String, &'a Entry);
    type IntoIter = indexmap::map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds a [`Declaration`] from a nested literal.
///
/// Keys are identifiers or string literals; values are description literals or
/// braced sub-trees.
///
/// ```
/// let access = access_tree::access! {
///     todo: {
///         view: "Enable user to view todo list page",
///         "bulk-edit": "Enable user to edit many items at once",
///     },
///     extra: { sayHi: "Enable user to say hi" },
/// };
/// assert_eq!(access.leaf_count(), 3);
/// ```
#[macro_export]
macro_rules! access {
    (@key $key:ident) => {
        stringify!($key)
    };
    (@key $key:literal) => {
        $key
    };
    (@entry { $($inner:tt)* }) => {
        $crate::Entry::Branch($crate::access! { $($inner)* })
    };
    (@entry $desc:literal) => {
        $crate::Entry::Leaf(::std::string::String::from($desc))
    };
    ($($key:tt : $value:tt),* $(,)?) => {
        <$crate::Declaration as ::core::iter::FromIterator<(::std::string::String, $crate::Entry)>>::from_iter([
            $((::std::string::String::from($crate::access!(@key $key)), $crate::access!(@entry $value))),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_preserves_key_order() {
        let decl = Declaration::from_json_str(r#"{"zeta": "z", "alpha": {"b": "b", "a": "a"}}"#).unwrap();
        assert_eq!(decl.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        match decl.get("alpha") {
            Some(Entry::Branch(inner)) => assert_eq!(inner.keys().collect::<Vec<_>>(), vec!["b", "a"]),
            other => panic!("expected branch, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_leaf_is_rejected_with_path() {
        let err = Declaration::from_json_str(r#"{"todo": {"view": "ok", "limit": 3}}"#).unwrap_err();
        match err {
            AccessError::InvalidDeclaration { path, found } => {
                assert_eq!(path, "todo.limit");
                assert_eq!(found, "a number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_must_be_object() {
        let err = Declaration::from_json_str(r#"["view"]"#).unwrap_err();
        assert!(matches!(err, AccessError::InvalidDeclaration { ref path, .. } if path == "<root>"));
    }

    #[test]
    fn test_empty_branch_is_kept() {
        let decl = Declaration::from_json_str(r#"{"empty": {}, "leaf": "x"}"#).unwrap();
        assert_eq!(decl.len(), 2);
        assert_eq!(decl.leaf_count(), 1);
    }

    #[test]
    fn test_macro_matches_json() {
        let from_macro = access! {
            todo: { view: "View", "crud-all": "All" },
            extra: "Extra",
        };
        let from_json =
            Declaration::from_json_str(r#"{"todo": {"view": "View", "crud-all": "All"}, "extra": "Extra"}"#).unwrap();
        assert_eq!(from_macro, from_json);
    }

    #[test]
    fn test_equality_respects_key_order() {
        assert_ne!(access! { x: "X", y: "Y" }, access! { y: "Y", x: "X" });
        assert_ne!(access! { a: { x: "X", y: "Y" } }, access! { a: { y: "Y", x: "X" } });
        assert_eq!(access! { a: { x: "X", y: "Y" } }, access! { a: { x: "X", y: "Y" } });

        let reordered = Declaration::from_json_str(r#"{"y": "Y", "x": "X"}"#).unwrap();
        assert_ne!(reordered, access! { x: "X", y: "Y" });
    }

    #[test]
    fn test_serde_round_trip_through_value() {
        let decl = access! { a: { b: "B" }, c: "C" };
        let json = serde_json::to_string(&decl).unwrap();
        assert_eq!(json, r#"{"a":{"b":"B"},"c":"C"}"#);
        let back: Declaration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decl);
    }

    #[test]
    fn test_scopes_listing() {
        let decl = access! { todo: { view: "v", crud: { edit: "e" } }, extra: { sayHi: "h" } };
        assert_eq!(
            decl.scopes("app", ":"),
            vec!["app:todo:view", "app:todo:crud:edit", "app:extra:sayHi"]
        );
    }
}
