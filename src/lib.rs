#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Access-Tree is a hierarchical permission-scope registry.
//!
//! A nested [`Declaration`] of named capabilities is flattened into dotted scope
//! strings (`com.example.todo.view`), each carrying an enabled flag and a
//! description. The [`Registry`] answers exact and prefix queries, applies grants
//! and toggles, and mirrors its state back into the declaration's shape so hosts
//! can write `can["todo"]["view"]`.
//!
//! The registry stores flags only; it does not evaluate policies or roles.

// Module for error types.
pub mod error;

// Module for options and export types.
pub mod types;

// Module for the declaration schema and the `access!` macro.
pub mod declaration;

// Module for traversal and shape-preserving projection.
pub mod tree;

// Module for the registry and its nodes.
pub mod registry;

// Module for permission-editing helpers.
pub mod editor;

// Module for registry-or-declaration inputs.
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use declaration::{Declaration, Entry};
pub use editor::{AccessEditor, ScopeItem, ScopeValue};
pub use error::AccessError;
pub use registry::{create, AccessNode, Registry};
pub use source::AccessSource;
pub use tree::Projection;
pub use types::{AccessControlOptions, ExportScope, ExportedScope};
