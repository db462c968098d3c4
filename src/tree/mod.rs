//! Tree algorithms over a [`Declaration`](crate::Declaration).
//!
//! `traverse` flattens a declaration into scope strings; `projection` rebuilds
//! a declaration's shape with new leaf payloads.

pub mod projection;
pub mod traverse;

pub use projection::{project, Projection};
pub use traverse::{compose_scope, traverse, Visitor};
