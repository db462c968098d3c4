pub mod core;
pub mod node;

// Re-export the primary types so `crate::registry::*` paths stay short.
pub use self::core::{create, Registry};
pub use node::AccessNode;
