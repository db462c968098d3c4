//! Accepting either a ready registry or a raw declaration.
//!
//! Request hooks and UI state layers take whichever the host has at hand and only
//! build a [`Registry`] when they were given a declaration.

use crate::declaration::Declaration;
use crate::error::AccessError;
use crate::registry::Registry;
use crate::types::AccessControlOptions;

#[derive(Debug, Clone)]
pub enum AccessSource {
    Registry(Registry),
    Declaration(Declaration),
}

impl AccessSource {
    /// Whether this is already a built registry.
    pub fn is_registry(&self) -> bool {
        matches!(self, AccessSource::Registry(_))
    }

    /// Returns the registry, building one from a declaration with `options`.
    /// `options` is ignored for an existing registry.
    pub fn into_registry(self, options: AccessControlOptions) -> Result<Registry, AccessError> {
        match self {
            AccessSource::Registry(registry) => Ok(registry),
            AccessSource::Declaration(declaration) => Registry::new(declaration, options),
        }
    }
}

impl From<Registry> for AccessSource {
    fn from(registry: Registry) -> Self {
        AccessSource::Registry(registry)
    }
}

impl From<Declaration> for AccessSource {
    fn from(declaration: Declaration) -> Self {
        AccessSource::Declaration(declaration)
    }
}
