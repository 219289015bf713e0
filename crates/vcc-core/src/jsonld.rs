//! # JSON-LD Type Descriptors
//!
//! A credential type is named by a JSON-LD term in a context document.
//! The term's `@id` is the stable identifier that schema hashes are
//! derived from.

use serde::{Deserialize, Serialize};

/// A credential type declared in a JSON-LD context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JsonLdType {
    /// The `@id` URI of the type.
    pub id: String,
    /// The human-readable term name (e.g. `KYCAgeCredential`).
    pub name: String,
}

impl JsonLdType {
    /// Create a type descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for JsonLdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.id)
    }
}
