//! # JSON-LD Contexts and Credential Schema Metadata
//!
//! A credential JSON Schema points at the JSON-LD context that defines its
//! type through a `$metadata` block:
//!
//! ```json
//! {
//!   "$metadata": {
//!     "type": "KYCAgeCredential",
//!     "uris": { "jsonLdContext": "https://.../kyc-v3.json-ld" },
//!     "version": "1.0"
//!   }
//! }
//! ```
//!
//! The context declares each credential type as a term whose value is an
//! object carrying both an `@id` and a scoped `@context`. Plain property
//! terms (string values, or objects without a scoped context) are not types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vcc_core::JsonLdType;

use crate::attribute::Attribute;
use crate::error::SchemaError;

/// Name of the property holding the claims of a verifiable credential.
pub const CREDENTIAL_SUBJECT: &str = "credentialSubject";

/// The `$metadata` block of a credential JSON Schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    /// The credential type name (`$metadata.type`).
    pub type_name: Option<String>,
    /// URL of the JSON-LD context (`$metadata.uris.jsonLdContext`).
    pub json_ld_context: Option<String>,
    /// Schema version (`$metadata.version`).
    pub version: Option<String>,
}

/// Read the `$metadata` block of a schema document.
///
/// Missing or malformed fields are left `None`.
pub fn schema_metadata(document: &Value) -> SchemaMetadata {
    let Some(metadata) = document.get("$metadata") else {
        return SchemaMetadata::default();
    };
    let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);
    SchemaMetadata {
        type_name: text(metadata.get("type")),
        json_ld_context: text(metadata.pointer("/uris/jsonLdContext")),
        version: text(metadata.get("version")),
    }
}

/// List the credential types declared by a JSON-LD context document, in
/// declaration order.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidContext`] if the document has no
/// `@context`, or if `@context` is neither an object nor an array.
pub fn extract_json_ld_types(context_document: &Value) -> Result<Vec<JsonLdType>, SchemaError> {
    let context = context_document
        .get("@context")
        .ok_or_else(|| SchemaError::InvalidContext("missing @context".to_string()))?;

    let scopes: Vec<&Map<String, Value>> = match context {
        Value::Object(map) => vec![map],
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        _ => {
            return Err(SchemaError::InvalidContext(
                "@context must be an object or an array".to_string(),
            ))
        }
    };

    let mut types = Vec::new();
    for scope in scopes {
        for (term, definition) in scope {
            if term.starts_with('@') {
                continue;
            }
            let Some(definition) = definition.as_object() else {
                continue;
            };
            if !definition.contains_key("@context") {
                continue;
            }
            if let Some(id) = definition.get("@id").and_then(Value::as_str) {
                types.push(JsonLdType::new(id, term.as_str()));
            }
        }
    }
    tracing::debug!(count = types.len(), "extracted JSON-LD types");
    Ok(types)
}

/// Find a declared type by name.
pub fn find_json_ld_type<'a>(types: &'a [JsonLdType], name: &str) -> Option<&'a JsonLdType> {
    types.iter().find(|t| t.name == name)
}

/// The credential-subject attribute of a full verifiable-credential schema.
///
/// Returns `None` unless `root` is an object with an object-typed
/// `credentialSubject` child.
pub fn extract_credential_subject(root: &Attribute) -> Option<&Attribute> {
    root.as_object()?
        .child(CREDENTIAL_SUBJECT)
        .filter(|subject| subject.as_object().is_some())
}
