//! # vcc-schema — Credential Schemas as Typed Attribute Trees
//!
//! Credential types are described by JSON Schema documents. The console
//! renders issuance forms from them, shows issued credential data against
//! them, and validates payloads before they are sent. This crate provides
//! the schema side of all three:
//!
//! - [`builder`]: JSON Schema → [`Attribute`] tree.
//! - [`value`]: [`Attribute`] + credential data → [`AttributeValue`] tree.
//! - [`jsonld`]: credential types declared in a JSON-LD context, schema
//!   `$metadata`, and credential-subject extraction.
//! - [`payload`]: full JSON Schema validation with union-branch detail.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use vcc_schema::{build_attribute_value, build_document, AttributeType};
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["birthday"],
//!     "properties": {
//!         "birthday": {"type": "integer"},
//!         "nickname": {"type": ["string", "null"]}
//!     }
//! });
//! let attribute = build_document(&schema).unwrap();
//! let object = attribute.as_object().unwrap();
//! assert!(object.child("birthday").unwrap().required());
//! assert_eq!(
//!     object.child("nickname").unwrap().attribute_type(),
//!     AttributeType::Multi
//! );
//!
//! let value = build_attribute_value(&attribute, Some(&json!({"birthday": 19960424}))).unwrap();
//! assert!(value.child("birthday").unwrap().is_present());
//! ```

pub mod attribute;
pub mod builder;
pub mod error;
pub mod jsonld;
pub mod payload;
mod pointer;
pub mod value;

pub use attribute::{
    display_order, ArraySchema, Attribute, AttributeType, BooleanSchema, CommonProps,
    IntegerSchema, MultiNode, Node, NullSchema, NumberSchema, ObjectSchema, Schema, StringFormat,
    StringSchema,
};
pub use builder::{build_attribute, build_document, ROOT_ATTRIBUTE_NAME};
pub use error::{SchemaError, ValueError, ValueErrors};
pub use jsonld::{
    extract_credential_subject, extract_json_ld_types, find_json_ld_type, schema_metadata,
    SchemaMetadata, CREDENTIAL_SUBJECT,
};
pub use payload::{validate_payload, PayloadError, PayloadValidator};
pub use value::{build_attribute_value, resolve_candidate, AttributeValue, ValueNode};
