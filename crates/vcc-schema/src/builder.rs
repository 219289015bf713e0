//! # Attribute Tree Builder
//!
//! Walks a parsed JSON Schema document and produces the typed
//! [`Attribute`] tree used to render dynamic credential forms.
//!
//! ## Rules
//!
//! - `object`: one child per `properties` entry, in declaration order.
//!   A child is required iff its name appears in the parent's `required`.
//! - `array`: `items` becomes the nested element attribute. Elements take
//!   the array's name and are always required (a present element must
//!   conform).
//! - Unions become `multi`: `anyOf` / `oneOf` lists, or a `type` keyword
//!   holding several tags (`["string", "null"]`). Nested unions are
//!   flattened into one candidate list.
//! - An unknown `type` tag is a hard error. Missing `properties`, or a
//!   `required` entry naming no property, is tolerated.
//! - An untyped property or union branch (no `type` and no union keyword,
//!   e.g. `{}` or a bare `$ref`) admits any value and has no form
//!   control: it is skipped. Untyped `items` leave the array without an
//!   element attribute. Only an untyped document root is an error.
//!
//! `$ref` is not resolved; self-referencing schemas are not supported.

use serde_json::{Map, Number, Value};

use crate::attribute::{
    ArraySchema, Attribute, AttributeType, BooleanSchema, CommonProps, IntegerSchema, MultiNode,
    NullSchema, NumberSchema, ObjectSchema, Schema, StringFormat, StringSchema,
};
use crate::error::SchemaError;
use crate::pointer;

/// Name given to the root attribute of a document.
pub const ROOT_ATTRIBUTE_NAME: &str = "";

/// Build the attribute tree of a whole schema document.
///
/// The root attribute is unnamed and required.
///
/// # Errors
///
/// Returns [`SchemaError`] for unsupported or missing types anywhere in
/// the tree.
pub fn build_document(document: &Value) -> Result<Attribute, SchemaError> {
    build_attribute(ROOT_ATTRIBUTE_NAME, true, document)
}

/// Build the attribute for one named schema position.
///
/// # Errors
///
/// See [`build_document`].
pub fn build_attribute(name: &str, required: bool, schema: &Value) -> Result<Attribute, SchemaError> {
    build_at(name, required, schema, "")
}

fn build_at(name: &str, required: bool, schema: &Value, path: &str) -> Result<Attribute, SchemaError> {
    let node = as_schema_object(schema, path)?;
    let candidates = candidates(name, node, path)?;
    match <[Schema; 1]>::try_from(candidates) {
        Ok([single]) => Ok(single.into_attribute(name, required)),
        Err(schemas) => Ok(Attribute::Multi(MultiNode {
            name: name.to_string(),
            required,
            schemas,
        })),
    }
}

/// Resolve a schema node into its candidate single-type schemas.
///
/// A plain `type` yields exactly one candidate.
fn candidates(name: &str, node: &Map<String, Value>, path: &str) -> Result<Vec<Schema>, SchemaError> {
    for keyword in ["anyOf", "oneOf"] {
        if let Some(union) = node.get(keyword) {
            return union_candidates(name, node, union, &pointer::push(path, keyword));
        }
    }

    match node.get("type") {
        Some(Value::String(tag)) => Ok(vec![parse_schema(name, tag, node, path)?]),
        Some(Value::Array(tags)) => {
            let type_path = pointer::push(path, "type");
            let mut out = Vec::with_capacity(tags.len());
            for (i, tag) in tags.iter().enumerate() {
                let tag = tag.as_str().ok_or_else(|| SchemaError::InvalidSchema {
                    path: pointer::push_index(&type_path, i),
                    reason: "type entries must be strings".to_string(),
                })?;
                out.push(parse_schema(name, tag, node, path)?);
            }
            if out.is_empty() {
                return Err(SchemaError::MissingType { path: path.to_string() });
            }
            Ok(out)
        }
        Some(_) => Err(SchemaError::InvalidSchema {
            path: pointer::push(path, "type"),
            reason: "type must be a string or an array of strings".to_string(),
        }),
        None => Err(SchemaError::MissingType { path: path.to_string() }),
    }
}

fn union_candidates(
    name: &str,
    parent: &Map<String, Value>,
    union: &Value,
    path: &str,
) -> Result<Vec<Schema>, SchemaError> {
    let branches = union.as_array().ok_or_else(|| SchemaError::InvalidSchema {
        path: path.to_string(),
        reason: "union keyword must hold an array of schemas".to_string(),
    })?;
    let parent_common = parse_common(parent);

    let mut out = Vec::new();
    for (i, branch) in branches.iter().enumerate() {
        let branch_path = pointer::push_index(path, i);
        let branch_node = as_schema_object(branch, &branch_path)?;
        if is_untyped(branch_node) {
            tracing::debug!(path = %branch_path, "skipping untyped union branch");
            continue;
        }
        for mut schema in candidates(name, branch_node, &branch_path)? {
            inherit_common(schema.common_mut(), &parent_common);
            out.push(schema);
        }
    }
    if out.is_empty() {
        return Err(SchemaError::MissingType { path: path.to_string() });
    }
    Ok(out)
}

/// Union branches rarely repeat the title and description of the
/// property they belong to.
fn inherit_common(common: &mut CommonProps, parent: &CommonProps) {
    if common.title.is_none() {
        common.title.clone_from(&parent.title);
    }
    if common.description.is_none() {
        common.description.clone_from(&parent.description);
    }
}

fn parse_schema(
    name: &str,
    tag: &str,
    node: &Map<String, Value>,
    path: &str,
) -> Result<Schema, SchemaError> {
    let ty = AttributeType::from_json_type(tag).ok_or_else(|| {
        SchemaError::UnsupportedAttributeType {
            path: path.to_string(),
            type_name: tag.to_string(),
        }
    })?;
    let common = parse_common(node);

    let schema = match ty {
        AttributeType::Boolean => Schema::Boolean(BooleanSchema {
            common,
            enum_values: enum_of(node, Value::as_bool),
        }),
        AttributeType::Integer => Schema::Integer(IntegerSchema {
            common,
            enum_values: enum_of(node, |v| match v {
                Value::Number(n) if is_integral(n) => Some(n.clone()),
                _ => None,
            }),
        }),
        AttributeType::Number => Schema::Number(NumberSchema {
            common,
            enum_values: enum_of(node, Value::as_f64),
        }),
        AttributeType::String => Schema::String(StringSchema {
            common,
            enum_values: enum_of(node, |v| v.as_str().map(str::to_string)),
            format: node
                .get("format")
                .and_then(Value::as_str)
                .map(StringFormat::parse),
        }),
        AttributeType::Null => Schema::Null(NullSchema { common }),
        AttributeType::Array => {
            let attribute = match node.get("items") {
                Some(Value::Object(items)) if is_untyped(items) => None,
                Some(items) if items.is_object() => Some(Box::new(build_at(
                    name,
                    true,
                    items,
                    &pointer::push(path, "items"),
                )?)),
                _ => None,
            };
            Schema::Array(ArraySchema { common, attribute })
        }
        AttributeType::Object => {
            let required = node.get("required").and_then(Value::as_array).map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            });
            let attributes = match node.get("properties").and_then(Value::as_object) {
                Some(properties) => {
                    let properties_path = pointer::push(path, "properties");
                    let mut children = Vec::with_capacity(properties.len());
                    for (key, child) in properties {
                        if child.as_object().is_some_and(is_untyped) {
                            tracing::debug!(property = %key, "skipping untyped property");
                            continue;
                        }
                        let child_required = required
                            .as_ref()
                            .is_some_and(|names| names.iter().any(|n| n == key));
                        children.push(build_at(
                            key,
                            child_required,
                            child,
                            &pointer::push(&properties_path, key),
                        )?);
                    }
                    Some(children)
                }
                None => None,
            };
            Schema::Object(ObjectSchema {
                common,
                attributes,
                required,
            })
        }
        AttributeType::Multi => {
            return Err(SchemaError::UnsupportedAttributeType {
                path: path.to_string(),
                type_name: tag.to_string(),
            })
        }
    };
    Ok(schema)
}

fn parse_common(node: &Map<String, Value>) -> CommonProps {
    CommonProps {
        title: node.get("title").and_then(Value::as_str).map(str::to_string),
        description: node
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        default: node.get("default").cloned(),
        const_value: node.get("const").cloned(),
        examples: node.get("examples").and_then(Value::as_array).cloned(),
    }
}

/// Read an `enum` keyword, keeping only entries of the expected type.
fn enum_of<T>(node: &Map<String, Value>, read: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    node.get("enum")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(&read).collect())
}

/// No `type` and no union keyword: the schema constrains nothing we can
/// render.
fn is_untyped(node: &Map<String, Value>) -> bool {
    !["type", "anyOf", "oneOf"]
        .iter()
        .any(|keyword| node.contains_key(*keyword))
}

/// JSON Schema integers include numbers with a zero fractional part.
pub(crate) fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

fn as_schema_object<'a>(schema: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    schema.as_object().ok_or_else(|| SchemaError::InvalidSchema {
        path: path.to_string(),
        reason: format!("expected a schema object, found {}", json_type_name(schema)),
    })
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
