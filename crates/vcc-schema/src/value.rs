//! # Attribute Values — Credential Data Overlaid on a Schema
//!
//! An [`AttributeValue`] tree pairs every attribute of a schema with the
//! concrete value found at the same position in a credential subject. It
//! is built per render from a `(schema, data)` pair and never mutated.
//!
//! ## Absent and Mismatched Values
//!
//! - Absent and optional: `value` is `None`.
//! - Absent and required: [`ValueError::MissingRequired`]. The tree is
//!   never built with a hole where the schema promises a value.
//! - Explicit `null` for an optional non-null attribute counts as absent.
//! - Wrong JSON type: [`ValueError::TypeMismatch`]. A number with no
//!   fractional part (`5.0`) is an integer.
//! - `multi`: the first candidate schema whose type accepts the value wins.
//!   An absent `multi` value resolves to its first candidate.
//!
//! The walk does not stop at the first violation: every violation in the
//! document is reported in one [`ValueErrors`].
//!
//! Data keys with no matching attribute are ignored. Elements of an array
//! whose schema has no `items` are typed by their own JSON value.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::attribute::{
    ArraySchema, Attribute, AttributeType, BooleanSchema, IntegerSchema, NullSchema, NumberSchema,
    ObjectSchema, Schema, StringSchema,
};
use crate::builder::{is_integral, json_type_name};
use crate::error::{ValueError, ValueErrors};
use crate::pointer;

/// One attribute paired with its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueNode<S, V> {
    pub name: String,
    pub required: bool,
    pub schema: S,
    pub value: Option<V>,
}

/// A typed attribute value, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeValue {
    Boolean(ValueNode<BooleanSchema, bool>),
    Integer(ValueNode<IntegerSchema, Number>),
    Number(ValueNode<NumberSchema, Number>),
    String(ValueNode<StringSchema, String>),
    Null(ValueNode<NullSchema, ()>),
    Array(ValueNode<ArraySchema, Vec<AttributeValue>>),
    Object(ValueNode<ObjectSchema, Vec<AttributeValue>>),
}

impl AttributeValue {
    /// Property key of this value.
    pub fn name(&self) -> &str {
        match self {
            Self::Boolean(n) => &n.name,
            Self::Integer(n) => &n.name,
            Self::Number(n) => &n.name,
            Self::String(n) => &n.name,
            Self::Null(n) => &n.name,
            Self::Array(n) => &n.name,
            Self::Object(n) => &n.name,
        }
    }

    /// Whether the schema marks this value as mandatory.
    pub fn required(&self) -> bool {
        match self {
            Self::Boolean(n) => n.required,
            Self::Integer(n) => n.required,
            Self::Number(n) => n.required,
            Self::String(n) => n.required,
            Self::Null(n) => n.required,
            Self::Array(n) => n.required,
            Self::Object(n) => n.required,
        }
    }

    /// The resolved type of this value. Never `multi`.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Integer(_) => AttributeType::Integer,
            Self::Number(_) => AttributeType::Number,
            Self::String(_) => AttributeType::String,
            Self::Null(_) => AttributeType::Null,
            Self::Array(_) => AttributeType::Array,
            Self::Object(_) => AttributeType::Object,
        }
    }

    /// Whether a value is present at this position.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Boolean(n) => n.value.is_some(),
            Self::Integer(n) => n.value.is_some(),
            Self::Number(n) => n.value.is_some(),
            Self::String(n) => n.value.is_some(),
            Self::Null(n) => n.value.is_some(),
            Self::Array(n) => n.value.is_some(),
            Self::Object(n) => n.value.is_some(),
        }
    }

    /// Children of an object or elements of an array.
    pub fn children(&self) -> &[AttributeValue] {
        match self {
            Self::Array(n) => n.value.as_deref().unwrap_or_default(),
            Self::Object(n) => n.value.as_deref().unwrap_or_default(),
            _ => &[],
        }
    }

    /// Look up the child value of an object by property name.
    pub fn child(&self, name: &str) -> Option<&AttributeValue> {
        match self {
            Self::Object(_) => self.children().iter().find(|c| c.name() == name),
            _ => None,
        }
    }

    /// Convert back to plain JSON. Absent values are omitted from objects.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Boolean(n) => n.value.map(Value::Bool),
            Self::Integer(n) => n.value.clone().map(Value::Number),
            Self::Number(n) => n.value.clone().map(Value::Number),
            Self::String(n) => n.value.clone().map(Value::String),
            Self::Null(n) => n.value.map(|()| Value::Null),
            Self::Array(n) => n.value.as_ref().map(|items| {
                Value::Array(items.iter().map(|i| i.to_json().unwrap_or(Value::Null)).collect())
            }),
            Self::Object(n) => n.value.as_ref().map(|children| {
                Value::Object(
                    children
                        .iter()
                        .filter_map(|c| c.to_json().map(|v| (c.name().to_string(), v)))
                        .collect(),
                )
            }),
        }
    }
}

/// Overlay `data` onto `attribute`.
///
/// `data` is the value at the attribute's position, `None` when absent.
///
/// # Errors
///
/// Returns [`ValueErrors`] listing every missing required value and every
/// value of the wrong type. Paths are JSON Pointers into `data`.
pub fn build_attribute_value(
    attribute: &Attribute,
    data: Option<&Value>,
) -> Result<AttributeValue, ValueErrors> {
    let mut errors = Vec::new();
    match build_at(attribute, data, "", &mut errors) {
        Some(value) if errors.is_empty() => Ok(value),
        _ => Err(ValueErrors::new(errors)),
    }
}

/// Build one position, recording its violation instead of returning it so
/// that siblings are still visited.
fn build_at(
    attribute: &Attribute,
    data: Option<&Value>,
    path: &str,
    errors: &mut Vec<ValueError>,
) -> Option<AttributeValue> {
    match build_node(attribute, data, path, errors) {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn build_node(
    attribute: &Attribute,
    data: Option<&Value>,
    path: &str,
    errors: &mut Vec<ValueError>,
) -> Result<AttributeValue, ValueError> {
    let name = attribute.name();
    let required = attribute.required();

    match attribute {
        Attribute::Multi(node) => {
            let accepts_null = node
                .schemas
                .iter()
                .any(|s| s.attribute_type() == AttributeType::Null);
            let data = data.filter(|v| accepts_null || required || !v.is_null());
            let present = present(data, required, path, attribute.attribute_type())?;
            let chosen = match present {
                Some(value) => resolve_candidate(&node.schemas, value).ok_or_else(|| {
                    ValueError::TypeMismatch {
                        path: path.to_string(),
                        expected: node
                            .schemas
                            .iter()
                            .map(|s| s.attribute_type().as_str())
                            .collect::<Vec<_>>()
                            .join(" | "),
                        found: json_type_name(value).to_string(),
                    }
                })?,
                None => node.schemas.first().ok_or_else(|| ValueError::TypeMismatch {
                    path: path.to_string(),
                    expected: "a union candidate".to_string(),
                    found: "an empty union".to_string(),
                })?,
            };
            let resolved = chosen.clone().into_attribute(name, required);
            build_node(&resolved, present, path, errors)
        }
        Attribute::Boolean(node) => Ok(AttributeValue::Boolean(ValueNode {
            name: name.to_string(),
            required,
            schema: node.schema.clone(),
            value: typed(data, required, path, AttributeType::Boolean, Value::as_bool)?,
        })),
        Attribute::Integer(node) => Ok(AttributeValue::Integer(ValueNode {
            name: name.to_string(),
            required,
            schema: node.schema.clone(),
            value: typed(data, required, path, AttributeType::Integer, |v| match v {
                Value::Number(n) if is_integral(n) => Some(n.clone()),
                _ => None,
            })?,
        })),
        Attribute::Number(node) => Ok(AttributeValue::Number(ValueNode {
            name: name.to_string(),
            required,
            schema: node.schema.clone(),
            value: typed(data, required, path, AttributeType::Number, |v| match v {
                Value::Number(n) => Some(n.clone()),
                _ => None,
            })?,
        })),
        Attribute::String(node) => Ok(AttributeValue::String(ValueNode {
            name: name.to_string(),
            required,
            schema: node.schema.clone(),
            value: typed(data, required, path, AttributeType::String, |v| {
                v.as_str().map(str::to_string)
            })?,
        })),
        Attribute::Null(node) => {
            let value = match data {
                Some(Value::Null) => Some(()),
                Some(other) => return Err(mismatch(path, AttributeType::Null, other)),
                None if required => {
                    return Err(ValueError::MissingRequired {
                        path: path.to_string(),
                    })
                }
                None => None,
            };
            Ok(AttributeValue::Null(ValueNode {
                name: name.to_string(),
                required,
                schema: node.schema.clone(),
                value,
            }))
        }
        Attribute::Array(node) => {
            let value = match present(data, required, path, AttributeType::Array)? {
                Some(Value::Array(items)) => {
                    Some(build_elements(name, &node.schema, items, path, errors))
                }
                Some(other) => return Err(mismatch(path, AttributeType::Array, other)),
                None => None,
            };
            Ok(AttributeValue::Array(ValueNode {
                name: name.to_string(),
                required,
                schema: node.schema.clone(),
                value,
            }))
        }
        Attribute::Object(node) => {
            let value = match present(data, required, path, AttributeType::Object)? {
                Some(Value::Object(fields)) => {
                    let mut children = Vec::with_capacity(node.schema.children().len());
                    for child in node.schema.children() {
                        let child_path = pointer::push(path, child.name());
                        children.extend(build_at(
                            child,
                            fields.get(child.name()),
                            &child_path,
                            errors,
                        ));
                    }
                    Some(children)
                }
                Some(other) => return Err(mismatch(path, AttributeType::Object, other)),
                None => None,
            };
            Ok(AttributeValue::Object(ValueNode {
                name: name.to_string(),
                required,
                schema: node.schema.clone(),
                value,
            }))
        }
    }
}

fn build_elements(
    name: &str,
    schema: &ArraySchema,
    items: &[Value],
    path: &str,
    errors: &mut Vec<ValueError>,
) -> Vec<AttributeValue> {
    let Some(element) = schema.attribute.as_deref() else {
        return items.iter().map(|item| infer(name, true, item)).collect();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| build_at(element, Some(item), &pointer::push_index(path, i), errors))
        .collect()
}

/// Type a value that no schema describes by its own JSON type.
fn infer(name: &str, required: bool, value: &Value) -> AttributeValue {
    let name = name.to_string();
    match value {
        Value::Null => AttributeValue::Null(ValueNode {
            name,
            required,
            schema: NullSchema::default(),
            value: Some(()),
        }),
        Value::Bool(b) => AttributeValue::Boolean(ValueNode {
            name,
            required,
            schema: BooleanSchema::default(),
            value: Some(*b),
        }),
        Value::Number(n) if is_integral(n) => AttributeValue::Integer(ValueNode {
            name,
            required,
            schema: IntegerSchema::default(),
            value: Some(n.clone()),
        }),
        Value::Number(n) => AttributeValue::Number(ValueNode {
            name,
            required,
            schema: NumberSchema::default(),
            value: Some(n.clone()),
        }),
        Value::String(s) => AttributeValue::String(ValueNode {
            name,
            required,
            schema: StringSchema::default(),
            value: Some(s.clone()),
        }),
        Value::Array(items) => AttributeValue::Array(ValueNode {
            value: Some(items.iter().map(|item| infer(&name, true, item)).collect()),
            name,
            required,
            schema: ArraySchema::default(),
        }),
        Value::Object(fields) => AttributeValue::Object(ValueNode {
            name,
            required,
            schema: ObjectSchema::default(),
            value: Some(
                fields
                    .iter()
                    .map(|(key, field)| infer(key, false, field))
                    .collect(),
            ),
        }),
    }
}

/// Normalize presence: explicit `null` on an optional non-null attribute
/// is treated as absent; absence of a required value is an error.
fn present<'a>(
    data: Option<&'a Value>,
    required: bool,
    path: &str,
    expected: AttributeType,
) -> Result<Option<&'a Value>, ValueError> {
    match data {
        Some(Value::Null) if !required && expected != AttributeType::Multi => Ok(None),
        Some(value) => Ok(Some(value)),
        None if required => Err(ValueError::MissingRequired {
            path: path.to_string(),
        }),
        None => Ok(None),
    }
}

fn typed<T>(
    data: Option<&Value>,
    required: bool,
    path: &str,
    expected: AttributeType,
    read: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>, ValueError> {
    match present(data, required, path, expected)? {
        Some(value) => read(value)
            .map(Some)
            .ok_or_else(|| mismatch(path, expected, value)),
        None => Ok(None),
    }
}

fn accepts(ty: AttributeType, value: &Value) -> bool {
    match ty {
        AttributeType::Boolean => value.is_boolean(),
        AttributeType::Integer => matches!(value, Value::Number(n) if is_integral(n)),
        AttributeType::Number => value.is_number(),
        AttributeType::String => value.is_string(),
        AttributeType::Null => value.is_null(),
        AttributeType::Array => value.is_array(),
        AttributeType::Object => value.is_object(),
        AttributeType::Multi => false,
    }
}

fn mismatch(path: &str, expected: AttributeType, found: &Value) -> ValueError {
    ValueError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        found: json_type_name(found).to_string(),
    }
}

/// Resolve a union schema for a known value without building a full
/// tree. Returns the first candidate accepting `value`.
pub fn resolve_candidate<'a>(schemas: &'a [Schema], value: &Value) -> Option<&'a Schema> {
    schemas.iter().find(|s| accepts(s.attribute_type(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_document;
    use serde_json::json;

    fn person_schema() -> Attribute {
        build_document(&json!({
            "type": "object",
            "required": ["name", "birthday"],
            "properties": {
                "name": {"type": "string"},
                "birthday": {"type": "integer"},
                "nickname": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "address": {
                    "type": "object",
                    "required": ["city"],
                    "properties": {
                        "city": {"type": "string"},
                        "zip": {"type": ["string", "integer"]}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_overlay_copies_primitives_and_recurses() {
        let data = json!({
            "name": "Ada",
            "birthday": 18151210,
            "tags": ["math", "engines"],
            "address": {"city": "London", "zip": 12345},
            "unrelated": true
        });
        let tree = build_attribute_value(&person_schema(), Some(&data)).unwrap();

        let name = tree.child("name").unwrap();
        assert_eq!(name.to_json(), Some(json!("Ada")));
        assert!(tree.child("nickname").is_some_and(|n| !n.is_present()));

        let tags = tree.child("tags").unwrap();
        let tag_values: Vec<_> = tags.children().iter().filter_map(AttributeValue::to_json).collect();
        assert_eq!(tag_values, vec![json!("math"), json!("engines")]);

        let zip = tree.child("address").unwrap().child("zip").unwrap();
        assert_eq!(zip.attribute_type(), AttributeType::Integer);
        assert!(tree.child("unrelated").is_none());
    }

    fn violations(data: Value) -> Vec<ValueError> {
        build_attribute_value(&person_schema(), Some(&data))
            .unwrap_err()
            .violations()
            .to_vec()
    }

    #[test]
    fn test_missing_required_value_fails() {
        let data = json!({"name": "Ada", "address": {"city": "London"}});
        assert_eq!(
            violations(data),
            vec![ValueError::MissingRequired {
                path: "/birthday".into()
            }]
        );
    }

    #[test]
    fn test_missing_required_nested_value_reports_full_path() {
        let data = json!({"name": "Ada", "birthday": 1, "address": {"zip": "N1"}});
        assert_eq!(
            violations(data),
            vec![ValueError::MissingRequired {
                path: "/address/city".into()
            }]
        );
    }

    #[test]
    fn test_type_mismatch_in_array_element() {
        let data = json!({"name": "Ada", "birthday": 1, "tags": ["ok", 7]});
        assert_eq!(
            violations(data),
            vec![ValueError::TypeMismatch {
                path: "/tags/1".into(),
                expected: "string".into(),
                found: "integer".into(),
            }]
        );
    }

    #[test]
    fn test_every_violation_is_reported() {
        let data = json!({
            "name": 42,
            "tags": ["ok", false, "fine", null],
            "address": {"zip": true}
        });
        let paths: Vec<String> = violations(data)
            .iter()
            .map(|v| v.path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["/name", "/birthday", "/tags/1", "/tags/3", "/address/city", "/address/zip"]
        );
    }

    #[test]
    fn test_null_on_optional_counts_as_absent() {
        let data = json!({"name": "Ada", "birthday": 1, "nickname": null});
        let tree = build_attribute_value(&person_schema(), Some(&data)).unwrap();
        assert!(!tree.child("nickname").unwrap().is_present());
    }

    #[test]
    fn test_multi_without_matching_candidate() {
        let data = json!({"name": "Ada", "birthday": 1, "address": {"city": "L", "zip": true}});
        assert_eq!(
            violations(data),
            vec![ValueError::TypeMismatch {
                path: "/address/zip".into(),
                expected: "string | integer".into(),
                found: "boolean".into(),
            }]
        );
    }

    #[test]
    fn test_integral_float_is_an_integer() {
        let data = json!({"name": "Ada", "birthday": 5.0});
        let tree = build_attribute_value(&person_schema(), Some(&data)).unwrap();
        let birthday = tree.child("birthday").unwrap();
        assert_eq!(birthday.attribute_type(), AttributeType::Integer);
        assert_eq!(birthday.to_json(), Some(json!(5.0)));

        assert_eq!(
            violations(json!({"name": "Ada", "birthday": 5.5})),
            vec![ValueError::TypeMismatch {
                path: "/birthday".into(),
                expected: "integer".into(),
                found: "number".into(),
            }]
        );
    }

    #[test]
    fn test_round_trip_to_json_drops_unknown_keys() {
        let data = json!({"name": "Ada", "birthday": 1, "extra": [1]});
        let tree = build_attribute_value(&person_schema(), Some(&data)).unwrap();
        assert_eq!(tree.to_json(), Some(json!({"name": "Ada", "birthday": 1})));
    }

    #[test]
    fn test_array_without_item_schema_keeps_elements() {
        let attr = build_document(&json!({
            "type": "object",
            "properties": {"tags": {"type": "array"}}
        }))
        .unwrap();
        let data = json!({"tags": ["a", 2, 2.5, null, {"k": [true]}]});
        let tree = build_attribute_value(&attr, Some(&data)).unwrap();

        let tags = tree.child("tags").unwrap();
        let types: Vec<_> = tags.children().iter().map(AttributeValue::attribute_type).collect();
        assert_eq!(
            types,
            vec![
                AttributeType::String,
                AttributeType::Integer,
                AttributeType::Number,
                AttributeType::Null,
                AttributeType::Object
            ]
        );
        assert!(tags.children().iter().all(|e| e.name() == "tags"));
        assert_eq!(tree.to_json(), Some(data));
    }

    #[test]
    fn test_resolve_candidate_picks_first_accepting() {
        let schemas = vec![
            Schema::Integer(IntegerSchema::default()),
            Schema::Number(NumberSchema::default()),
        ];
        let pick = resolve_candidate(&schemas, &json!(1.5)).unwrap();
        assert_eq!(pick.attribute_type(), AttributeType::Number);
        let pick = resolve_candidate(&schemas, &json!(2)).unwrap();
        assert_eq!(pick.attribute_type(), AttributeType::Integer);
    }
}
