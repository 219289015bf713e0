//! # Attribute Model
//!
//! Typed mirror of a credential JSON Schema. An [`Attribute`] is one named
//! position in the document (a property of an object, an array element, or
//! the root) together with the schema that governs it.
//!
//! ```text
//! Attribute ::= boolean | integer | number | string | null
//!             | array  (element: Attribute)
//!             | object (children: [Attribute], required: [name])
//!             | multi  (candidates: [Schema])
//! ```
//!
//! Every match over [`Attribute`] or [`Schema`] is exhaustive, so adding a
//! JSON Schema type forces every consumer to handle it.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

// ─── Type Tags ──────────────────────────────────────────────────────

/// The closed set of attribute type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Boolean,
    Integer,
    Number,
    String,
    Null,
    Array,
    Object,
    Multi,
}

impl AttributeType {
    /// Parse a JSON Schema `type` keyword value. `multi` is not a JSON
    /// Schema type and is never returned.
    pub fn from_json_type(tag: &str) -> Option<Self> {
        match tag {
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "null" => Some(Self::Null),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// Returns the tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
            Self::Multi => "multi",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Schema Descriptors ─────────────────────────────────────────────

/// Properties shared by every schema descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanSchema {
    #[serde(flatten)]
    pub common: CommonProps,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<bool>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegerSchema {
    #[serde(flatten)]
    pub common: CommonProps,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Number>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberSchema {
    #[serde(flatten)]
    pub common: CommonProps,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<f64>>,
}

/// The `format` of a string schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    Date,
    DateTime,
    Time,
    /// Any other format keyword, kept verbatim. Rendered as free text.
    #[serde(untagged)]
    Other(String),
}

impl StringFormat {
    /// Parse a `format` keyword value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            "time" => Self::Time,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringSchema {
    #[serde(flatten)]
    pub common: CommonProps,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NullSchema {
    #[serde(flatten)]
    pub common: CommonProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    #[serde(flatten)]
    pub common: CommonProps,
    /// Schema of every element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Box<Attribute>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(flatten)]
    pub common: CommonProps,
    /// Children in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
    /// Names of mandatory children, as declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ObjectSchema {
    /// Children in declaration order; empty when `properties` was absent.
    pub fn children(&self) -> &[Attribute] {
        self.attributes.as_deref().unwrap_or_default()
    }

    /// Look up a child by property name.
    pub fn child(&self, name: &str) -> Option<&Attribute> {
        self.children().iter().find(|a| a.name() == name)
    }
}

/// A single-type schema descriptor, as found among the candidates of a
/// `multi` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    Boolean(BooleanSchema),
    Integer(IntegerSchema),
    Number(NumberSchema),
    String(StringSchema),
    Null(NullSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
}

impl Schema {
    /// The type tag of this descriptor.
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

    /// Shared properties of this descriptor.
    pub fn common(&self) -> &CommonProps {
        match self {
            Self::Boolean(s) => &s.common,
            Self::Integer(s) => &s.common,
            Self::Number(s) => &s.common,
            Self::String(s) => &s.common,
            Self::Null(s) => &s.common,
            Self::Array(s) => &s.common,
            Self::Object(s) => &s.common,
        }
    }

    pub(crate) fn common_mut(&mut self) -> &mut CommonProps {
        match self {
            Self::Boolean(s) => &mut s.common,
            Self::Integer(s) => &mut s.common,
            Self::Number(s) => &mut s.common,
            Self::String(s) => &mut s.common,
            Self::Null(s) => &mut s.common,
            Self::Array(s) => &mut s.common,
            Self::Object(s) => &mut s.common,
        }
    }

    /// Attach a name and a required flag to this descriptor.
    pub fn into_attribute(self, name: impl Into<String>, required: bool) -> Attribute {
        let name = name.into();
        match self {
            Self::Boolean(schema) => Attribute::Boolean(Node { name, required, schema }),
            Self::Integer(schema) => Attribute::Integer(Node { name, required, schema }),
            Self::Number(schema) => Attribute::Number(Node { name, required, schema }),
            Self::String(schema) => Attribute::String(Node { name, required, schema }),
            Self::Null(schema) => Attribute::Null(Node { name, required, schema }),
            Self::Array(schema) => Attribute::Array(Node { name, required, schema }),
            Self::Object(schema) => Attribute::Object(Node { name, required, schema }),
        }
    }
}

// ─── Attributes ─────────────────────────────────────────────────────

/// A named, single-type position in the schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<S> {
    /// Property key within the parent object.
    pub name: String,
    /// Whether the parent object lists this name as mandatory.
    pub required: bool,
    pub schema: S,
}

/// A named position whose schema is a union of candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiNode {
    pub name: String,
    pub required: bool,
    /// Candidate schemas in declaration order.
    pub schemas: Vec<Schema>,
}

/// A typed attribute, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attribute {
    Boolean(Node<BooleanSchema>),
    Integer(Node<IntegerSchema>),
    Number(Node<NumberSchema>),
    String(Node<StringSchema>),
    Null(Node<NullSchema>),
    Array(Node<ArraySchema>),
    Object(Node<ObjectSchema>),
    Multi(MultiNode),
}

impl Attribute {
    /// Property key of this attribute.
    pub fn name(&self) -> &str {
        match self {
            Self::Boolean(n) => &n.name,
            Self::Integer(n) => &n.name,
            Self::Number(n) => &n.name,
            Self::String(n) => &n.name,
            Self::Null(n) => &n.name,
            Self::Array(n) => &n.name,
            Self::Object(n) => &n.name,
            Self::Multi(n) => &n.name,
        }
    }

    /// Whether this attribute is mandatory in its parent.
    pub fn required(&self) -> bool {
        match self {
            Self::Boolean(n) => n.required,
            Self::Integer(n) => n.required,
            Self::Number(n) => n.required,
            Self::String(n) => n.required,
            Self::Null(n) => n.required,
            Self::Array(n) => n.required,
            Self::Object(n) => n.required,
            Self::Multi(n) => n.required,
        }
    }

    /// The type tag of this attribute.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Integer(_) => AttributeType::Integer,
            Self::Number(_) => AttributeType::Number,
            Self::String(_) => AttributeType::String,
            Self::Null(_) => AttributeType::Null,
            Self::Array(_) => AttributeType::Array,
            Self::Object(_) => AttributeType::Object,
            Self::Multi(_) => AttributeType::Multi,
        }
    }

    /// The single schema of this attribute, `None` for `multi`.
    pub fn schema(&self) -> Option<Schema> {
        match self {
            Self::Boolean(n) => Some(Schema::Boolean(n.schema.clone())),
            Self::Integer(n) => Some(Schema::Integer(n.schema.clone())),
            Self::Number(n) => Some(Schema::Number(n.schema.clone())),
            Self::String(n) => Some(Schema::String(n.schema.clone())),
            Self::Null(n) => Some(Schema::Null(n.schema.clone())),
            Self::Array(n) => Some(Schema::Array(n.schema.clone())),
            Self::Object(n) => Some(Schema::Object(n.schema.clone())),
            Self::Multi(_) => None,
        }
    }

    /// The object schema, if this is an object attribute.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(n) => Some(&n.schema),
            _ => None,
        }
    }

    /// The array schema, if this is an array attribute.
    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Self::Array(n) => Some(&n.schema),
            _ => None,
        }
    }

    /// Human-readable label: the schema title, falling back to the name.
    pub fn label(&self) -> &str {
        let title = match self {
            Self::Boolean(n) => n.schema.common.title.as_deref(),
            Self::Integer(n) => n.schema.common.title.as_deref(),
            Self::Number(n) => n.schema.common.title.as_deref(),
            Self::String(n) => n.schema.common.title.as_deref(),
            Self::Null(n) => n.schema.common.title.as_deref(),
            Self::Array(n) => n.schema.common.title.as_deref(),
            Self::Object(n) => n.schema.common.title.as_deref(),
            Self::Multi(n) => n.schemas.iter().find_map(|s| s.common().title.as_deref()),
        };
        title.unwrap_or_else(|| self.name())
    }
}

/// Children in display order: non-object attributes first, object
/// attributes last, each group keeping declaration order.
///
/// Presentation only. The builder never reorders.
pub fn display_order(attributes: &[Attribute]) -> Vec<&Attribute> {
    let mut ordered: Vec<&Attribute> = attributes.iter().collect();
    ordered.sort_by_key(|a| a.attribute_type() == AttributeType::Object);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_attr(name: &str) -> Attribute {
        Schema::String(StringSchema::default()).into_attribute(name, false)
    }

    fn object_attr(name: &str) -> Attribute {
        Schema::Object(ObjectSchema::default()).into_attribute(name, false)
    }

    #[test]
    fn test_type_tags_round_trip() {
        for tag in ["boolean", "integer", "number", "string", "null", "array", "object"] {
            let ty = AttributeType::from_json_type(tag).unwrap();
            assert_eq!(ty.as_str(), tag);
        }
        assert_eq!(AttributeType::from_json_type("multi"), None);
        assert_eq!(AttributeType::from_json_type("date"), None);
    }

    #[test]
    fn test_attribute_serializes_with_type_tag() {
        let attr = Schema::String(StringSchema {
            format: Some(StringFormat::Date),
            ..Default::default()
        })
        .into_attribute("birthday", true);
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["name"], "birthday");
        assert_eq!(json["required"], true);
        assert_eq!(json["schema"]["format"], "date");
    }

    #[test]
    fn test_unknown_format_is_kept_verbatim() {
        assert_eq!(StringFormat::parse("uri"), StringFormat::Other("uri".into()));
        let json = serde_json::to_value(StringFormat::parse("uri")).unwrap();
        assert_eq!(json, "uri");
    }

    #[test]
    fn test_display_order_puts_objects_last_stably() {
        let attrs = vec![
            object_attr("address"),
            string_attr("name"),
            object_attr("employer"),
            string_attr("email"),
        ];
        let names: Vec<&str> = display_order(&attrs).iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["name", "email", "address", "employer"]);
        // Source order untouched.
        assert_eq!(attrs[0].name(), "address");
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let mut schema = StringSchema::default();
        assert_eq!(
            Schema::String(schema.clone()).into_attribute("dob", false).label(),
            "dob"
        );
        schema.common.title = Some("Date of birth".into());
        assert_eq!(
            Schema::String(schema).into_attribute("dob", false).label(),
            "Date of birth"
        );
    }
}
