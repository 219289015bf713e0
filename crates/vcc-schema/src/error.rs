//! Errors raised while reading schema documents and overlaying data.

use thiserror::Error;

use vcc_core::{ValidationIssue, ValidationIssues};

/// Error building an attribute tree or reading a JSON-LD context.
///
/// Paths are JSON Pointers into the schema document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The `type` keyword names something outside the supported set.
    #[error("unsupported attribute type '{type_name}' at '{path}'")]
    UnsupportedAttributeType {
        /// Location of the offending schema.
        path: String,
        /// The unrecognized tag.
        type_name: String,
    },

    /// The schema has neither a `type` nor a union keyword.
    #[error("schema at '{path}' declares no type")]
    MissingType {
        /// Location of the offending schema.
        path: String,
    },

    /// The schema node is structurally unusable.
    #[error("invalid schema at '{path}': {reason}")]
    InvalidSchema {
        /// Location of the offending schema.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The JSON-LD context document is unusable.
    #[error("invalid JSON-LD context: {0}")]
    InvalidContext(String),

    /// The JSON Schema validator could not be compiled.
    #[error("validator build error: {0}")]
    ValidatorBuild(String),
}

/// Error overlaying credential data onto an attribute tree.
///
/// Paths are JSON Pointers into the data document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A required attribute is absent from the data.
    #[error("missing required value at '{path}'")]
    MissingRequired {
        /// Location of the missing value.
        path: String,
    },

    /// The data value does not have the type the schema declares.
    #[error("expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        /// Location of the value.
        path: String,
        /// Type(s) accepted by the schema.
        expected: String,
        /// JSON type of the value.
        found: String,
    },
}

impl ValueError {
    /// JSON Pointer to the offending value.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingRequired { path } | Self::TypeMismatch { path, .. } => path,
        }
    }

    /// The violation without its location.
    pub fn reason(&self) -> String {
        match self {
            Self::MissingRequired { .. } => "missing required value".to_string(),
            Self::TypeMismatch {
                expected, found, ..
            } => format!("expected {expected}, found {found}"),
        }
    }
}

/// Every violation found while overlaying one data document, in document
/// order. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.0))]
pub struct ValueErrors(Vec<ValueError>);

impl ValueErrors {
    pub(crate) fn new(violations: Vec<ValueError>) -> Self {
        Self(violations)
    }

    /// The violations, in document order.
    pub fn violations(&self) -> &[ValueError] {
        &self.0
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn render(violations: &[ValueError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overlay failures are data failing its schema, reported like any other
/// validation failure.
impl From<ValueErrors> for ValidationIssues {
    fn from(errors: ValueErrors) -> Self {
        ValidationIssues::new(
            errors
                .0
                .iter()
                .map(|e| ValidationIssue::new(e.path(), e.reason()))
                .collect(),
        )
    }
}
