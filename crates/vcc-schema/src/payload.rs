//! # Payload Validation
//!
//! Validates credential payloads against their JSON Schema with the
//! `jsonschema` crate, collecting every violation rather than stopping at
//! the first.
//!
//! A failed `anyOf` / `oneOf` is reported by `jsonschema` as a single error
//! at the union's location, which hides why each branch was rejected. Such
//! errors are expanded here: the failing value is validated against each
//! branch on its own, and the branch errors are nested under the union
//! issue. [`ValidationIssues`] flattens the tree when it is rendered, so
//! the final message lists the concrete paths inside every branch.

use jsonschema::Validator;
use serde_json::{Map, Value};

use vcc_core::{ValidationIssue, ValidationIssues};

use crate::error::SchemaError;

/// Keywords whose failure is expanded branch by branch.
const UNION_KEYWORDS: [&str; 2] = ["anyOf", "oneOf"];

/// Definition containers carried into each branch so local `$ref`s resolve.
const SHARED_KEYWORDS: [&str; 3] = ["$schema", "$defs", "definitions"];

/// A compiled validator for one payload schema.
pub struct PayloadValidator {
    schema: Value,
    validator: Validator,
}

impl std::fmt::Debug for PayloadValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl PayloadValidator {
    /// Compile a validator for `schema`. The draft is taken from `$schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValidatorBuild`] if the schema is not a valid
    /// JSON Schema.
    pub fn new(schema: Value) -> Result<Self, SchemaError> {
        let validator = compile(&schema)?;
        Ok(Self { schema, validator })
    }

    /// The schema this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Whether `instance` conforms, without collecting issues.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, returning every issue found.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationIssues`] if `instance` does not
    /// conform.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationIssues> {
        let issues = collect_issues(&self.schema, &self.validator, instance, "");
        if issues.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = issues.len(), "payload failed validation");
            Err(ValidationIssues::new(issues))
        }
    }
}

/// Validate `instance` against `schema` in one step.
///
/// # Errors
///
/// Returns [`PayloadError::Schema`] if `schema` cannot be compiled and
/// [`PayloadError::Invalid`] if `instance` does not conform.
pub fn validate_payload(schema: &Value, instance: &Value) -> Result<(), PayloadError> {
    let validator = PayloadValidator::new(schema.clone())?;
    validator.validate(instance)?;
    Ok(())
}

/// Failure of [`validate_payload`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The schema itself is unusable.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The payload does not conform.
    #[error(transparent)]
    Invalid(#[from] ValidationIssues),
}

fn compile(schema: &Value) -> Result<Validator, SchemaError> {
    jsonschema::validator_for(schema).map_err(|e| SchemaError::ValidatorBuild(e.to_string()))
}

/// Run `validator` over `instance`, expanding union failures.
///
/// `prefix` is the instance location of `instance` within the top-level
/// payload; it is prepended to every reported path.
fn collect_issues(
    root: &Value,
    validator: &Validator,
    instance: &Value,
    prefix: &str,
) -> Vec<ValidationIssue> {
    validator
        .iter_errors(instance)
        .map(|e| {
            let local_path = e.instance_path.to_string();
            let schema_path = e.schema_path.to_string();
            let instance_path = format!("{prefix}{local_path}");
            let message = e.to_string();

            let is_union = UNION_KEYWORDS
                .iter()
                .any(|k| schema_path.ends_with(&format!("/{k}")));
            if !is_union {
                return ValidationIssue::new(instance_path, message);
            }

            match expand_union(root, instance, &local_path, &schema_path, &instance_path) {
                Some(branches) => ValidationIssue::union(instance_path, message, branches),
                None => ValidationIssue::new(instance_path, message),
            }
        })
        .collect()
}

/// Validate the value at `local_path` against each branch of the union at
/// `schema_path`. `None` if the union cannot be located (e.g. behind a
/// `$ref`), in which case the issue is reported without branch detail.
fn expand_union(
    root: &Value,
    instance: &Value,
    local_path: &str,
    schema_path: &str,
    instance_path: &str,
) -> Option<Vec<Vec<ValidationIssue>>> {
    let branches = root.pointer(schema_path)?.as_array()?;
    let value = instance.pointer(local_path)?;

    let mut expanded = Vec::with_capacity(branches.len());
    for branch in branches {
        let branch_schema = branch_root(root, branch);
        let validator = match compile(&branch_schema) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(%schema_path, error = %e, "union branch not compilable");
                return None;
            }
        };
        expanded.push(collect_issues(&branch_schema, &validator, value, instance_path));
    }
    Some(expanded)
}

/// A standalone schema for one union branch, sharing the root's
/// definitions and draft.
fn branch_root(root: &Value, branch: &Value) -> Value {
    let (Some(root_obj), Some(branch_obj)) = (root.as_object(), branch.as_object()) else {
        return branch.clone();
    };
    let mut out: Map<String, Value> = branch_obj.clone();
    for keyword in SHARED_KEYWORDS {
        if out.contains_key(keyword) {
            continue;
        }
        if let Some(shared) = root_obj.get(keyword) {
            out.insert(keyword.to_string(), shared.clone());
        }
    }
    Value::Object(out)
}
