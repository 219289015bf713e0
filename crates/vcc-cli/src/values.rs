//! # Values Subcommand
//!
//! Validates credential data against a schema, then overlays it onto the
//! schema's attribute tree and prints the resulting value tree. Overlay
//! violations are reported as validation issues, so both steps fail with
//! `parse-error`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use vcc_core::ValidationIssues;
use vcc_schema::{build_attribute_value, build_document, PayloadValidator, CREDENTIAL_SUBJECT};

use crate::attributes::select;
use crate::input::read_document;

/// Arguments for the values subcommand.
#[derive(Args, Debug)]
pub struct ValuesArgs {
    /// Path to the JSON Schema.
    pub schema: PathBuf,

    /// Path to the credential data.
    pub data: PathBuf,

    /// Treat `data` as the credential subject of a full credential schema.
    #[arg(long)]
    pub credential_subject: bool,

    /// Skip JSON Schema validation of `data`.
    #[arg(long)]
    pub no_validate: bool,
}

/// Validate and overlay `data` onto `schema`.
pub fn run(args: &ValuesArgs) -> anyhow::Result<Value> {
    let document = read_document(&args.schema)?;
    let data = read_document(&args.data)?;
    overlay(&document, &data, args.credential_subject, !args.no_validate)
}

pub(crate) fn overlay(
    document: &Value,
    data: &Value,
    credential_subject: bool,
    validate: bool,
) -> anyhow::Result<Value> {
    if validate {
        let payload_schema = if credential_subject {
            document
                .pointer(&format!("/properties/{CREDENTIAL_SUBJECT}"))
                .context("schema has no credentialSubject property")?
        } else {
            document
        };
        PayloadValidator::new(payload_schema.clone())?.validate(data)?;
    }

    let root = build_document(document)?;
    let attribute = select(&root, credential_subject)?;
    let value = build_attribute_value(attribute, Some(data)).map_err(ValidationIssues::from)?;
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vcc_core::{build_app_error, AppErrorKind};

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "credentialSubject": {
                    "type": "object",
                    "required": ["birthday"],
                    "properties": {"birthday": {"type": "integer"}}
                }
            }
        })
    }

    #[test]
    fn test_overlays_credential_subject() {
        let out = overlay(&schema(), &json!({"birthday": 19960424}), true, true).unwrap();
        assert_eq!(out["type"], "object");
        assert_eq!(out["value"][0]["name"], "birthday");
        assert_eq!(out["value"][0]["value"], 19960424);
    }

    #[test]
    fn test_invalid_data_classifies_as_parse_error() {
        let err = overlay(&schema(), &json!({"birthday": "soon"}), true, true).unwrap_err();
        let app = build_app_error(err);
        assert_eq!(app.kind(), AppErrorKind::ParseError);
        assert!(app.to_string().contains("/birthday"));
    }

    #[test]
    fn test_unvalidated_overlay_lists_every_violation() {
        let schema = json!({
            "type": "object",
            "required": ["birthday", "documentType"],
            "properties": {
                "birthday": {"type": "integer"},
                "documentType": {"type": "integer"},
                "city": {"type": "string"}
            }
        });
        let err = overlay(&schema, &json!({"city": 7}), false, false).unwrap_err();
        let app = build_app_error(err);
        assert_eq!(app.kind(), AppErrorKind::ParseError);
        let msg = app.to_string();
        assert!(msg.contains("/birthday: missing required value"));
        assert!(msg.contains("/documentType: missing required value"));
        assert!(msg.contains("/city: expected string, found integer"));
    }

    #[test]
    fn test_integral_float_survives_validation_and_overlay() {
        let out = overlay(&schema(), &json!({"birthday": 5.0}), true, true).unwrap();
        assert_eq!(out["value"][0]["type"], "integer");
    }
}
