//! # Types Subcommand
//!
//! Lists the credential types declared by a local JSON-LD context, with
//! the schema identifiers of each.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use vcc_core::JsonLdType;
use vcc_crypto::{schema_identifiers, SchemaIdentifiers};
use vcc_schema::extract_json_ld_types;

use crate::input::read_document;

/// Arguments for the types subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Path to the JSON-LD context document.
    pub context: PathBuf,
}

/// A declared type with its identifiers.
#[derive(Debug, Serialize)]
pub struct TypeEntry {
    #[serde(flatten)]
    pub json_ld_type: JsonLdType,
    #[serde(flatten)]
    pub identifiers: SchemaIdentifiers,
}

/// List every declared type.
pub fn run(args: &TypesArgs) -> anyhow::Result<Value> {
    let document = read_document(&args.context)?;
    Ok(serde_json::to_value(describe(&document)?)?)
}

pub(crate) fn describe(document: &Value) -> anyhow::Result<Vec<TypeEntry>> {
    extract_json_ld_types(document)?
        .into_iter()
        .map(|ty| {
            let identifiers = schema_identifiers(&ty).with_context(|| {
                format!("An error occurred while calculating the schema hash of {ty}")
            })?;
            Ok(TypeEntry {
                json_ld_type: ty,
                identifiers,
            })
        })
        .collect()
}
