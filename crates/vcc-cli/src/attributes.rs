//! # Attributes Subcommand
//!
//! Builds the attribute tree of a local JSON Schema file and prints it as
//! JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use vcc_schema::{build_document, extract_credential_subject, Attribute};

use crate::input::read_document;

/// Arguments for the attributes subcommand.
#[derive(Args, Debug)]
pub struct AttributesArgs {
    /// Path to the JSON Schema (`.json`, `.yaml` or `.yml`).
    pub schema: PathBuf,

    /// Print only the `credentialSubject` attribute of a full credential schema.
    #[arg(long)]
    pub credential_subject: bool,
}

/// Build and serialize the attribute tree.
pub fn run(args: &AttributesArgs) -> anyhow::Result<Value> {
    let document = read_document(&args.schema)?;
    let root = build_document(&document)
        .with_context(|| format!("invalid schema {}", args.schema.display()))?;
    let attribute = select(&root, args.credential_subject)?;
    Ok(serde_json::to_value(attribute)?)
}

/// The whole tree, or its credential subject when `credential_subject` is set.
pub(crate) fn select(root: &Attribute, credential_subject: bool) -> anyhow::Result<&Attribute> {
    if !credential_subject {
        return Ok(root);
    }
    extract_credential_subject(root)
        .context("schema has no object-typed credentialSubject property")
}
