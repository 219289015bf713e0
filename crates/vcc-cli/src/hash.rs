//! # Hash Subcommand
//!
//! Computes the schema hash and BigInt identifiers of a credential type
//! from its JSON-LD `@id`.

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use vcc_core::JsonLdType;
use vcc_crypto::schema_identifiers;

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Full JSON-LD type identifier, e.g. `https://.../kyc-v3.json-ld#KYCAgeCredential`.
    pub id: String,
}

/// Compute `{ "schemaHash": ..., "bigInt": ... }` for `args.id`.
pub fn run(args: &HashArgs) -> anyhow::Result<Value> {
    let ty = JsonLdType::new(args.id.as_str(), "");
    let identifiers = schema_identifiers(&ty)
        .context("An error occurred while calculating the schema hash")?;
    tracing::debug!(id = %args.id, hash = %identifiers.schema_hash, "computed schema hash");
    Ok(serde_json::to_value(identifiers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_of_example_id() {
        let out = run(&HashArgs {
            id: "https://example.com/schema.json".into(),
        })
        .unwrap();
        assert_eq!(
            out,
            json!({
                "schemaHash": "8545378e63b71fad188166aa188c89c1",
                "bigInt": "257255189347664818175449288434794317189"
            })
        );
    }
}
