//! # vcc-crypto — Schema Identifier Codec
//!
//! Derives the two display identifiers of a credential schema from the
//! `@id` of its JSON-LD type:
//!
//! - **Schema hash** — the last 16 bytes of `keccak256(id)`, as 32
//!   lowercase hex characters.
//! - **BigInt** — the same 16 bytes read as a little-endian unsigned
//!   integer, rendered in base 10.
//!
//! Both values are computed identically by wallets and the issuer backend,
//! so the algorithm is fixed byte for byte. See [`schema_hash`].
//!
//! ## Crate Policy
//!
//! - Depends only on `vcc-core` internally.
//! - Codec failures are returned as [`CodecError`], never raised as panics.
//! - Tests use real Keccak-256 vectors.

pub mod keccak;
pub mod schema_hash;

pub use keccak::{keccak256, keccak256_hex};
pub use schema_hash::{
    le_bytes_to_bigint, parse_schema_hash, schema_hash, schema_identifiers, CodecError,
    SchemaHash, SchemaIdentifiers, SCHEMA_HASH_LEN,
};
