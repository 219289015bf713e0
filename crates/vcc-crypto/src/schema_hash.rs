//! # Schema Hash — JSON-LD Type Fingerprints
//!
//! ## Algorithm
//!
//! ```text
//! id (UTF-8) ──keccak256──▶ 64 hex chars ──hex decode──▶ 32 bytes
//!                                                          │
//!                                              bytes[16..32]
//!                                                          │
//!                         ┌────────────────────────────────┴──────┐
//!                         ▼                                       ▼
//!           hex(bytes) — schema hash          Σ byte[i]·256^i — BigInt
//! ```
//!
//! The BigInt reading is little-endian (byte 0 is least significant) and
//! uses arbitrary precision: 128 bits do not fit in a `u64`. The hex
//! reading is a straight byte-to-hex mapping, independent of endianness.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vcc_core::JsonLdType;

use crate::keccak::keccak256_hex;

/// Length in bytes of a schema hash.
pub const SCHEMA_HASH_LEN: usize = 16;

/// Error computing or decoding a schema identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A hex string could not be decoded.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    /// A decoded byte sequence has the wrong length.
    #[error("expected at least {expected} bytes, found {found}")]
    InvalidLength {
        /// Required byte count.
        expected: usize,
        /// Actual byte count.
        found: usize,
    },
}

/// The 16-byte fingerprint of a JSON-LD type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaHash([u8; SCHEMA_HASH_LEN]);

impl SchemaHash {
    /// Wrap raw fingerprint bytes.
    pub fn from_bytes(bytes: [u8; SCHEMA_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw fingerprint bytes.
    pub fn as_bytes(&self) -> &[u8; SCHEMA_HASH_LEN] {
        &self.0
    }

    /// Lowercase hex rendering, 32 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The fingerprint read as a little-endian unsigned integer.
    pub fn to_bigint(&self) -> BigUint {
        le_bytes_to_bigint(&self.0)
    }
}

impl std::fmt::Display for SchemaHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Both display identifiers of a schema, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaIdentifiers {
    /// Lowercase hex schema hash (32 characters).
    pub schema_hash: String,
    /// Base-10 little-endian integer reading of the schema hash.
    pub big_int: String,
}

/// Interpret `bytes` as a little-endian unsigned integer:
/// `Σ bytes[i] · 256^i`.
pub fn le_bytes_to_bigint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Compute the schema hash of a JSON-LD type `@id`.
///
/// # Errors
///
/// Returns [`CodecError`] if the intermediate digest cannot be decoded or
/// is shorter than [`SCHEMA_HASH_LEN`] bytes.
pub fn schema_hash(id: &str) -> Result<SchemaHash, CodecError> {
    let digest_hex = keccak256_hex(id.as_bytes());
    let digest = hex::decode(&digest_hex).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
    tail_hash(&digest)
}

/// Compute both display identifiers for a JSON-LD type.
///
/// # Errors
///
/// See [`schema_hash`].
pub fn schema_identifiers(ty: &JsonLdType) -> Result<SchemaIdentifiers, CodecError> {
    let hash = schema_hash(&ty.id)?;
    Ok(SchemaIdentifiers {
        schema_hash: hash.to_hex(),
        big_int: hash.to_bigint().to_str_radix(10),
    })
}

/// Decode a hex schema hash back into its bytes.
///
/// # Errors
///
/// Returns [`CodecError::InvalidHex`] for malformed hex and
/// [`CodecError::InvalidLength`] unless exactly 16 bytes decode.
pub fn parse_schema_hash(hex_str: &str) -> Result<SchemaHash, CodecError> {
    let bytes = hex::decode(hex_str).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
    let bytes: [u8; SCHEMA_HASH_LEN] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| CodecError::InvalidLength {
                expected: SCHEMA_HASH_LEN,
                found: bytes.len(),
            })?;
    Ok(SchemaHash(bytes))
}

fn tail_hash(digest: &[u8]) -> Result<SchemaHash, CodecError> {
    let start = digest
        .len()
        .checked_sub(SCHEMA_HASH_LEN)
        .ok_or(CodecError::InvalidLength {
            expected: SCHEMA_HASH_LEN,
            found: digest.len(),
        })?;
    let mut bytes = [0u8; SCHEMA_HASH_LEN];
    bytes.copy_from_slice(&digest[start..]);
    Ok(SchemaHash(bytes))
}
