//! # Keccak-256 Digest Computation
//!
//! This is the original Keccak submission with `0x01` domain padding, as
//! used by Ethereum, not the NIST SHA3-256 variant. The two produce
//! different digests for the same input.

use sha3::{Digest, Keccak256};

/// Compute the 32-byte Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let hash = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    bytes
}

/// Compute the Keccak-256 digest of `data` as a lowercase hex string.
pub fn keccak256_hex(data: &[u8]) -> String {
    hex::encode(keccak256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_empty_vector() {
        assert_eq!(
            keccak256_hex(b""),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_differs_from_sha3_256() {
        // SHA3-256("") = a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a
        assert_ne!(
            keccak256_hex(b""),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_hex_is_lowercase_64_chars() {
        let hex = keccak256_hex(b"https://example.com/schema.json");
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
