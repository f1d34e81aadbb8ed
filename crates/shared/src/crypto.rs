//! Cryptographic utilities for opaque token generation and hashing.
//!
//! Auth codes and refresh tokens are stored hashed; only the SHA-256 hex
//! digest ever reaches the database.

use sha2::{Digest, Sha256};

/// Characters used for opaque tokens. Excludes 0, O, 1, l and I.
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a random opaque token of the given length.
pub fn generate_opaque_token(len: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same_input"), sha256_hex("same_input"));
        assert_ne!(sha256_hex("input1"), sha256_hex("input2"));
    }

    #[test]
    fn test_generate_opaque_token_length() {
        assert_eq!(generate_opaque_token(32).len(), 32);
        assert_eq!(generate_opaque_token(6).len(), 6);
    }

    #[test]
    fn test_generate_opaque_token_unique() {
        let token1 = generate_opaque_token(32);
        let token2 = generate_opaque_token(32);
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_generate_opaque_token_charset() {
        let token = generate_opaque_token(256);
        // Should not contain confusing characters (0, O, 1, l, I)
        assert!(!token.contains('0'));
        assert!(!token.contains('O'));
        assert!(!token.contains('1'));
        assert!(!token.contains('l'));
        assert!(!token.contains('I'));
    }
}
