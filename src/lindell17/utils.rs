//! Small helpers shared across subprotocols: session id generation and the
//! 32-byte hash-length contract used by `Sign` and `Adaptor`.

use rand::RngCore;
use sha2::{Digest, Sha256};

use super::KernelError;

/// Number of bytes a 256-bit hash must have to be signed.
pub const HASH_LENGTH: usize = 32;

/// Generates a session id: SHA-256 of 128 random bits, hex-encoded to 64
/// lowercase characters.
pub fn generate_session_id() -> Result<String, KernelError> {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(digest))
}

/// Returns `Err` unless `hash` is exactly [`HASH_LENGTH`] bytes.
pub fn check_hash_length(hash: &[u8]) -> Result<(), HashLengthError> {
    if hash.len() != HASH_LENGTH {
        return Err(HashLengthError {
            actual: hash.len(),
        });
    }
    Ok(())
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("hash must be {HASH_LENGTH} bytes, got {actual}")]
pub struct HashLengthError {
    pub actual: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_64_hex_chars() {
        let sid = generate_session_id().unwrap();
        assert_eq!(sid.len(), 64);
        assert!(sid.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_ids_are_unique() {
        let a = generate_session_id().unwrap();
        let b = generate_session_id().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_short_and_long_hashes() {
        assert!(check_hash_length(&[0u8; 31]).is_err());
        assert!(check_hash_length(&[0u8; 33]).is_err());
        assert!(check_hash_length(&[0u8; 32]).is_ok());
    }
}
