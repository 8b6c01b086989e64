//! Hash-based binding-and-hiding commitment over a tuple of byte strings.
//!
//! `Commitment::commit` samples a fresh 256-bit salt and hashes it together
//! with length-prefixed copies of every part; `verify` recomputes the same
//! digest over a (possibly later-revealed) set of parts and compares.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    hash: [u8; 32],
    salt: [u8; 32],
}

impl Commitment {
    /// Commits to `parts`, returning a commitment that hides them until
    /// `verify` is called with the same byte strings.
    pub fn commit(parts: &[&[u8]]) -> Self {
        let mut salt = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = Self::digest(&salt, parts);
        Commitment { hash, salt }
    }

    /// Checks that `parts` opens this commitment.
    pub fn verify(&self, parts: &[&[u8]]) -> bool {
        let hash = Self::digest(&self.salt, parts);
        hash == self.hash
    }

    fn digest(salt: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        for part in parts {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_then_verify_succeeds() {
        let c = Commitment::commit(&[b"hello", b"world"]);
        assert!(c.verify(&[b"hello", b"world"]));
    }

    #[test]
    fn verify_fails_on_tampered_part() {
        let c = Commitment::commit(&[b"hello", b"world"]);
        assert!(!c.verify(&[b"hello", b"wurld"]));
    }

    #[test]
    fn verify_fails_on_reordered_parts() {
        let c = Commitment::commit(&[b"a", b"bb"]);
        assert!(!c.verify(&[b"ab", b"b"]));
    }
}
