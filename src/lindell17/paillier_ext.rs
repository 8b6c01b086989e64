//! Thin helpers over `kzen-paillier` for the two operations the reference
//! needs that the crate doesn't expose directly: nonce-returning encryption,
//! and the `gcd(nonce, N) = 1` defence-in-depth check.

use curv::arithmetic::traits::*;
use curv::BigInt;
use paillier::{EncryptWithChosenRandomness, EncryptionKey, Randomness, RawCiphertext, RawPlaintext};

/// Encrypts `plaintext` under `ek`, returning both the ciphertext and the
/// randomness used, so the caller can check `gcd(r, N) = 1`.
pub fn encrypt_and_return_nonce(ek: &EncryptionKey, plaintext: &BigInt) -> (BigInt, BigInt) {
    let r = Randomness::sample(ek);
    let c: RawCiphertext =
        paillier::Paillier::encrypt_with_chosen_randomness(ek, RawPlaintext::from(plaintext), &r);
    (c.0.into_owned(), r.0)
}

/// Returns `true` iff `gcd(r, n) == 1`.
pub fn is_coprime(r: &BigInt, n: &BigInt) -> bool {
    r.gcd(n) == BigInt::one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use paillier::{Decrypt, KeyGeneration, Paillier};

    #[test]
    fn encrypt_and_return_nonce_round_trips() {
        let keypair = Paillier::keypair_with_modulus_size(512);
        let (ek, dk) = keypair.keys();
        let m = BigInt::from(42);
        let (c, r) = encrypt_and_return_nonce(&ek, &m);
        assert!(is_coprime(&r, &ek.n));
        let decrypted: RawPlaintext =
            Paillier::decrypt(&dk, RawCiphertext::from(&c));
        assert_eq!(BigInt::from(decrypted), m);
    }
}
