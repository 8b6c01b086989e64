//! Two-party ECDSA signing on a key produced by [`crate::lindell17::keygen`].
//!
//! Party1 holds the Paillier private key; Party2 holds the ciphertext
//! encrypting `x1` and produces the second half of the signature
//! homomorphically, so Party1 can decrypt and finish it without either
//! party learning the other's nonce share.

pub mod messages;
pub mod party1;
pub mod party2;

pub use party1::Party1;
pub use party2::Party2;

use thiserror::Error;

use crate::lindell17::KernelError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error("counterparty's proof of knowledge of R{0} is invalid")]
    InvalidDlogProof(u8),
    #[error("commitment to R1 did not open to the revealed value")]
    InvalidCommitment,
    #[error("the two parties disagree on r = R.x mod q")]
    MismatchedR,
    #[error("gcd(nonce, N) != 1")]
    InvalidGcd,
    #[error("the recovered signature failed to verify against the public key")]
    InvalidSignature,
}
