//! Discrete-log-of-encryption proof: a four-round zero-knowledge proof that
//! a Paillier ciphertext `c` encrypts the discrete log `x1` of a point
//! `Q1 = x1 * G`, used as a subprotocol inside [`crate::lindell17::keygen`].

pub mod messages;
pub mod prover;
pub mod verifier;

pub use prover::Prover;
pub use verifier::Verifier;

use thiserror::Error;

use crate::lindell17::KernelError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error("failed to decrypt ciphertext")]
    DecryptCiphertext,
    #[error("failed to sample a from Z_q")]
    SampleA,
    #[error("failed to sample b from Z_q^2")]
    SampleB,
    #[error("gcd(nonce, N) != 1")]
    InvalidGcd,
}
