//! Distributed key generation: Party1 and Party2 each contribute a secret
//! share `x1`/`x2` and jointly learn the public key `Q = x1 * x2 * G`
//! without either party ever learning the other's share.

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
    #[error(transparent)]
    DlEncProof(#[from] crate::lindell17::dlenc_proof::Error),
    #[error("counterparty's proof of knowledge of Q{0} is invalid")]
    InvalidDlogProof(u8),
    #[error("counterparty's Paillier key is not a valid composite")]
    InvalidCorrectKeyProof,
    #[error("counterparty's range proof on the encryption of x1 is invalid")]
    InvalidRangeProof,
    #[error("commitment to Q1 did not open to the revealed value")]
    InvalidCommitment,
    #[error("the discrete-log-of-encryption proof did not verify")]
    InvalidDlEncProof,
}
