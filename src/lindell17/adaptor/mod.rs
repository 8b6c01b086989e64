//! Scriptless adaptor signatures built on top of [`crate::lindell17::sign`].
//!
//! Both parties additionally prove their nonce share is consistent with a
//! public statement `Y` (a curve point whose discrete log `y` is held by
//! whoever will eventually complete the signature). The resulting
//! [`messages::PreSignature`] can be completed into a valid ECDSA signature
//! by anyone who knows `y` ([`adapt`]), and `y` can be recovered from the
//! pair `(PreSignature, Signature)` by anyone who sees both
//! ([`extract`]).

pub mod messages;
pub mod party1;
pub mod party2;

pub use party1::Party1;
pub use party2::Party2;

use curv::arithmetic::traits::*;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use thiserror::Error;

use crate::lindell17::sign::messages::Signature;
use crate::lindell17::utils::HASH_LENGTH;
use crate::lindell17::KernelError;

use messages::{AdaptorStatement, PreSignature};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error(transparent)]
    Sign(#[from] crate::lindell17::sign::Error),
    #[error("the adaptor statement's proof of knowledge of y does not verify")]
    InvalidStatementProof,
    #[error("message hash must be {HASH_LENGTH} bytes, got {0}")]
    InvalidHashLength(usize),
    #[error("counterparty's proof of knowledge of R{0} is invalid")]
    InvalidDlogProof(u8),
    #[error("counterparty's DLEQ proof relating R{0}, R{0}' is invalid")]
    InvalidDlEqProof(u8),
    #[error("commitment to R{0} (or R{0}') did not open to the revealed value")]
    InvalidCommitment(u8),
    #[error("gcd(nonce, N) != 1")]
    InvalidGcd,
    #[error("the adaptor statement is degenerate (Y is the identity)")]
    DegenerateStatement,
    #[error("R2 does not satisfy R2 = u1*G + u2*Q for the recovered (u1, u2)")]
    InvalidResult,
    #[error("neither y nor q-y recovered from the pre-signature matches the statement")]
    ExtractionFailed,
}

/// Completes a pre-signature into a valid ECDSA signature given the
/// adaptor secret `y` with `Y = y * G`.
///
/// This is a pure function: it does no verification of its own beyond what
/// is necessary to apply the low-s normalization, since `pre_signature` is
/// assumed to already have been accepted from a completed adaptor run.
pub fn adapt(pre_signature: &PreSignature, y: &Scalar<Secp256k1>) -> Signature {
    let q = Scalar::<Secp256k1>::group_order();
    let y_inv = BigInt::mod_inv(&y.to_bigint(), q).expect("Y's discrete log is never zero");
    let s = BigInt::mod_mul(&pre_signature.s_prime, &y_inv, q);
    let s_neg = q - &s;
    let v = if s_neg < s {
        pre_signature.v ^ 1
    } else {
        pre_signature.v
    };
    let s = if s_neg < s { s_neg } else { s };

    Signature {
        sid: pre_signature.sid.clone(),
        r: pre_signature.r.clone(),
        s,
        v,
    }
}

/// Recovers the adaptor secret `y` from a pre-signature, the statement
/// `Y = y * G` it was issued against, and the completed signature it was
/// adapted into.
///
/// [`adapt`] may have flipped the low-s candidate, so both `y` and `q - y`
/// are tried against `Y` before giving up.
pub fn extract(
    statement: &Point<Secp256k1>,
    pre_signature: &PreSignature,
    signature: &Signature,
) -> Result<Scalar<Secp256k1>, Error> {
    let q = Scalar::<Secp256k1>::group_order();
    let s_inv = BigInt::mod_inv(&signature.s, q).ok_or(Error::ExtractionFailed)?;
    let candidate = BigInt::mod_mul(&pre_signature.s_prime, &s_inv, q);

    let y = Scalar::<Secp256k1>::from_bigint(&candidate);
    if &(Point::generator() * &y) == statement {
        return Ok(y);
    }
    let y = Scalar::<Secp256k1>::from_bigint(&(q - &candidate));
    if &(Point::generator() * &y) == statement {
        return Ok(y);
    }
    Err(Error::ExtractionFailed)
}

pub(crate) fn check_statement(statement: &AdaptorStatement) -> Result<(), Error> {
    if statement.y.is_zero() {
        return Err(Error::DegenerateStatement);
    }
    curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof::verify(&statement.pi_y)
        .map_err(|_| Error::InvalidStatementProof)?;
    if statement.pi_y.pk != statement.y {
        return Err(Error::InvalidStatementProof);
    }
    Ok(())
}
