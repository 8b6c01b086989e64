//! Party2's side of signing. Builds the homomorphically masked ciphertext
//! that lets Party1 decrypt exactly its half of the signature and nothing
//! more.

use curv::arithmetic::traits::*;
use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{Add, EncryptionKey, Mul, Paillier, RawCiphertext, RawPlaintext};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::keygen::messages::Party2KeyShare;
use crate::lindell17::paillier_ext::encrypt_and_return_nonce;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{Message1, Message2, Message3, Message4, PartialSignature};
use super::Error;

pub struct Party2 {
    x2: Scalar<Secp256k1>,
    ek: EncryptionKey,
    c1_x1: BigInt,
    z: BigInt,
    k2: Scalar<Secp256k1>,
    c_r1: Option<Commitment>,
    state: State,
}

impl Party2 {
    /// Begins a signing session for the message hash `z` (already reduced
    /// mod the curve order), using the key share from
    /// [`crate::lindell17::keygen`].
    pub fn process_message1(msg: &Message1, share: &Party2KeyShare, z: BigInt) -> (Self, Message2) {
        let k2 = Scalar::<Secp256k1>::random();
        let r2 = Point::generator() * &k2;

        let party = Party2 {
            x2: share.x2.clone(),
            ek: share.ek.clone(),
            c1_x1: share.c1_x1.clone(),
            z,
            k2: k2.clone(),
            c_r1: Some(msg.c_r1.clone()),
            state: State::Step1,
        };
        (
            party,
            Message2 {
                sid: msg.sid.clone(),
                r2,
                pi_r2: DLogProof::prove(&k2),
            },
        )
    }

    pub fn process_message3(&mut self, msg: &Message3) -> Result<(Message4, PartialSignature), Error> {
        check_routing(msg, Protocol::Sign, Entity::Party1, Entity::Party2)
            .map_err(Error::Kernel)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let opens = self
            .c_r1
            .as_ref()
            .expect("set in process_message1")
            .verify(&[msg.r1.to_bytes(true).as_ref()]);
        if !opens {
            return Err(Error::InvalidCommitment);
        }
        DLogProof::verify(&msg.pi_r1).map_err(|_| Error::InvalidDlogProof(1))?;
        if msg.pi_r1.pk != msg.r1 {
            return Err(Error::InvalidDlogProof(1));
        }

        let q = Scalar::<Secp256k1>::group_order();
        let r_point = &msg.r1 * &self.k2;
        let r = r_point
            .x_coord()
            .expect("R is never the point at infinity")
            .mod_floor(q);

        let k2_inv = BigInt::mod_inv(&self.k2.to_bigint(), q).ok_or(Error::InvalidGcd)?;

        let rho = BigInt::sample_below(&(q * q));
        let masked = BigInt::mod_mul(&self.z, &k2_inv, q) + &rho * q;
        let (c1, r1_nonce) = encrypt_and_return_nonce(&self.ek, &masked);
        if !crate::lindell17::paillier_ext::is_coprime(&r1_nonce, &self.ek.n) {
            return Err(Error::InvalidGcd);
        }

        let v = BigInt::mod_mul(&BigInt::mod_mul(&r, &k2_inv, q), &self.x2.to_bigint(), q);
        let c2: RawCiphertext = Paillier::mul(&self.ek, RawCiphertext::from(&self.c1_x1), RawPlaintext::from(&v));
        let c3: RawCiphertext = Paillier::add(&self.ek, RawCiphertext::from(&c1), c2);
        let c3 = c3.0.into_owned();

        self.state = State::Step2;

        let partial = PartialSignature {
            sid: msg.sid.clone(),
            r: r.clone(),
            c3: c3.clone(),
        };
        Ok((
            Message4 {
                sid: msg.sid.clone(),
                r,
                c3,
            },
            partial,
        ))
    }
}
