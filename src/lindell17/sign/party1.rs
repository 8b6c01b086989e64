//! Party1's side of signing.

use curv::arithmetic::traits::*;
use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{Decrypt, DecryptionKey, Paillier, RawCiphertext, RawPlaintext};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::keygen::messages::Party1KeyShare;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{Message1, Message2, Message3, Message4, Signature};
use super::Error;

pub struct Party1 {
    dk: DecryptionKey,
    q: Point<Secp256k1>,
    z: BigInt,
    k1: Scalar<Secp256k1>,
    r1: Point<Secp256k1>,
    r2: Option<Point<Secp256k1>>,
    state: State,
}

impl Party1 {
    /// Begins a signing session for the message hash `z` (already reduced
    /// mod the curve order), using the key share produced at the end of
    /// [`crate::lindell17::keygen`].
    pub fn start(sid: String, share: &Party1KeyShare, z: BigInt) -> (Self, Message1) {
        let k1 = Scalar::<Secp256k1>::random();
        let r1 = Point::generator() * &k1;
        let c_r1 = Commitment::commit(&[r1.to_bytes(true).as_ref()]);

        let party = Party1 {
            dk: share.dk.clone(),
            q: share.q.clone(),
            z,
            k1,
            r1,
            r2: None,
            state: State::Step1,
        };
        (party, Message1 { sid, c_r1 })
    }

    pub fn process_message2(&mut self, msg: &Message2) -> Result<Message3, Error> {
        check_routing(msg, Protocol::Sign, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        DLogProof::verify(&msg.pi_r2).map_err(|_| Error::InvalidDlogProof(2))?;
        if msg.pi_r2.pk != msg.r2 {
            return Err(Error::InvalidDlogProof(2));
        }
        self.r2 = Some(msg.r2.clone());
        self.state = State::Step2;

        Ok(Message3 {
            sid: msg.sid.clone(),
            r1: self.r1.clone(),
            pi_r1: DLogProof::prove(&self.k1),
        })
    }

    pub fn process_message4(&mut self, msg: &Message4) -> Result<Signature, Error> {
        check_routing(msg, Protocol::Sign, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        if self.state != State::Step2 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let q = Scalar::<Secp256k1>::group_order();
        let r2 = self.r2.clone().expect("set in process_message2");
        let r_point = r2 * &self.k1;
        let (r_x, r_y) = r_point
            .x_coord()
            .zip(r_point.y_coord())
            .expect("R is never the point at infinity");
        let r = r_x.mod_floor(q);
        if r != msg.r {
            return Err(Error::MismatchedR);
        }
        let mut v = if r_y.is_odd() { 1u8 } else { 0u8 };

        let plaintext: RawPlaintext = Paillier::decrypt(&self.dk, RawCiphertext::from(&msg.c3));
        let s_prime = BigInt::from(plaintext).mod_floor(q);

        let k1_inv = BigInt::mod_inv(&self.k1.to_bigint(), q).ok_or(Error::InvalidSignature)?;
        let s1 = BigInt::mod_mul(&s_prime, &k1_inv, q);
        let s2 = q - &s1;
        let s = if s2 < s1 {
            v ^= 1;
            s2
        } else {
            s1
        };

        let signature = Signature {
            sid: msg.sid.clone(),
            r,
            s,
            v,
        };
        signature.verify(&self.q, &self.z)?;
        self.state = State::Step3;
        Ok(signature)
    }
}
