//! Party1's side of the adaptor-signature protocol.

use curv::arithmetic::traits::*;
use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::cryptographic_primitives::proofs::sigma_ec_ddh::{
    ECDDHProof, ECDDHStatement, ECDDHWitness,
};
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{Decrypt, DecryptionKey, Paillier, RawCiphertext, RawPlaintext};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::keygen::messages::Party1KeyShare;
use crate::lindell17::utils::check_hash_length;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{AdaptorStatement, Message1, Message2, Message3, Message4, PreSignature};
use super::{check_statement, Error};

pub struct Party1 {
    dk: DecryptionKey,
    q: Point<Secp256k1>,
    y: Point<Secp256k1>,
    z: BigInt,
    k1: Scalar<Secp256k1>,
    c_r2: Commitment,
    c_r2_prime: Commitment,
    state: State,
}

impl Party1 {
    /// Verifies the adaptor statement and begins the protocol once Party2's
    /// commitment message arrives.
    pub fn start(
        msg: &Message1,
        share: &Party1KeyShare,
        statement: &AdaptorStatement,
    ) -> Result<(Self, Message2), Error> {
        check_routing(msg, Protocol::Adaptor, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        check_statement(statement)?;
        check_hash_length(&statement.hash).map_err(|e| Error::InvalidHashLength(e.actual))?;

        let k1 = Scalar::<Secp256k1>::random();
        let r1 = Point::generator() * &k1;
        let r1_prime = &statement.y * &k1;
        let pi_k1_dleq = ECDDHProof::prove(
            &ECDDHWitness { x: k1.clone() },
            &ECDDHStatement {
                g1: Point::generator().to_point(),
                h1: r1.clone(),
                g2: statement.y.clone(),
                h2: r1_prime.clone(),
            },
        );

        let party = Party1 {
            dk: share.dk.clone(),
            q: share.q.clone(),
            y: statement.y.clone(),
            z: BigInt::from_bytes(&statement.hash),
            k1: k1.clone(),
            c_r2: msg.c_r2.clone(),
            c_r2_prime: msg.c_r2_prime.clone(),
            state: State::Step1,
        };
        let out = Message2 {
            sid: msg.sid.clone(),
            r1,
            pi_r1: DLogProof::prove(&k1),
            r1_prime,
            pi_k1_dleq,
        };
        Ok((party, out))
    }

    pub fn process_message3(&mut self, msg: &Message3) -> Result<Message4, Error> {
        check_routing(msg, Protocol::Adaptor, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        if !self.c_r2.verify(&[msg.r2.to_bytes(true).as_ref()]) {
            return Err(Error::InvalidCommitment(2));
        }
        if !self.c_r2_prime.verify(&[msg.r2_prime.to_bytes(true).as_ref()]) {
            return Err(Error::InvalidCommitment(2));
        }
        DLogProof::verify(&msg.pi_r2).map_err(|_| Error::InvalidDlogProof(2))?;
        if msg.pi_r2.pk != msg.r2 {
            return Err(Error::InvalidDlogProof(2));
        }
        msg.pi_k2_dleq
            .verify(&ECDDHStatement {
                g1: Point::generator().to_point(),
                h1: msg.r2.clone(),
                g2: self.y.clone(),
                h2: msg.r2_prime.clone(),
            })
            .map_err(|_| Error::InvalidDlEqProof(2))?;

        let q = Scalar::<Secp256k1>::group_order();
        let r_point = &msg.r2_prime * &self.k1;
        let (r_x, r_y) = r_point
            .x_coord()
            .zip(r_point.y_coord())
            .expect("R is never the point at infinity");
        let r = r_x.mod_floor(q);
        let v = if r_y.is_odd() { 1u8 } else { 0u8 };

        let plaintext: RawPlaintext = Paillier::decrypt(&self.dk, RawCiphertext::from(&msg.c3));
        let s_double_prime = BigInt::from(plaintext).mod_floor(q);

        let s_double_prime_inv =
            BigInt::mod_inv(&s_double_prime, q).ok_or(Error::InvalidResult)?;
        let u1 = BigInt::mod_mul(&self.z, &s_double_prime_inv, q);
        let u2 = BigInt::mod_mul(&r, &s_double_prime_inv, q);
        let expected_r2 =
            Point::generator() * Scalar::from_bigint(&u1) + &self.q * Scalar::from_bigint(&u2);
        if msg.r2 != expected_r2 {
            return Err(Error::InvalidResult);
        }

        let k1_inv = BigInt::mod_inv(&self.k1.to_bigint(), q).ok_or(Error::InvalidResult)?;
        let s_prime = BigInt::mod_mul(&s_double_prime, &k1_inv, q);

        self.state = State::Step2;

        Ok(Message4 {
            sid: msg.sid.clone(),
            pre_signature: PreSignature {
                sid: msg.sid.clone(),
                r,
                s_prime,
                v,
            },
        })
    }
}
