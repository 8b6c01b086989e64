//! Party2's side of the adaptor-signature protocol.

use curv::arithmetic::traits::*;
use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::cryptographic_primitives::proofs::sigma_ec_ddh::{
    ECDDHProof, ECDDHStatement, ECDDHWitness,
};
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{Add, EncryptionKey, Mul, Paillier, RawCiphertext, RawPlaintext};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::keygen::messages::Party2KeyShare;
use crate::lindell17::paillier_ext::encrypt_and_return_nonce;
use crate::lindell17::utils::check_hash_length;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{AdaptorStatement, Message1, Message2, Message3, Message4, PreSignature};
use super::{check_statement, Error};

pub struct Party2 {
    x2: Scalar<Secp256k1>,
    ek: EncryptionKey,
    c1_x1: BigInt,
    q: Point<Secp256k1>,
    y: Point<Secp256k1>,
    z: BigInt,
    k2: Scalar<Secp256k1>,
    r2: Point<Secp256k1>,
    r2_prime: Point<Secp256k1>,
    r1: Option<Point<Secp256k1>>,
    state: State,
}

impl Party2 {
    /// Verifies the adaptor statement and samples Party2's nonce share,
    /// committing to both its plain and Y-primed points.
    pub fn start(
        sid: String,
        share: &Party2KeyShare,
        statement: &AdaptorStatement,
    ) -> Result<(Self, Message1), Error> {
        check_statement(statement)?;
        check_hash_length(&statement.hash).map_err(|e| Error::InvalidHashLength(e.actual))?;

        let k2 = Scalar::<Secp256k1>::random();
        let r2 = Point::generator() * &k2;
        let r2_prime = &statement.y * &k2;

        let party = Party2 {
            x2: share.x2.clone(),
            ek: share.ek.clone(),
            c1_x1: share.c1_x1.clone(),
            q: share.q.clone(),
            y: statement.y.clone(),
            z: BigInt::from_bytes(&statement.hash),
            k2: k2.clone(),
            r2: r2.clone(),
            r2_prime: r2_prime.clone(),
            r1: None,
            state: State::Step1,
        };
        let out = Message1 {
            sid: sid.clone(),
            c_r2: Commitment::commit(&[r2.to_bytes(true).as_ref()]),
            c_r2_prime: Commitment::commit(&[r2_prime.to_bytes(true).as_ref()]),
        };
        Ok((party, out))
    }

    pub fn process_message2(&mut self, msg: &Message2) -> Result<Message3, Error> {
        check_routing(msg, Protocol::Adaptor, Entity::Party1, Entity::Party2)
            .map_err(Error::Kernel)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        DLogProof::verify(&msg.pi_r1).map_err(|_| Error::InvalidDlogProof(1))?;
        if msg.pi_r1.pk != msg.r1 {
            return Err(Error::InvalidDlogProof(1));
        }
        msg.pi_k1_dleq
            .verify(&ECDDHStatement {
                g1: Point::generator().to_point(),
                h1: msg.r1.clone(),
                g2: self.y.clone(),
                h2: msg.r1_prime.clone(),
            })
            .map_err(|_| Error::InvalidDlEqProof(1))?;
        self.r1 = Some(msg.r1.clone());

        let q = Scalar::<Secp256k1>::group_order();
        let r_point = &msg.r1_prime * &self.k2;
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
        let c2: RawCiphertext =
            Paillier::mul(&self.ek, RawCiphertext::from(&self.c1_x1), RawPlaintext::from(&v));
        let c3: RawCiphertext = Paillier::add(&self.ek, RawCiphertext::from(&c1), c2);
        let c3 = c3.0.into_owned();

        self.state = State::Step2;

        let pi_k2_dleq = ECDDHProof::prove(
            &ECDDHWitness {
                x: self.k2.clone(),
            },
            &ECDDHStatement {
                g1: Point::generator().to_point(),
                h1: self.r2.clone(),
                g2: self.y.clone(),
                h2: self.r2_prime.clone(),
            },
        );

        Ok(Message3 {
            sid: msg.sid.clone(),
            r2: self.r2.clone(),
            pi_r2: DLogProof::prove(&self.k2),
            r2_prime: self.r2_prime.clone(),
            pi_k2_dleq,
            c3,
        })
    }

    pub fn process_message4(&mut self, msg: &Message4) -> Result<PreSignature, Error> {
        check_routing(msg, Protocol::Adaptor, Entity::Party1, Entity::Party2)
            .map_err(Error::Kernel)?;
        if self.state != State::Step2 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let q = Scalar::<Secp256k1>::group_order();
        let pre = &msg.pre_signature;
        let s_prime_inv = BigInt::mod_inv(&pre.s_prime, q).ok_or(Error::InvalidResult)?;
        let u = BigInt::mod_mul(&self.z, &s_prime_inv, q);
        let v = BigInt::mod_mul(&pre.r, &s_prime_inv, q);
        let expected = Point::generator() * Scalar::from_bigint(&u) + &self.q * Scalar::from_bigint(&v);

        let r1 = self.r1.clone().expect("set in process_message2");
        let k2_r1 = r1 * &self.k2;
        if k2_r1 != expected {
            return Err(Error::InvalidResult);
        }

        self.state = State::Step3;

        Ok(pre.clone())
    }
}
