//! The verifier side of [`super`]: holds the public key and an encryption of
//! `x1`, and must be convinced the prover can decrypt exactly `log_G(Q1)`.

use curv::arithmetic::traits::*;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{Add, EncryptWithChosenRandomness, EncryptionKey, Mul, Paillier, Randomness, RawCiphertext, RawPlaintext};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::paillier_ext::is_coprime;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{Message1, Message2, Message3, Message4};
use super::Error;

/// Verifier state machine. Owned by value by the `Keygen` party that embeds
/// it (see [`crate::lindell17::keygen::party2::Party2`]).
pub struct Verifier {
    ek: EncryptionKey,
    x1_enc: BigInt,
    q1: Point<Secp256k1>,
    a: Option<BigInt>,
    b: Option<BigInt>,
    c_q_hat: Option<Commitment>,
    state: State,
}

impl Verifier {
    pub fn new(ek: EncryptionKey, x1_enc: BigInt, q1: Point<Secp256k1>) -> Self {
        Verifier {
            ek,
            x1_enc,
            q1,
            a: None,
            b: None,
            c_q_hat: None,
            state: State::Start,
        }
    }

    /// Begins the proof, sampling `(a, b)` and producing the opening
    /// [`Message1`] sent to the prover.
    pub fn start(&mut self, sid: String) -> Result<Message1, Error> {
        if self.state != State::Start {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let q = Scalar::<Secp256k1>::group_order();
        let a = BigInt::sample_below(q);
        let b = BigInt::sample_below(&(q * q));

        let r = Randomness::sample(&self.ek);
        if !is_coprime(&r.0, &self.ek.n) {
            return Err(Error::InvalidGcd);
        }

        let enc_b: RawCiphertext =
            Paillier::encrypt_with_chosen_randomness(&self.ek, RawPlaintext::from(&b), &r);
        let a_x1: RawCiphertext =
            Paillier::mul(&self.ek, RawCiphertext::from(&self.x1_enc), RawPlaintext::from(&a));
        let c_prime: RawCiphertext = Paillier::add(&self.ek, enc_b, a_x1);

        let c_ab = Commitment::commit(&[&a.to_bytes(), &b.to_bytes()]);

        self.a = Some(a);
        self.b = Some(b);
        self.state = State::Step1;

        Ok(Message1 {
            sid,
            c_ab,
            c_prime: c_prime.0.into_owned(),
        })
    }

    pub fn process(&mut self, msg: &dyn VerifierInbound) -> Result<VerifierOutput, Error> {
        msg.dispatch(self)
    }

    fn step1(&mut self, msg: &Message2) -> Result<VerifierOutput, Error> {
        check_routing(msg, Protocol::DlEncProof, Entity::Prover, Entity::Verifier)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        self.c_q_hat = Some(msg.c_q_hat.clone());
        self.state = State::Step2;

        Ok(VerifierOutput::Message3(Message3 {
            sid: msg.sid.clone(),
            a: self.a.clone().expect("set in start"),
            b: self.b.clone().expect("set in start"),
        }))
    }

    fn step2(&mut self, msg: &Message4) -> Result<VerifierOutput, Error> {
        check_routing(msg, Protocol::DlEncProof, Entity::Prover, Entity::Verifier)?;
        if self.state != State::Step2 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let q_hat_x = msg.q_hat.x_coord().unwrap_or_else(|| BigInt::from(0));
        let is_valid_opening = self
            .c_q_hat
            .as_ref()
            .expect("set in step1")
            .verify(&[&q_hat_x.to_bytes()]);

        let a = self.a.clone().expect("set in start");
        let b = self.b.clone().expect("set in start");
        let q_prime = &self.q1 * Scalar::from_bigint(&a) + Point::generator() * Scalar::from_bigint(&b);

        let is_valid = is_valid_opening && msg.q_hat == q_prime;
        self.state = State::Step3;

        Ok(VerifierOutput::Done { is_valid })
    }
}

/// Result of [`Verifier::process`].
pub enum VerifierOutput {
    Message3(Message3),
    Done { is_valid: bool },
}

/// Sealed dispatch trait so `process` can accept either inbound message
/// type without the caller downcasting by hand.
pub trait VerifierInbound {
    #[doc(hidden)]
    fn dispatch(&self, verifier: &mut Verifier) -> Result<VerifierOutput, Error>;
}

impl VerifierInbound for Message2 {
    fn dispatch(&self, verifier: &mut Verifier) -> Result<VerifierOutput, Error> {
        verifier.step1(self)
    }
}

impl VerifierInbound for Message4 {
    fn dispatch(&self, verifier: &mut Verifier) -> Result<VerifierOutput, Error> {
        verifier.step2(self)
    }
}
