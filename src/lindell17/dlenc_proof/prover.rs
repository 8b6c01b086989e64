//! The prover side of [`super`]: knows the Paillier private key and `x1`,
//! and must convince the verifier that the ciphertext it was given encrypts
//! `x1 = log_G(Q1)` without revealing `x1`.

use curv::arithmetic::Converter;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{Decrypt, DecryptionKey, Paillier, RawCiphertext, RawPlaintext};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{Message1, Message2, Message3, Message4};
use super::Error;

/// Prover state machine. Owned by value by the `Keygen` party that embeds
/// it (see [`crate::lindell17::keygen::party1::Party1`]).
pub struct Prover {
    sk: DecryptionKey,
    x1: Scalar<Secp256k1>,
    alpha: Option<BigInt>,
    q_hat: Option<Point<Secp256k1>>,
    c_rand_vals: Option<Commitment>,
    state: State,
}

impl Prover {
    pub fn new(sk: DecryptionKey, x1: Scalar<Secp256k1>) -> Self {
        Prover {
            sk,
            x1,
            alpha: None,
            q_hat: None,
            c_rand_vals: None,
            state: State::Start,
        }
    }

    pub fn start(&mut self) -> Result<(), Error> {
        if self.state != State::Start {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }
        self.state = State::Step1;
        Ok(())
    }

    /// Processes an inbound message, returning the next outbound message if
    /// one is produced (`Message2`/`Message4`) and, once the proof is
    /// complete, the final `is_valid` verdict.
    pub fn process(&mut self, msg: &dyn ProverInbound) -> Result<ProverOutput, Error> {
        msg.dispatch(self)
    }

    fn step1(&mut self, msg: &Message1) -> Result<ProverOutput, Error> {
        check_routing(msg, Protocol::DlEncProof, Entity::Verifier, Entity::Prover)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let plaintext: RawPlaintext =
            Paillier::decrypt(&self.sk, RawCiphertext::from(&msg.c_prime));
        let alpha = BigInt::from(plaintext);

        let q_hat = Point::generator() * Scalar::from_bigint(&alpha);
        let q_hat_x = q_hat.x_coord().unwrap_or_else(|| BigInt::from(0));
        let c_q_hat = Commitment::commit(&[&q_hat_x.to_bytes()]);

        self.c_rand_vals = Some(msg.c_ab.clone());
        self.alpha = Some(alpha);
        self.q_hat = Some(q_hat);
        self.state = State::Step2;

        Ok(ProverOutput::Message2(Message2 {
            sid: msg.sid.clone(),
            c_q_hat,
        }))
    }

    fn step2(&mut self, msg: &Message3) -> Result<ProverOutput, Error> {
        check_routing(msg, Protocol::DlEncProof, Entity::Verifier, Entity::Prover)?;
        if self.state != State::Step2 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let is_valid_opening = self
            .c_rand_vals
            .as_ref()
            .expect("set in step1")
            .verify(&[&msg.a.to_bytes(), &msg.b.to_bytes()]);

        let alpha_recomputed = &msg.a * self.x1.to_bigint() + &msg.b;
        let is_equal = self.alpha.as_ref().expect("set in step1") == &alpha_recomputed;

        let is_valid = is_valid_opening && is_equal;
        let q_hat = self.q_hat.clone().expect("set in step1");

        Ok(ProverOutput::Done {
            message4: Message4 {
                sid: msg.sid.clone(),
                q_hat,
            },
            is_valid,
        })
    }
}

/// Result of [`Prover::process`].
pub enum ProverOutput {
    Message2(Message2),
    Done { message4: Message4, is_valid: bool },
}

/// Sealed dispatch trait so `process` can accept either inbound message
/// type without the caller downcasting by hand.
pub trait ProverInbound {
    #[doc(hidden)]
    fn dispatch(&self, prover: &mut Prover) -> Result<ProverOutput, Error>;
}

impl ProverInbound for Message1 {
    fn dispatch(&self, prover: &mut Prover) -> Result<ProverOutput, Error> {
        prover.step1(self)
    }
}

impl ProverInbound for Message3 {
    fn dispatch(&self, prover: &mut Prover) -> Result<ProverOutput, Error> {
        prover.step2(self)
    }
}
