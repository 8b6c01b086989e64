//! Party2's side of key generation. Party2 plays the role of `Verifier` in
//! the embedded [`crate::lindell17::dlenc_proof`] subprotocol.

use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::EncryptionKey;

use crate::lindell17::commitment::Commitment;
use crate::lindell17::dlenc_proof::verifier::{Verifier, VerifierOutput};
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{
    Message1, Message2, Message3, Message4, Message5, Message6, Message7, Party2KeyShare,
};
use super::Error;

pub struct Party2 {
    x2: Scalar<Secp256k1>,
    q2: Point<Secp256k1>,
    c_q1: Option<Commitment>,
    q1: Option<Point<Secp256k1>>,
    ek: Option<EncryptionKey>,
    c1_x1: Option<BigInt>,
    verifier: Option<Verifier>,
    state: State,
}

impl Party2 {
    pub fn q2(&self) -> &Point<Secp256k1> {
        &self.q2
    }

    pub fn process_message1(msg: &Message1) -> (Self, Message2) {
        let x2 = Scalar::<Secp256k1>::random();
        let q2 = Point::generator() * &x2;

        let party = Party2 {
            x2: x2.clone(),
            q2: q2.clone(),
            c_q1: Some(msg.c_q1.clone()),
            q1: None,
            ek: None,
            c1_x1: None,
            verifier: None,
            state: State::Step1,
        };
        (
            party,
            Message2 {
                sid: msg.sid.clone(),
                q2,
                pi_q2: DLogProof::prove(&x2),
            },
        )
    }

    pub fn process_message3(&mut self, msg: &Message3) -> Result<Message4, Error> {
        check_routing(msg, Protocol::Keygen, Entity::Party1, Entity::Party2)
            .map_err(Error::Kernel)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let opens = self
            .c_q1
            .as_ref()
            .expect("set in process_message1")
            .verify(&[msg.q1.to_bytes(true).as_ref()]);
        if !opens {
            return Err(Error::InvalidCommitment);
        }

        DLogProof::verify(&msg.pi_q1).map_err(|_| Error::InvalidDlogProof(1))?;
        if msg.pi_q1.pk != msg.q1 {
            return Err(Error::InvalidDlogProof(1));
        }
        msg.correct_key_proof
            .verify(&msg.ek, zk_paillier::zkproofs::SALT_STRING)
            .map_err(|_| Error::InvalidCorrectKeyProof)?;
        // `RangeProofNi::verify` asserts (panics) rather than returning an
        // error when `ek`/`c1_x1` don't match what the proof was generated
        // against, which a malicious Party1 can trigger by swapping in an
        // unrelated ciphertext. Treat that the same as a failed proof.
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            msg.range_proof.verify(&msg.ek, &msg.c1_x1)
        }))
        .map_err(|_| Error::InvalidRangeProof)?
        .map_err(|_| Error::InvalidRangeProof)?;

        self.q1 = Some(msg.q1.clone());
        self.ek = Some(msg.ek.clone());
        self.c1_x1 = Some(msg.c1_x1.clone());
        let mut verifier = Verifier::new(msg.ek.clone(), msg.c1_x1.clone(), msg.q1.clone());
        let inner = verifier.start(msg.sid.clone()).map_err(Error::DlEncProof)?;
        self.verifier = Some(verifier);
        self.state = State::Step2;

        Ok(Message4 {
            sid: msg.sid.clone(),
            inner,
        })
    }

    pub fn process_message5(&mut self, msg: &Message5) -> Result<Message6, Error> {
        check_routing(msg, Protocol::Keygen, Entity::Party1, Entity::Party2)
            .map_err(Error::Kernel)?;
        if self.state != State::Step2 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let verifier = self.verifier.as_mut().expect("set in process_message3");
        match verifier.process(&msg.inner).map_err(Error::DlEncProof)? {
            VerifierOutput::Message3(inner) => {
                self.state = State::Step3;
                Ok(Message6 {
                    sid: msg.sid.clone(),
                    inner,
                })
            }
            VerifierOutput::Done { .. } => unreachable!("dlenc step1 never completes the proof"),
        }
    }

    pub fn process_message7(&mut self, msg: &Message7) -> Result<Party2KeyShare, Error> {
        check_routing(msg, Protocol::Keygen, Entity::Party1, Entity::Party2)
            .map_err(Error::Kernel)?;
        if self.state != State::Step3 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let verifier = self.verifier.as_mut().expect("set in process_message3");
        match verifier.process(&msg.inner).map_err(Error::DlEncProof)? {
            VerifierOutput::Done { is_valid } => {
                if !is_valid {
                    return Err(Error::InvalidDlEncProof);
                }
                self.state = State::Step4;
                let q1 = self.q1.clone().expect("set in process_message3");
                let q = q1 * &self.x2;
                Ok(Party2KeyShare {
                    sid: msg.sid.clone(),
                    q,
                    x2: self.x2.clone(),
                    ek: self.ek.clone().expect("set in process_message3"),
                    c1_x1: self.c1_x1.clone().expect("set in process_message3"),
                })
            }
            VerifierOutput::Message3(_) => unreachable!("dlenc step2 always completes the proof"),
        }
    }
}
