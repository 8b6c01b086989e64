//! Party1's side of key generation. Party1 plays the role of `Prover` in the
//! embedded [`crate::lindell17::dlenc_proof`] subprotocol, since it is the
//! party holding the Paillier private key and `x1`.

use curv::arithmetic::traits::*;
use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use paillier::{DecryptionKey, EncryptionKey, KeyGeneration, Paillier};
use zk_paillier::zkproofs::{NiCorrectKeyProof, RangeProofNi};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::dlenc_proof::prover::{Prover, ProverOutput};
use crate::lindell17::paillier_ext::encrypt_and_return_nonce;
use crate::lindell17::{check_routing, Entity, Protocol, State};

use super::messages::{
    Message1, Message2, Message3, Message4, Message5, Message6, Message7, Party1KeyShare,
};
use super::Error;

/// Paillier modulus size in bits. Matches the security level assumed by
/// [`zk_paillier::zkproofs::RangeProofNi`]'s soundness analysis.
const PAILLIER_KEY_SIZE: usize = 2048;

pub struct Party1 {
    x1: Scalar<Secp256k1>,
    q1: Point<Secp256k1>,
    q2: Option<Point<Secp256k1>>,
    ek: Option<EncryptionKey>,
    dk: Option<DecryptionKey>,
    prover: Option<Prover>,
    state: State,
}

impl Party1 {
    /// Samples `x1` uniformly from `[0, q/3)` and commits to `Q1 = x1 * G`.
    pub fn start(sid: String) -> (Self, Message1) {
        let q = Scalar::<Secp256k1>::group_order();
        let bound = q / BigInt::from(3);
        let x1 = Scalar::from_bigint(&BigInt::sample_below(&bound));
        let q1 = Point::generator() * &x1;
        let c_q1 = Commitment::commit(&[q1.to_bytes(true).as_ref()]);

        let party = Party1 {
            x1,
            q1,
            q2: None,
            ek: None,
            dk: None,
            prover: None,
            state: State::Step1,
        };
        (party, Message1 { sid, c_q1 })
    }

    pub fn process_message2(&mut self, msg: &Message2) -> Result<Message3, Error> {
        check_routing(msg, Protocol::Keygen, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        if self.state != State::Step1 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        DLogProof::verify(&msg.pi_q2).map_err(|_| Error::InvalidDlogProof(2))?;
        if msg.pi_q2.pk != msg.q2 {
            return Err(Error::InvalidDlogProof(2));
        }
        self.q2 = Some(msg.q2.clone());

        let keypair = Paillier::keypair_with_modulus_size(PAILLIER_KEY_SIZE);
        let (ek, dk) = keypair.keys();
        let correct_key_proof = NiCorrectKeyProof::proof(&dk, None);

        let (c1_x1, r) = encrypt_and_return_nonce(&ek, &self.x1.to_bigint());
        let q = Scalar::<Secp256k1>::group_order();
        let range_proof = RangeProofNi::prove(&ek, q, &c1_x1, &self.x1.to_bigint(), &r);

        self.ek = Some(ek.clone());
        self.dk = Some(dk.clone());
        self.prover = Some(Prover::new(dk, self.x1.clone()));
        self.state = State::Step2;

        Ok(Message3 {
            sid: msg.sid.clone(),
            q1: self.q1.clone(),
            pi_q1: DLogProof::prove(&self.x1),
            ek,
            correct_key_proof,
            c1_x1,
            range_proof,
        })
    }

    pub fn process_message4(&mut self, msg: &Message4) -> Result<Message5, Error> {
        check_routing(msg, Protocol::Keygen, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        if self.state != State::Step2 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let prover = self.prover.as_mut().expect("set in process_message2");
        prover.start().map_err(Error::DlEncProof)?;
        match prover.process(&msg.inner).map_err(Error::DlEncProof)? {
            ProverOutput::Message2(inner) => {
                self.state = State::Step3;
                Ok(Message5 {
                    sid: msg.sid.clone(),
                    inner,
                })
            }
            ProverOutput::Done { .. } => unreachable!("dlenc step1 never completes the proof"),
        }
    }

    pub fn process_message6(
        &mut self,
        msg: &Message6,
    ) -> Result<(Message7, Party1KeyShare), Error> {
        check_routing(msg, Protocol::Keygen, Entity::Party2, Entity::Party1)
            .map_err(Error::Kernel)?;
        if self.state != State::Step3 {
            return Err(Error::Kernel(crate::lindell17::KernelError::InvalidState));
        }

        let prover = self.prover.as_mut().expect("set in process_message2");
        match prover.process(&msg.inner).map_err(Error::DlEncProof)? {
            ProverOutput::Done { message4, is_valid } => {
                if !is_valid {
                    return Err(Error::InvalidDlEncProof);
                }
                self.state = State::Step4;
                let q2 = self.q2.clone().expect("set in process_message2");
                let q = q2 * &self.x1;
                let result = Party1KeyShare {
                    sid: msg.sid.clone(),
                    q,
                    x1: self.x1.clone(),
                    ek: self.ek.clone().expect("set in process_message2"),
                    dk: self.dk.clone().expect("set in process_message2"),
                };
                Ok((
                    Message7 {
                        sid: msg.sid.clone(),
                        inner: message4,
                    },
                    result,
                ))
            }
            ProverOutput::Message2(_) => unreachable!("dlenc step2 always completes the proof"),
        }
    }
}
