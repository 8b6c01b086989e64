//! Wire messages for distributed key generation.

use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::Point;
use curv::BigInt;
use paillier::EncryptionKey;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zk_paillier::zkproofs::{NiCorrectKeyProof, RangeProofNi};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::dlenc_proof::messages as dlenc;
use crate::lindell17::{Entity, Message, Protocol};

/// Party1 → Party2: commitment to `Q1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message1 {
    pub sid: String,
    pub c_q1: Commitment,
}

impl Message for Message1 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        1
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty()
    }
}

/// Party2 → Party1: `Q2` and its proof of knowledge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message2 {
    pub sid: String,
    pub q2: Point<Secp256k1>,
    pub pi_q2: DLogProof<Secp256k1, Sha256>,
}

impl Message for Message2 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        2
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty()
    }
}

/// Party1 → Party2: the opening of `c_q1`, Party1's Paillier key material and
/// its accompanying proofs, and an encryption of `x1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message3 {
    pub sid: String,
    pub q1: Point<Secp256k1>,
    pub pi_q1: DLogProof<Secp256k1, Sha256>,
    pub ek: EncryptionKey,
    pub correct_key_proof: NiCorrectKeyProof,
    pub c1_x1: BigInt,
    pub range_proof: RangeProofNi,
}

impl Message for Message3 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        3
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty()
    }
}

/// Party2 → Party1: the embedded DLEncProof verifier's opening message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message4 {
    pub sid: String,
    pub inner: dlenc::Message1,
}

impl Message for Message4 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        4
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.inner.is_valid()
    }
}

/// Party1 → Party2: the embedded DLEncProof prover's commitment message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message5 {
    pub sid: String,
    pub inner: dlenc::Message2,
}

impl Message for Message5 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        5
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.inner.is_valid()
    }
}

/// Party2 → Party1: the embedded DLEncProof verifier's opening of `(a, b)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message6 {
    pub sid: String,
    pub inner: dlenc::Message3,
}

impl Message for Message6 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        6
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.inner.is_valid()
    }
}

/// Party1 → Party2: the embedded DLEncProof prover's final opening.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message7 {
    pub sid: String,
    pub inner: dlenc::Message4,
}

impl Message for Message7 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn message_id(&self) -> u8 {
        7
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.inner.is_valid()
    }
}

/// Party1's output: the shared public key plus the private material it
/// needs to take part in [`crate::lindell17::sign`] and
/// [`crate::lindell17::adaptor`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Party1KeyShare {
    pub sid: String,
    pub q: Point<Secp256k1>,
    pub x1: curv::elliptic::curves::Scalar<Secp256k1>,
    pub ek: EncryptionKey,
    pub dk: paillier::DecryptionKey,
}

impl crate::lindell17::ProtocolResult for Party1KeyShare {
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn sid(&self) -> &str {
        &self.sid
    }
}

/// Party2's output: the shared public key, Party2's share, and Party1's
/// public Paillier key and the ciphertext encrypting `x1` (both needed to
/// build Party2's side of [`crate::lindell17::sign`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Party2KeyShare {
    pub sid: String,
    pub q: Point<Secp256k1>,
    pub x2: curv::elliptic::curves::Scalar<Secp256k1>,
    pub ek: EncryptionKey,
    pub c1_x1: BigInt,
}

impl crate::lindell17::ProtocolResult for Party2KeyShare {
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Keygen
    }
    fn sid(&self) -> &str {
        &self.sid
    }
}
