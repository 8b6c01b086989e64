//! Wire messages for the adaptor-signature extension.

use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::cryptographic_primitives::proofs::sigma_ec_ddh::ECDDHProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::Point;
use curv::BigInt;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::lindell17::commitment::Commitment;
use crate::lindell17::{Entity, Message, Protocol};

/// The public statement both parties sign against: a point `Y` whose
/// discrete log `y` will later complete the pre-signature, and the hash of
/// the message being pre-signed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdaptorStatement {
    pub y: Point<Secp256k1>,
    pub pi_y: DLogProof<Secp256k1, Sha256>,
    pub hash: Vec<u8>,
}

/// Party2 → Party1: commitments to `R2` and `R2' = k2 * Y`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message1 {
    pub sid: String,
    pub c_r2: Commitment,
    pub c_r2_prime: Commitment,
}

impl Message for Message1 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Adaptor
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

/// Party1 → Party2: `R1`, `R1' = k1 * Y`, and a DLEQ proof that both share
/// the same discrete log `k1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message2 {
    pub sid: String,
    pub r1: Point<Secp256k1>,
    pub pi_r1: DLogProof<Secp256k1, Sha256>,
    pub r1_prime: Point<Secp256k1>,
    pub pi_k1_dleq: ECDDHProof<Secp256k1, Sha256>,
}

impl Message for Message2 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Adaptor
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

/// Party2 → Party1: the opening of `R2`/`R2'`, their DLEQ proof, and the
/// masked ciphertext that lets Party1 complete its half of the signature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message3 {
    pub sid: String,
    pub r2: Point<Secp256k1>,
    pub pi_r2: DLogProof<Secp256k1, Sha256>,
    pub r2_prime: Point<Secp256k1>,
    pub pi_k2_dleq: ECDDHProof<Secp256k1, Sha256>,
    pub c3: BigInt,
}

impl Message for Message3 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Adaptor
    }
    fn message_id(&self) -> u8 {
        3
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.c3 != BigInt::from(0)
    }
}

/// Party1 → Party2: the pre-signature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message4 {
    pub sid: String,
    pub pre_signature: PreSignature,
}

impl Message for Message4 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Adaptor
    }
    fn message_id(&self) -> u8 {
        4
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty()
    }
}

/// An ECDSA signature masked by the adaptor secret `y`: completed into a
/// real signature by [`super::adapt`], or used with a real signature to
/// recover `y` via [`super::extract`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreSignature {
    pub sid: String,
    pub r: BigInt,
    pub s_prime: BigInt,
    pub v: u8,
}

impl crate::lindell17::ProtocolResult for PreSignature {
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Adaptor
    }
    fn sid(&self) -> &str {
        &self.sid
    }
}
