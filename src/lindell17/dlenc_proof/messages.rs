//! Wire messages for the discrete-log-of-encryption proof.

use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::Point;
use curv::BigInt;
use serde::{Deserialize, Serialize};

use crate::lindell17::commitment::Commitment;
use crate::lindell17::{Entity, Message, Protocol};

/// Verifier → Prover: commitment to `(a, b)` and the homomorphically
/// combined ciphertext `c' = Enc(a*x1 + b)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message1 {
    pub sid: String,
    pub c_ab: Commitment,
    pub c_prime: BigInt,
}

impl Message for Message1 {
    fn to(&self) -> Entity {
        Entity::Prover
    }
    fn from(&self) -> Entity {
        Entity::Verifier
    }
    fn protocol(&self) -> Protocol {
        Protocol::DlEncProof
    }
    fn message_id(&self) -> u8 {
        1
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.c_prime != BigInt::from(0)
    }
}

/// Prover → Verifier: commitment to `Q^ = alpha * G`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message2 {
    pub sid: String,
    pub c_q_hat: Commitment,
}

impl Message for Message2 {
    fn to(&self) -> Entity {
        Entity::Verifier
    }
    fn from(&self) -> Entity {
        Entity::Prover
    }
    fn protocol(&self) -> Protocol {
        Protocol::DlEncProof
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

/// Verifier → Prover: the opening `(a, b)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message3 {
    pub sid: String,
    pub a: BigInt,
    pub b: BigInt,
}

impl Message for Message3 {
    fn to(&self) -> Entity {
        Entity::Prover
    }
    fn from(&self) -> Entity {
        Entity::Verifier
    }
    fn protocol(&self) -> Protocol {
        Protocol::DlEncProof
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

/// Prover → Verifier: the opening `Q^`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message4 {
    pub sid: String,
    pub q_hat: Point<Secp256k1>,
}

impl Message for Message4 {
    fn to(&self) -> Entity {
        Entity::Verifier
    }
    fn from(&self) -> Entity {
        Entity::Prover
    }
    fn protocol(&self) -> Protocol {
        Protocol::DlEncProof
    }
    fn message_id(&self) -> u8 {
        4
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.q_hat.x_coord().unwrap_or_else(|| BigInt::from(0)) != BigInt::from(0)
    }
}
