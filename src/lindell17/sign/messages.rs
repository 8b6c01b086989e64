//! Wire messages for two-party signing.

use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::Point;
use curv::BigInt;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use curv::arithmetic::Converter;

use crate::lindell17::commitment::Commitment;
use crate::lindell17::{Entity, Message, Protocol};

use super::Error;

/// Left-pads a big-endian encoding of `n` to 32 bytes.
pub(crate) fn to_32_bytes(n: &BigInt) -> [u8; 32] {
    let bytes = n.to_bytes();
    let mut out = [0u8; 32];
    let start = 32 - bytes.len();
    out[start..].copy_from_slice(&bytes);
    out
}

/// Party1 → Party2: commitment to `R1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message1 {
    pub sid: String,
    pub c_r1: Commitment,
}

impl Message for Message1 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Sign
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

/// Party2 → Party1: `R2` and its proof of knowledge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message2 {
    pub sid: String,
    pub r2: Point<Secp256k1>,
    pub pi_r2: DLogProof<Secp256k1, Sha256>,
}

impl Message for Message2 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Sign
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

/// Party1 → Party2: the opening of `c_r1`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message3 {
    pub sid: String,
    pub r1: Point<Secp256k1>,
    pub pi_r1: DLogProof<Secp256k1, Sha256>,
}

impl Message for Message3 {
    fn to(&self) -> Entity {
        Entity::Party2
    }
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Sign
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

/// Party2 → Party1: `r` and the homomorphically masked encryption of the
/// second half of the signature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message4 {
    pub sid: String,
    pub r: BigInt,
    pub c3: BigInt,
}

impl Message for Message4 {
    fn to(&self) -> Entity {
        Entity::Party1
    }
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Sign
    }
    fn message_id(&self) -> u8 {
        4
    }
    fn sid(&self) -> &str {
        &self.sid
    }
    fn is_valid(&self) -> bool {
        !self.sid.is_empty() && self.r != BigInt::from(0)
    }
}

/// Party2's own record of the partial signature it handed to Party1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartialSignature {
    pub sid: String,
    pub r: BigInt,
    pub c3: BigInt,
}

impl crate::lindell17::ProtocolResult for PartialSignature {
    fn from(&self) -> Entity {
        Entity::Party2
    }
    fn protocol(&self) -> Protocol {
        Protocol::Sign
    }
    fn sid(&self) -> &str {
        &self.sid
    }
}

/// A complete, low-s-normalized ECDSA signature, produced by Party1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Signature {
    pub sid: String,
    pub r: BigInt,
    pub s: BigInt,
    /// Recovery id (0 or 1) for the chosen low-s value of `s`.
    pub v: u8,
}

impl crate::lindell17::ProtocolResult for Signature {
    fn from(&self) -> Entity {
        Entity::Party1
    }
    fn protocol(&self) -> Protocol {
        Protocol::Sign
    }
    fn sid(&self) -> &str {
        &self.sid
    }
}

impl Signature {
    /// Verifies this signature against the public key `q` and the
    /// 32-byte message hash `z`, using `secp256k1`'s constant-time verifier.
    pub fn verify(&self, q: &Point<Secp256k1>, z: &BigInt) -> Result<(), Error> {
        let pk = secp256k1::PublicKey::from_slice(q.to_bytes(false).as_ref())
            .map_err(|_| Error::InvalidSignature)?;
        let msg = secp256k1::Message::from_slice(&to_32_bytes(z)).map_err(|_| Error::InvalidSignature)?;

        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&to_32_bytes(&self.r));
        compact[32..].copy_from_slice(&to_32_bytes(&self.s));
        let sig = secp256k1::Signature::from_compact(&compact).map_err(|_| Error::InvalidSignature)?;

        secp256k1::SECP256K1
            .verify(&msg, &sig, &pk)
            .map_err(|_| Error::InvalidSignature)
    }

    /// Recovers the public key this signature was produced under, using
    /// `v` as the recovery id. Returns the point in `curv-kzen`'s
    /// representation so it can be compared directly against `Q`.
    pub fn recover_public_key(&self, z: &BigInt) -> Result<Point<Secp256k1>, Error> {
        let msg = secp256k1::Message::from_slice(&to_32_bytes(z)).map_err(|_| Error::InvalidSignature)?;

        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&to_32_bytes(&self.r));
        compact[32..].copy_from_slice(&to_32_bytes(&self.s));
        let recid = secp256k1::recovery::RecoveryId::from_i32(self.v as i32)
            .map_err(|_| Error::InvalidSignature)?;
        let sig = secp256k1::recovery::RecoverableSignature::from_compact(&compact, recid)
            .map_err(|_| Error::InvalidSignature)?;

        let pk = secp256k1::SECP256K1
            .recover(&msg, &sig)
            .map_err(|_| Error::InvalidSignature)?;
        Point::from_bytes(&pk.serialize()).map_err(|_| Error::InvalidSignature)
    }
}
