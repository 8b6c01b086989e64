//! Protocol kernel shared by every Lindell'17 subprotocol: message/result
//! traits, entity and state tags, the hash-based commitment scheme, and the
//! small utility helpers (session id generation, hash-length checks) that
//! every subprotocol relies on.

pub mod commitment;
pub mod paillier_ext;
pub mod utils;

pub mod dlenc_proof;
pub mod keygen;
pub mod sign;
pub mod adaptor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The protocol a message or result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    DlEncProof,
    Keygen,
    Sign,
    Adaptor,
}

/// The entity that sent or is meant to receive a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Party1,
    Party2,
    Prover,
    Verifier,
}

/// The internal state of a party's state machine.
///
/// States are strictly ordered; transitions only ever move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    Start,
    Step1,
    Step2,
    Step3,
    Step4,
}

/// A protocol message exchanged between two parties (or a prover/verifier
/// pair).
///
/// Implementors carry their own payload; routing fields (`to`/`from`/
/// `protocol`/`message_id`/`sid`) are exposed uniformly so a `process`
/// dispatcher can validate and route without downcasting.
pub trait Message {
    fn to(&self) -> Entity;
    fn from(&self) -> Entity;
    fn protocol(&self) -> Protocol;
    fn message_id(&self) -> u8;
    fn sid(&self) -> &str;
    /// Returns `false` if any payload field is null/empty/zero.
    fn is_valid(&self) -> bool;
}

/// A protocol result, emitted once a party's state machine reaches its final
/// state.
pub trait ProtocolResult {
    fn from(&self) -> Entity;
    fn protocol(&self) -> Protocol;
    fn sid(&self) -> &str;
}

/// Kernel-level routing errors, shared verbatim by every subprotocol's own
/// error enum via `#[from]` conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("message belongs to the wrong protocol")]
    WrongProtocol,
    #[error("message was sent by the wrong sender")]
    WrongSender,
    #[error("message is not addressed to this party")]
    WrongRecipient,
    #[error("message failed validation")]
    InvalidMessage,
    #[error("message id is unknown to this protocol")]
    UnknownMessage,
    #[error("party is in the wrong state for this message")]
    InvalidState,
    #[error("failed to generate a session id")]
    GenerateSessionId,
}

/// Performs the four structural checks every `process(msg)` implementation
/// must run before dispatching by message id: protocol, sender, recipient,
/// validity.
pub fn check_routing<M: Message>(
    msg: &M,
    protocol: Protocol,
    expected_sender: Entity,
    expected_recipient: Entity,
) -> Result<(), KernelError> {
    if msg.protocol() != protocol {
        return Err(KernelError::WrongProtocol);
    }
    if msg.from() != expected_sender {
        return Err(KernelError::WrongSender);
    }
    if msg.to() != expected_recipient {
        return Err(KernelError::WrongRecipient);
    }
    if !msg.is_valid() {
        return Err(KernelError::InvalidMessage);
    }
    Ok(())
}
