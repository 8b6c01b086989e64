//! Lindell'17 two-party threshold ECDSA, plus a scriptless adaptor-signature
//! extension built on top of it.
//!
//! Two parties each hold a multiplicative share of a secret key; together
//! they generate a joint public key, produce standard ECDSA signatures under
//! it, and can produce adaptor pre-signatures bound to a discrete-log hard
//! relation.
//!
//! See [`lindell17::keygen`], [`lindell17::sign`] and [`lindell17::adaptor`].

pub mod lindell17;

pub use lindell17::*;
