//! End-to-end scenarios exercising Keygen -> Sign -> Adaptor -> Adapt/Extract
//! across both parties, plus the fault-injection scenarios from the
//! protocol's testable properties.

use curv::arithmetic::traits::*;
use curv::cryptographic_primitives::proofs::sigma_dlog::DLogProof;
use curv::elliptic::curves::secp256_k1::Secp256k1;
use curv::elliptic::curves::{Point, Scalar};
use curv::BigInt;
use sha2::{Digest, Sha256};

use lindell17_ecdsa::adaptor;
use lindell17_ecdsa::keygen;
use lindell17_ecdsa::sign;
use lindell17_ecdsa::utils::generate_session_id;

fn run_keygen() -> (keygen::messages::Party1KeyShare, keygen::messages::Party2KeyShare) {
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = keygen::Party1::start(sid);
    let (mut p2, msg2) = keygen::Party2::process_message1(&msg1);
    let msg3 = p1.process_message2(&msg2).unwrap();
    let msg4 = p2.process_message3(&msg3).unwrap();
    let msg5 = p1.process_message4(&msg4).unwrap();
    let msg6 = p2.process_message5(&msg5).unwrap();
    let (msg7, share1) = p1.process_message6(&msg6).unwrap();
    let share2 = p2.process_message7(&msg7).unwrap();

    (share1, share2)
}

fn sha256(msg: &[u8]) -> Vec<u8> {
    Sha256::digest(msg).to_vec()
}

#[test]
fn keygen_happy_path_invariants_hold() {
    let (share1, share2) = run_keygen();

    let q = Scalar::<Secp256k1>::group_order();
    assert_eq!(share1.q, share2.q);
    assert_eq!(&share1.q, &(Point::generator() * &share1.x1 * &share2.x2));

    // x1 < q/3
    assert!(share1.x1.to_bigint() < q / BigInt::from(3));

    // Dec_sk(x1Enc) == x1
    use paillier::{Decrypt, Paillier, RawCiphertext, RawPlaintext};
    let decrypted: RawPlaintext = Paillier::decrypt(&share1.dk, RawCiphertext::from(&share2.c1_x1));
    assert_eq!(BigInt::from(decrypted), share1.x1.to_bigint());
}

#[test]
fn sign_happy_path_produces_verifiable_low_s_signature() {
    let (share1, share2) = run_keygen();
    let hash = sha256(b"Hello World");
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = sign::Party1::start(sid, &share1, BigInt::from_bytes(&hash));
    let (mut p2, msg2) = sign::Party2::process_message1(&msg1, &share2, BigInt::from_bytes(&hash));
    let msg3 = p1.process_message2(&msg2).unwrap();
    let (msg4, _partial) = p2.process_message3(&msg3).unwrap();
    let signature = p1.process_message4(&msg4).unwrap();

    let q = Scalar::<Secp256k1>::group_order();
    assert!(signature.s >= BigInt::one());
    assert!(signature.s <= q / BigInt::from(2));

    signature.verify(&share1.q, &BigInt::from_bytes(&hash)).unwrap();

    let recovered = signature.recover_public_key(&BigInt::from_bytes(&hash)).unwrap();
    assert_eq!(recovered, share1.q);
}

#[test]
fn sign_negative_rejects_verification_against_a_different_hash() {
    let (share1, share2) = run_keygen();
    let hash1 = sha256(b"Hello World");
    let hash2 = sha256(b"Goodbye World");
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = sign::Party1::start(sid, &share1, BigInt::from_bytes(&hash1));
    let (mut p2, msg2) = sign::Party2::process_message1(&msg1, &share2, BigInt::from_bytes(&hash1));
    let msg3 = p1.process_message2(&msg2).unwrap();
    let (msg4, _partial) = p2.process_message3(&msg3).unwrap();
    let signature = p1.process_message4(&msg4).unwrap();

    assert!(signature.verify(&share1.q, &BigInt::from_bytes(&hash2)).is_err());
}

fn hard_relation() -> (Scalar<Secp256k1>, Point<Secp256k1>) {
    let y = Scalar::<Secp256k1>::random();
    let cap_y = Point::generator() * &y;
    (y, cap_y)
}

#[test]
fn adaptor_adapt_and_extract_round_trip() {
    let (share1, share2) = run_keygen();
    let hash = sha256(b"Hello World");
    let (y, cap_y) = hard_relation();

    let statement = adaptor::messages::AdaptorStatement {
        y: cap_y.clone(),
        pi_y: DLogProof::prove(&y),
        hash: hash.clone(),
    };

    let sid = generate_session_id().unwrap();
    let (mut p2, msg1) = adaptor::Party2::start(sid, &share2, &statement).unwrap();
    let (mut p1, msg2) = adaptor::Party1::start(&msg1, &share1, &statement).unwrap();
    let msg3 = p2.process_message2(&msg2).unwrap();
    let msg4 = p1.process_message3(&msg3).unwrap();
    let pre_sig_p2 = p2.process_message4(&msg4).unwrap();

    assert_eq!(msg4.pre_signature.r, pre_sig_p2.r);
    assert_eq!(msg4.pre_signature.s_prime, pre_sig_p2.s_prime);
    assert_eq!(msg4.pre_signature.v, pre_sig_p2.v);

    let pre_sig = msg4.pre_signature;
    let signature = adaptor::adapt(&pre_sig, &y);

    let q = Scalar::<Secp256k1>::group_order();
    assert!(signature.s <= q / BigInt::from(2));
    signature.verify(&share1.q, &BigInt::from_bytes(&hash)).unwrap();

    let extracted = adaptor::extract(&cap_y, &pre_sig, &signature).unwrap();
    assert_eq!(extracted.to_bigint(), y.to_bigint());

    // a signature against an unrelated hash must not verify
    let other_hash = sha256(b"Goodbye World");
    assert!(signature.verify(&share1.q, &BigInt::from_bytes(&other_hash)).is_err());
}

#[test]
fn adaptor_rejects_hash_of_the_wrong_length() {
    let (_share1, share2) = run_keygen();
    let (y, cap_y) = hard_relation();
    let statement = adaptor::messages::AdaptorStatement {
        y: cap_y,
        pi_y: DLogProof::prove(&y),
        hash: vec![0u8; 31],
    };

    let sid = generate_session_id().unwrap();
    let err = match adaptor::Party2::start(sid, &share2, &statement) {
        Ok(_) => panic!("expected InvalidHashLength"),
        Err(e) => e,
    };
    assert!(matches!(err, adaptor::Error::InvalidHashLength(31)));
}

#[test]
fn adaptor_rejects_a_degenerate_statement() {
    let (_share1, share2) = run_keygen();
    let identity = Point::<Secp256k1>::zero();
    let statement = adaptor::messages::AdaptorStatement {
        y: identity,
        pi_y: DLogProof::prove(&Scalar::<Secp256k1>::random()),
        hash: sha256(b"Hello World"),
    };

    let sid = generate_session_id().unwrap();
    let err = match adaptor::Party2::start(sid, &share2, &statement) {
        Ok(_) => panic!("expected DegenerateStatement"),
        Err(e) => e,
    };
    assert!(matches!(err, adaptor::Error::DegenerateStatement));
}

#[test]
fn adaptor_fault_forged_r2_is_rejected() {
    let (share1, share2) = run_keygen();
    let (y, cap_y) = hard_relation();
    let statement = adaptor::messages::AdaptorStatement {
        y: cap_y,
        pi_y: DLogProof::prove(&y),
        hash: sha256(b"Hello World"),
    };

    let sid = generate_session_id().unwrap();
    let (mut p2, msg1) = adaptor::Party2::start(sid, &share2, &statement).unwrap();
    let (mut p1, msg2) = adaptor::Party1::start(&msg1, &share1, &statement).unwrap();
    let mut msg3 = p2.process_message2(&msg2).unwrap();

    // swap in an unrelated point, leaving pi_r2 (proof for the real R2)
    // unchanged; the commitment from Message1 must still catch this
    let forged = Point::generator() * Scalar::<Secp256k1>::random();
    msg3.r2 = forged;

    let err = p1.process_message3(&msg3).unwrap_err();
    assert!(matches!(err, adaptor::Error::InvalidCommitment(2)));
}

#[test]
fn keygen_fault_forged_q1_is_rejected() {
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = keygen::Party1::start(sid);
    let (mut p2, msg2) = keygen::Party2::process_message1(&msg1);
    let mut msg3 = p1.process_message2(&msg2).unwrap();

    // swap in an unrelated point, leaving pi_q1 (proof for the real Q1)
    // unchanged
    let forged = Point::generator() * Scalar::<Secp256k1>::random();
    msg3.q1 = forged;

    let err = p2.process_message3(&msg3).unwrap_err();
    assert!(matches!(err, keygen::Error::InvalidCommitment));
}

#[test]
fn keygen_fault_forged_q2_is_rejected() {
    let sid = generate_session_id().unwrap();

    let (p1, msg1) = keygen::Party1::start(sid);
    let (_p2, mut msg2) = keygen::Party2::process_message1(&msg1);

    // swap in a fresh random point, reusing the real pi_q2
    msg2.q2 = Point::generator() * Scalar::<Secp256k1>::random();

    let mut p1 = p1;
    let err = p1.process_message2(&msg2).unwrap_err();
    assert!(matches!(err, keygen::Error::InvalidDlogProof(2)));
}

#[test]
fn keygen_fault_swapped_paillier_key_is_rejected() {
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = keygen::Party1::start(sid);
    let (mut p2, msg2) = keygen::Party2::process_message1(&msg1);
    let mut msg3 = p1.process_message2(&msg2).unwrap();

    // substitute a freshly generated Paillier key, keeping the correctness
    // proof for the original one
    use paillier::{KeyGeneration, Paillier};
    let fresh = Paillier::keypair_with_modulus_size(2048);
    let (fresh_ek, _fresh_dk) = fresh.keys();
    msg3.ek = fresh_ek;

    let err = p2.process_message3(&msg3).unwrap_err();
    assert!(matches!(err, keygen::Error::InvalidCorrectKeyProof));
}

#[test]
fn keygen_fault_wrong_x1_encryption_is_rejected() {
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = keygen::Party1::start(sid);
    let (mut p2, msg2) = keygen::Party2::process_message1(&msg1);
    let mut msg3 = p1.process_message2(&msg2).unwrap();

    // substitute an encryption of an unrelated x', keeping the range proof
    // for the original x1
    use lindell17_ecdsa::paillier_ext::encrypt_and_return_nonce;
    let x_prime = BigInt::sample_below(Scalar::<Secp256k1>::group_order());
    let (c1_x_prime, _nonce) = encrypt_and_return_nonce(&msg3.ek, &x_prime);
    msg3.c1_x1 = c1_x_prime;

    let err = p2.process_message3(&msg3).unwrap_err();
    assert!(matches!(err, keygen::Error::InvalidRangeProof));
}

#[test]
fn state_monotonicity_rejects_replayed_messages() {
    let sid = generate_session_id().unwrap();

    let (mut p1, msg1) = keygen::Party1::start(sid);
    let (mut p2, msg2) = keygen::Party2::process_message1(&msg1);
    let msg3 = p1.process_message2(&msg2).unwrap();
    p2.process_message3(&msg3).unwrap();

    // feeding message3 again must fail: Party2 has already moved past Step1
    let err = p2.process_message3(&msg3).unwrap_err();
    assert!(matches!(
        err,
        keygen::Error::Kernel(lindell17_ecdsa::KernelError::InvalidState)
    ));
}
