//! Fixture helpers shared by this crate's tests and downstream consumers
//! (enabled with the `test-utils` feature).

use ark_bn254::{G1Affine, G2Affine, G1Projective, G2Projective};
use ark_ec::{CurveGroup, PrimeGroup};

use crate::proof::{g1_to_bytes, g2_to_bytes, Zkp, PROOF_LEN};
use crate::verifying_key::{PedersenVerifyingKey, VerifyingKey};

/// A verifying key whose points are all the identity. Every pairing term
/// evaluates to one, so any syntactically valid proof verifies. Useful for
/// exercising state-machine paths without a prover.
#[must_use]
pub fn permissive_verifying_key() -> VerifyingKey {
    VerifyingKey {
        alpha_g1: G1Affine::identity(),
        beta_g2: G2Affine::identity(),
        gamma_g2: G2Affine::identity(),
        delta_g2: G2Affine::identity(),
        gamma_abc_g1: vec![G1Affine::identity(); 3],
        commitment_key: PedersenVerifyingKey {
            g: G2Affine::identity(),
            g_root_sigma_neg: G2Affine::identity(),
        },
    }
}

/// A verifying key that rejects every proof: `e(alpha, -beta)` is a fixed
/// non-identity value no proof term can cancel.
#[must_use]
pub fn rejecting_verifying_key() -> VerifyingKey {
    VerifyingKey {
        alpha_g1: G1Projective::generator().into_affine(),
        beta_g2: G2Projective::generator().into_affine(),
        ..permissive_verifying_key()
    }
}

/// An all-zero proof blob; every component decodes to the identity.
#[must_use]
pub fn zero_proof_bytes() -> Vec<u8> {
    vec![0_u8; PROOF_LEN]
}

/// Serializes a parsed proof back into the 384-byte wire encoding.
#[must_use]
pub fn serialize_zkp(zkp: &Zkp) -> Vec<u8> {
    let mut out = Vec::with_capacity(PROOF_LEN);
    out.extend_from_slice(&g1_to_bytes(&zkp.proof.a));
    out.extend_from_slice(&g2_to_bytes(&zkp.proof.b));
    out.extend_from_slice(&g1_to_bytes(&zkp.proof.c));
    out.extend_from_slice(&g1_to_bytes(&zkp.proof_commitment));
    out.extend_from_slice(&g1_to_bytes(&zkp.proof_commitment_pok));
    out
}
