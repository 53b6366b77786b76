//! The verifying key and the Pedersen commitment key.

use ark_bn254::{Bn254, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// Verifying key for the Pedersen commitment carried alongside the Groth16
/// proof.
///
/// An opening pair `(commitment, pok)` produced by the matching prover
/// satisfies `e(commitment, g) * e(pok, g_root_sigma_neg) == 1`.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PedersenVerifyingKey {
    pub g: G2Affine,
    pub g_root_sigma_neg: G2Affine,
}

impl PedersenVerifyingKey {
    /// Checks that `pok` is a valid proof of knowledge for `commitment`.
    #[must_use]
    pub fn verify(&self, commitment: G1Affine, pok: G1Affine) -> bool {
        Bn254::multi_pairing([commitment, pok], [self.g, self.g_root_sigma_neg]).is_zero()
    }
}

/// The Groth16 verifying key, supplied externally (via a governance
/// message in the enclosing module) and treated as read-only once loaded.
///
/// Only `gamma_abc_g1[0..=2]` participate in verification: the constant
/// term, the inputs-hash term and the commitment-hash term, in that order.
///
/// The wire format is the arkworks canonical (compressed) encoding of this
/// struct, carried hex-encoded in the administrative message.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerifyingKey {
    pub alpha_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub gamma_g2: G2Affine,
    pub delta_g2: G2Affine,
    pub gamma_abc_g1: Vec<G1Affine>,
    pub commitment_key: PedersenVerifyingKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

    use crate::test_utils::permissive_verifying_key;

    #[test]
    fn canonical_round_trip() {
        let mut vk = permissive_verifying_key();
        vk.beta_g2 = (G2Projective::generator() * Fr::from(3u64)).into_affine();

        let mut bytes = Vec::new();
        vk.serialize_compressed(&mut bytes).unwrap();
        let decoded = VerifyingKey::deserialize_compressed(bytes.as_slice()).unwrap();
        assert_eq!(decoded, vk);
    }

    #[test]
    fn identity_commitment_key_accepts_identity_opening() {
        let vk = permissive_verifying_key();
        assert!(vk
            .commitment_key
            .verify(G1Affine::identity(), G1Affine::identity()));
    }
}
