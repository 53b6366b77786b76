//! Groth16 proof verification for the CometBLS consensus.
//!
//! A CometBLS header update is accepted when a succinct proof shows that the
//! trusted validator set signed the new header. This crate checks such a
//! proof against a verifying key: it binds the header fields into the
//! public input ([`field`]), parses the fixed-layout proof blob ([`proof`])
//! and runs the pairing and commitment-opening checks ([`verify_zkp`]).

pub mod error;
pub mod field;
pub mod proof;
pub mod types;
pub mod verifying_key;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::Groth16Error;
pub use proof::Zkp;
pub use types::{LightHeader, Timestamp};
pub use verifying_key::{PedersenVerifyingKey, VerifyingKey};

use alloy_primitives::B256;
use ark_bn254::Bn254;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::Zero;

/// Number of public-input points the verifying key must carry. `K[0]` is the
/// constant term, `K[1]` pairs with the inputs hash and `K[2]` with the
/// commitment hash. The index assignment is a fixed protocol convention.
pub const REQUIRED_PUBLIC_INPUTS: usize = 3;

/// Verifies that `zkp` proves `header` was signed by the validator set
/// committed to by `trusted_next_validators_hash`.
///
/// The proof blob layout is described in [`proof::PROOF_LEN`] and the
/// public-input encoding in [`field`]. The pairing check and the
/// commitment-opening check are not distinguished to callers: either
/// failing yields [`Groth16Error::InvalidProof`].
///
/// This function performs no mutation and is safe to call concurrently for
/// different inputs against the same verifying key.
///
/// # Errors
/// Returns an error if the chain id exceeds 31 bytes, the proof blob cannot
/// be decoded, the verifying key is malformed, or the proof does not verify.
pub fn verify_zkp(
    vk: &VerifyingKey,
    trusted_next_validators_hash: B256,
    header: &LightHeader,
    zkp: &[u8],
) -> Result<(), Groth16Error> {
    if header.chain_id.len() > field::MAX_CHAIN_ID_LEN {
        return Err(Groth16Error::ChainIdTooLong(header.chain_id.clone()));
    }
    if vk.gamma_abc_g1.len() < REQUIRED_PUBLIC_INPUTS {
        return Err(Groth16Error::MalformedVerifyingKey(vk.gamma_abc_g1.len()));
    }

    let zkp = Zkp::try_from(zkp)?;

    let commitment_hash = field::commitment_hash(&zkp.proof_commitment);
    let inputs_hash = field::inputs_hash(header, trusted_next_validators_hash);

    let msm = (vk.gamma_abc_g1[0].into_group()
        + vk.gamma_abc_g1[2] * commitment_hash
        + vk.gamma_abc_g1[1] * inputs_hash)
        .into_affine();

    // e(A, B) * e(msm, -gamma) * e(C, -delta) * e(alpha, -beta) == 1
    let pairing_check = Bn254::multi_pairing(
        [zkp.proof.a, msm, zkp.proof.c, vk.alpha_g1],
        [
            zkp.proof.b,
            -vk.gamma_g2,
            -vk.delta_g2,
            -vk.beta_g2,
        ],
    )
    .is_zero();

    let opening_check = vk
        .commitment_key
        .verify(zkp.proof_commitment, zkp.proof_commitment_pok);

    if pairing_check && opening_check {
        Ok(())
    } else {
        Err(Groth16Error::InvalidProof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Affine, G2Affine};
    use ark_ec::PrimeGroup;

    use crate::test_utils::{
        permissive_verifying_key, rejecting_verifying_key, serialize_zkp, zero_proof_bytes,
    };

    fn test_header() -> LightHeader {
        LightHeader {
            chain_id: "cometbls-testnet-1".into(),
            height: 42,
            time: Timestamp {
                seconds: 1_700_000_000,
                nanos: 123,
            },
            validators_hash: B256::repeat_byte(0x11),
            next_validators_hash: B256::repeat_byte(0x22),
            app_hash: B256::repeat_byte(0x33),
        }
    }

    #[test]
    fn accepts_with_permissive_key() {
        let vk = permissive_verifying_key();
        verify_zkp(
            &vk,
            B256::repeat_byte(0x44),
            &test_header(),
            &zero_proof_bytes(),
        )
        .unwrap();
    }

    #[test]
    fn rejects_with_rejecting_key() {
        let vk = rejecting_verifying_key();
        let err = verify_zkp(
            &vk,
            B256::repeat_byte(0x44),
            &test_header(),
            &zero_proof_bytes(),
        )
        .unwrap_err();
        assert_eq!(err, Groth16Error::InvalidProof);
    }

    #[test]
    fn rejects_overlong_chain_id() {
        let vk = permissive_verifying_key();
        let mut header = test_header();
        header.chain_id = "a".repeat(32);
        let err = verify_zkp(&vk, B256::ZERO, &header, &zero_proof_bytes()).unwrap_err();
        assert!(matches!(err, Groth16Error::ChainIdTooLong(_)));
    }

    #[test]
    fn rejects_short_verifying_key() {
        let mut vk = permissive_verifying_key();
        vk.gamma_abc_g1.truncate(2);
        let err = verify_zkp(&vk, B256::ZERO, &test_header(), &zero_proof_bytes()).unwrap_err();
        assert_eq!(err, Groth16Error::MalformedVerifyingKey(2));
    }

    /// Hand-built satisfying instance: with `K[1] = K[2] = 0` the public
    /// input collapses to `K[0]`, so the pairing product reduces to
    /// `e(aG1, bG2) * e(mG1, -gG2) * e(cG1, -dG2) * e(xG1, -yG2)`, which is
    /// the identity iff `ab = mg + cd + xy`.
    #[test]
    fn pairing_equation_holds_for_consistent_scalars() {
        let g1 = ark_bn254::G1Projective::generator();
        let g2 = ark_bn254::G2Projective::generator();

        // 2 * 3 == 3 * 1 + 1 * 2 + 1 * 1
        let vk = VerifyingKey {
            alpha_g1: (g1 * Fr::from(1u64)).into_affine(),
            beta_g2: (g2 * Fr::from(1u64)).into_affine(),
            gamma_g2: (g2 * Fr::from(1u64)).into_affine(),
            delta_g2: (g2 * Fr::from(2u64)).into_affine(),
            gamma_abc_g1: vec![
                (g1 * Fr::from(3u64)).into_affine(),
                G1Affine::identity(),
                G1Affine::identity(),
            ],
            commitment_key: PedersenVerifyingKey {
                g: G2Affine::identity(),
                g_root_sigma_neg: G2Affine::identity(),
            },
        };

        let zkp = Zkp {
            proof: proof::Proof {
                a: (g1 * Fr::from(2u64)).into_affine(),
                b: (g2 * Fr::from(3u64)).into_affine(),
                c: (g1 * Fr::from(1u64)).into_affine(),
            },
            proof_commitment: G1Affine::identity(),
            proof_commitment_pok: G1Affine::identity(),
        };
        let bytes = serialize_zkp(&zkp);

        verify_zkp(&vk, B256::ZERO, &test_header(), &bytes).unwrap();

        // Negating A flips the first pairing term; the proof must fail.
        let mut bad = zkp;
        bad.proof.a = (-bad.proof.a.into_group()).into_affine();
        let bytes = serialize_zkp(&bad);
        assert_eq!(
            verify_zkp(&vk, B256::ZERO, &test_header(), &bytes).unwrap_err(),
            Groth16Error::InvalidProof
        );
    }
}
