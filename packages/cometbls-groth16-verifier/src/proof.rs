//! Parsing of the fixed-layout proof blob.
//!
//! The wire format is 384 bytes with no versioning or length prefix:
//! `A (64) ‖ B (128) ‖ C (64) ‖ proof_commitment (64) ‖ proof_commitment_pok (64)`.
//! G1 points are two 32-byte big-endian base-field elements `x ‖ y`; G2
//! points are two field-extension elements with the imaginary limb first
//! (`x.c1 ‖ x.c0 ‖ y.c1 ‖ y.c0`). An all-zero point encoding denotes the
//! identity; any other off-curve or non-subgroup encoding is rejected.

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::{BigInt, BigInteger, PrimeField};
use num_bigint::BigUint;

use crate::error::Groth16Error;

/// Size of a serialized G1 point.
pub const G1_LEN: usize = 64;
/// Size of a serialized G2 point.
pub const G2_LEN: usize = 128;
/// Total size of the proof blob.
pub const PROOF_LEN: usize = 3 * G1_LEN + G2_LEN + 2 * G1_LEN;

/// The Groth16 proof triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

/// A parsed proof blob: the Groth16 triple plus the public-input
/// commitment and its proof of knowledge. Parsed fresh per verification
/// call and never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zkp {
    pub proof: Proof,
    pub proof_commitment: G1Affine,
    pub proof_commitment_pok: G1Affine,
}

impl TryFrom<&[u8]> for Zkp {
    type Error = Groth16Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < PROOF_LEN {
            return Err(Groth16Error::InvalidProofLength {
                expected: PROOF_LEN,
                found: bytes.len(),
            });
        }

        let a = g1_from_bytes(&bytes[0..64])?;
        let b = g2_from_bytes(&bytes[64..192])?;
        let c = g1_from_bytes(&bytes[192..256])?;
        let proof_commitment = g1_from_bytes(&bytes[256..320])?;
        let proof_commitment_pok = g1_from_bytes(&bytes[320..384])?;

        Ok(Self {
            proof: Proof { a, b, c },
            proof_commitment,
            proof_commitment_pok,
        })
    }
}

fn fq_from_bytes(bytes: &[u8]) -> Result<Fq, Groth16Error> {
    let repr = BigUint::from_bytes_be(bytes);
    BigInt::<4>::try_from(repr)
        .ok()
        .and_then(Fq::from_bigint)
        .ok_or(Groth16Error::NonCanonicalFieldElement)
}

/// Decodes a 64-byte `x ‖ y` G1 point. All-zero bytes decode to the
/// identity.
pub fn g1_from_bytes(bytes: &[u8]) -> Result<G1Affine, Groth16Error> {
    debug_assert_eq!(bytes.len(), G1_LEN);
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G1Affine::identity());
    }

    let x = fq_from_bytes(&bytes[..32])?;
    let y = fq_from_bytes(&bytes[32..])?;
    validate_point(G1Affine::new_unchecked(x, y))
}

/// Decodes a 128-byte `x.c1 ‖ x.c0 ‖ y.c1 ‖ y.c0` G2 point. All-zero bytes
/// decode to the identity.
pub fn g2_from_bytes(bytes: &[u8]) -> Result<G2Affine, Groth16Error> {
    debug_assert_eq!(bytes.len(), G2_LEN);
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G2Affine::identity());
    }

    let x = Fq2::new(fq_from_bytes(&bytes[32..64])?, fq_from_bytes(&bytes[..32])?);
    let y = Fq2::new(
        fq_from_bytes(&bytes[96..128])?,
        fq_from_bytes(&bytes[64..96])?,
    );
    validate_point(G2Affine::new_unchecked(x, y))
}

fn validate_point<C: SWCurveConfig>(point: Affine<C>) -> Result<Affine<C>, Groth16Error> {
    if !point.is_on_curve() {
        return Err(Groth16Error::PointNotOnCurve);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(Groth16Error::PointNotInSubgroup);
    }
    Ok(point)
}

fn fq_bytes(f: &Fq) -> [u8; 32] {
    let be = f.into_bigint().to_bytes_be();
    let mut bytes = [0_u8; 32];
    bytes[32 - be.len()..].copy_from_slice(&be);
    bytes
}

/// Big-endian affine coordinates of a G1 point; the identity maps to all
/// zeroes, mirroring the decoder.
#[must_use]
pub fn g1_coordinate_bytes(point: &G1Affine) -> ([u8; 32], [u8; 32]) {
    if point.infinity {
        return ([0_u8; 32], [0_u8; 32]);
    }
    (fq_bytes(&point.x), fq_bytes(&point.y))
}

/// Serializes a G1 point into the 64-byte wire encoding.
#[must_use]
pub fn g1_to_bytes(point: &G1Affine) -> [u8; G1_LEN] {
    let (x, y) = g1_coordinate_bytes(point);
    let mut out = [0_u8; G1_LEN];
    out[..32].copy_from_slice(&x);
    out[32..].copy_from_slice(&y);
    out
}

/// Serializes a G2 point into the 128-byte wire encoding.
#[must_use]
pub fn g2_to_bytes(point: &G2Affine) -> [u8; G2_LEN] {
    let mut out = [0_u8; G2_LEN];
    if point.infinity {
        return out;
    }
    out[..32].copy_from_slice(&fq_bytes(&point.x.c1));
    out[32..64].copy_from_slice(&fq_bytes(&point.x.c0));
    out[64..96].copy_from_slice(&fq_bytes(&point.y.c1));
    out[96..].copy_from_slice(&fq_bytes(&point.y.c0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ec::{CurveGroup, PrimeGroup};

    use crate::test_utils::serialize_zkp;

    fn sample_zkp() -> Zkp {
        let g1 = ark_bn254::G1Projective::generator();
        let g2 = ark_bn254::G2Projective::generator();
        Zkp {
            proof: Proof {
                a: (g1 * Fr::from(5u64)).into_affine(),
                b: (g2 * Fr::from(7u64)).into_affine(),
                c: (g1 * Fr::from(11u64)).into_affine(),
            },
            proof_commitment: (g1 * Fr::from(13u64)).into_affine(),
            proof_commitment_pok: G1Affine::identity(),
        }
    }

    #[test]
    fn round_trips() {
        let zkp = sample_zkp();
        let bytes = serialize_zkp(&zkp);
        assert_eq!(bytes.len(), PROOF_LEN);
        assert_eq!(Zkp::try_from(bytes.as_slice()).unwrap(), zkp);
    }

    #[test]
    fn rejects_short_input() {
        let err = Zkp::try_from(&[0_u8; 100][..]).unwrap_err();
        assert_eq!(
            err,
            Groth16Error::InvalidProofLength {
                expected: PROOF_LEN,
                found: 100
            }
        );
    }

    #[test]
    fn all_zero_blob_decodes_to_identities() {
        let zkp = Zkp::try_from(&[0_u8; PROOF_LEN][..]).unwrap();
        assert!(zkp.proof.a.infinity);
        assert!(zkp.proof.b.infinity);
        assert!(zkp.proof.c.infinity);
    }

    #[test]
    fn rejects_off_curve_point() {
        let mut bytes = vec![0_u8; PROOF_LEN];
        // x = 1, y = 1 is not on y^2 = x^3 + 3.
        bytes[31] = 1;
        bytes[63] = 1;
        assert_eq!(
            Zkp::try_from(bytes.as_slice()).unwrap_err(),
            Groth16Error::PointNotOnCurve
        );
    }

    #[test]
    fn rejects_non_canonical_coordinate() {
        // The base-field modulus itself is not a canonical encoding.
        let mut bytes = vec![0_u8; PROOF_LEN];
        bytes[..32].copy_from_slice(&Fq::MODULUS.to_bytes_be());
        assert_eq!(
            Zkp::try_from(bytes.as_slice()).unwrap_err(),
            Groth16Error::NonCanonicalFieldElement
        );
    }
}
