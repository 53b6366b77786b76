//! Deterministic encoding of byte strings and header fields into scalar
//! field elements.
//!
//! The encodings here must be reproduced bit-for-bit by the prover side;
//! any deviation changes the public input and the proof will not verify.

use alloy_primitives::B256;
use ark_bn254::{Fr, G1Affine};
use ark_ff::{BigInteger, PrimeField};
use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::proof::g1_coordinate_bytes;
use crate::types::LightHeader;

/// Domain-separation key for [`hash_to_field`].
pub const HMAC_KEY: &[u8] = b"CometBLS";

/// A chain id longer than this cannot fit the 31-byte field element slot
/// reserved for it in the public input.
pub const MAX_CHAIN_ID_LEN: usize = 31;

/// Hashes an arbitrary byte string to a nonzero, canonical scalar field
/// element.
///
/// Computes `HMAC(Keccak-256, key = "CometBLS", msg)`, interprets the
/// 32-byte tag as a big-endian integer `h` and maps it to
/// `(h mod (r - 1)) + 1`, which lies in `[1, r - 1]` for any input. The
/// construction is total: the final decode cannot fail because the reduced
/// value is strictly below the modulus.
#[must_use]
pub fn hash_to_field(msg: &[u8]) -> Fr {
    let mut mac =
        Hmac::<Keccak256>::new_from_slice(HMAC_KEY).expect("hmac accepts any key length");
    mac.update(msg);
    let tag = mac.finalize().into_bytes();

    let h = BigUint::from_bytes_be(&tag);
    let m = BigUint::from(Fr::MODULUS) - 1u8;
    let n = (h % m) + 1u8;

    let be = n.to_bytes_be();
    let mut bytes = [0_u8; 32];
    bytes[32 - be.len()..].copy_from_slice(&be);
    Fr::from_be_bytes_mod_order(&bytes)
}

/// Hashes the proof commitment's affine coordinates (`X ‖ Y`, 32 bytes
/// each, big-endian) to a scalar field element.
#[must_use]
pub fn commitment_hash(proof_commitment: &G1Affine) -> Fr {
    let (x, y) = g1_coordinate_bytes(proof_commitment);
    let mut buf = [0_u8; 64];
    buf[..32].copy_from_slice(&x);
    buf[32..].copy_from_slice(&y);
    hash_to_field(&buf)
}

/// Binds the header fields and the trusted next validators hash into a
/// single scalar field element.
///
/// The buffer layout is fixed: each hashed field occupies 32 bytes
/// big-endian, the height and time components are zero-padded 32-byte
/// big-endian integers and the app hash is appended raw. The first byte of
/// the SHA-256 digest is dropped so the remaining 248 bits always fit the
/// ~254-bit scalar field; the 31-byte decode is therefore exact.
///
/// The chain id must have been validated against [`MAX_CHAIN_ID_LEN`] by
/// the caller.
#[must_use]
pub fn inputs_hash(header: &LightHeader, trusted_next_validators_hash: B256) -> Fr {
    debug_assert!(header.chain_id.len() <= MAX_CHAIN_ID_LEN);

    let mut buf = Vec::with_capacity(8 * 32);
    buf.extend_from_slice(&fr_bytes(hash_to_field(header.chain_id.as_bytes())));
    buf.extend_from_slice(&u64_bytes(header.height));
    buf.extend_from_slice(&u64_bytes(header.time.seconds));
    buf.extend_from_slice(&u64_bytes(u64::from(header.time.nanos)));
    buf.extend_from_slice(&fr_bytes(hash_to_field(header.validators_hash.as_slice())));
    buf.extend_from_slice(&fr_bytes(hash_to_field(
        header.next_validators_hash.as_slice(),
    )));
    buf.extend_from_slice(header.app_hash.as_slice());
    buf.extend_from_slice(&fr_bytes(hash_to_field(
        trusted_next_validators_hash.as_slice(),
    )));

    let digest = Sha256::new().chain_update(&buf).finalize();
    Fr::from_be_bytes_mod_order(&digest[1..])
}

fn fr_bytes(f: Fr) -> [u8; 32] {
    let be = f.into_bigint().to_bytes_be();
    let mut bytes = [0_u8; 32];
    bytes[32 - be.len()..].copy_from_slice(&be);
    bytes
}

fn u64_bytes(v: u64) -> [u8; 32] {
    let mut bytes = [0_u8; 32];
    bytes[24..].copy_from_slice(&v.to_be_bytes());
    bytes
}
