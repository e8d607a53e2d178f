//! BN254 field-range validation.
//!
//! Public signals are scalar field elements (`< r`), while the eight words of
//! a Groth16 proof are affine point coordinates in the base field (`< q`).
//! Everything is big-endian, so comparing raw byte arrays compares numbers.

use soroban_sdk::BytesN;

use crate::GateError;

pub const FIELD_BYTES: usize = 32;
pub const PROOF_WORDS: usize = 8;
pub const PROOF_BYTES: usize = FIELD_BYTES * PROOF_WORDS;

/// Groth16 proof in the `uint256[8]` layout: `a.x a.y b.x1 b.x0 b.y1 b.y0 c.x c.y`.
pub type Proof = BytesN<PROOF_BYTES>;

/// BN254 scalar field modulus `r`.
pub const SCALAR_MODULUS: [u8; FIELD_BYTES] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// BN254 base field modulus `q`.
pub const BASE_MODULUS: [u8; FIELD_BYTES] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

pub fn is_scalar(value: &BytesN<32>) -> bool {
    value.to_array() < SCALAR_MODULUS
}

/// Both public signals a caller controls must be canonical scalars.
pub fn check_signals(
    nullifier_hash: &BytesN<32>,
    merkle_root: &BytesN<32>,
) -> Result<(), GateError> {
    if !is_scalar(nullifier_hash) || !is_scalar(merkle_root) {
        return Err(GateError::MalformedSignal);
    }
    Ok(())
}

pub fn check_proof(proof: &Proof) -> Result<(), GateError> {
    let raw = proof.to_array();
    for word in raw.chunks_exact(FIELD_BYTES) {
        if word >= &BASE_MODULUS[..] {
            return Err(GateError::MalformedProof);
        }
    }
    Ok(())
}
