//! Semaphore scheme values bound into every proof.
//!
//! The external nullifier scopes a nullifier to one application: a group
//! member produces exactly one nullifier per scope, so a fixed scope means one
//! claim per identity. The signal commits the proof to the action's payload
//! (the receiver for mints, the message for donations), which stops a relayer
//! from redirecting a proof it has seen in the mempool.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String};

/// External-nullifier scope for SoulDrop mints.
pub const SOULDROP_SCOPE: &[u8] = b"ZK SoulDrop";

/// External-nullifier scope for donations.
pub const DONATIONS_SCOPE: &[u8] = b"ZK SoulDrop Donations";

/// Label the production group fingerprint is derived from.
pub const GROUP_LABEL: &[u8] = b"ZK SoulDrop Group";

/// `keccak256(data) >> 8`, which always lands inside the BN254 scalar field.
pub fn hash_to_field(env: &Env, data: &Bytes) -> BytesN<32> {
    let digest = env.crypto().keccak256(data).to_array();
    let mut out = [0u8; 32];
    out[1..].copy_from_slice(&digest[..31]);
    BytesN::from_array(env, &out)
}

pub fn external_nullifier(env: &Env, scope: &[u8]) -> BytesN<32> {
    hash_to_field(env, &Bytes::from_slice(env, scope))
}

/// Full keccak256 of a label. Group identifiers are opaque fingerprints, not
/// field elements, so no shift is applied.
pub fn group_fingerprint(env: &Env, label: &[u8]) -> BytesN<32> {
    env.crypto().keccak256(&Bytes::from_slice(env, label)).into()
}

/// Signal for a mint: the XDR encoding of the receiver address.
pub fn receiver_signal(env: &Env, receiver: &Address) -> BytesN<32> {
    hash_to_field(env, &receiver.clone().to_xdr(env))
}

/// Signal for a donation: the XDR encoding of the donor's message.
pub fn message_signal(env: &Env, message: &String) -> BytesN<32> {
    hash_to_field(env, &message.clone().to_xdr(env))
}
