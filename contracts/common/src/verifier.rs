//! Verifier capability.
//!
//! The ledgers never look inside a proof. They assemble the public signals
//! from their own state and the caller's arguments, then ask an external
//! verifier contract for a yes/no answer.

use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env};

use crate::field::Proof;
use crate::GateError;

/// Public inputs of a Semaphore membership proof.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicSignals {
    pub merkle_root: BytesN<32>,
    pub nullifier_hash: BytesN<32>,
    pub signal_hash: BytesN<32>,
    pub external_nullifier: BytesN<32>,
    pub merkle_tree_depth: u32,
}

#[contractclient(name = "SemaphoreVerifierClient")]
pub trait SemaphoreVerifier {
    fn verify_proof(
        env: Env,
        proof: BytesN<256>,
        signals: PublicSignals,
        group_id: BytesN<32>,
    ) -> bool;
}

/// Ask `verifier` whether `proof` is valid for `signals` in `group_id`.
///
/// Only an explicit `true` passes. A `false`, a trap inside the verifier, or a
/// return value that is not a bool all map to [`GateError::InvalidProof`].
pub fn verify(
    env: &Env,
    verifier: &Address,
    proof: &Proof,
    signals: &PublicSignals,
    group_id: &BytesN<32>,
) -> Result<(), GateError> {
    let client = SemaphoreVerifierClient::new(env, verifier);
    match client.try_verify_proof(proof, signals, group_id) {
        Ok(Ok(true)) => Ok(()),
        _ => Err(GateError::InvalidProof),
    }
}
