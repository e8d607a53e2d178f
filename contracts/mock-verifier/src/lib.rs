#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, BytesN, Env};
use souldrop_common::PublicSignals;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Accept,
    Calls,
    LastSignals,
    LastGroup,
}

/// Scripted verifier for tests and local deployments.
/// In production, point the ledgers at a real Semaphore verifier instead.
#[contract]
pub struct MockVerifier;

#[contractimpl]
impl MockVerifier {
    pub fn __constructor(env: Env, accept: bool) {
        env.storage().instance().set(&DataKey::Accept, &accept);
        env.storage().instance().set(&DataKey::Calls, &0u32);
    }

    /// Return the scripted verdict. Accepted calls are recorded so tests can
    /// check which signals a ledger bound into the proof.
    pub fn verify_proof(
        env: Env,
        _proof: BytesN<256>,
        signals: PublicSignals,
        group_id: BytesN<32>,
    ) -> bool {
        let accept: bool = env
            .storage()
            .instance()
            .get(&DataKey::Accept)
            .unwrap_or(false);
        if !accept {
            return false;
        }

        let calls: u32 = env.storage().instance().get(&DataKey::Calls).unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::Calls, &calls.saturating_add(1));
        env.storage()
            .instance()
            .set(&DataKey::LastSignals, &signals);
        env.storage().instance().set(&DataKey::LastGroup, &group_id);
        true
    }

    pub fn set_accept(env: Env, accept: bool) {
        env.storage().instance().set(&DataKey::Accept, &accept);
    }

    pub fn calls(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Calls).unwrap_or(0)
    }

    pub fn last_signals(env: Env) -> Option<PublicSignals> {
        env.storage().instance().get(&DataKey::LastSignals)
    }

    pub fn last_group(env: Env) -> Option<BytesN<32>> {
        env.storage().instance().get(&DataKey::LastGroup)
    }
}
