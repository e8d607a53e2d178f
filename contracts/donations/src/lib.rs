#![no_std]

//! # ZK SoulDrop – anonymous donations
//!
//! Group members donate without revealing who they are. Each donation carries
//! a membership proof whose nullifier is spent on success, and the donor's
//! message is the proof's signal so a relayer cannot rewrite it.

pub mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, token, Address, BytesN,
    Env, String,
};
use souldrop_common::{
    self as gate, scheme::DONATIONS_SCOPE, GateError, PublicSignals, INSTANCE_TTL_EXTEND_TO,
    INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO, PERSISTENT_TTL_THRESHOLD,
};

pub use events::{DonationReceivedEvent, WithdrawnEvent};

// ============================================================================
// Errors
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    ReplayRejected = 1,
    InvalidProof = 2,
    // 3, 4 are SoulDrop token errors
    Unauthorized = 5,
    MalformedSignal = 6,
    MalformedProof = 7,
    // 8 is SoulDrop's BaseUriTooLong
    InvalidTreeDepth = 9,
    // 10 is SoulDrop's SupplyExhausted
    InvalidAmount = 11,
    NothingToWithdraw = 12,
}

impl From<GateError> for Error {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MalformedSignal => Error::MalformedSignal,
            GateError::MalformedProof => Error::MalformedProof,
            GateError::InvalidProof => Error::InvalidProof,
        }
    }
}

// ============================================================================
// Data Types
// ============================================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    Verifier,
    GroupId,
    TreeDepth,
    TotalDonations,
    /// Amount donated under a nullifier. Presence marks it spent.
    Nullifier(BytesN<32>),
}

// ============================================================================
// Contract
// ============================================================================

#[contract]
pub struct DonationsContract;

#[contractimpl]
impl DonationsContract {
    /// `token` is the asset contract donations are paid in, normally the
    /// native asset's SAC.
    pub fn __constructor(
        env: Env,
        admin: Address,
        token: Address,
        verifier: Address,
        group_id: BytesN<32>,
        merkle_tree_depth: u32,
    ) {
        if !gate::is_valid_depth(merkle_tree_depth) {
            panic_with_error!(&env, Error::InvalidTreeDepth);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::Verifier, &verifier);
        env.storage().instance().set(&DataKey::GroupId, &group_id);
        env.storage()
            .instance()
            .set(&DataKey::TreeDepth, &merkle_tree_depth);
        env.storage()
            .instance()
            .set(&DataKey::TotalDonations, &0i128);
    }

    /// Donate `amount` with a membership proof bound to `message`.
    ///
    /// Proof verification, the token transfer and the ledger writes commit
    /// together or not at all.
    pub fn donate(
        env: Env,
        donor: Address,
        amount: i128,
        message: String,
        merkle_root: BytesN<32>,
        nullifier_hash: BytesN<32>,
        proof: BytesN<256>,
    ) -> Result<(), Error> {
        donor.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        gate::check_signals(&nullifier_hash, &merkle_root)?;
        gate::check_proof(&proof)?;

        let key = DataKey::Nullifier(nullifier_hash.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::ReplayRejected);
        }

        let signals = PublicSignals {
            merkle_root,
            nullifier_hash: nullifier_hash.clone(),
            signal_hash: gate::message_signal(&env, &message),
            external_nullifier: gate::external_nullifier(&env, DONATIONS_SCOPE),
            merkle_tree_depth: load_depth(&env),
        };
        gate::verify(
            &env,
            &load_verifier(&env),
            &proof,
            &signals,
            &load_group_id(&env),
        )?;

        let total = load_total(&env)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        token::Client::new(&env, &load_token(&env)).transfer(
            &donor,
            &env.current_contract_address(),
            &amount,
        );

        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
        env.storage()
            .instance()
            .set(&DataKey::TotalDonations, &total);
        bump_instance(&env);

        events::publish_donation_received(&env, nullifier_hash, amount, message);
        Ok(())
    }

    /// Sweep the whole balance to the admin.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let admin = load_admin(&env);
        if caller != admin {
            return Err(Error::Unauthorized);
        }

        let token = token::Client::new(&env, &load_token(&env));
        let contract = env.current_contract_address();
        let amount = token.balance(&contract);
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        token.transfer(&contract, &admin, &amount);
        bump_instance(&env);

        events::publish_withdrawn(&env, admin, amount);
        Ok(amount)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lifetime total. Withdrawals do not reduce it.
    pub fn total_donations(env: Env) -> i128 {
        load_total(&env)
    }

    /// Amount donated under `nullifier_hash`, or 0 if it is unspent.
    pub fn nullifier_donation(env: Env, nullifier_hash: BytesN<32>) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Nullifier(nullifier_hash))
            .unwrap_or(0)
    }

    pub fn is_nullifier_used(env: Env, nullifier_hash: BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Nullifier(nullifier_hash))
    }

    /// Balance currently held and available to withdraw.
    pub fn balance(env: Env) -> i128 {
        token::Client::new(&env, &load_token(&env)).balance(&env.current_contract_address())
    }

    pub fn external_nullifier(env: Env) -> BytesN<32> {
        gate::external_nullifier(&env, DONATIONS_SCOPE)
    }

    pub fn admin(env: Env) -> Address {
        load_admin(&env)
    }

    /// Asset contract donations are paid in.
    pub fn asset(env: Env) -> Address {
        load_token(&env)
    }

    pub fn verifier(env: Env) -> Address {
        load_verifier(&env)
    }

    pub fn group_id(env: Env) -> BytesN<32> {
        load_group_id(&env)
    }

    pub fn merkle_tree_depth(env: Env) -> u32 {
        load_depth(&env)
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn load_total(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalDonations)
        .unwrap_or(0)
}

fn load_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Admin not set")
}

fn load_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .expect("Token not set")
}

fn load_verifier(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Verifier)
        .expect("Verifier not set")
}

fn load_group_id(env: &Env) -> BytesN<32> {
    env.storage()
        .instance()
        .get(&DataKey::GroupId)
        .expect("GroupId not set")
}

fn load_depth(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::TreeDepth)
        .expect("TreeDepth not set")
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}
