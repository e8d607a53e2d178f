#![no_std]

//! # ZK SoulDrop – soulbound membership NFT
//!
//! Members of a Semaphore group mint a non-transferable token by submitting a
//! membership proof. The proof's nullifier hash is consumed on mint, so each
//! group identity can claim once. Tokens are permanently bound to their
//! receiver: every transfer or approval entry point fails.

pub mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, BytesN, Env,
    String,
};
use souldrop_common::{
    self as gate, scheme::SOULDROP_SCOPE, GateError, PublicSignals,
    INSTANCE_TTL_EXTEND_TO, INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO,
    PERSISTENT_TTL_THRESHOLD,
};

pub use events::{BaseUriSetEvent, GroupCreatedEvent, MintedEvent, OwnershipTransferredEvent};

// ============================================================================
// Errors
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    ReplayRejected = 1,
    InvalidProof = 2,
    SoulboundViolation = 3,
    TokenNotFound = 4,
    Unauthorized = 5,
    MalformedSignal = 6,
    MalformedProof = 7,
    BaseUriTooLong = 8,
    InvalidTreeDepth = 9,
    SupplyExhausted = 10,
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
    Name,
    Symbol,
    Verifier,
    GroupId,
    TreeDepth,
    BaseUri,
    TotalSupply,
    Nullifier(BytesN<32>),
    Owner(u32),
    Balance(Address),
}

// ============================================================================
// Constants
// ============================================================================

const MAX_BASE_URI_LEN: u32 = 224;

const MAX_URI_LEN: usize = 256;

/// Digits in `u32::MAX`.
const MAX_ID_DIGITS: usize = 10;

const URI_SUFFIX: &[u8] = b".json";

// The longest base plus the longest id and the suffix must fit the buffer.
const _: () =
    assert!(MAX_BASE_URI_LEN as usize + MAX_ID_DIGITS + URI_SUFFIX.len() <= MAX_URI_LEN);

// ============================================================================
// Contract
// ============================================================================

#[contract]
pub struct SoulDropContract;

#[contractimpl]
impl SoulDropContract {
    /// Deploy the ledger. Everything except the admin and base URI is
    /// immutable afterwards.
    pub fn __constructor(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        verifier: Address,
        group_id: BytesN<32>,
        merkle_tree_depth: u32,
    ) {
        if !gate::is_valid_depth(merkle_tree_depth) {
            panic_with_error!(&env, Error::InvalidTreeDepth);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);
        env.storage().instance().set(&DataKey::Verifier, &verifier);
        env.storage().instance().set(&DataKey::GroupId, &group_id);
        env.storage()
            .instance()
            .set(&DataKey::TreeDepth, &merkle_tree_depth);
        env.storage()
            .instance()
            .set(&DataKey::BaseUri, &String::from_str(&env, ""));
        env.storage().instance().set(&DataKey::TotalSupply, &0u32);

        events::publish_group_created(&env, group_id, merkle_tree_depth);
    }

    /// Mint a soulbound token to `receiver` against a membership proof.
    ///
    /// Anyone may submit on the receiver's behalf. The proof must commit to
    /// the receiver as its signal, so a relayed proof cannot be redirected.
    /// Every check runs before the first write.
    pub fn mint(
        env: Env,
        receiver: Address,
        nullifier_hash: BytesN<32>,
        merkle_root: BytesN<32>,
        proof: BytesN<256>,
    ) -> Result<u32, Error> {
        gate::check_signals(&nullifier_hash, &merkle_root)?;
        gate::check_proof(&proof)?;

        if is_consumed(&env, &nullifier_hash) {
            return Err(Error::ReplayRejected);
        }

        let signals = PublicSignals {
            merkle_root,
            nullifier_hash: nullifier_hash.clone(),
            signal_hash: gate::receiver_signal(&env, &receiver),
            external_nullifier: gate::external_nullifier(&env, SOULDROP_SCOPE),
            merkle_tree_depth: load_depth(&env),
        };
        gate::verify(
            &env,
            &load_verifier(&env),
            &proof,
            &signals,
            &load_group_id(&env),
        )?;

        let token_id = next_token_id(&env)?;

        let key = DataKey::Nullifier(nullifier_hash.clone());
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);

        issue(&env, &receiver, token_id);
        events::publish_minted(&env, receiver, token_id, Some(nullifier_hash));

        Ok(token_id)
    }

    /// Owner airdrop without a proof. No nullifier is consumed.
    pub fn admin_mint(env: Env, caller: Address, receiver: Address) -> Result<u32, Error> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        let token_id = next_token_id(&env)?;
        issue(&env, &receiver, token_id);
        events::publish_minted(&env, receiver, token_id, None);

        Ok(token_id)
    }

    // ========================================================================
    // Soulbound restrictions
    // ========================================================================

    pub fn transfer(_env: Env, _from: Address, _to: Address, _token_id: u32) -> Result<(), Error> {
        Err(Error::SoulboundViolation)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _token_id: u32,
    ) -> Result<(), Error> {
        Err(Error::SoulboundViolation)
    }

    pub fn approve(
        _env: Env,
        _approver: Address,
        _operator: Address,
        _token_id: u32,
    ) -> Result<(), Error> {
        Err(Error::SoulboundViolation)
    }

    pub fn set_approval_for_all(
        _env: Env,
        _owner: Address,
        _operator: Address,
        _approved: bool,
    ) -> Result<(), Error> {
        Err(Error::SoulboundViolation)
    }

    /// Nobody is ever approved for an existing token.
    pub fn get_approved(env: Env, token_id: u32) -> Result<Option<Address>, Error> {
        load_owner(&env, token_id)?;
        Ok(None)
    }

    pub fn is_approved_for_all(_env: Env, _owner: Address, _operator: Address) -> bool {
        false
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// `base_uri + token_id + ".json"`.
    pub fn token_uri(env: Env, token_id: u32) -> Result<String, Error> {
        load_owner(&env, token_id)?;

        let base = load_base_uri(&env);
        let base_len = base.len() as usize;

        let mut buf = [0u8; MAX_URI_LEN];
        base.copy_into_slice(&mut buf[..base_len]);
        let mut len = base_len;
        len += write_decimal(&mut buf[len..], token_id);
        buf[len..len + URI_SUFFIX.len()].copy_from_slice(URI_SUFFIX);
        len += URI_SUFFIX.len();

        Ok(String::from_bytes(&env, &buf[..len]))
    }

    pub fn owner_of(env: Env, token_id: u32) -> Result<Address, Error> {
        load_owner(&env, token_id)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        load_balance(&env, &owner)
    }

    pub fn has_minted(env: Env, owner: Address) -> bool {
        load_balance(&env, &owner) > 0
    }

    pub fn total_supply(env: Env) -> u32 {
        load_total_supply(&env)
    }

    pub fn is_nullifier_used(env: Env, nullifier_hash: BytesN<32>) -> bool {
        is_consumed(&env, &nullifier_hash)
    }

    /// The external nullifier every mint proof must be generated for.
    pub fn external_nullifier(env: Env) -> BytesN<32> {
        gate::external_nullifier(&env, SOULDROP_SCOPE)
    }

    pub fn name(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .expect("Name not set")
    }

    pub fn symbol(env: Env) -> String {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .expect("Symbol not set")
    }

    pub fn base_uri(env: Env) -> String {
        load_base_uri(&env)
    }

    pub fn group_id(env: Env) -> BytesN<32> {
        load_group_id(&env)
    }

    pub fn merkle_tree_depth(env: Env) -> u32 {
        load_depth(&env)
    }

    pub fn verifier(env: Env) -> Address {
        load_verifier(&env)
    }

    // ========================================================================
    // Admin Functions
    // ========================================================================

    pub fn admin(env: Env) -> Address {
        load_admin(&env)
    }

    /// Replace the metadata prefix. The content is not validated beyond its
    /// length.
    pub fn set_base_uri(env: Env, caller: Address, new_uri: String) -> Result<(), Error> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        if new_uri.len() > MAX_BASE_URI_LEN {
            return Err(Error::BaseUriTooLong);
        }

        env.storage().instance().set(&DataKey::BaseUri, &new_uri);
        bump_instance(&env);
        events::publish_base_uri_set(&env, new_uri);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        env.storage().instance().set(&DataKey::Admin, &new_admin);
        bump_instance(&env);
        events::publish_ownership_transferred(&env, caller, new_admin);
        Ok(())
    }
}

// ============================================================================
// Ledger Bookkeeping
// ============================================================================

fn is_consumed(env: &Env, nullifier_hash: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Nullifier(nullifier_hash.clone()))
}

fn next_token_id(env: &Env) -> Result<u32, Error> {
    load_total_supply(env)
        .checked_add(1)
        .ok_or(Error::SupplyExhausted)
}

/// Record `token_id` as owned by `receiver`. `token_id` must come from
/// `next_token_id` in the same invocation.
fn issue(env: &Env, receiver: &Address, token_id: u32) {
    let owner_key = DataKey::Owner(token_id);
    env.storage().persistent().set(&owner_key, receiver);
    env.storage()
        .persistent()
        .extend_ttl(&owner_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);

    // A balance never exceeds the supply, so it cannot overflow first.
    let balance_key = DataKey::Balance(receiver.clone());
    let balance = load_balance(env, receiver) + 1;
    env.storage().persistent().set(&balance_key, &balance);
    env.storage().persistent().extend_ttl(
        &balance_key,
        PERSISTENT_TTL_THRESHOLD,
        PERSISTENT_TTL_EXTEND_TO,
    );

    env.storage()
        .instance()
        .set(&DataKey::TotalSupply, &token_id);
    bump_instance(env);
}

fn load_owner(env: &Env, token_id: u32) -> Result<Address, Error> {
    if token_id == 0 || token_id > load_total_supply(env) {
        return Err(Error::TokenNotFound);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Owner(token_id))
        .ok_or(Error::TokenNotFound)
}

fn load_balance(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(owner.clone()))
        .unwrap_or(0)
}

fn load_total_supply(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn load_base_uri(env: &Env) -> String {
    env.storage()
        .instance()
        .get(&DataKey::BaseUri)
        .unwrap_or_else(|| String::from_str(env, ""))
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

fn load_verifier(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Verifier)
        .expect("Verifier not set")
}

fn load_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Admin not set")
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    if *caller != load_admin(env) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

/// Write `value` in decimal at the start of `out`, returning the digit count.
fn write_decimal(out: &mut [u8], mut value: u32) -> usize {
    let mut digits = [0u8; 10];
    let mut count = 0;
    loop {
        digits[count] = b'0' + (value % 10) as u8;
        count += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    for (slot, digit) in out.iter_mut().zip(digits[..count].iter().rev()) {
        *slot = *digit;
    }
    count
}

// ============================================================================
// Tests
// ============================================================================
