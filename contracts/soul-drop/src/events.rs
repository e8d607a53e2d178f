#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, String};

/// Fired once per token. `nullifier_hash` is `None` for owner airdrops.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub receiver: Address,
    pub token_id: u32,
    pub nullifier_hash: Option<BytesN<32>>,
}

/// Fired once at deployment with the group the ledger is gated on.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupCreatedEvent {
    pub group_id: BytesN<32>,
    pub merkle_tree_depth: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseUriSetEvent {
    pub base_uri: String,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_admin: Address,
    pub new_admin: Address,
}

pub fn publish_group_created(env: &Env, group_id: BytesN<32>, merkle_tree_depth: u32) {
    env.events().publish(
        (symbol_short!("GROUP"), group_id.clone()),
        GroupCreatedEvent {
            group_id,
            merkle_tree_depth,
        },
    );
}

pub fn publish_minted(
    env: &Env,
    receiver: Address,
    token_id: u32,
    nullifier_hash: Option<BytesN<32>>,
) {
    env.events().publish(
        (symbol_short!("MINTED"), receiver.clone()),
        MintedEvent {
            receiver,
            token_id,
            nullifier_hash,
        },
    );
}

pub fn publish_base_uri_set(env: &Env, base_uri: String) {
    env.events()
        .publish((symbol_short!("BASE_URI"),), BaseUriSetEvent { base_uri });
}

pub fn publish_ownership_transferred(env: &Env, previous_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("OWNER"), new_admin.clone()),
        OwnershipTransferredEvent {
            previous_admin,
            new_admin,
        },
    );
}
