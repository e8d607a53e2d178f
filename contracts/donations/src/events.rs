#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, String};

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationReceivedEvent {
    pub nullifier_hash: BytesN<32>,
    pub amount: i128,
    pub message: String,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub admin: Address,
    pub amount: i128,
}

pub fn publish_donation_received(
    env: &Env,
    nullifier_hash: BytesN<32>,
    amount: i128,
    message: String,
) {
    env.events().publish(
        (symbol_short!("DONATED"), nullifier_hash.clone()),
        DonationReceivedEvent {
            nullifier_hash,
            amount,
            message,
        },
    );
}

pub fn publish_withdrawn(env: &Env, admin: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), admin.clone()),
        WithdrawnEvent { admin, amount },
    );
}
