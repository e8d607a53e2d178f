#![no_std]

//! Shared proof-gating helpers for the ZK SoulDrop contracts.
//!
//! Both ledgers accept a Semaphore-style membership proof, consume its
//! nullifier exactly once and hand the proof to an external verifier
//! contract. This crate holds everything that path needs apart from the
//! ledger state itself:
//! - [`field`]: BN254 range checks for public signals and proof words.
//! - [`scheme`]: external-nullifier and signal derivation.
//! - [`verifier`]: the verifier ABI and the cross-contract verification call.

pub mod field;
pub mod scheme;
pub mod verifier;

pub use field::{check_proof, check_signals, is_scalar, Proof};
pub use scheme::{external_nullifier, hash_to_field, message_signal, receiver_signal};
pub use verifier::{verify, PublicSignals, SemaphoreVerifier, SemaphoreVerifierClient};

// ── Storage lifetime ─────────────────────────────────────────────────────────

/// ~5 seconds per ledger.
pub const LEDGERS_PER_DAY: u32 = 17_280;

pub const PERSISTENT_TTL_THRESHOLD: u32 = 30 * LEDGERS_PER_DAY;
pub const PERSISTENT_TTL_EXTEND_TO: u32 = 60 * LEDGERS_PER_DAY;

pub const INSTANCE_TTL_THRESHOLD: u32 = 30 * LEDGERS_PER_DAY;
pub const INSTANCE_TTL_EXTEND_TO: u32 = 60 * LEDGERS_PER_DAY;

// ── Group parameters ─────────────────────────────────────────────────────────

/// Semaphore supports group trees of depth 1 through 32.
pub const MIN_TREE_DEPTH: u32 = 1;
pub const MAX_TREE_DEPTH: u32 = 32;

pub fn is_valid_depth(depth: u32) -> bool {
    (MIN_TREE_DEPTH..=MAX_TREE_DEPTH).contains(&depth)
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Failures raised by the shared gate.
///
/// Each contract maps these into its own `#[contracterror]` enum so callers
/// only ever see that contract's error codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GateError {
    /// A nullifier hash or Merkle root is not a BN254 scalar field element.
    MalformedSignal,
    /// A proof word is not a BN254 base field element.
    MalformedProof,
    /// The verifier rejected the proof, panicked, or returned garbage.
    InvalidProof,
}
