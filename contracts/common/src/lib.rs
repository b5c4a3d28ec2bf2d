//! Shared building blocks for the stake-ledger contracts.
//!
//! This crate provides:
//! - [`roles`]: a role registry keyed by `(role, address)` in persistent storage.
//! - [`pausable`]: a contract-wide pause switch kept in instance storage.
//!
//! Both modules only touch storage; authentication (`require_auth`) and the
//! mapping onto contract-specific error codes stay with the calling contract.

#![no_std]

pub mod pausable;
pub mod roles;

pub use roles::Role;

/// Ledgers produced per day at a 5 second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// TTL that persistent entries are extended to on every touch.
pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// Remaining TTL below which a persistent entry is extended.
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// TTL that the contract instance is extended to on every call.
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;

/// Remaining instance TTL below which the instance is extended.
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
