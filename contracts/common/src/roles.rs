use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Flat (non-hierarchical) roles. Holding one role implies nothing about
/// the others; an address needs each role it acts under.
///
/// - `Admin`   – Grants and revokes roles.
/// - `Manager` – Changes economic parameters (reward rate, holding period).
/// - `Pauser`  – Pauses and unpauses the contract.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Manager = 2,
    Pauser = 3,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Role, Address)) {
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns whether `account` currently holds `role`.
pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    let key = role_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        extend_ttl(env, &key);
    }
    held
}

/// Grants `role` to `account`.
/// Only callable internally; callers must verify authorization beforehand.
///
/// Returns `true` if the role was newly granted, `false` if already held.
pub fn grant_role(env: &Env, account: &Address, role: Role) -> bool {
    if has_role(env, account, role) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
    true
}

/// Revokes `role` from `account`.
/// Only callable internally; callers must verify authorization beforehand.
///
/// Returns `true` if the role was held and has been removed.
pub fn revoke_role(env: &Env, account: &Address, role: Role) -> bool {
    if !has_role(env, account, role) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));
    true
}

/// Grants every role to the bootstrapping admin.
pub fn bootstrap(env: &Env, admin: &Address) {
    grant_role(env, admin, Role::Admin);
    grant_role(env, admin, Role::Manager);
    grant_role(env, admin, Role::Pauser);
}
