//! Contract-wide pause switch.
//!
//! The flag lives in instance storage, so reading it costs no extra ledger
//! entry. An absent flag reads as "not paused".

use soroban_sdk::{symbol_short, Env, Symbol};

const PAUSED: Symbol = symbol_short!("PAUSED");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Sets the pause flag.
///
/// Returns `false` without writing when the flag already has the requested
/// value, so callers can reject redundant pause/unpause requests.
pub fn set_paused(env: &Env, paused: bool) -> bool {
    if is_paused(env) == paused {
        return false;
    }
    env.storage().instance().set(&PAUSED, &paused);
    true
}
