//! Checks evaluated before any state is touched.

use common::{pausable, roles, Role};
use soroban_sdk::{Address, Env};

use crate::{ledger::StakeRecord, ContractError};

/// Fails with `Paused` while the contract-wide switch is on.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if pausable::is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Fails with `Unauthorized` unless `caller` holds `role`.
/// The caller must have been authenticated via `require_auth()` already.
pub fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
    if !roles::has_role(env, caller, role) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Token amounts for stake/unstake must be strictly positive.
pub fn require_positive(amount: i128) -> Result<(), ContractError> {
    match amount {
        0 => Err(ContractError::ZeroAmount),
        a if a < 0 => Err(ContractError::InvalidInput),
        _ => Ok(()),
    }
}

/// Principal may leave only once `min_staking_period` seconds have passed
/// since the account's first stake. An account that never staked holds
/// nothing to lock; the balance check rejects it instead.
pub fn require_holding_period_elapsed(
    record: &StakeRecord,
    now: u64,
    min_staking_period: u64,
) -> Result<(), ContractError> {
    let Some(first_staked_at) = record.first_staked_at else {
        return Ok(());
    };
    let held = now.saturating_sub(first_staked_at);
    if held < min_staking_period {
        return Err(ContractError::MinimumStakingPeriodHasNotPassed);
    }
    Ok(())
}
