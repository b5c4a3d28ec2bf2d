#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub staking_token: Address,
    pub rewards_token: Address,
    pub rate_x1m: i128,
    pub min_staking_period: u64,
    pub timestamp: u64,
}

/// Fired when an account deposits principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an account withdraws principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired on every claim, including zero-amount claims.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a manager changes the reward rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateChangedEvent {
    pub old_rate_x1m: i128,
    pub new_rate_x1m: i128,
    pub timestamp: u64,
}

/// Fired when a manager changes the minimum staking period.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinStakingPeriodSetEvent {
    pub old_period: u64,
    pub new_period: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEvent {
    pub caller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub account: Address,
    pub role: Role,
    pub sender: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    staking_token: Address,
    rewards_token: Address,
    rate_x1m: i128,
    min_staking_period: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            staking_token,
            rewards_token,
            rate_x1m,
            min_staking_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), account.clone()),
        RewardClaimedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rate_changed(env: &Env, old_rate_x1m: i128, new_rate_x1m: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RateChangedEvent {
            old_rate_x1m,
            new_rate_x1m,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_min_staking_period_set(env: &Env, old_period: u64, new_period: u64) {
    env.events().publish(
        (symbol_short!("MIN_PER"),),
        MinStakingPeriodSetEvent {
            old_period,
            new_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"), caller.clone()),
        PauseToggledEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"), caller.clone()),
        PauseToggledEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, account: Address, role: Role, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRT"), account.clone()),
        RoleChangedEvent {
            account,
            role,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, account: Address, role: Role, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), account.clone()),
        RoleChangedEvent {
            account,
            role,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}
