use common::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use soroban_sdk::{contracttype, Address, Env};

use crate::{index::RateIndex, ledger::StakeRecord, ContractError};

// ── Keys ─────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Index,
    TotalStaked,
    Record(Address),
}

/// Parameters fixed at initialisation (the holding period is also
/// adjustable by a manager afterwards).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub staking_token: Address,
    pub rewards_token: Address,
    pub min_staking_period: u64,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// ── Instance storage ─────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<LedgerConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn read_index(env: &Env) -> Result<RateIndex, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Index)
        .ok_or(ContractError::NotInitialized)
}

pub fn write_index(env: &Env, index: &RateIndex) {
    env.storage().instance().set(&DataKey::Index, index);
}

pub fn read_total_staked(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalStaked)
        .unwrap_or(0)
}

pub fn write_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalStaked, &total);
}

// ── Persistent storage (per account) ─────────────────────────────────────────

/// Returns the account's record, or an empty one if it has never staked.
pub fn read_record(env: &Env, account: &Address) -> StakeRecord {
    let key = DataKey::Record(account.clone());
    let record: Option<StakeRecord> = env.storage().persistent().get(&key);
    match record {
        Some(record) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            record
        }
        None => StakeRecord::default(),
    }
}

pub fn write_record(env: &Env, account: &Address, record: &StakeRecord) {
    let key = DataKey::Record(account.clone());
    env.storage().persistent().set(&key, record);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
