#![no_std]

pub mod custody;
pub mod events;
pub mod index;
pub mod ledger;
pub mod policy;
pub mod storage;

use common::{pausable, roles, Role};
use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Env};

use index::RateIndex;
use ledger::StakeRecord;
use storage::LedgerConfig;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    ZeroAmount = 5,
    InsufficientBalance = 6,
    MinimumStakingPeriodHasNotPassed = 7,
    Paused = 8,
    TransferFailed = 9,
    ArithmeticOverflow = 10,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of an account's position returned by `stake_of`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeInfo {
    pub amount: i128,
    pub checkpoint_index: i128,
    pub first_staked_at: Option<u64>,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakeLedgerContract;

#[contractimpl]
impl StakeLedgerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `staking_token` – token accounts stake; may equal `rewards_token`.
    /// * `rewards_token` – token rewards are paid in. The ledger must be
    ///   funded with it separately.
    /// * `rate_x1m` – yearly reward fraction scaled by 10^6.
    /// * `min_staking_period` – seconds after the first stake before any
    ///   principal can be withdrawn.
    ///
    /// `admin` receives the `Admin`, `Manager` and `Pauser` roles.
    pub fn initialize(
        env: Env,
        admin: Address,
        staking_token: Address,
        rewards_token: Address,
        rate_x1m: i128,
        min_staking_period: u64,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if rate_x1m < 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();

        storage::write_config(
            &env,
            &LedgerConfig {
                staking_token: staking_token.clone(),
                rewards_token: rewards_token.clone(),
                min_staking_period,
            },
        );
        storage::write_index(&env, &RateIndex::new(rate_x1m, now));
        roles::bootstrap(&env, &admin);
        storage::bump_instance(&env);

        events::publish_initialized(
            &env,
            admin,
            staking_token,
            rewards_token,
            rate_x1m,
            min_staking_period,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` staking tokens.
    ///
    /// The staker must have approved the ledger for at least `amount`.
    /// Pending reward is settled against the old principal first, so the new
    /// tokens earn nothing retroactively.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::read_config(&env)?;
        staker.require_auth();
        policy::require_not_paused(&env)?;
        policy::require_positive(amount)?;

        let now = env.ledger().timestamp();

        // 1. Settle at the current index, then grow the principal.
        let mut record = storage::read_record(&env, &staker);
        Self::settle(&env, &staker, &mut record, now)?;
        record.deposit(amount, now)?;

        let new_total = storage::read_total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        storage::write_record(&env, &staker, &record);
        storage::write_total_staked(&env, new_total);
        storage::bump_instance(&env);

        // 2. Pull tokens from the staker into custody.
        custody::pull(&env, &config.staking_token, &staker, amount)?;

        events::publish_staked(&env, staker, amount, new_total);

        Ok(())
    }

    /// Withdraw `amount` of principal.
    ///
    /// Allowed once `min_staking_period` has elapsed since the account's
    /// first stake. Settled reward is kept for a later claim.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::read_config(&env)?;
        staker.require_auth();
        policy::require_not_paused(&env)?;
        policy::require_positive(amount)?;

        let now = env.ledger().timestamp();

        let mut record = storage::read_record(&env, &staker);
        policy::require_holding_period_elapsed(&record, now, config.min_staking_period)?;
        if amount > record.amount {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Settle against the principal actually held, then shrink it.
        Self::settle(&env, &staker, &mut record, now)?;
        record.withdraw(amount)?;

        let new_total = storage::read_total_staked(&env)
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        storage::write_record(&env, &staker, &record);
        storage::write_total_staked(&env, new_total);
        storage::bump_instance(&env);

        // 2. Return principal.
        custody::pay(&env, &config.staking_token, &staker, amount)?;

        events::publish_unstaked(&env, staker, amount, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim all accrued reward for `staker`. Returns the amount paid.
    pub fn claim_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = storage::read_config(&env)?;
        staker.require_auth();
        Self::payout(&env, &config, &staker)
    }

    /// Pay `account`'s accrued reward to `account`.
    ///
    /// Anyone may trigger this; the reward always goes to `account`.
    pub fn claim_reward_for(env: Env, account: Address) -> Result<i128, ContractError> {
        let config = storage::read_config(&env)?;
        Self::payout(&env, &config, &account)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn stake_of(env: Env, account: Address) -> StakeInfo {
        let record = storage::read_record(&env, &account);
        StakeInfo {
            amount: record.amount,
            checkpoint_index: record.checkpoint_index,
            first_staked_at: record.first_staked_at,
        }
    }

    /// Reward `account` would receive from a claim right now.
    /// Computed from the projected index; nothing is written.
    pub fn accumulated_reward_amount(env: Env, account: Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let index = storage::read_index(&env)?.projected(now)?;
        storage::read_record(&env, &account).accrued(&env, index)
    }

    /// Current reward rate, scaled by 10^6 per year.
    pub fn return_on_staking_x1m(env: Env) -> Result<i128, ContractError> {
        Ok(storage::read_index(&env)?.rate_x1m)
    }

    pub fn min_staking_period_in_sec(env: Env) -> Result<u64, ContractError> {
        Ok(storage::read_config(&env)?.min_staking_period)
    }

    /// Index value projected to the current ledger timestamp.
    pub fn current_index(env: Env) -> Result<i128, ContractError> {
        storage::read_index(&env)?.projected(env.ledger().timestamp())
    }

    pub fn staking_token(env: Env) -> Result<Address, ContractError> {
        Ok(storage::read_config(&env)?.staking_token)
    }

    pub fn rewards_token(env: Env) -> Result<Address, ContractError> {
        Ok(storage::read_config(&env)?.rewards_token)
    }

    /// Sum of every account's principal.
    pub fn total_staked(env: Env) -> i128 {
        storage::read_total_staked(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        roles::has_role(&env, &account, role)
    }

    // ── Manager functions ────────────────────────────────────────────────────

    /// Change the reward rate.
    ///
    /// The index is advanced at the old rate up to now before the switch, so
    /// every account's next settlement spans both rates correctly. No
    /// account is visited. Allowed while paused.
    pub fn set_rewards_rate_x1m(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        let mut index = storage::read_index(&env)?;
        caller.require_auth();
        policy::require_role(&env, &caller, Role::Manager)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let old_rate = index.commit_rate(new_rate, now)?;
        storage::write_index(&env, &index);
        storage::bump_instance(&env);

        log!(&env, "rate committed", old_rate, new_rate, index.cumulative);
        events::publish_rate_changed(&env, old_rate, new_rate);

        Ok(())
    }

    /// Change the minimum holding period. Applies to every later unstake,
    /// including those of existing stakers.
    pub fn set_min_staking_period(
        env: Env,
        caller: Address,
        new_period: u64,
    ) -> Result<(), ContractError> {
        let mut config = storage::read_config(&env)?;
        caller.require_auth();
        policy::require_role(&env, &caller, Role::Manager)?;

        let old_period = config.min_staking_period;
        config.min_staking_period = new_period;
        storage::write_config(&env, &config);
        storage::bump_instance(&env);

        events::publish_min_staking_period_set(&env, old_period, new_period);

        Ok(())
    }

    // ── Pauser functions ─────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        storage::read_config(&env)?;
        caller.require_auth();
        policy::require_role(&env, &caller, Role::Pauser)?;

        if !pausable::set_paused(&env, true) {
            return Err(ContractError::InvalidInput);
        }
        storage::bump_instance(&env);

        events::publish_paused(&env, caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        storage::read_config(&env)?;
        caller.require_auth();
        policy::require_role(&env, &caller, Role::Pauser)?;

        if !pausable::set_paused(&env, false) {
            return Err(ContractError::InvalidInput);
        }
        storage::bump_instance(&env);

        events::publish_unpaused(&env, caller);
        Ok(())
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Grant `role` to `account`. Requires `Admin`.
    /// Granting a role that is already held is a no-op.
    pub fn grant_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        storage::read_config(&env)?;
        caller.require_auth();
        policy::require_role(&env, &caller, Role::Admin)?;

        if roles::grant_role(&env, &account, role) {
            events::publish_role_granted(&env, account, role, caller);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Requires `Admin`.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        storage::read_config(&env)?;
        caller.require_auth();
        policy::require_role(&env, &caller, Role::Admin)?;

        if roles::revoke_role(&env, &account, role) {
            events::publish_role_revoked(&env, account, role, caller);
        }
        Ok(())
    }

    /// Drop a role the caller holds.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        storage::read_config(&env)?;
        account.require_auth();

        if roles::revoke_role(&env, &account, role) {
            events::publish_role_revoked(&env, account.clone(), role, account);
        }
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Settles `record` at the index projected to `now`. Nothing is written;
    /// callers persist the record after applying their own mutation.
    fn settle(
        env: &Env,
        account: &Address,
        record: &mut StakeRecord,
        now: u64,
    ) -> Result<(), ContractError> {
        let index = storage::read_index(env)?.projected(now)?;
        let settled = record.settle(env, index)?;

        log!(env, "settled", account.clone(), settled, index);
        Ok(())
    }

    /// Settle `account`, zero its settled reward and pay it out.
    fn payout(env: &Env, config: &LedgerConfig, account: &Address) -> Result<i128, ContractError> {
        policy::require_not_paused(env)?;

        let now = env.ledger().timestamp();
        let mut record = storage::read_record(env, account);
        Self::settle(env, account, &mut record, now)?;
        let reward = record.take_reward();

        storage::write_record(env, account, &record);
        storage::bump_instance(env);

        if reward > 0 {
            custody::pay(env, &config.rewards_token, account, reward)?;
        }

        events::publish_reward_claimed(env, account.clone(), reward);

        Ok(reward)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_roles;
