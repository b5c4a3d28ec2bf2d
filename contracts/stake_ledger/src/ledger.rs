use soroban_sdk::{contracttype, Env, I256};

use crate::{index::REWARD_DENOMINATOR, ContractError};

/// One account's position. Created lazily (all zero) on first access and
/// never deleted, so stake/unstake cycles reuse the same entry.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeRecord {
    /// Staked principal.
    pub amount: i128,
    /// Index value at the last settlement.
    pub checkpoint_index: i128,
    /// Settled reward in whole token units, not yet claimed.
    pub settled_reward: i128,
    /// Sub-unit remainder of settled reward, in `amount × index` units.
    /// Always `< REWARD_DENOMINATOR`; carried across settlements and claims
    /// so truncation never depends on how often the account is touched.
    pub reward_dust: i128,
    /// Timestamp of the first ever stake. Top-ups do not move it.
    pub first_staked_at: Option<u64>,
}

impl StakeRecord {
    /// Reward accrued since the checkpoint plus carried dust, split into
    /// whole tokens and the new sub-unit remainder.
    ///
    /// `amount × Δindex` is formed in 256 bits; only the whole-token quotient
    /// has to fit back into `i128`.
    fn pending(&self, env: &Env, index: i128) -> Result<(i128, i128), ContractError> {
        let delta = index
            .checked_sub(self.checkpoint_index)
            .filter(|d| *d >= 0)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let denominator = I256::from_i128(env, REWARD_DENOMINATOR);
        let scaled = I256::from_i128(env, self.amount)
            .mul(&I256::from_i128(env, delta))
            .add(&I256::from_i128(env, self.reward_dust));

        let whole = scaled
            .div(&denominator)
            .to_i128()
            .ok_or(ContractError::ArithmeticOverflow)?;
        let dust = scaled
            .rem_euclid(&denominator)
            .to_i128()
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok((whole, dust))
    }

    /// Folds everything accrued up to `index` into `settled_reward` and moves
    /// the checkpoint to `index`. Must run before `amount` changes.
    ///
    /// Returns the whole tokens newly settled. A second call with the same
    /// `index` settles nothing.
    pub fn settle(&mut self, env: &Env, index: i128) -> Result<i128, ContractError> {
        let (whole, dust) = self.pending(env, index)?;
        let settled_reward = self
            .settled_reward
            .checked_add(whole)
            .ok_or(ContractError::ArithmeticOverflow)?;

        self.settled_reward = settled_reward;
        self.reward_dust = dust;
        self.checkpoint_index = index;

        Ok(whole)
    }

    /// Reward a claim at `index` would pay, without settling.
    pub fn accrued(&self, env: &Env, index: i128) -> Result<i128, ContractError> {
        let (whole, _) = self.pending(env, index)?;
        self.settled_reward
            .checked_add(whole)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Adds principal. The caller settles first.
    pub fn deposit(&mut self, amount: i128, now: u64) -> Result<(), ContractError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.first_staked_at.get_or_insert(now);
        Ok(())
    }

    /// Removes principal. The caller settles first.
    pub fn withdraw(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount > self.amount {
            return Err(ContractError::InsufficientBalance);
        }
        self.amount -= amount;
        Ok(())
    }

    /// Zeroes and returns the settled reward. Dust stays behind.
    pub fn take_reward(&mut self) -> i128 {
        core::mem::take(&mut self.settled_reward)
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
