//! Contract-wide reward index.
//!
//! The index is the time integral of the reward rate since genesis:
//!
//! ```text
//! cumulative(t) = cumulative(updated_at) + rate_x1m × (t − updated_at)
//! ```
//!
//! It is kept unscaled, in units of `rate_x1m × seconds`, so advancing it is
//! exact integer arithmetic. Converting an index delta into tokens happens
//! once, at settlement, by dividing through [`REWARD_DENOMINATOR`].
//!
//! A rate change folds the elapsed interval into `cumulative` and restarts the
//! projection from `now` at the new rate. No account is visited.

use soroban_sdk::contracttype;

use crate::ContractError;

/// `rate_x1m` of `1_000_000` means 100 % of the principal per reference year.
pub const RATE_SCALE: i128 = 1_000_000;

/// Length of the reference period the rate is quoted over (365 days).
pub const SECONDS_PER_YEAR: i128 = 31_536_000;

/// Divisor turning `amount × Δindex` into reward tokens.
pub const REWARD_DENOMINATOR: i128 = RATE_SCALE * SECONDS_PER_YEAR;

/// Singleton accumulator stored in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateIndex {
    /// Current reward rate, scaled by [`RATE_SCALE`].
    pub rate_x1m: i128,
    /// Ledger timestamp of the last committed write.
    pub updated_at: u64,
    /// Index value as of `updated_at`.
    pub cumulative: i128,
}

impl RateIndex {
    pub fn new(rate_x1m: i128, now: u64) -> Self {
        Self {
            rate_x1m,
            updated_at: now,
            cumulative: 0,
        }
    }

    /// Index value at `now`, computed without touching stored state.
    ///
    /// Ledger time never runs backwards, so a `now` earlier than
    /// `updated_at` is treated as zero elapsed time.
    pub fn projected(&self, now: u64) -> Result<i128, ContractError> {
        let elapsed = i128::from(now.saturating_sub(self.updated_at));
        let delta = self
            .rate_x1m
            .checked_mul(elapsed)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.cumulative
            .checked_add(delta)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Folds the interval since the last write into `cumulative`, then
    /// switches to `new_rate`. Returns the previous rate.
    ///
    /// On error `self` is left untouched.
    pub fn commit_rate(&mut self, new_rate: i128, now: u64) -> Result<i128, ContractError> {
        let cumulative = self.projected(now)?;
        let old_rate = self.rate_x1m;

        self.cumulative = cumulative;
        self.updated_at = self.updated_at.max(now);
        self.rate_x1m = new_rate;

        Ok(old_rate)
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
