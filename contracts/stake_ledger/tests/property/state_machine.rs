#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the stake ledger.
//!
//! Random operation sequences are replayed against the contract and a
//! minimal model of each account's principal.
//!
//! Invariants checked after every operation:
//! - `total_staked` equals the sum of every account's principal and the
//!   ledger's staking-token balance
//! - An account's quoted reward never drops unless that account was paid,
//!   and a payment equals the quote taken just before it
//! - While paused, account mutators fail with `Paused` and change nothing

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use stake_ledger::ContractError;

use crate::support::{deploy, Ledger, RATE_SCALE};

const ACCOUNTS: usize = 3;

#[derive(Debug, Clone, proptest_derive::Arbitrary)]
enum Op {
    Stake { who: u8, amount: u16 },
    Unstake { who: u8, amount: u16 },
    Claim { who: u8 },
    ClaimFor { who: u8 },
    Advance { secs: u32 },
    SetRate { percent: u8 },
    TogglePause,
}

struct Model {
    principal: [i128; ACCOUNTS],
    paused: bool,
}

fn quotes(ledger: &Ledger, accounts: &[Address]) -> Vec<i128> {
    accounts
        .iter()
        .map(|a| ledger.client.accumulated_reward_amount(a))
        .collect()
}

fn expect_paused<T, E: core::fmt::Debug>(result: Result<T, Result<ContractError, E>>) {
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => panic!("Expected Paused error"),
    }
}

/// Applies `op` and returns the account that was paid and the amount, if any.
fn apply(ledger: &Ledger, accounts: &[Address], model: &mut Model, op: &Op) -> Option<(usize, i128)> {
    match *op {
        Op::Stake { who, amount } => {
            let i = usize::from(who) % ACCOUNTS;
            let amount = i128::from(amount) + 1;
            if model.paused {
                expect_paused(ledger.client.try_stake(&accounts[i], &amount));
            } else {
                ledger.stake(&accounts[i], amount);
                model.principal[i] += amount;
            }
            None
        }
        Op::Unstake { who, amount } => {
            let i = usize::from(who) % ACCOUNTS;
            let amount = (i128::from(amount) + 1).min(model.principal[i]);
            if amount == 0 {
                return None;
            }
            if model.paused {
                expect_paused(ledger.client.try_unstake(&accounts[i], &amount));
            } else {
                ledger.client.unstake(&accounts[i], &amount);
                model.principal[i] -= amount;
            }
            None
        }
        Op::Claim { who } | Op::ClaimFor { who } => {
            let i = usize::from(who) % ACCOUNTS;
            if model.paused {
                expect_paused(ledger.client.try_claim_reward(&accounts[i]));
                expect_paused(ledger.client.try_claim_reward_for(&accounts[i]));
                return None;
            }
            let paid = match op {
                Op::Claim { .. } => ledger.client.claim_reward(&accounts[i]),
                _ => ledger.client.claim_reward_for(&accounts[i]),
            };
            Some((i, paid))
        }
        Op::Advance { secs } => {
            ledger.set_time(ledger.now() + u64::from(secs));
            None
        }
        Op::SetRate { percent } => {
            let rate = i128::from(percent) * RATE_SCALE / 100;
            ledger.client.set_rewards_rate_x1m(&ledger.admin, &rate);
            None
        }
        Op::TogglePause => {
            if model.paused {
                ledger.client.unpause(&ledger.admin);
            } else {
                ledger.client.pause(&ledger.admin);
            }
            model.paused = !model.paused;
            None
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_random_operations_keep_ledger_consistent(
        ops in proptest::collection::vec(any::<Op>(), 1..32),
    ) {
        let ledger = deploy(RATE_SCALE, 0);
        let accounts: Vec<Address> = (0..ACCOUNTS).map(|_| Address::generate(&ledger.env)).collect();
        let mut model = Model { principal: [0; ACCOUNTS], paused: false };

        for op in &ops {
            let before = quotes(&ledger, &accounts);
            let paid_before: Vec<i128> = accounts.iter().map(|a| ledger.rewards_balance(a)).collect();

            let paid = apply(&ledger, &accounts, &mut model, op);
            let after = quotes(&ledger, &accounts);

            for i in 0..ACCOUNTS {
                prop_assert_eq!(ledger.client.stake_of(&accounts[i]).amount, model.principal[i]);

                match paid {
                    Some((who, amount)) if who == i => {
                        prop_assert_eq!(amount, before[i]);
                        prop_assert_eq!(after[i], 0);
                        prop_assert_eq!(ledger.rewards_balance(&accounts[i]) - paid_before[i], amount);
                    }
                    _ => {
                        prop_assert!(after[i] >= before[i], "{:?} lowered reward of account {}", op, i);
                        prop_assert_eq!(ledger.rewards_balance(&accounts[i]), paid_before[i]);
                    }
                }
            }

            let sum: i128 = model.principal.iter().sum();
            prop_assert_eq!(ledger.client.total_staked(), sum);
            prop_assert_eq!(ledger.staking_balance(&ledger.client.address), sum);
            prop_assert_eq!(ledger.client.is_paused(), model.paused);
        }
    }
}
