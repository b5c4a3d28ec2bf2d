#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};
use stake_ledger::{StakeLedgerContract, StakeLedgerContractClient};

const USERS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u64 },
    Unstake { who: u8, amount: u64 },
    Claim { who: u8 },
    ClaimFor { who: u8 },
    Advance { secs: u32 },
    SetRate { rate_x1m: u32 },
    SetMinPeriod { secs: u32 },
    Pause,
    Unpause,
}

fuzz_target!(|input: (u32, u32, Vec<FuzzAction>)| {
    let (rate_x1m, min_period, actions) = input;

    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let rewards_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let staking = TokenClient::new(&env, &staking_token);

    let contract_id = env.register(StakeLedgerContract, ());
    let client = StakeLedgerContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &staking_token,
        &rewards_token,
        &i128::from(rate_x1m),
        &u64::from(min_period),
    );
    StellarAssetClient::new(&env, &rewards_token).mint(&contract_id, &(i128::MAX / 4));

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    let user = |who: u8| &users[usize::from(who) % USERS];

    // Calls may fail with contract errors; they must never panic the host or
    // leave the ledger out of balance.
    for action in actions {
        match action {
            FuzzAction::Stake { who, amount } => {
                let amount = i128::from(amount);
                if amount > 0 {
                    StellarAssetClient::new(&env, &staking_token).mint(user(who), &amount);
                    let expiration = env.ledger().sequence() + 1_000;
                    staking.approve(user(who), &contract_id, &amount, &expiration);
                }
                let _ = client.try_stake(user(who), &amount);
            }
            FuzzAction::Unstake { who, amount } => {
                let _ = client.try_unstake(user(who), &i128::from(amount));
            }
            FuzzAction::Claim { who } => {
                let _ = client.try_claim_reward(user(who));
            }
            FuzzAction::ClaimFor { who } => {
                let _ = client.try_claim_reward_for(user(who));
            }
            FuzzAction::Advance { secs } => {
                env.ledger().set_timestamp(env.ledger().timestamp() + u64::from(secs));
            }
            FuzzAction::SetRate { rate_x1m } => {
                let _ = client.try_set_rewards_rate_x1m(&admin, &i128::from(rate_x1m));
            }
            FuzzAction::SetMinPeriod { secs } => {
                let _ = client.try_set_min_staking_period(&admin, &u64::from(secs));
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&admin);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&admin);
            }
        }

        let principal: i128 = users.iter().map(|u| client.stake_of(u).amount).sum();
        assert_eq!(client.total_staked(), principal);
        assert_eq!(staking.balance(&contract_id), principal);
    }
});
