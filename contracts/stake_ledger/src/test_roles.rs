extern crate std;

use common::Role;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, StakeLedgerContract, StakeLedgerContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakeLedgerContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let staking_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let rewards_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakeLedgerContract, ());
    let client = StakeLedgerContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &staking_token.address(),
        &rewards_token.address(),
        &1_000_000,
        &2_592_000,
    );

    (env, client, admin)
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_admin_holds_every_role_after_init() {
    let (_env, client, admin) = setup();
    assert!(client.has_role(&admin, &Role::Admin));
    assert!(client.has_role(&admin, &Role::Manager));
    assert!(client.has_role(&admin, &Role::Pauser));
}

#[test]
fn test_stranger_holds_no_role() {
    let (env, client, _admin) = setup();
    let stranger = Address::generate(&env);
    assert!(!client.has_role(&stranger, &Role::Admin));
    assert!(!client.has_role(&stranger, &Role::Manager));
    assert!(!client.has_role(&stranger, &Role::Pauser));
}

// ── Grant / revoke ───────────────────────────────────────────────────────────

#[test]
fn test_granted_manager_can_set_rate() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);

    client.grant_role(&admin, &manager, &Role::Manager);
    assert!(client.has_role(&manager, &Role::Manager));

    client.set_rewards_rate_x1m(&manager, &2_000_000);
    assert_eq!(client.return_on_staking_x1m(), 2_000_000);
}

#[test]
fn test_revoked_manager_loses_access() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);

    client.grant_role(&admin, &manager, &Role::Manager);
    client.revoke_role(&admin, &manager, &Role::Manager);
    assert!(!client.has_role(&manager, &Role::Manager));

    match client.try_set_rewards_rate_x1m(&manager, &2_000_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_grant_is_idempotent() {
    let (env, client, admin) = setup();
    let pauser = Address::generate(&env);

    client.grant_role(&admin, &pauser, &Role::Pauser);
    client.grant_role(&admin, &pauser, &Role::Pauser);
    assert!(client.has_role(&pauser, &Role::Pauser));

    client.revoke_role(&admin, &pauser, &Role::Pauser);
    assert!(!client.has_role(&pauser, &Role::Pauser));
}

// ── Roles are independent ────────────────────────────────────────────────────

#[test]
fn test_pauser_cannot_set_rate() {
    let (env, client, admin) = setup();
    let pauser = Address::generate(&env);
    client.grant_role(&admin, &pauser, &Role::Pauser);

    client.pause(&pauser);
    client.unpause(&pauser);

    match client.try_set_rewards_rate_x1m(&pauser, &2_000_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_manager_cannot_pause() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    client.grant_role(&admin, &manager, &Role::Manager);

    match client.try_pause(&manager) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_non_admin_cannot_grant_or_revoke() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    let target = Address::generate(&env);
    client.grant_role(&admin, &manager, &Role::Manager);

    match client.try_grant_role(&manager, &target, &Role::Manager) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_revoke_role(&manager, &admin, &Role::Pauser) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert!(!client.has_role(&target, &Role::Manager));
    assert!(client.has_role(&admin, &Role::Pauser));
}

// ── Renounce ─────────────────────────────────────────────────────────────────

#[test]
fn test_renounce_drops_only_that_role() {
    let (_env, client, admin) = setup();

    client.renounce_role(&admin, &Role::Pauser);
    assert!(!client.has_role(&admin, &Role::Pauser));
    assert!(client.has_role(&admin, &Role::Manager));

    match client.try_pause(&admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_admin_can_hand_over_admin_role() {
    let (env, client, admin) = setup();
    let successor = Address::generate(&env);

    client.grant_role(&admin, &successor, &Role::Admin);
    client.renounce_role(&admin, &Role::Admin);

    match client.try_grant_role(&admin, &admin, &Role::Admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.grant_role(&successor, &admin, &Role::Pauser);
}
