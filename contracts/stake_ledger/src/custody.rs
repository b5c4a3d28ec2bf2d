//! Token movements in and out of the ledger's custody.
//!
//! Calls go through the `try_` client so a failing token contract surfaces
//! as `TransferFailed` instead of aborting with the token's own error.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Pulls `amount` from `from` into the ledger using the allowance `from`
/// granted to the ledger.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let ledger = env.current_contract_address();
    match token::TokenClient::new(env, token).try_transfer_from(&ledger, from, &ledger, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pays `amount` from the ledger's own balance to `to`.
pub fn pay(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    let ledger = env.current_contract_address();
    match token::TokenClient::new(env, token).try_transfer(&ledger, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
