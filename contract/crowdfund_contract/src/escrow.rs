use soroban_sdk::{token, Address, Env};

use crate::error::Rejection;

/// Move `amount` of the escrowed asset from `backer` into the contract.
pub fn collect(e: &Env, asset: &Address, backer: &Address, amount: i128) -> Result<(), Rejection> {
    move_funds(e, asset, backer, &e.current_contract_address(), amount)
}

/// Release `amount` held by the contract to `recipient`.
pub fn release(e: &Env, asset: &Address, recipient: &Address, amount: i128) -> Result<(), Rejection> {
    if amount <= 0 {
        return Ok(());
    }
    move_funds(e, asset, &e.current_contract_address(), recipient, amount)
}

fn move_funds(
    e: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Rejection> {
    let token_client = token::Client::new(e, asset);
    match token_client.try_transfer(from, to, &amount) {
        Ok(Ok(_)) => Ok(()),
        _ => Err(Rejection::TransferRejected),
    }
}
