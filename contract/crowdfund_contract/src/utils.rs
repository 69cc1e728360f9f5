use soroban_sdk::Env;

use crate::error::Rejection;
use crate::storage_types::LEDGERS_PER_DAY;

/// Current ledger height
pub fn current_height(e: &Env) -> u32 {
    e.ledger().sequence()
}

/// Check if the height has moved past `deadline`
pub fn is_past(e: &Env, deadline: u32) -> bool {
    current_height(e) > deadline
}

/// Convert ledgers to whole days
pub fn ledgers_to_days(ledgers: u32) -> u32 {
    ledgers / LEDGERS_PER_DAY
}

/// `floor(value * percentage / 100)`
pub fn calculate_percentage(value: i128, percentage: u32) -> Result<i128, Rejection> {
    value
        .checked_mul(percentage as i128)
        .map(|scaled| scaled / 100)
        .ok_or(Rejection::Overflow)
}

/// Split a campaign total into `(fee, payout)`.
pub fn split_fee(total: i128, fee_percentage: u32) -> Result<(i128, i128), Rejection> {
    let fee = calculate_percentage(total, fee_percentage)?;
    Ok((fee, total - fee))
}

/// `floor(total * 100 / goal)`, uncapped so over-funded campaigns read above 100.
pub fn progress_percentage(total: i128, goal: i128) -> Result<i128, Rejection> {
    if goal <= 0 {
        return Err(Rejection::GoalBelowMinimum);
    }
    total
        .checked_mul(100)
        .map(|scaled| scaled / goal)
        .ok_or(Rejection::Overflow)
}
