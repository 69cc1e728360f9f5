use soroban_sdk::{Address, Env};

use crate::error::Rejection;
use crate::escrow;
use crate::events::{self, FeeUpdatedEvent, PlatformFeesWithdrawnEvent};
use crate::storage;
use crate::storage_types::{FeeLedger, DEFAULT_FEE_PERCENTAGE, MAX_FEE_PERCENTAGE};

/// Write the initial fee ledger, escrow asset and campaign nonce.
pub fn initialize(e: &Env, owner: &Address, asset: &Address) -> Result<(), Rejection> {
    if storage::is_initialized(e) {
        return Err(Rejection::AlreadyInitialized);
    }

    storage::save_token(e, asset);
    storage::save_fee_ledger(
        e,
        &FeeLedger {
            fee_percentage: DEFAULT_FEE_PERCENTAGE,
            paused: false,
            accrued_fees: 0,
            owner: owner.clone(),
        },
    );
    Ok(())
}

fn ensure_owner(fees: &FeeLedger, caller: &Address) -> Result<(), Rejection> {
    if *caller != fees.owner {
        return Err(Rejection::NotOwner);
    }
    Ok(())
}

pub fn set_platform_fee(
    e: &Env,
    fees: &mut FeeLedger,
    caller: &Address,
    percentage: u32,
) -> Result<(), Rejection> {
    ensure_owner(fees, caller)?;
    if percentage > MAX_FEE_PERCENTAGE {
        return Err(Rejection::FeeAboveMaximum);
    }

    let old_percentage = fees.fee_percentage;
    fees.fee_percentage = percentage;

    events::emit_fee_updated(
        e,
        FeeUpdatedEvent {
            old_percentage,
            new_percentage: percentage,
        },
    );
    Ok(())
}

/// Pausing only blocks campaign creation; existing campaigns settle as usual.
pub fn set_paused(e: &Env, fees: &mut FeeLedger, caller: &Address, paused: bool) -> Result<(), Rejection> {
    ensure_owner(fees, caller)?;
    fees.paused = paused;
    events::emit_pause_changed(e, caller.clone(), paused);
    Ok(())
}

/// Sweep every accrued fee to the owner. Returns the amount swept.
pub fn withdraw_platform_fees(
    e: &Env,
    fees: &mut FeeLedger,
    asset: &Address,
    caller: &Address,
) -> Result<i128, Rejection> {
    ensure_owner(fees, caller)?;

    let amount = fees.accrued_fees;
    escrow::release(e, asset, &fees.owner, amount)?;
    fees.accrued_fees = 0;

    events::emit_platform_fees_withdrawn(
        e,
        PlatformFeesWithdrawnEvent {
            owner: fees.owner.clone(),
            amount,
        },
    );
    Ok(amount)
}
