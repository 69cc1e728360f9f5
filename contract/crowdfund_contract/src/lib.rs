//! Campaign crowdfunding escrow.
//!
//! Backers pledge the escrow asset toward a creator's goal before a ledger
//! deadline. Once the deadline passes, a campaign that met its goal pays out to
//! its creator (minus the platform fee) exactly once, and a campaign that fell
//! short refunds each backer exactly once.

#![no_std]

mod admin;
mod engine;
mod error;
mod escrow;
mod events;
mod query;
mod storage;
mod storage_types;
mod utils;


pub use error::{Error, Rejection};
pub use storage_types::{
    Campaign, CampaignId, CampaignState, FeeLedger, Pledge, MAX_DURATION, MAX_FEE_PERCENTAGE,
    MIN_DURATION, MIN_GOAL,
};

use soroban_sdk::{contract, contractimpl, Address, Env, String};

use error::reject;
use storage::extend_instance;

#[contract]
pub struct CrowdfundContract;

fn settle<T>(e: &Env, outcome: Result<T, Rejection>) -> Result<T, Error> {
    outcome.map_err(|rejection| reject(e, rejection))
}

#[contractimpl]
impl CrowdfundContract {
    /// Set the platform owner and the asset held in escrow. Callable once.
    pub fn initialize(e: Env, owner: Address, token: Address) -> Result<(), Error> {
        owner.require_auth();
        settle(&e, admin::initialize(&e, &owner, &token))?;
        extend_instance(&e);
        Ok(())
    }

    /// Open a campaign for `duration` ledgers. Returns its id.
    pub fn create_campaign(
        e: Env,
        creator: Address,
        title: String,
        description: String,
        goal: i128,
        duration: u32,
        metadata_uri: String,
    ) -> Result<CampaignId, Error> {
        creator.require_auth();
        let fees = settle(&e, storage::load_fee_ledger(&e))?;
        let campaign_id = settle(
            &e,
            engine::create_campaign(
                &e,
                &fees,
                &creator,
                title,
                description,
                goal,
                duration,
                metadata_uri,
            ),
        )?;
        extend_instance(&e);
        Ok(campaign_id)
    }

    /// Escrow `amount` from `backer` toward an open campaign.
    pub fn pledge(e: Env, campaign_id: CampaignId, backer: Address, amount: i128) -> Result<bool, Error> {
        backer.require_auth();
        let asset = settle(&e, storage::load_token(&e))?;
        settle(&e, engine::pledge(&e, &asset, campaign_id, &backer, amount))?;
        extend_instance(&e);
        Ok(true)
    }

    /// Creator-only. Returns the payout after the platform fee.
    pub fn withdraw_funds(e: Env, campaign_id: CampaignId, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let asset = settle(&e, storage::load_token(&e))?;
        let mut fees = settle(&e, storage::load_fee_ledger(&e))?;
        let payout = settle(
            &e,
            engine::withdraw_funds(&e, &mut fees, &asset, campaign_id, &caller),
        )?;
        storage::save_fee_ledger(&e, &fees);
        extend_instance(&e);
        Ok(payout)
    }

    /// Backer-only. Returns the full pledge of a campaign that closed below goal.
    pub fn refund(e: Env, campaign_id: CampaignId, backer: Address) -> Result<i128, Error> {
        backer.require_auth();
        let asset = settle(&e, storage::load_token(&e))?;
        let amount = settle(&e, engine::refund(&e, &asset, campaign_id, &backer))?;
        extend_instance(&e);
        Ok(amount)
    }

    /// Creator-only. Allowed while nobody has pledged.
    pub fn cancel_campaign(e: Env, campaign_id: CampaignId, caller: Address) -> Result<bool, Error> {
        caller.require_auth();
        settle(&e, engine::cancel_campaign(&e, campaign_id, &caller))?;
        extend_instance(&e);
        Ok(true)
    }

    /// Admin functions
    pub fn set_platform_fee(e: Env, caller: Address, percentage: u32) -> Result<bool, Error> {
        caller.require_auth();
        let mut fees = settle(&e, storage::load_fee_ledger(&e))?;
        settle(&e, admin::set_platform_fee(&e, &mut fees, &caller, percentage))?;
        storage::save_fee_ledger(&e, &fees);
        Ok(true)
    }

    pub fn pause_contract(e: Env, caller: Address) -> Result<bool, Error> {
        Self::set_paused(&e, caller, true)
    }

    pub fn unpause_contract(e: Env, caller: Address) -> Result<bool, Error> {
        Self::set_paused(&e, caller, false)
    }

    pub fn withdraw_platform_fees(e: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let asset = settle(&e, storage::load_token(&e))?;
        let mut fees = settle(&e, storage::load_fee_ledger(&e))?;
        let amount = settle(
            &e,
            admin::withdraw_platform_fees(&e, &mut fees, &asset, &caller),
        )?;
        storage::save_fee_ledger(&e, &fees);
        Ok(amount)
    }

    /// View functions
    pub fn get_campaign(e: Env, campaign_id: CampaignId) -> Option<Campaign> {
        query::campaign(&e, campaign_id)
    }

    pub fn get_pledge(e: Env, campaign_id: CampaignId, backer: Address) -> Option<Pledge> {
        query::pledge(&e, campaign_id, &backer)
    }

    pub fn get_backer_count(e: Env, campaign_id: CampaignId) -> u32 {
        storage::backer_count(&e, campaign_id)
    }

    pub fn get_campaign_progress(e: Env, campaign_id: CampaignId) -> Result<i128, Error> {
        settle(&e, query::campaign_progress(&e, campaign_id))
    }

    pub fn is_campaign_successful(e: Env, campaign_id: CampaignId) -> Result<bool, Error> {
        settle(&e, query::is_successful(&e, campaign_id))
    }

    pub fn is_campaign_failed(e: Env, campaign_id: CampaignId) -> Result<bool, Error> {
        settle(&e, query::is_failed(&e, campaign_id))
    }

    pub fn get_blocks_remaining(e: Env, campaign_id: CampaignId) -> Result<u32, Error> {
        settle(&e, query::blocks_remaining(&e, campaign_id))
    }

    /// Whole days left in the pledge window, at ~10 minutes per ledger.
    pub fn get_days_remaining(e: Env, campaign_id: CampaignId) -> Result<u32, Error> {
        settle(&e, query::days_remaining(&e, campaign_id))
    }

    pub fn get_user_campaign_count(e: Env, user: Address) -> u32 {
        storage::user_campaign_count(&e, &user)
    }

    pub fn get_campaign_nonce(e: Env) -> CampaignId {
        storage::campaign_nonce(&e)
    }

    pub fn get_platform_fee_percentage(e: Env) -> Result<u32, Error> {
        Ok(settle(&e, storage::load_fee_ledger(&e))?.fee_percentage)
    }

    pub fn is_contract_paused(e: Env) -> Result<bool, Error> {
        Ok(settle(&e, storage::load_fee_ledger(&e))?.paused)
    }

    pub fn get_total_platform_fees(e: Env) -> Result<i128, Error> {
        Ok(settle(&e, storage::load_fee_ledger(&e))?.accrued_fees)
    }

    pub fn get_owner(e: Env) -> Result<Address, Error> {
        Ok(settle(&e, storage::load_fee_ledger(&e))?.owner)
    }

    pub fn get_token(e: Env) -> Result<Address, Error> {
        settle(&e, storage::load_token(&e))
    }
}

impl CrowdfundContract {
    fn set_paused(e: &Env, caller: Address, paused: bool) -> Result<bool, Error> {
        caller.require_auth();
        let mut fees = settle(e, storage::load_fee_ledger(e))?;
        settle(e, admin::set_paused(e, &mut fees, &caller, paused))?;
        storage::save_fee_ledger(e, &fees);
        Ok(true)
    }
}
