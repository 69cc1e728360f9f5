//! Read-only projections. Nothing here writes storage or emits events.

use soroban_sdk::{Address, Env};

use crate::error::Rejection;
use crate::storage;
use crate::storage_types::{Campaign, CampaignId, Pledge};
use crate::utils::{current_height, is_past, ledgers_to_days, progress_percentage};

pub fn campaign(e: &Env, campaign_id: CampaignId) -> Option<Campaign> {
    storage::find_campaign(e, campaign_id)
}

pub fn pledge(e: &Env, campaign_id: CampaignId, backer: &Address) -> Option<Pledge> {
    storage::find_pledge(e, campaign_id, backer)
}

pub fn campaign_progress(e: &Env, campaign_id: CampaignId) -> Result<i128, Rejection> {
    let campaign = storage::load_campaign(e, campaign_id)?;
    progress_percentage(campaign.total_pledged, campaign.goal)
}

/// Goal reached, regardless of deadline or cached state.
pub fn is_successful(e: &Env, campaign_id: CampaignId) -> Result<bool, Rejection> {
    let campaign = storage::load_campaign(e, campaign_id)?;
    Ok(campaign.total_pledged >= campaign.goal)
}

pub fn is_failed(e: &Env, campaign_id: CampaignId) -> Result<bool, Rejection> {
    let campaign = storage::load_campaign(e, campaign_id)?;
    Ok(is_past(e, campaign.deadline) && campaign.total_pledged < campaign.goal)
}

pub fn blocks_remaining(e: &Env, campaign_id: CampaignId) -> Result<u32, Rejection> {
    let campaign = storage::load_campaign(e, campaign_id)?;
    Ok(campaign.deadline.saturating_sub(current_height(e)))
}

pub fn days_remaining(e: &Env, campaign_id: CampaignId) -> Result<u32, Rejection> {
    blocks_remaining(e, campaign_id).map(ledgers_to_days)
}
