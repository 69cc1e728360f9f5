use soroban_sdk::{Address, Env};

use crate::error::Rejection;
use crate::storage_types::{
    Campaign, CampaignId, DataKey, FeeLedger, PersistentKey, Pledge, TTL_INSTANCE, TTL_PERSISTENT,
};

pub fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::FeeLedger)
}

pub fn load_fee_ledger(e: &Env) -> Result<FeeLedger, Rejection> {
    e.storage()
        .instance()
        .get(&DataKey::FeeLedger)
        .ok_or(Rejection::NotInitialized)
}

pub fn save_fee_ledger(e: &Env, ledger: &FeeLedger) {
    e.storage().instance().set(&DataKey::FeeLedger, ledger);
    extend_instance(e);
}

pub fn load_token(e: &Env) -> Result<Address, Rejection> {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Rejection::NotInitialized)
}

pub fn save_token(e: &Env, token: &Address) {
    e.storage().instance().set(&DataKey::Token, token);
}

pub fn campaign_nonce(e: &Env) -> CampaignId {
    e.storage()
        .instance()
        .get(&DataKey::CampaignNonce)
        .unwrap_or(0)
}

/// Hand out the next campaign id and advance the nonce.
pub fn take_campaign_id(e: &Env) -> Result<CampaignId, Rejection> {
    let id = campaign_nonce(e);
    let next = id.checked_add(1).ok_or(Rejection::Overflow)?;
    e.storage().instance().set(&DataKey::CampaignNonce, &next);
    Ok(id)
}

pub fn load_campaign(e: &Env, campaign_id: CampaignId) -> Result<Campaign, Rejection> {
    find_campaign(e, campaign_id).ok_or(Rejection::CampaignNotFound)
}

pub fn find_campaign(e: &Env, campaign_id: CampaignId) -> Option<Campaign> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
}

pub fn save_campaign(e: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    e.storage().persistent().set(&key, campaign);
    extend_persistent(e, &key);
}

pub fn find_pledge(e: &Env, campaign_id: CampaignId, backer: &Address) -> Option<Pledge> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Pledge(campaign_id, backer.clone()))
}

pub fn save_pledge(e: &Env, campaign_id: CampaignId, backer: &Address, pledge: &Pledge) {
    let key = PersistentKey::Pledge(campaign_id, backer.clone());
    e.storage().persistent().set(&key, pledge);
    extend_persistent(e, &key);
}

pub fn backer_count(e: &Env, campaign_id: CampaignId) -> u32 {
    e.storage()
        .persistent()
        .get(&PersistentKey::BackerCount(campaign_id))
        .unwrap_or(0)
}

pub fn set_backer_count(e: &Env, campaign_id: CampaignId, count: u32) {
    let key = PersistentKey::BackerCount(campaign_id);
    e.storage().persistent().set(&key, &count);
    extend_persistent(e, &key);
}

pub fn user_campaign_count(e: &Env, user: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&PersistentKey::UserCampaignCount(user.clone()))
        .unwrap_or(0)
}

pub fn set_user_campaign_count(e: &Env, user: &Address, count: u32) {
    let key = PersistentKey::UserCampaignCount(user.clone());
    e.storage().persistent().set(&key, &count);
    extend_persistent(e, &key);
}
