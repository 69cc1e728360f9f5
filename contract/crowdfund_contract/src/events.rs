use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::storage_types::CampaignId;

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
    pub goal: i128,
    pub deadline: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct PledgeMadeEvent {
    pub campaign_id: CampaignId,
    pub backer: Address,
    pub amount: i128,
    pub total_pledged: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FundsWithdrawnEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
    pub payout: i128,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundIssuedEvent {
    pub campaign_id: CampaignId,
    pub backer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignCancelledEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct FeeUpdatedEvent {
    pub old_percentage: u32,
    pub new_percentage: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct PlatformFeesWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_pledge_made(env: &Env, event: PledgeMadeEvent) {
    env.events().publish((Symbol::new(env, "pledge_made"),), event);
}

pub fn emit_funds_withdrawn(env: &Env, event: FundsWithdrawnEvent) {
    env.events()
        .publish((Symbol::new(env, "funds_withdrawn"),), event);
}

pub fn emit_refund_issued(env: &Env, event: RefundIssuedEvent) {
    env.events().publish((Symbol::new(env, "refund_issued"),), event);
}

pub fn emit_campaign_cancelled(env: &Env, event: CampaignCancelledEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_cancelled"),), event);
}

pub fn emit_fee_updated(env: &Env, event: FeeUpdatedEvent) {
    env.events().publish((Symbol::new(env, "fee_updated"),), event);
}

pub fn emit_pause_changed(env: &Env, owner: Address, paused: bool) {
    let topic = if paused { "contract_paused" } else { "contract_unpaused" };
    env.events().publish((Symbol::new(env, topic),), owner);
}

pub fn emit_platform_fees_withdrawn(env: &Env, event: PlatformFeesWithdrawnEvent) {
    env.events()
        .publish((Symbol::new(env, "fees_withdrawn"),), event);
}
