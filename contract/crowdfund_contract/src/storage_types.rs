use soroban_sdk::{contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    FeeLedger,
    Token,
    CampaignNonce,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Pledge(CampaignId, Address),
    BackerCount(CampaignId),
    UserCampaignCount(Address),
}

pub type CampaignId = u64;

/// Cached lifecycle label. Money-moving operations re-derive eligibility from
/// height and totals instead of trusting this field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CampaignState {
    Active,
    Successful,
    Failed,
    Cancelled,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub goal: i128,
    pub deadline: u32,                 // Last ledger sequence that accepts pledges
    pub total_pledged: i128,           // Not reduced by refunds
    pub state: CampaignState,
    pub metadata_uri: String,          // Opaque off-chain pointer
    pub withdrawn: bool,
    pub created_at: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Pledge {
    pub amount: i128,                  // Cumulative over every contribution
    pub refunded: bool,
    pub pledged_at: u32,               // Sequence of the latest contribution
}

/// Platform-wide settings and fee accrual. Loaded once per invocation and
/// handed to the engine explicitly.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FeeLedger {
    pub fee_percentage: u32,
    pub paused: bool,
    pub accrued_fees: i128,
    pub owner: Address,
}

// Constants
pub const SUBUNITS_PER_UNIT: i128 = 1_000_000;
pub const MIN_GOAL: i128 = SUBUNITS_PER_UNIT; // 1 whole unit
pub const LEDGERS_PER_DAY: u32 = 144; // ~10 minutes per ledger
pub const MIN_DURATION: u32 = LEDGERS_PER_DAY; // ~1 day
pub const MAX_DURATION: u32 = LEDGERS_PER_DAY * 365; // ~1 year
pub const MAX_FEE_PERCENTAGE: u32 = 10;
pub const DEFAULT_FEE_PERCENTAGE: u32 = 2;
pub const MAX_TITLE_LEN: u32 = 100;
pub const MAX_DESCRIPTION_LEN: u32 = 500;
pub const MAX_METADATA_LEN: u32 = 256;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
