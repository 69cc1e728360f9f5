//! Campaign lifecycle: create, pledge, withdraw, refund and cancel.
//!
//! Every function validates all of its preconditions before it moves funds or
//! writes storage. Withdrawal and refund eligibility is recomputed from the
//! current height and the pledged total on each call; the cached
//! [`CampaignState`] is only ever written here, never read as a gate.

use soroban_sdk::{Address, Env, String};

use crate::error::Rejection;
use crate::escrow;
use crate::events::{
    self, CampaignCancelledEvent, CampaignCreatedEvent, FundsWithdrawnEvent, PledgeMadeEvent,
    RefundIssuedEvent,
};
use crate::storage;
use crate::storage_types::{
    Campaign, CampaignId, CampaignState, FeeLedger, Pledge, MAX_DESCRIPTION_LEN, MAX_DURATION,
    MAX_METADATA_LEN, MAX_TITLE_LEN, MIN_DURATION, MIN_GOAL,
};
use crate::utils::{current_height, is_past, split_fee};

/// Register a new campaign whose pledge window closes `duration` ledgers from now.
pub fn create_campaign(
    e: &Env,
    fees: &FeeLedger,
    creator: &Address,
    title: String,
    description: String,
    goal: i128,
    duration: u32,
    metadata_uri: String,
) -> Result<CampaignId, Rejection> {
    if fees.paused {
        return Err(Rejection::Paused);
    }
    validate_text(&title, &description, &metadata_uri)?;
    if goal < MIN_GOAL {
        return Err(Rejection::GoalBelowMinimum);
    }
    if duration < MIN_DURATION {
        return Err(Rejection::DurationTooShort);
    }
    if duration > MAX_DURATION {
        return Err(Rejection::DurationTooLong);
    }

    let height = current_height(e);
    let deadline = height.checked_add(duration).ok_or(Rejection::Overflow)?;
    let created_by_user = storage::user_campaign_count(e, creator)
        .checked_add(1)
        .ok_or(Rejection::Overflow)?;
    let campaign_id = storage::take_campaign_id(e)?;

    let campaign = Campaign {
        id: campaign_id,
        creator: creator.clone(),
        title,
        description,
        goal,
        deadline,
        total_pledged: 0,
        state: CampaignState::Active,
        metadata_uri,
        withdrawn: false,
        created_at: height,
    };
    storage::save_campaign(e, &campaign);
    storage::set_user_campaign_count(e, creator, created_by_user);

    events::emit_campaign_created(
        e,
        CampaignCreatedEvent {
            campaign_id,
            creator: creator.clone(),
            goal,
            deadline,
        },
    );

    Ok(campaign_id)
}

/// Escrow `amount` from `backer` and fold it into their pledge.
///
/// Pledging stays open after the goal is met; the campaign flips to
/// `Successful` the first time the total reaches the goal and keeps
/// accumulating afterwards.
pub fn pledge(
    e: &Env,
    asset: &Address,
    campaign_id: CampaignId,
    backer: &Address,
    amount: i128,
) -> Result<(), Rejection> {
    let mut campaign = storage::load_campaign(e, campaign_id)?;
    if amount <= 0 {
        return Err(Rejection::ZeroPledge);
    }
    if is_past(e, campaign.deadline) {
        return Err(Rejection::PledgeWindowClosed);
    }
    if campaign.state == CampaignState::Cancelled {
        return Err(Rejection::CampaignCancelled);
    }

    let existing = storage::find_pledge(e, campaign_id, backer);
    let backers = match existing {
        Some(_) => None,
        None => Some(
            storage::backer_count(e, campaign_id)
                .checked_add(1)
                .ok_or(Rejection::Overflow)?,
        ),
    };
    let pledge = match existing {
        Some(previous) => Pledge {
            amount: previous
                .amount
                .checked_add(amount)
                .ok_or(Rejection::Overflow)?,
            refunded: previous.refunded,
            pledged_at: current_height(e),
        },
        None => Pledge {
            amount,
            refunded: false,
            pledged_at: current_height(e),
        },
    };
    let total_pledged = campaign
        .total_pledged
        .checked_add(amount)
        .ok_or(Rejection::Overflow)?;

    escrow::collect(e, asset, backer, amount)?;

    storage::save_pledge(e, campaign_id, backer, &pledge);
    if let Some(count) = backers {
        storage::set_backer_count(e, campaign_id, count);
    }
    campaign.total_pledged = total_pledged;
    if campaign.state == CampaignState::Active && total_pledged >= campaign.goal {
        campaign.state = CampaignState::Successful;
    }
    storage::save_campaign(e, &campaign);

    events::emit_pledge_made(
        e,
        PledgeMadeEvent {
            campaign_id,
            backer: backer.clone(),
            amount,
            total_pledged,
        },
    );

    Ok(())
}

/// Pay a funded campaign out to its creator, keeping the platform fee.
/// Returns the amount released to the creator.
pub fn withdraw_funds(
    e: &Env,
    fees: &mut FeeLedger,
    asset: &Address,
    campaign_id: CampaignId,
    caller: &Address,
) -> Result<i128, Rejection> {
    let mut campaign = storage::load_campaign(e, campaign_id)?;
    if *caller != campaign.creator {
        return Err(Rejection::NotCreator);
    }
    if !is_past(e, campaign.deadline) {
        return Err(Rejection::DeadlineNotPassed);
    }
    if campaign.total_pledged < campaign.goal {
        return Err(Rejection::GoalUnmet);
    }
    if campaign.withdrawn {
        return Err(Rejection::AlreadyWithdrawn);
    }

    let (fee, payout) = split_fee(campaign.total_pledged, fees.fee_percentage)?;
    let accrued_fees = fees.accrued_fees.checked_add(fee).ok_or(Rejection::Overflow)?;

    escrow::release(e, asset, &campaign.creator, payout)?;

    fees.accrued_fees = accrued_fees;
    campaign.withdrawn = true;
    campaign.state = CampaignState::Successful;
    storage::save_campaign(e, &campaign);

    events::emit_funds_withdrawn(
        e,
        FundsWithdrawnEvent {
            campaign_id,
            creator: campaign.creator,
            payout,
            fee,
        },
    );

    Ok(payout)
}

/// Return a backer's full pledge once the campaign has closed below goal.
///
/// The campaign's `total_pledged` keeps the refunded amount.
pub fn refund(
    e: &Env,
    asset: &Address,
    campaign_id: CampaignId,
    backer: &Address,
) -> Result<i128, Rejection> {
    let mut campaign = storage::load_campaign(e, campaign_id)?;
    let mut pledge = storage::find_pledge(e, campaign_id, backer).ok_or(Rejection::NoPledge)?;
    if !is_past(e, campaign.deadline) {
        return Err(Rejection::DeadlineNotPassed);
    }
    if campaign.total_pledged >= campaign.goal {
        return Err(Rejection::GoalMet);
    }
    if pledge.refunded {
        return Err(Rejection::AlreadyRefunded);
    }

    escrow::release(e, asset, backer, pledge.amount)?;

    pledge.refunded = true;
    storage::save_pledge(e, campaign_id, backer, &pledge);
    campaign.state = CampaignState::Failed;
    storage::save_campaign(e, &campaign);

    events::emit_refund_issued(
        e,
        RefundIssuedEvent {
            campaign_id,
            backer: backer.clone(),
            amount: pledge.amount,
        },
    );

    Ok(pledge.amount)
}

/// Withdraw a campaign that nobody has pledged to yet.
pub fn cancel_campaign(e: &Env, campaign_id: CampaignId, caller: &Address) -> Result<(), Rejection> {
    let mut campaign = storage::load_campaign(e, campaign_id)?;
    if *caller != campaign.creator {
        return Err(Rejection::NotCreator);
    }
    if campaign.total_pledged > 0 || storage::backer_count(e, campaign_id) > 0 {
        return Err(Rejection::CancelWithPledges);
    }

    campaign.state = CampaignState::Cancelled;
    storage::save_campaign(e, &campaign);

    events::emit_campaign_cancelled(
        e,
        CampaignCancelledEvent {
            campaign_id,
            creator: campaign.creator,
        },
    );

    Ok(())
}

fn validate_text(title: &String, description: &String, metadata_uri: &String) -> Result<(), Rejection> {
    if title.is_empty() {
        return Err(Rejection::EmptyTitle);
    }
    if description.is_empty() {
        return Err(Rejection::EmptyDescription);
    }
    if !within_chars(title, MAX_TITLE_LEN) {
        return Err(Rejection::TitleTooLong);
    }
    if !within_chars(description, MAX_DESCRIPTION_LEN) {
        return Err(Rejection::DescriptionTooLong);
    }
    if !within_chars(metadata_uri, MAX_METADATA_LEN) {
        return Err(Rejection::MetadataTooLong);
    }
    Ok(())
}

// A UTF-8 character is at most 4 bytes.
const MAX_TEXT_BYTES: usize = MAX_DESCRIPTION_LEN as usize * 4;

/// Whether `text` holds at most `max_chars` UTF-8 characters.
fn within_chars(text: &String, max_chars: u32) -> bool {
    let len = text.len() as usize;
    let max_chars = max_chars as usize;
    if len <= max_chars {
        return true;
    }
    if len > max_chars * 4 {
        return false;
    }
    let mut buf = [0u8; MAX_TEXT_BYTES];
    let bytes = &mut buf[..len];
    text.copy_into_slice(bytes);
    // Count lead bytes; continuation bytes are 0b10xx_xxxx.
    bytes.iter().filter(|b| **b & 0xC0 != 0x80).count() <= max_chars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_types::DEFAULT_FEE_PERCENTAGE;
    use crate::CrowdfundContract;
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::token;

    struct Fixture {
        env: Env,
        contract: Address,
        asset: Address,
        fees: FeeLedger,
    }

    fn fixture() -> Fixture {
        let env = Env::default();
        // Token transfers run below the contract frame opened by `as_contract`.
        env.mock_all_auths_allowing_non_root_auth();
        let contract = env.register(CrowdfundContract, ());
        let asset_admin = Address::generate(&env);
        let asset = env
            .register_stellar_asset_contract_v2(asset_admin)
            .address();
        let fees = FeeLedger {
            fee_percentage: DEFAULT_FEE_PERCENTAGE,
            paused: false,
            accrued_fees: 0,
            owner: Address::generate(&env),
        };
        Fixture { env, contract, asset, fees }
    }

    fn text(env: &Env, s: &str) -> String {
        String::from_str(env, s)
    }

    fn new_campaign(f: &Fixture, creator: &Address, goal: i128) -> CampaignId {
        f.env.as_contract(&f.contract, || {
            create_campaign(
                &f.env,
                &f.fees,
                creator,
                text(&f.env, "Solar pumps"),
                text(&f.env, "Irrigation for the north field"),
                goal,
                500,
                text(&f.env, "ipfs://QmPumps"),
            )
        })
        .unwrap()
    }

    fn funded_backer(f: &Fixture, amount: i128) -> Address {
        let backer = Address::generate(&f.env);
        token::StellarAssetClient::new(&f.env, &f.asset).mint(&backer, &amount);
        backer
    }

    #[test]
    fn empty_text_and_zero_pledge_are_distinct_causes() {
        let f = fixture();
        let creator = Address::generate(&f.env);

        let empty_title = f.env.as_contract(&f.contract, || {
            create_campaign(
                &f.env,
                &f.fees,
                &creator,
                text(&f.env, ""),
                text(&f.env, "desc"),
                MIN_GOAL,
                500,
                text(&f.env, ""),
            )
        });
        assert_eq!(empty_title, Err(Rejection::EmptyTitle));

        let empty_description = f.env.as_contract(&f.contract, || {
            create_campaign(
                &f.env,
                &f.fees,
                &creator,
                text(&f.env, "title"),
                text(&f.env, ""),
                MIN_GOAL,
                500,
                text(&f.env, ""),
            )
        });
        assert_eq!(empty_description, Err(Rejection::EmptyDescription));

        let id = new_campaign(&f, &creator, 10_000_000);
        let backer = funded_backer(&f, 1_000_000);
        let zero = f
            .env
            .as_contract(&f.contract, || pledge(&f.env, &f.asset, id, &backer, 0));
        assert_eq!(zero, Err(Rejection::ZeroPledge));
        assert_eq!(zero.unwrap_err().code(), Rejection::EmptyTitle.code());
    }

    #[test]
    fn cancel_with_pledges_is_its_own_cause() {
        let f = fixture();
        let creator = Address::generate(&f.env);
        let id = new_campaign(&f, &creator, 10_000_000);
        let backer = funded_backer(&f, 1_000_000);

        f.env
            .as_contract(&f.contract, || pledge(&f.env, &f.asset, id, &backer, 1_000_000))
            .unwrap();

        let result = f
            .env
            .as_contract(&f.contract, || cancel_campaign(&f.env, id, &creator));
        assert_eq!(result, Err(Rejection::CancelWithPledges));
    }

    #[test]
    fn goal_unmet_and_goal_met_share_a_code() {
        let mut f = fixture();
        let creator = Address::generate(&f.env);
        let short = new_campaign(&f, &creator, 10_000_000);
        let funded = new_campaign(&f, &creator, 2_000_000);
        let backer = funded_backer(&f, 5_000_000);

        f.env.as_contract(&f.contract, || {
            pledge(&f.env, &f.asset, short, &backer, 1_000_000).unwrap();
            pledge(&f.env, &f.asset, funded, &backer, 2_000_000).unwrap();
        });
        f.env.ledger().set_sequence_number(501);

        let asset = f.asset.clone();
        let contract = f.contract.clone();
        let env = f.env.clone();
        let withdraw = env.as_contract(&contract, || {
            withdraw_funds(&env, &mut f.fees, &asset, short, &creator)
        });
        assert_eq!(withdraw, Err(Rejection::GoalUnmet));

        let refund_funded = env.as_contract(&contract, || refund(&env, &asset, funded, &backer));
        assert_eq!(refund_funded, Err(Rejection::GoalMet));
        assert_eq!(Rejection::GoalUnmet.code(), Rejection::GoalMet.code());
    }

    #[test]
    fn withdraw_accrues_fee_into_passed_ledger() {
        let mut f = fixture();
        let creator = Address::generate(&f.env);
        let id = new_campaign(&f, &creator, 10_000_000);
        let backer = funded_backer(&f, 12_000_000);

        f.env
            .as_contract(&f.contract, || pledge(&f.env, &f.asset, id, &backer, 12_000_000))
            .unwrap();
        f.env.ledger().set_sequence_number(501);

        let asset = f.asset.clone();
        let contract = f.contract.clone();
        let env = f.env.clone();
        let payout = env
            .as_contract(&contract, || withdraw_funds(&env, &mut f.fees, &asset, id, &creator))
            .unwrap();

        assert_eq!(payout, 11_760_000);
        assert_eq!(f.fees.accrued_fees, 240_000);
    }

    #[test]
    fn pledge_to_cancelled_campaign_is_refused() {
        let f = fixture();
        let creator = Address::generate(&f.env);
        let id = new_campaign(&f, &creator, 10_000_000);
        let backer = funded_backer(&f, 1_000_000);

        let result = f.env.as_contract(&f.contract, || {
            cancel_campaign(&f.env, id, &creator).unwrap();
            pledge(&f.env, &f.asset, id, &backer, 1_000_000)
        });
        assert_eq!(result, Err(Rejection::CampaignCancelled));
    }

    #[test]
    fn pledge_without_balance_is_a_rejected_transfer() {
        let f = fixture();
        let creator = Address::generate(&f.env);
        let id = new_campaign(&f, &creator, 10_000_000);
        let broke = Address::generate(&f.env);

        let result = f
            .env
            .as_contract(&f.contract, || pledge(&f.env, &f.asset, id, &broke, 1_000_000));
        assert_eq!(result, Err(Rejection::TransferRejected));

        let campaign = f
            .env
            .as_contract(&f.contract, || storage::load_campaign(&f.env, id))
            .unwrap();
        assert_eq!(campaign.total_pledged, 0);
    }

    #[test]
    fn text_bounds_count_characters() {
        let f = fixture();
        let creator = Address::generate(&f.env);
        // 101 two-byte characters.
        let mut wide = [0u8; 202];
        for pair in wide.chunks_mut(2) {
            pair.copy_from_slice("é".as_bytes());
        }
        let hundred = core::str::from_utf8(&wide[..200]).unwrap();
        let hundred_one = core::str::from_utf8(&wide).unwrap();

        let attempt = |title: &str| {
            f.env.as_contract(&f.contract, || {
                create_campaign(
                    &f.env,
                    &f.fees,
                    &creator,
                    text(&f.env, title),
                    text(&f.env, "desc"),
                    MIN_GOAL,
                    500,
                    text(&f.env, ""),
                )
            })
        };
        assert_eq!(attempt(hundred), Ok(0));
        assert_eq!(attempt(hundred_one), Err(Rejection::TitleTooLong));
    }
}
