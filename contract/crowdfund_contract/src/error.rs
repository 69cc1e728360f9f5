use soroban_sdk::{contracterror, log, Env, Symbol};

/// Wire-level error codes returned by every entry point.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAuthorized = 100,
    CampaignNotFound = 101,
    CampaignEnded = 102,
    CampaignActive = 103,
    InvalidAmount = 104,
    GoalNotReached = 105,
    AlreadyWithdrawn = 106,
    NoPledgeFound = 107,
    AlreadyRefunded = 108,
    InvalidDeadline = 109,
    InvalidGoal = 110,
    ContractPaused = 111,
    TransferFailed = 112,
    InvalidFee = 113,
    AlreadyInitialized = 114,
    NotInitialized = 115,
    Overflow = 116,
}

/// The precise reason an operation was refused.
///
/// Several reasons share one wire code (`InvalidAmount` covers a zero pledge,
/// empty text and cancelling a pledged campaign; `GoalNotReached` covers both a
/// withdrawal below goal and a refund of a funded campaign). Callers only ever
/// see the `Error`, but the engine and its tests work with this type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rejection {
    NotOwner,
    NotCreator,
    CampaignNotFound,
    PledgeWindowClosed,
    CampaignCancelled,
    DeadlineNotPassed,
    ZeroPledge,
    EmptyTitle,
    EmptyDescription,
    TitleTooLong,
    DescriptionTooLong,
    MetadataTooLong,
    CancelWithPledges,
    GoalUnmet,
    GoalMet,
    AlreadyWithdrawn,
    NoPledge,
    AlreadyRefunded,
    DurationTooShort,
    DurationTooLong,
    GoalBelowMinimum,
    Paused,
    TransferRejected,
    FeeAboveMaximum,
    AlreadyInitialized,
    NotInitialized,
    Overflow,
}

impl Rejection {
    pub const fn code(self) -> Error {
        match self {
            Rejection::NotOwner | Rejection::NotCreator => Error::NotAuthorized,
            Rejection::CampaignNotFound => Error::CampaignNotFound,
            Rejection::PledgeWindowClosed | Rejection::CampaignCancelled => Error::CampaignEnded,
            Rejection::DeadlineNotPassed => Error::CampaignActive,
            Rejection::ZeroPledge
            | Rejection::EmptyTitle
            | Rejection::EmptyDescription
            | Rejection::TitleTooLong
            | Rejection::DescriptionTooLong
            | Rejection::MetadataTooLong
            | Rejection::CancelWithPledges => Error::InvalidAmount,
            Rejection::GoalUnmet | Rejection::GoalMet => Error::GoalNotReached,
            Rejection::AlreadyWithdrawn => Error::AlreadyWithdrawn,
            Rejection::NoPledge => Error::NoPledgeFound,
            Rejection::AlreadyRefunded => Error::AlreadyRefunded,
            Rejection::DurationTooShort | Rejection::DurationTooLong => Error::InvalidDeadline,
            Rejection::GoalBelowMinimum => Error::InvalidGoal,
            Rejection::Paused => Error::ContractPaused,
            Rejection::TransferRejected => Error::TransferFailed,
            Rejection::FeeAboveMaximum => Error::InvalidFee,
            Rejection::AlreadyInitialized => Error::AlreadyInitialized,
            Rejection::NotInitialized => Error::NotInitialized,
            Rejection::Overflow => Error::Overflow,
        }
    }

    /// Short symbol used in diagnostic logs.
    pub const fn reason(self) -> &'static str {
        match self {
            Rejection::NotOwner => "not_owner",
            Rejection::NotCreator => "not_creator",
            Rejection::CampaignNotFound => "campaign_not_found",
            Rejection::PledgeWindowClosed => "pledge_window_closed",
            Rejection::CampaignCancelled => "campaign_cancelled",
            Rejection::DeadlineNotPassed => "deadline_not_passed",
            Rejection::ZeroPledge => "zero_pledge",
            Rejection::EmptyTitle => "empty_title",
            Rejection::EmptyDescription => "empty_description",
            Rejection::TitleTooLong => "title_too_long",
            Rejection::DescriptionTooLong => "description_too_long",
            Rejection::MetadataTooLong => "metadata_too_long",
            Rejection::CancelWithPledges => "cancel_with_pledges",
            Rejection::GoalUnmet => "goal_unmet",
            Rejection::GoalMet => "goal_met",
            Rejection::AlreadyWithdrawn => "already_withdrawn",
            Rejection::NoPledge => "no_pledge",
            Rejection::AlreadyRefunded => "already_refunded",
            Rejection::DurationTooShort => "duration_too_short",
            Rejection::DurationTooLong => "duration_too_long",
            Rejection::GoalBelowMinimum => "goal_below_minimum",
            Rejection::Paused => "paused",
            Rejection::TransferRejected => "transfer_rejected",
            Rejection::FeeAboveMaximum => "fee_above_maximum",
            Rejection::AlreadyInitialized => "already_initialized",
            Rejection::NotInitialized => "not_initialized",
            Rejection::Overflow => "overflow",
        }
    }
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        rejection.code()
    }
}

/// Log a rejection and collapse it to its wire code.
pub fn reject(e: &Env, rejection: Rejection) -> Error {
    let code = rejection.code();
    log!(
        e,
        "operation rejected",
        Symbol::new(e, rejection.reason()),
        code as u32
    );
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_codes_keep_distinct_reasons() {
        assert_eq!(Rejection::ZeroPledge.code(), Error::InvalidAmount);
        assert_eq!(Rejection::EmptyTitle.code(), Error::InvalidAmount);
        assert_eq!(Rejection::CancelWithPledges.code(), Error::InvalidAmount);
        assert_ne!(Rejection::ZeroPledge.reason(), Rejection::CancelWithPledges.reason());

        assert_eq!(Rejection::GoalUnmet.code(), Error::GoalNotReached);
        assert_eq!(Rejection::GoalMet.code(), Error::GoalNotReached);
        assert_ne!(Rejection::GoalUnmet.reason(), Rejection::GoalMet.reason());
    }

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(Error::NotAuthorized as u32, 100);
        assert_eq!(Error::GoalNotReached as u32, 105);
        assert_eq!(Error::InvalidFee as u32, 113);
        assert_eq!(Error::from(Rejection::Paused), Error::ContractPaused);
    }

    #[test]
    fn reasons_fit_in_a_symbol() {
        let e = Env::default();
        for rejection in [
            Rejection::DescriptionTooLong,
            Rejection::PledgeWindowClosed,
            Rejection::AlreadyInitialized,
            Rejection::DeadlineNotPassed,
        ] {
            assert!(rejection.reason().len() <= 32);
            let _ = Symbol::new(&e, rejection.reason());
        }
    }
}
