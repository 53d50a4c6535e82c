//! Reward engine error types

use stakepool_core::{Address, Amount, Timestamp};
use stakepool_treasury::TreasuryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewardError {
    #[error("Only for Owner")]
    OnlyOwner,

    #[error("Only for Backend")]
    OnlyBackend,

    #[error("Too early: only {elapsed_secs}s since the last epoch")]
    TooEarly { elapsed_secs: Timestamp },

    #[error("Not a unit holder: {0}")]
    NotUnitHolder(Address),

    #[error("Nothing to claim")]
    NothingToClaim,

    #[error("Wrong amount: unit price is {required}, got {attached}")]
    WrongAmount { required: Amount, attached: Amount },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount,
    },

    #[error("Rate schedule needs at least one stage")]
    EmptySchedule,

    #[error("Rate schedule stages must strictly increase in period end")]
    UnorderedSchedule,
}

impl From<TreasuryError> for RewardError {
    fn from(err: TreasuryError) -> Self {
        match err {
            TreasuryError::InsufficientBalance {
                requested,
                available,
            } => RewardError::InsufficientFunds {
                requested,
                available,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, RewardError>;
