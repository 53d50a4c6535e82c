//! Treasury error types

use stakepool_core::Amount;
use thiserror::Error;

/// Treasury pool errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreasuryError {
    #[error("Insufficient treasury balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Amount,
        available: Amount,
    },
}

pub type Result<T> = std::result::Result<T, TreasuryError>;
