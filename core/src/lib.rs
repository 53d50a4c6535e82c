//! StakePool Core Library
//!
//! Shared constants and primitive types for the stakepool workspace.

pub mod constants;
pub mod types;

// Re-export main items
pub use constants::{coins, COIN, EPOCH_INTERVAL_SECS, UNIT_PRICE};
pub use types::{Address, Amount, Timestamp};
