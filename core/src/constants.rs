//! Monetary and timing constants

use crate::types::{Amount, Timestamp};

/// Smallest accounting units per coin
pub const COIN: Amount = 100_000_000;

/// Fixed price of one stake unit (10,000 coins)
pub const UNIT_PRICE: Amount = 10_000 * COIN;

/// Epoch length: one accounting period per day
pub const EPOCH_INTERVAL_SECS: Timestamp = 86_400;

/// Convert whole coins to smallest units
pub fn coins(n: u64) -> Amount {
    n * COIN
}
