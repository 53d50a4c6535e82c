//! StakePool Rewards Module
//!
//! Epoch-based proportional reward engine. A piecewise-constant rate
//! schedule resolves the daily reward, an append-only epoch ledger catches
//! up elapsed days in a single call, and registered stake-unit holders
//! claim their integer share of every epoch since their last claim, paid
//! from the treasury.

pub mod error;
pub mod events;
pub mod ledger;
pub mod pool;
pub mod registry;
pub mod schedule;

// Re-export main types
pub use error::{Result, RewardError};
pub use events::PoolEvent;
pub use ledger::{Epoch, EpochLedger};
pub use pool::RewardPool;
pub use registry::{MembershipRegistry, Participant};
pub use schedule::{RateSchedule, Stage};
