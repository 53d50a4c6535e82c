//! Observable pool events

use serde::{Deserialize, Serialize};
use stakepool_core::{Address, Amount};

/// Effects emitted by state-changing pool operations, in order of occurrence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoolEvent {
    Funded {
        amount: Amount,
    },
    UnitAdded {
        participant: Address,
    },
    UnitRemoved {
        participant: Address,
    },
    Claimed {
        participant: Address,
        amount: Amount,
    },
    EpochsAdvanced {
        appended: u64,
        latest_index: u64,
    },
}
