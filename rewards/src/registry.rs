//! Membership registry for stake-unit holders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stakepool_core::Address;
use std::collections::HashMap;

use crate::error::{Result, RewardError};

/// A registered stake-unit holder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub address: Address,
    /// Units currently held
    pub active_units: u64,
    /// Index of the newest epoch already paid out to this participant
    pub last_paid_epoch: u64,
    pub registered_at: DateTime<Utc>,
}

/// Tracks participants and the aggregate active-unit counter.
///
/// The aggregate is maintained transactionally alongside the map, never
/// recomputed by summing it.
pub struct MembershipRegistry {
    participants: HashMap<Address, Participant>,
    active_units: u64,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        MembershipRegistry {
            participants: HashMap::new(),
            active_units: 0,
        }
    }

    /// Register one unit for `address` and return their new unit count.
    ///
    /// A first-time participant starts with `last_paid_epoch` anchored at
    /// the current latest epoch: joining grants no claim on history.
    pub fn add_unit(&mut self, address: &str, latest_epoch: u64) -> u64 {
        let participant = self
            .participants
            .entry(address.to_string())
            .or_insert_with(|| Participant {
                address: address.to_string(),
                active_units: 0,
                last_paid_epoch: latest_epoch,
                registered_at: Utc::now(),
            });
        participant.active_units += 1;
        self.active_units += 1;
        participant.active_units
    }

    /// Drop one unit and return the count left.
    ///
    /// The record is destroyed when the count reaches zero; any rewards
    /// still unclaimed at that point are forfeited.
    pub fn remove_unit(&mut self, address: &str) -> Result<u64> {
        let participant = self
            .participants
            .get_mut(address)
            .ok_or_else(|| RewardError::NotUnitHolder(address.to_string()))?;

        participant.active_units -= 1;
        self.active_units -= 1;
        let remaining = participant.active_units;
        if remaining == 0 {
            self.participants.remove(address);
        }
        Ok(remaining)
    }

    pub fn get(&self, address: &str) -> Option<&Participant> {
        self.participants.get(address)
    }

    /// Mark every epoch up to `epoch` as paid out to `address`
    pub fn mark_paid(&mut self, address: &str, epoch: u64) -> Result<()> {
        let participant = self
            .participants
            .get_mut(address)
            .ok_or_else(|| RewardError::NotUnitHolder(address.to_string()))?;
        participant.last_paid_epoch = epoch;
        Ok(())
    }

    /// Total active units across all participants
    pub fn active_units(&self) -> u64 {
        self.active_units
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

impl Default for MembershipRegistry {
    fn default() -> Self {
        Self::new()
    }
}
