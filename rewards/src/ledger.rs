//! Append-only epoch ledger with catch-up advancement

use serde::{Deserialize, Serialize};
use stakepool_core::{Amount, Timestamp, EPOCH_INTERVAL_SECS};
use tracing::debug;

use crate::error::{Result, RewardError};
use crate::schedule::RateSchedule;

/// One daily accounting period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Epoch {
    /// 1-based position in the ledger
    pub index: u64,
    pub timestamp: Timestamp,
    /// Stake units active when this epoch was appended
    pub active_units: u64,
    /// Reward pool distributed across this epoch's active units
    pub reward: Amount,
}

/// Growable indexed log of epochs; records are never mutated or deleted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpochLedger {
    epochs: Vec<Epoch>,
}

impl EpochLedger {
    pub fn new() -> Self {
        Self { epochs: Vec::new() }
    }

    /// Append one epoch per whole day elapsed since the last epoch and
    /// return how many were appended.
    ///
    /// The first call ever anchors the ledger instead: it appends a single
    /// zero-reward genesis epoch at `now`, with no elapsed-time gate, so the
    /// time base exists without waiting a full day.
    ///
    /// Every epoch appended by one call carries the same `active_units`
    /// snapshot; membership can only change between calls, not within one.
    /// Timestamps step by exactly one epoch interval from the previous
    /// epoch rather than from wall-clock time, so spacing stays fixed no
    /// matter how irregularly callers show up. Any leftover fraction of a
    /// day stays pending for the next call.
    pub fn advance(
        &mut self,
        now: Timestamp,
        active_units: u64,
        schedule: &RateSchedule,
    ) -> Result<u64> {
        let last = match self.epochs.last().copied() {
            Some(epoch) => epoch,
            None => {
                self.epochs.push(Epoch {
                    index: 1,
                    timestamp: now,
                    active_units,
                    reward: 0,
                });
                debug!(timestamp = now, active_units, "anchored genesis epoch");
                return Ok(1);
            }
        };

        let elapsed = now.saturating_sub(last.timestamp);
        let elapsed_days = elapsed / EPOCH_INTERVAL_SECS;
        if elapsed_days < 1 {
            return Err(RewardError::TooEarly {
                elapsed_secs: elapsed,
            });
        }

        for d in 1..=elapsed_days {
            let timestamp = last.timestamp + d * EPOCH_INTERVAL_SECS;
            self.epochs.push(Epoch {
                index: last.index + d,
                timestamp,
                active_units,
                reward: schedule.rate_at(timestamp),
            });
        }
        debug!(
            appended = elapsed_days,
            latest = self.len(),
            "advanced epoch ledger"
        );
        Ok(elapsed_days)
    }

    /// Number of recorded epochs; also the index of the latest one
    pub fn len(&self) -> u64 {
        self.epochs.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Epoch by 1-based index
    pub fn get(&self, index: u64) -> Option<&Epoch> {
        if index == 0 {
            return None;
        }
        self.epochs.get(index as usize - 1)
    }

    pub fn last(&self) -> Option<&Epoch> {
        self.epochs.last()
    }

    /// Epochs with indexes in `(after, latest]`, oldest first.
    ///
    /// Claims scan only this suffix, keeping their cost proportional to the
    /// pending epochs rather than the whole history.
    pub fn pending_since(&self, after: u64) -> &[Epoch] {
        let start = (after as usize).min(self.epochs.len());
        &self.epochs[start..]
    }
}
