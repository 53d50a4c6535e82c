//! Reward pool facade
//!
//! Ties the rate schedule, epoch ledger, membership registry and treasury
//! together behind role-gated operations. Roles are a closed set of
//! principals compared by equality at operation entry; every failure path
//! returns before the first state mutation, so a rejected call leaves no
//! trace.

use stakepool_core::{Address, Amount, Timestamp, UNIT_PRICE};
use stakepool_treasury::TreasuryPool;
use tracing::info;

use crate::error::{Result, RewardError};
use crate::events::PoolEvent;
use crate::ledger::{Epoch, EpochLedger};
use crate::registry::{MembershipRegistry, Participant};
use crate::schedule::{RateSchedule, Stage};

pub struct RewardPool {
    owner: Address,
    backend: Option<Address>,
    schedule: RateSchedule,
    ledger: EpochLedger,
    registry: MembershipRegistry,
    treasury: TreasuryPool,
    events: Vec<PoolEvent>,
}

impl RewardPool {
    /// Build a pool owned by `owner` with an immutable rate schedule
    pub fn new(owner: &str, stages: Vec<Stage>) -> Result<Self> {
        Ok(RewardPool {
            owner: owner.to_string(),
            backend: None,
            schedule: RateSchedule::new(stages)?,
            ledger: EpochLedger::new(),
            registry: MembershipRegistry::new(),
            treasury: TreasuryPool::new(),
            events: Vec::new(),
        })
    }

    /// Owner designates (or replaces) the backend delegate
    pub fn set_backend(&mut self, caller: &str, backend: &str) -> Result<()> {
        self.require_owner(caller)?;
        self.backend = Some(backend.to_string());
        Ok(())
    }

    /// Owner deposits reward funds into the treasury
    pub fn fund(&mut self, caller: &str, amount: Amount) -> Result<()> {
        self.require_owner(caller)?;
        self.treasury.deposit_funding(caller, amount);
        self.events.push(PoolEvent::Funded { amount });
        info!(amount, "treasury funded");
        Ok(())
    }

    /// Catch the epoch ledger up to `now`.
    ///
    /// Callable by anyone; the first call anchors the genesis epoch, later
    /// calls are gated only by elapsed time. Returns the number of epochs
    /// appended.
    pub fn advance(&mut self, now: Timestamp) -> Result<u64> {
        let appended = self
            .ledger
            .advance(now, self.registry.active_units(), &self.schedule)?;
        self.events.push(PoolEvent::EpochsAdvanced {
            appended,
            latest_index: self.ledger.len(),
        });
        Ok(appended)
    }

    /// Buy one stake unit; the attached value must equal the unit price
    /// exactly, over- and under-payment both fail
    pub fn add_unit(&mut self, caller: &str, attached: Amount) -> Result<()> {
        self.register_unit(caller, attached)
    }

    /// Backend buys a unit on behalf of `participant`
    pub fn add_unit_for(&mut self, caller: &str, participant: &str, attached: Amount) -> Result<()> {
        self.require_backend(caller)?;
        self.register_unit(participant, attached)
    }

    /// Give up one unit and get the unit price refunded
    pub fn remove_unit(&mut self, caller: &str) -> Result<Amount> {
        self.release_unit(caller)
    }

    /// Backend removes a unit on behalf of `participant`; the refund goes to
    /// the participant
    pub fn remove_unit_for(&mut self, caller: &str, participant: &str) -> Result<Amount> {
        self.require_backend(caller)?;
        self.release_unit(participant)
    }

    /// Claim the caller's share of every epoch since their last claim
    pub fn claim(&mut self, caller: &str) -> Result<Amount> {
        self.pay_claim(caller)
    }

    /// Backend triggers a claim on behalf of `participant`; the payout goes
    /// to the participant
    pub fn claim_for(&mut self, caller: &str, participant: &str) -> Result<Amount> {
        self.require_backend(caller)?;
        self.pay_claim(participant)
    }

    // ---- observability reads ----

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn backend(&self) -> Option<&str> {
        self.backend.as_deref()
    }

    pub fn unit_price(&self) -> Amount {
        UNIT_PRICE
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    /// Number of recorded epochs
    pub fn epoch_count(&self) -> u64 {
        self.ledger.len()
    }

    /// Epoch record by 1-based index
    pub fn epoch(&self, index: u64) -> Option<&Epoch> {
        self.ledger.get(index)
    }

    pub fn last_epoch_timestamp(&self) -> Option<Timestamp> {
        self.ledger.last().map(|epoch| epoch.timestamp)
    }

    /// Live aggregate unit count (not the last epoch's snapshot)
    pub fn active_units(&self) -> u64 {
        self.registry.active_units()
    }

    pub fn participant(&self, address: &str) -> Option<&Participant> {
        self.registry.get(address)
    }

    pub fn treasury(&self) -> &TreasuryPool {
        &self.treasury
    }

    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    // ---- internals ----

    fn require_owner(&self, caller: &str) -> Result<()> {
        if caller != self.owner {
            return Err(RewardError::OnlyOwner);
        }
        Ok(())
    }

    fn require_backend(&self, caller: &str) -> Result<()> {
        match self.backend.as_deref() {
            Some(backend) if caller == backend => Ok(()),
            _ => Err(RewardError::OnlyBackend),
        }
    }

    fn register_unit(&mut self, participant: &str, attached: Amount) -> Result<()> {
        if attached != UNIT_PRICE {
            return Err(RewardError::WrongAmount {
                required: UNIT_PRICE,
                attached,
            });
        }
        self.treasury.deposit_collateral(participant, attached);
        let units = self.registry.add_unit(participant, self.ledger.len());
        self.events.push(PoolEvent::UnitAdded {
            participant: participant.to_string(),
        });
        info!(participant, units, "stake unit added");
        Ok(())
    }

    fn release_unit(&mut self, participant: &str) -> Result<Amount> {
        if self.registry.get(participant).is_none() {
            return Err(RewardError::NotUnitHolder(participant.to_string()));
        }
        self.treasury.payout(participant, UNIT_PRICE, "unit refund")?;
        self.registry.remove_unit(participant)?;
        self.events.push(PoolEvent::UnitRemoved {
            participant: participant.to_string(),
        });
        info!(participant, "stake unit removed");
        Ok(UNIT_PRICE)
    }

    fn pay_claim(&mut self, participant: &str) -> Result<Amount> {
        let (units, last_paid) = match self.registry.get(participant) {
            Some(holder) => (holder.active_units, holder.last_paid_epoch),
            None => return Err(RewardError::NotUnitHolder(participant.to_string())),
        };
        let latest = self.ledger.len();
        if last_paid >= latest {
            return Err(RewardError::NothingToClaim);
        }

        // Every pending epoch pays by the holder's unit count as of now; the
        // count that was active while the epoch was recorded is not
        // consulted. Shares truncate, dust is forfeited.
        let mut total: Amount = 0;
        for epoch in self.ledger.pending_since(last_paid) {
            if epoch.active_units == 0 {
                continue;
            }
            total += (epoch.reward as u128 * units as u128 / epoch.active_units as u128) as Amount;
        }

        self.treasury.payout(participant, total, "reward claim")?;
        self.registry.mark_paid(participant, latest)?;
        self.events.push(PoolEvent::Claimed {
            participant: participant.to_string(),
            amount: total,
        });
        info!(participant, amount = total, "rewards claimed");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakepool_core::{coins, EPOCH_INTERVAL_SECS};

    const START: Timestamp = 1_700_000_000;

    fn flat_pool() -> RewardPool {
        RewardPool::new(
            "owner",
            vec![Stage {
                period_end: START + 100 * EPOCH_INTERVAL_SECS,
                daily_rate: coins(1),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_fund_is_owner_only() {
        let mut pool = flat_pool();
        assert_eq!(pool.fund("user1", coins(1)).unwrap_err(), RewardError::OnlyOwner);
        pool.fund("owner", coins(50)).unwrap();
        assert_eq!(pool.treasury().balance(), coins(50));
    }

    #[test]
    fn test_add_unit_requires_exact_price() {
        let mut pool = flat_pool();

        let err = pool.add_unit("user1", UNIT_PRICE / 2).unwrap_err();
        assert_eq!(
            err,
            RewardError::WrongAmount {
                required: UNIT_PRICE,
                attached: UNIT_PRICE / 2,
            }
        );
        assert_eq!(pool.add_unit("user1", UNIT_PRICE * 2).unwrap_err(), RewardError::WrongAmount {
            required: UNIT_PRICE,
            attached: UNIT_PRICE * 2,
        });
        assert_eq!(pool.active_units(), 0);

        pool.add_unit("user1", UNIT_PRICE).unwrap();
        assert_eq!(pool.active_units(), 1);
    }

    #[test]
    fn test_delegated_calls_need_backend() {
        let mut pool = flat_pool();

        // no backend designated yet
        assert_eq!(
            pool.add_unit_for("backend", "user1", UNIT_PRICE).unwrap_err(),
            RewardError::OnlyBackend
        );

        assert_eq!(
            pool.set_backend("user1", "backend").unwrap_err(),
            RewardError::OnlyOwner
        );
        pool.set_backend("owner", "backend").unwrap();

        // still closed to everyone but the backend, owner included
        assert_eq!(
            pool.remove_unit_for("owner", "user1").unwrap_err(),
            RewardError::OnlyBackend
        );

        pool.add_unit_for("backend", "user1", UNIT_PRICE).unwrap();
        assert_eq!(pool.participant("user1").unwrap().active_units, 1);
    }

    #[test]
    fn test_claim_insufficient_funds_mutates_nothing() {
        // a rate the collateral-only treasury cannot cover
        let mut pool = RewardPool::new(
            "owner",
            vec![Stage {
                period_end: START + 100 * EPOCH_INTERVAL_SECS,
                daily_rate: coins(20_000),
            }],
        )
        .unwrap();

        pool.add_unit("user1", UNIT_PRICE).unwrap();
        pool.advance(START).unwrap();
        pool.advance(START + EPOCH_INTERVAL_SECS).unwrap();

        let err = pool.claim("user1").unwrap_err();
        assert_eq!(
            err,
            RewardError::InsufficientFunds {
                requested: coins(20_000),
                available: UNIT_PRICE,
            }
        );
        // the failed claim left the pointer and the balance alone
        assert_eq!(pool.participant("user1").unwrap().last_paid_epoch, 0);
        assert_eq!(pool.treasury().balance(), UNIT_PRICE);
    }

    #[test]
    fn test_events_are_recorded_in_order() {
        let mut pool = flat_pool();
        pool.fund("owner", coins(50)).unwrap();
        pool.add_unit("user1", UNIT_PRICE).unwrap();
        pool.advance(START).unwrap();

        assert_eq!(
            pool.events(),
            &[
                PoolEvent::Funded { amount: coins(50) },
                PoolEvent::UnitAdded {
                    participant: "user1".to_string()
                },
                PoolEvent::EpochsAdvanced {
                    appended: 1,
                    latest_index: 1
                },
            ]
        );
    }
}
