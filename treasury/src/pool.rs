//! Treasury Pool Management
//!
//! Tracks the single pooled balance that reward claims and unit refunds are
//! paid from, split by deposit source, with an audit record for every
//! movement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stakepool_core::{Address, Amount, COIN};
use uuid::Uuid;

use crate::error::{Result, TreasuryError};

/// Where a deposit came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreasurySource {
    /// Reward funds deposited by the owner
    OwnerFunding,
    /// Stake-unit collateral held for refund
    UnitCollateral,
}

/// Direction of a balance movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxKind {
    Deposit,
    Payout,
}

/// One audited balance movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryTransaction {
    /// Unique identifier for this movement
    pub id: String,
    pub kind: TxKind,
    /// Deposit source; `None` for payouts
    pub source: Option<TreasurySource>,
    /// Depositor or payout recipient
    pub counterparty: Address,
    pub amount: Amount,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate treasury figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryStats {
    pub balance: Amount,
    pub total_funded: Amount,
    pub total_collateral: Amount,
    pub total_paid_out: Amount,
    pub transaction_count: usize,
}

/// Point-in-time report for operators and dashboards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryReport {
    pub generated_at: DateTime<Utc>,
    pub stats: TreasuryStats,
    pub recent_transactions: Vec<TreasuryTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryPool {
    balance: Amount,
    total_funded: Amount,
    total_collateral: Amount,
    total_paid_out: Amount,
    transactions: Vec<TreasuryTransaction>,
}

impl TreasuryPool {
    pub fn new() -> Self {
        Self {
            balance: 0,
            total_funded: 0,
            total_collateral: 0,
            total_paid_out: 0,
            transactions: Vec::new(),
        }
    }

    /// Current spendable balance
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Balance in whole coins
    pub fn balance_coins(&self) -> f64 {
        self.balance as f64 / COIN as f64
    }

    /// Deposit reward funds from the owner
    pub fn deposit_funding(&mut self, from: &str, amount: Amount) {
        self.balance += amount;
        self.total_funded += amount;
        self.record(
            TxKind::Deposit,
            Some(TreasurySource::OwnerFunding),
            from,
            amount,
            "owner funding",
        );
    }

    /// Deposit the collateral attached to a stake-unit purchase
    pub fn deposit_collateral(&mut self, from: &str, amount: Amount) {
        self.balance += amount;
        self.total_collateral += amount;
        self.record(
            TxKind::Deposit,
            Some(TreasurySource::UnitCollateral),
            from,
            amount,
            "unit collateral",
        );
    }

    /// Pay out to a recipient.
    ///
    /// Fails without mutating anything when the balance cannot cover the
    /// requested amount.
    pub fn payout(&mut self, to: &str, amount: Amount, reason: &str) -> Result<()> {
        if amount > self.balance {
            return Err(TreasuryError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.total_paid_out += amount;
        self.record(TxKind::Payout, None, to, amount, reason);
        Ok(())
    }

    pub fn stats(&self) -> TreasuryStats {
        TreasuryStats {
            balance: self.balance,
            total_funded: self.total_funded,
            total_collateral: self.total_collateral,
            total_paid_out: self.total_paid_out,
            transaction_count: self.transactions.len(),
        }
    }

    /// Full audit trail, oldest first
    pub fn transactions(&self) -> &[TreasuryTransaction] {
        &self.transactions
    }

    /// Report with the `recent` newest transactions attached
    pub fn report(&self, recent: usize) -> TreasuryReport {
        let start = self.transactions.len().saturating_sub(recent);
        TreasuryReport {
            generated_at: Utc::now(),
            stats: self.stats(),
            recent_transactions: self.transactions[start..].to_vec(),
        }
    }

    /// Serialized report, for logs and HTTP surfaces
    pub fn report_json(&self, recent: usize) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report(recent))
    }

    fn record(
        &mut self,
        kind: TxKind,
        source: Option<TreasurySource>,
        counterparty: &str,
        amount: Amount,
        reason: &str,
    ) {
        self.transactions.push(TreasuryTransaction {
            id: Uuid::new_v4().to_string(),
            kind,
            source,
            counterparty: counterparty.to_string(),
            amount,
            reason: reason.to_string(),
            recorded_at: Utc::now(),
        });
    }
}

impl Default for TreasuryPool {
    fn default() -> Self {
        Self::new()
    }
}
