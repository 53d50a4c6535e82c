//! StakePool Treasury Module
//!
//! Custodies the pooled balance that backs reward payouts and unit refunds.
//! Value flows in from owner funding and stake-unit collateral, and flows
//! out through reward claims and unit refunds. Every movement is audited.

pub mod error;
pub mod pool;

pub use pool::{
    TreasuryPool, TreasuryReport, TreasurySource, TreasuryStats, TreasuryTransaction, TxKind,
};

pub use error::{Result, TreasuryError};
