use stakepool_core::coins;
use stakepool_treasury::*;

#[test]
fn test_treasury_basic_flow() {
    let mut pool = TreasuryPool::new();

    pool.deposit_funding("owner", coins(50));
    assert_eq!(pool.balance(), coins(50));

    // Check balance in whole coins
    assert_eq!(pool.balance_coins(), 50.0);
}

#[test]
fn test_treasury_mixed_sources() {
    let mut pool = TreasuryPool::new();

    pool.deposit_funding("owner", coins(50));
    pool.deposit_collateral("user1", coins(10_000));
    pool.payout("user1", coins(10_000), "unit refund").unwrap();

    let stats = pool.stats();
    assert_eq!(stats.balance, coins(50));
    assert_eq!(stats.total_funded, coins(50));
    assert_eq!(stats.total_collateral, coins(10_000));
    assert_eq!(stats.total_paid_out, coins(10_000));
    assert_eq!(stats.transaction_count, 3);
}

#[test]
fn test_treasury_report_roundtrip() {
    let mut pool = TreasuryPool::new();
    pool.deposit_funding("owner", 1_000);
    pool.payout("user1", 250, "reward claim").unwrap();

    let json = pool.report_json(10).unwrap();
    let report: TreasuryReport = serde_json::from_str(&json).unwrap();

    assert_eq!(report.stats.balance, 750);
    assert_eq!(report.recent_transactions.len(), 2);
}
