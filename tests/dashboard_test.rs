mod common;

use common::{date, TestContext};
use rust_decimal_macros::dec;

use fintrack_core::accounts::{NewAccount, ACCOUNT_TYPE_INVESTMENT};

#[tokio::test]
async fn snapshot_totals_only_included_active_accounts() {
    let ctx = TestContext::new();
    let checking = ctx.seed_account("u1", dec!(1000)).await;
    // Excluded from the headline number.
    ctx.accounts
        .create(
            "u1",
            NewAccount {
                id: None,
                name: "Brokerage".to_string(),
                account_type: ACCOUNT_TYPE_INVESTMENT.to_string(),
                balance: Some(dec!(9999)),
                currency: "USD".to_string(),
                include_in_total: false,
                is_active: true,
            },
        )
        .await
        .unwrap();
    // Deactivated accounts drop out entirely.
    let closed = ctx.seed_account("u1", dec!(500)).await;
    ctx.accounts.deactivate("u1", &closed.id).await.unwrap();

    let snapshot = ctx
        .dashboard_service
        .get_dashboard_snapshot("u1", date(2024, 3, 20))
        .unwrap();
    assert_eq!(snapshot.total_balance, dec!(1000));
    let _ = checking;
}

#[tokio::test]
async fn snapshot_compares_the_current_month_against_the_previous_one() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(10000)).await;

    ctx.earn("u1", &account.id, dec!(3000), date(2024, 3, 1))
        .await
        .unwrap();
    ctx.spend("u1", &account.id, dec!(200), "Food", date(2024, 3, 5))
        .await
        .unwrap();
    ctx.spend("u1", &account.id, dec!(300), "Rent", date(2024, 3, 10))
        .await
        .unwrap();
    ctx.earn("u1", &account.id, dec!(2000), date(2024, 2, 1))
        .await
        .unwrap();
    ctx.spend("u1", &account.id, dec!(1000), "Rent", date(2024, 2, 10))
        .await
        .unwrap();

    let snapshot = ctx
        .dashboard_service
        .get_dashboard_snapshot("u1", date(2024, 3, 20))
        .unwrap();
    assert_eq!(snapshot.current_month.income, dec!(3000));
    assert_eq!(snapshot.current_month.expense, dec!(500));
    assert_eq!(snapshot.current_month.net, dec!(2500));
    assert_eq!(snapshot.income_change_percent, Some(dec!(50.0)));
    assert_eq!(snapshot.expense_change_percent, Some(dec!(-50.0)));

    // Current-month expenses, largest category first.
    assert_eq!(snapshot.spending_by_category.len(), 2);
    assert_eq!(snapshot.spending_by_category[0].category, "Rent");
    assert_eq!(snapshot.spending_by_category[0].amount, dec!(300));

    // The trend window always spans 30 days, spent or not.
    assert_eq!(snapshot.daily_trend.len(), 30);
    let on_the_fifth = snapshot
        .daily_trend
        .iter()
        .find(|day| day.date == date(2024, 3, 5))
        .unwrap();
    assert_eq!(on_the_fifth.expense, dec!(200));
}

#[tokio::test]
async fn snapshots_are_scoped_per_user() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;
    ctx.spend("u1", &account.id, dec!(100), "Food", date(2024, 3, 5))
        .await
        .unwrap();

    let other = ctx
        .dashboard_service
        .get_dashboard_snapshot("u2", date(2024, 3, 20))
        .unwrap();
    assert_eq!(other.total_balance, dec!(0));
    assert!(other.spending_by_category.is_empty());
}
