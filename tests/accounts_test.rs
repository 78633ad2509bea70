mod common;

use common::{date, TestContext};
use rust_decimal_macros::dec;

use fintrack_core::accounts::{AccountUpdate, ACCOUNT_TYPE_CHECKING};
use fintrack_core::Error;

#[tokio::test]
async fn soft_delete_keeps_the_history_reachable() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;
    let tx = ctx
        .spend("u1", &account.id, dec!(100), "Food", date(2024, 3, 5))
        .await
        .unwrap();

    let deactivated = ctx.accounts.deactivate("u1", &account.id).await.unwrap();
    assert!(!deactivated.is_active);

    // The row still exists and old transactions still resolve.
    let reloaded = ctx.accounts.get_by_id("u1", &account.id).unwrap();
    assert_eq!(reloaded.balance, dec!(900));
    assert!(ctx.transactions.get_by_id("u1", &tx.id).is_ok());

    // But it no longer appears among active accounts.
    let active = ctx.accounts.list("u1", Some(true)).unwrap();
    assert!(active.iter().all(|a| a.id != account.id));
}

#[tokio::test]
async fn set_balance_overrides_the_ledger_derived_value() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;

    let adjusted = ctx
        .accounts
        .set_balance("u1", &account.id, dec!(1234.56))
        .await
        .unwrap();
    assert_eq!(adjusted.balance, dec!(1234.56));
    assert_eq!(ctx.balance_of("u1", &account.id), dec!(1234.56));
}

#[tokio::test]
async fn update_edits_metadata_without_touching_the_balance() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;

    let updated = ctx
        .accounts
        .update(
            "u1",
            AccountUpdate {
                id: account.id.clone(),
                name: "Renamed".to_string(),
                account_type: ACCOUNT_TYPE_CHECKING.to_string(),
                include_in_total: false,
                is_active: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert!(!updated.include_in_total);
    assert_eq!(updated.balance, dec!(1000));
}

#[tokio::test]
async fn foreign_accounts_behave_like_missing_ones() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("owner", dec!(1000)).await;

    assert!(matches!(
        ctx.accounts.get_by_id("intruder", &account.id),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        ctx.accounts.deactivate("intruder", &account.id).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        ctx.accounts
            .set_balance("intruder", &account.id, dec!(0))
            .await,
        Err(Error::NotFound(_))
    ));
}
