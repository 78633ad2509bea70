mod common;

use common::{date, TestContext};
use rust_decimal_macros::dec;

use fintrack_core::budgets::{
    NewBudget, BUDGET_STATUS_EXCEEDED, BUDGET_STATUS_ON_TRACK, BUDGET_STATUS_WARNING,
    PERIOD_MONTHLY,
};
use fintrack_core::Error;

fn monthly_budget(category: &str, amount: rust_decimal::Decimal) -> NewBudget {
    NewBudget {
        id: None,
        category: category.to_string(),
        amount,
        period: PERIOD_MONTHLY.to_string(),
        start_date: None,
        alert_threshold: None,
    }
}

#[tokio::test]
async fn status_reflects_spending_within_the_period() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(5000)).await;
    let budget = ctx
        .budget_service
        .create_budget("u1", monthly_budget("Food", dec!(400)))
        .await
        .unwrap();

    ctx.spend("u1", &account.id, dec!(100), "Food", date(2024, 3, 3))
        .await
        .unwrap();
    ctx.spend("u1", &account.id, dec!(100), "Food", date(2024, 3, 10))
        .await
        .unwrap();
    // Last month never counts toward a monthly period.
    ctx.spend("u1", &account.id, dec!(300), "Food", date(2024, 2, 20))
        .await
        .unwrap();
    // Other categories never count.
    ctx.spend("u1", &account.id, dec!(500), "Rent", date(2024, 3, 4))
        .await
        .unwrap();

    let status = ctx
        .budget_service
        .get_budget_with_status("u1", &budget.id, date(2024, 3, 15))
        .unwrap();
    assert_eq!(status.status.spent, dec!(200));
    assert_eq!(status.status.remaining, dec!(200));
    assert_eq!(status.status.percent_used, 50);
    assert_eq!(status.status.status, BUDGET_STATUS_ON_TRACK);
}

#[tokio::test]
async fn status_crosses_warning_and_exceeded_thresholds() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(5000)).await;
    let budget = ctx
        .budget_service
        .create_budget("u1", monthly_budget("Food", dec!(100)))
        .await
        .unwrap();

    ctx.spend("u1", &account.id, dec!(85), "Food", date(2024, 3, 3))
        .await
        .unwrap();
    let warning = ctx
        .budget_service
        .get_budget_with_status("u1", &budget.id, date(2024, 3, 15))
        .unwrap();
    assert_eq!(warning.status.status, BUDGET_STATUS_WARNING);

    ctx.spend("u1", &account.id, dec!(40), "Food", date(2024, 3, 10))
        .await
        .unwrap();
    let exceeded = ctx
        .budget_service
        .get_budget_with_status("u1", &budget.id, date(2024, 3, 15))
        .unwrap();
    assert_eq!(exceeded.status.status, BUDGET_STATUS_EXCEEDED);
    // Percent is capped and remaining never goes negative.
    assert_eq!(exceeded.status.percent_used, 100);
    assert_eq!(exceeded.status.remaining, dec!(0));
}

#[tokio::test]
async fn reading_the_status_twice_returns_the_same_answer() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(5000)).await;
    let budget = ctx
        .budget_service
        .create_budget("u1", monthly_budget("Food", dec!(400)))
        .await
        .unwrap();
    ctx.spend("u1", &account.id, dec!(120), "Food", date(2024, 3, 3))
        .await
        .unwrap();

    let as_of = date(2024, 3, 15);
    let first = ctx
        .budget_service
        .get_budget_with_status("u1", &budget.id, as_of)
        .unwrap();
    let second = ctx
        .budget_service
        .get_budget_with_status("u1", &budget.id, as_of)
        .unwrap();
    assert_eq!(first.status, second.status);
}

#[tokio::test]
async fn rejects_a_second_active_budget_for_the_same_category_and_period() {
    let ctx = TestContext::new();
    ctx.budget_service
        .create_budget("u1", monthly_budget("Food", dec!(400)))
        .await
        .unwrap();

    let duplicate = ctx
        .budget_service
        .create_budget("u1", monthly_budget("Food", dec!(250)))
        .await;
    assert!(matches!(duplicate, Err(Error::Conflict(_))));

    // A different user is free to use the same category and period.
    ctx.budget_service
        .create_budget("u2", monthly_budget("Food", dec!(250)))
        .await
        .unwrap();
}

#[tokio::test]
async fn status_for_an_unknown_budget_is_not_found() {
    let ctx = TestContext::new();
    let result = ctx
        .budget_service
        .get_budget_with_status("u1", "no-such-budget", date(2024, 3, 15));
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn concurrent_duplicate_creates_yield_exactly_one_budget() {
    let ctx = TestContext::new();
    let service = ctx.budget_service.clone();

    // Both creates race through the writer; serialization guarantees one
    // winner and one Conflict regardless of arrival order.
    let (first, second) = tokio::join!(
        service.create_budget("u1", monthly_budget("Food", dec!(400))),
        service.create_budget("u1", monthly_budget("Food", dec!(250))),
    );
    let results = [first, second];
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::Conflict(_))))
        .count();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(conflicts, 1);
    assert_eq!(successes, 1);

    let budgets = ctx.budget_service.get_budgets("u1").unwrap();
    assert_eq!(budgets.len(), 1);
}

#[tokio::test]
async fn bulk_status_covers_every_active_budget() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(5000)).await;
    ctx.budget_service
        .create_budget("u1", monthly_budget("Food", dec!(400)))
        .await
        .unwrap();
    ctx.budget_service
        .create_budget("u1", monthly_budget("Rent", dec!(1000)))
        .await
        .unwrap();
    ctx.spend("u1", &account.id, dec!(900), "Rent", date(2024, 3, 1))
        .await
        .unwrap();

    let statuses = ctx
        .budget_service
        .get_budgets_with_status("u1", date(2024, 3, 15))
        .unwrap();
    assert_eq!(statuses.len(), 2);
    let rent = statuses
        .iter()
        .find(|s| s.budget.category == "Rent")
        .unwrap();
    assert_eq!(rent.status.spent, dec!(900));
}
