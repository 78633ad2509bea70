mod common;

use common::{date, TestContext};
use rust_decimal_macros::dec;

use fintrack_core::bills::{NewBill, BILL_FREQUENCY_MONTHLY, BILL_STATUS_OVERDUE};
use fintrack_core::notifications::{
    NOTIFICATION_TYPE_BILL_OVERDUE, NOTIFICATION_TYPE_BILL_REMINDER,
    NOTIFICATION_TYPE_RECURRING_TRANSACTION, PRIORITY_HIGH,
};
use fintrack_core::transactions::{
    NewTransaction, RecurringRule, TransactionFilter, FREQUENCY_MONTHLY,
    TRANSACTION_TYPE_EXPENSE,
};

async fn seed_recurring_expense(
    ctx: &TestContext,
    account_id: &str,
    next_date: chrono::NaiveDate,
) -> fintrack_core::transactions::Transaction {
    ctx.transaction_service
        .create_transaction(
            "u1",
            NewTransaction {
                id: None,
                account_id: account_id.to_string(),
                transaction_type: TRANSACTION_TYPE_EXPENSE.to_string(),
                amount: dec!(15),
                category: "Subscriptions".to_string(),
                description: Some("Streaming".to_string()),
                date: date(2024, 2, 15),
                is_recurring: true,
                recurring_rule: Some(RecurringRule {
                    frequency: FREQUENCY_MONTHLY.to_string(),
                    next_date,
                    end_date: None,
                }),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn tick_posts_due_occurrences_and_advances_the_schedule() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;
    let tick_day = date(2024, 3, 15);
    let template = seed_recurring_expense(&ctx, &account.id, tick_day).await;
    // The template row already applied its own effect at creation.
    let balance_before_tick = ctx.balance_of("u1", &account.id);

    let summary = ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(summary.processed_transactions, 1);
    assert_eq!(summary.failed_transactions, 0);

    // The posted occurrence is a plain transaction dated on the tick day.
    let posted = ctx
        .transactions
        .search(
            "u1",
            &TransactionFilter {
                date_from: Some(tick_day),
                date_to: Some(tick_day),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(posted.len(), 1);
    assert!(!posted[0].is_recurring);
    assert!(posted[0]
        .description
        .as_deref()
        .unwrap()
        .contains("(Recurring)"));
    assert_eq!(ctx.balance_of("u1", &account.id), balance_before_tick - dec!(15));

    // The template's schedule moved one month forward.
    let advanced = ctx.transactions.get_by_id("u1", &template.id).unwrap();
    assert_eq!(
        advanced.recurring_rule.unwrap().next_date,
        date(2024, 4, 15)
    );

    let notifications = ctx.notifications.get_notifications("u1", false).unwrap();
    assert_eq!(
        notifications
            .iter()
            .filter(|n| n.notification_type == NOTIFICATION_TYPE_RECURRING_TRANSACTION)
            .count(),
        1
    );
}

#[tokio::test]
async fn rerunning_the_tick_on_the_same_day_posts_nothing_new() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;
    let tick_day = date(2024, 3, 15);
    seed_recurring_expense(&ctx, &account.id, tick_day).await;

    ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    let balance_after_first = ctx.balance_of("u1", &account.id);

    let second = ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(second.processed_transactions, 0);
    assert_eq!(second.failed_transactions, 0);
    assert_eq!(ctx.balance_of("u1", &account.id), balance_after_first);

    let posted = ctx
        .transactions
        .search(
            "u1",
            &TransactionFilter {
                date_from: Some(tick_day),
                date_to: Some(tick_day),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(posted.len(), 1);
}

#[tokio::test]
async fn upcoming_bill_gets_one_reminder_per_day() {
    let ctx = TestContext::new();
    let tick_day = date(2024, 3, 15);
    ctx.bill_service
        .create_bill(
            "u1",
            NewBill {
                id: None,
                name: "Internet".to_string(),
                amount: dec!(60),
                category: "Utilities".to_string(),
                due_date: tick_day + chrono::Duration::days(2),
                frequency: BILL_FREQUENCY_MONTHLY.to_string(),
                linked_account_id: None,
                reminder_days: Some(3),
            },
        )
        .await
        .unwrap();

    let first = ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(first.processed_bills, 1);

    let second = ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(second.processed_bills, 0);

    let notifications = ctx.notifications.get_notifications("u1", false).unwrap();
    assert_eq!(
        notifications
            .iter()
            .filter(|n| n.notification_type == NOTIFICATION_TYPE_BILL_REMINDER)
            .count(),
        1
    );
}

#[tokio::test]
async fn bill_outside_its_reminder_window_stays_silent() {
    let ctx = TestContext::new();
    let tick_day = date(2024, 3, 15);
    ctx.bill_service
        .create_bill(
            "u1",
            NewBill {
                id: None,
                name: "Rent".to_string(),
                amount: dec!(900),
                category: "Housing".to_string(),
                due_date: tick_day + chrono::Duration::days(10),
                frequency: BILL_FREQUENCY_MONTHLY.to_string(),
                linked_account_id: None,
                reminder_days: Some(3),
            },
        )
        .await
        .unwrap();

    let summary = ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(summary.processed_bills, 0);
    assert!(ctx
        .notifications
        .get_notifications("u1", false)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn past_due_bill_transitions_to_overdue_once() {
    let ctx = TestContext::new();
    let tick_day = date(2024, 3, 15);
    let created = ctx
        .bill_service
        .create_bill(
            "u1",
            NewBill {
                id: None,
                name: "Electricity".to_string(),
                amount: dec!(80),
                category: "Utilities".to_string(),
                due_date: date(2024, 3, 10),
                frequency: BILL_FREQUENCY_MONTHLY.to_string(),
                linked_account_id: None,
                reminder_days: Some(3),
            },
        )
        .await
        .unwrap();

    let first = ctx.recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(first.processed_bills, 1);
    let bill = ctx.bill_service.get_bill("u1", &created.id).unwrap();
    assert_eq!(bill.status, BILL_STATUS_OVERDUE);

    let overdue_notifications: Vec<_> = ctx
        .notifications
        .get_notifications("u1", false)
        .unwrap()
        .into_iter()
        .filter(|n| n.notification_type == NOTIFICATION_TYPE_BILL_OVERDUE)
        .collect();
    assert_eq!(overdue_notifications.len(), 1);
    assert_eq!(overdue_notifications[0].priority, PRIORITY_HIGH);

    // The next day finds no pending bill to transition.
    let next_day = ctx
        .recurrence
        .run_daily_tick(tick_day + chrono::Duration::days(1))
        .await
        .unwrap();
    assert_eq!(next_day.processed_bills, 0);
}
