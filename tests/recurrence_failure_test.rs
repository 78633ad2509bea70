mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{date, TestContext};
use rust_decimal_macros::dec;

use fintrack_core::bills::{
    Bill, BillRepositoryTrait, BillUpdate, NewBill, BILL_FREQUENCY_MONTHLY, BILL_STATUS_OVERDUE,
    BILL_STATUS_PENDING,
};
use fintrack_core::recurrence::RecurrenceService;
use fintrack_core::transactions::{
    ExpenseRow, NewTransaction, RecurringRule, Transaction, TransactionFilter,
    TransactionRepositoryTrait, TransactionUpdate, FREQUENCY_MONTHLY, TRANSACTION_TYPE_EXPENSE,
};
use fintrack_core::{Error, Result};

/// Delegates to the real repository but fails to post one chosen template,
/// simulating a mid-tick storage error.
struct FailingPostRepository {
    inner: Arc<dyn TransactionRepositoryTrait>,
    failing_template_id: String,
}

#[async_trait]
impl TransactionRepositoryTrait for FailingPostRepository {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.inner.get_by_id(user_id, transaction_id)
    }

    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.inner.search(user_id, filter)
    }

    fn list_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        self.inner.list_in_range(user_id, from, to)
    }

    fn expenses_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExpenseRow>> {
        self.inner.expenses_in_range(user_id, from, to)
    }

    fn find_due_recurring(&self, as_of: NaiveDate) -> Result<Vec<Transaction>> {
        self.inner.find_due_recurring(as_of)
    }

    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        self.inner.create(user_id, new_transaction).await
    }

    async fn update(&self, user_id: &str, update: TransactionUpdate) -> Result<Transaction> {
        self.inner.update(user_id, update).await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.inner.delete(user_id, transaction_id).await
    }

    async fn post_recurring_occurrence(
        &self,
        template_id: &str,
        occurrence: NewTransaction,
        next_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<Transaction> {
        if template_id == self.failing_template_id {
            return Err(Error::NotFound(format!(
                "Recurring transaction {} not found",
                template_id
            )));
        }
        self.inner
            .post_recurring_occurrence(template_id, occurrence, next_date, as_of)
            .await
    }
}

/// Delegates to the real repository but fails the overdue transition for one
/// chosen bill.
struct FailingOverdueRepository {
    inner: Arc<dyn BillRepositoryTrait>,
    failing_bill_id: String,
}

#[async_trait]
impl BillRepositoryTrait for FailingOverdueRepository {
    fn get_by_id(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        self.inner.get_by_id(user_id, bill_id)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Bill>> {
        self.inner.list(user_id)
    }

    fn list_pending_due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Bill>> {
        self.inner.list_pending_due_between(from, to)
    }

    fn list_pending_overdue(&self, as_of: NaiveDate) -> Result<Vec<Bill>> {
        self.inner.list_pending_overdue(as_of)
    }

    async fn create(&self, user_id: &str, new_bill: NewBill) -> Result<Bill> {
        self.inner.create(user_id, new_bill).await
    }

    async fn update(&self, user_id: &str, bill_update: BillUpdate) -> Result<Bill> {
        self.inner.update(user_id, bill_update).await
    }

    async fn delete(&self, user_id: &str, bill_id: &str) -> Result<usize> {
        self.inner.delete(user_id, bill_id).await
    }

    async fn pay(&self, user_id: &str, bill_id: &str) -> Result<(Bill, Option<Bill>)> {
        self.inner.pay(user_id, bill_id).await
    }

    async fn mark_overdue(&self, bill_id: &str) -> Result<bool> {
        if bill_id == self.failing_bill_id {
            return Err(Error::NotFound(format!(
                "Bill with id {} not found",
                bill_id
            )));
        }
        self.inner.mark_overdue(bill_id).await
    }
}

async fn seed_recurring_expense(
    ctx: &TestContext,
    account_id: &str,
    category: &str,
    next_date: chrono::NaiveDate,
) -> Transaction {
    ctx.transaction_service
        .create_transaction(
            "u1",
            NewTransaction {
                id: None,
                account_id: account_id.to_string(),
                transaction_type: TRANSACTION_TYPE_EXPENSE.to_string(),
                amount: dec!(15),
                category: category.to_string(),
                description: None,
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

fn overdue_bill(name: &str, due: chrono::NaiveDate) -> NewBill {
    NewBill {
        id: None,
        name: name.to_string(),
        amount: dec!(60),
        category: "Utilities".to_string(),
        due_date: due,
        frequency: BILL_FREQUENCY_MONTHLY.to_string(),
        linked_account_id: None,
        reminder_days: Some(0),
    }
}

#[tokio::test]
async fn a_failing_occurrence_never_aborts_the_others() {
    let ctx = TestContext::new();
    let account = ctx.seed_account("u1", dec!(1000)).await;
    let tick_day = date(2024, 3, 15);
    let doomed = seed_recurring_expense(&ctx, &account.id, "Gym", tick_day).await;
    let healthy = seed_recurring_expense(&ctx, &account.id, "Streaming", tick_day).await;

    let recurrence = RecurrenceService::new(
        Arc::new(FailingPostRepository {
            inner: ctx.transactions.clone(),
            failing_template_id: doomed.id.clone(),
        }),
        ctx.bills.clone(),
        ctx.notifications.clone(),
    );

    let summary = recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(summary.processed_transactions, 1);
    assert_eq!(summary.failed_transactions, 1);

    // The healthy template's occurrence was posted and its schedule moved.
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
    assert_eq!(posted[0].category, "Streaming");

    let advanced = ctx.transactions.get_by_id("u1", &healthy.id).unwrap();
    assert_eq!(
        advanced.recurring_rule.unwrap().next_date,
        date(2024, 4, 15)
    );
    // The failed template is untouched and will be retried next tick.
    let untouched = ctx.transactions.get_by_id("u1", &doomed.id).unwrap();
    assert_eq!(untouched.recurring_rule.unwrap().next_date, tick_day);
}

#[tokio::test]
async fn a_failing_overdue_transition_never_aborts_the_others() {
    let ctx = TestContext::new();
    let tick_day = date(2024, 3, 15);
    let doomed = ctx
        .bill_service
        .create_bill("u1", overdue_bill("Electricity", date(2024, 3, 10)))
        .await
        .unwrap();
    let healthy = ctx
        .bill_service
        .create_bill("u1", overdue_bill("Water", date(2024, 3, 11)))
        .await
        .unwrap();

    let recurrence = RecurrenceService::new(
        ctx.transactions.clone(),
        Arc::new(FailingOverdueRepository {
            inner: ctx.bills.clone(),
            failing_bill_id: doomed.id.clone(),
        }),
        ctx.notifications.clone(),
    );

    let summary = recurrence.run_daily_tick(tick_day).await.unwrap();
    assert_eq!(summary.processed_bills, 1);
    assert_eq!(summary.failed_bills, 1);

    let flagged = ctx.bill_service.get_bill("u1", &healthy.id).unwrap();
    assert_eq!(flagged.status, BILL_STATUS_OVERDUE);
    let stuck = ctx.bill_service.get_bill("u1", &doomed.id).unwrap();
    assert_eq!(stuck.status, BILL_STATUS_PENDING);
}
