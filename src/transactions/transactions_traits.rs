use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    ExpenseRow, NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};

/// Trait for transaction repository operations.
///
/// The write operations implement the balance mutation protocol: the
/// transaction row and the owning account's balance always change together
/// inside one writer-actor job.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
    fn list_in_range(&self, user_id: &str, from: NaiveDate, to: NaiveDate)
        -> Result<Vec<Transaction>>;
    /// Expense rows (category, date, amount) for the aggregation engines.
    fn expenses_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExpenseRow>>;
    /// Recurring templates due on or before `as_of`, across all users. Only
    /// the scheduler tick calls this; each occurrence is processed under the
    /// template's own user id.
    fn find_due_recurring(&self, as_of: NaiveDate) -> Result<Vec<Transaction>>;

    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update(&self, user_id: &str, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    /// Posts one occurrence of a recurring template and advances its
    /// schedule, atomically. Returns `Conflict` when the template was already
    /// advanced past `as_of` (a same-day re-run).
    async fn post_recurring_occurrence(
        &self,
        template_id: &str,
        occurrence: NewTransaction,
        next_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<Transaction>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn search_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str)
        -> Result<Transaction>;
}
