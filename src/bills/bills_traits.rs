use async_trait::async_trait;
use chrono::NaiveDate;

use crate::bills::bills_model::{Bill, BillUpdate, NewBill};
use crate::errors::Result;

/// Trait for bill repository operations
#[async_trait]
pub trait BillRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, bill_id: &str) -> Result<Bill>;
    fn list(&self, user_id: &str) -> Result<Vec<Bill>>;
    /// Pending bills with a due date inside `[from, to]`, across all users.
    /// Only the scheduler tick calls this.
    fn list_pending_due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Bill>>;
    /// Pending bills already past their due date, across all users.
    fn list_pending_overdue(&self, as_of: NaiveDate) -> Result<Vec<Bill>>;

    async fn create(&self, user_id: &str, new_bill: NewBill) -> Result<Bill>;
    async fn update(&self, user_id: &str, bill_update: BillUpdate) -> Result<Bill>;
    async fn delete(&self, user_id: &str, bill_id: &str) -> Result<usize>;
    /// Marks a bill paid and, for recurring frequencies, inserts the
    /// successor occurrence atomically. Returns the paid bill and the
    /// successor when one was spawned.
    async fn pay(&self, user_id: &str, bill_id: &str) -> Result<(Bill, Option<Bill>)>;
    /// Transitions a pending bill to overdue. Returns false when the bill
    /// was not pending (already paid or already marked).
    async fn mark_overdue(&self, bill_id: &str) -> Result<bool>;
}

/// Trait for bill service operations
#[async_trait]
pub trait BillServiceTrait: Send + Sync {
    fn get_bill(&self, user_id: &str, bill_id: &str) -> Result<Bill>;
    fn get_bills(&self, user_id: &str) -> Result<Vec<Bill>>;
    async fn create_bill(&self, user_id: &str, new_bill: NewBill) -> Result<Bill>;
    async fn update_bill(&self, user_id: &str, bill_update: BillUpdate) -> Result<Bill>;
    async fn delete_bill(&self, user_id: &str, bill_id: &str) -> Result<usize>;
    /// Pays a bill; a recurring bill spawns exactly one pending successor.
    async fn pay_bill(&self, user_id: &str, bill_id: &str) -> Result<Bill>;
}
