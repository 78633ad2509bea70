use async_trait::async_trait;
use chrono::NaiveDate;

use crate::budgets::budgets_model::{Budget, BudgetUpdate, BudgetWithStatus, NewBudget};
use crate::errors::Result;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget>;
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Budget>>;
    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update(&self, user_id: &str, budget_update: BudgetUpdate) -> Result<Budget>;
    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Budget plus derived status for a single budget.
    fn get_budget_with_status(
        &self,
        user_id: &str,
        budget_id: &str,
        as_of: NaiveDate,
    ) -> Result<BudgetWithStatus>;
    /// All active budgets with derived status, computed from one expense
    /// scan rather than one query per budget.
    fn get_budgets_with_status(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<BudgetWithStatus>>;
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;
    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, user_id: &str, budget_update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}
