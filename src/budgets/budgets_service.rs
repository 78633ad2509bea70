use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::Error;

use super::budgets_model::{
    compute_status, period_start, Budget, BudgetUpdate, BudgetWithStatus, NewBudget,
};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};

/// Service computing derived budget state from the ledger
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetService {
    /// Creates a new BudgetService instance
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
        }
    }

    /// Folds expense rows into per-budget spent totals. One ledger scan
    /// serves every budget in the batch.
    fn with_status(
        budgets: Vec<Budget>,
        expenses: &[(String, NaiveDate, Decimal)],
        as_of: NaiveDate,
    ) -> Vec<BudgetWithStatus> {
        budgets
            .into_iter()
            .map(|budget| {
                let window_start = period_start(&budget.period, as_of);
                let spent: Decimal = expenses
                    .iter()
                    .filter(|(category, date, _)| {
                        *category == budget.category && *date >= window_start && *date <= as_of
                    })
                    .map(|(_, _, amount)| *amount)
                    .sum();
                let status = compute_status(budget.amount, budget.alert_threshold, spent);
                BudgetWithStatus { budget, status }
            })
            .collect()
    }

    fn load_expenses(
        &self,
        user_id: &str,
        budgets: &[Budget],
        as_of: NaiveDate,
    ) -> Result<Vec<(String, NaiveDate, Decimal)>> {
        let earliest = budgets
            .iter()
            .map(|b| period_start(&b.period, as_of))
            .min();
        let Some(earliest) = earliest else {
            return Ok(Vec::new());
        };

        let rows = self
            .transaction_repository
            .expenses_in_range(user_id, earliest, as_of)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let amount = row.amount_decimal();
                (row.category, row.date, amount)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    /// Computes the derived status for one budget. Pure read.
    fn get_budget_with_status(
        &self,
        user_id: &str,
        budget_id: &str,
        as_of: NaiveDate,
    ) -> Result<BudgetWithStatus> {
        let budget = self.repository.get_by_id(user_id, budget_id)?;
        let expenses = self.load_expenses(user_id, std::slice::from_ref(&budget), as_of)?;
        Self::with_status(vec![budget], &expenses, as_of)
            .pop()
            .ok_or_else(|| Error::NotFound(format!("Budget with id {} not found", budget_id)))
    }

    /// Computes derived status for all active budgets in one pass
    fn get_budgets_with_status(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<BudgetWithStatus>> {
        let budgets = self.repository.list(user_id, Some(true))?;
        debug!(
            "Computing status for {} budgets of user {}",
            budgets.len(),
            user_id
        );
        let expenses = self.load_expenses(user_id, &budgets, as_of)?;
        Ok(Self::with_status(budgets, &expenses, as_of))
    }

    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.repository.list(user_id, None)
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        self.repository.create(user_id, new_budget).await
    }

    async fn update_budget(&self, user_id: &str, budget_update: BudgetUpdate) -> Result<Budget> {
        self.repository.update(user_id, budget_update).await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        self.repository.delete(user_id, budget_id).await
    }
}
