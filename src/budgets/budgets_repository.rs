use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::budgets;
use crate::Error;

use super::budgets_model::{Budget, BudgetDB, BudgetUpdate, NewBudget};
use super::budgets_traits::BudgetRepositoryTrait;

/// Repository for managing budget data in the database
pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    /// Creates a new BudgetRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_owned(
        conn: &mut SqliteConnection,
        owner_id: &str,
        budget_id: &str,
    ) -> Result<BudgetDB> {
        budgets::table
            .filter(budgets::id.eq(budget_id))
            .filter(budgets::user_id.eq(owner_id))
            .first::<BudgetDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Budget with id {} not found", budget_id))
                }
                other => other.into(),
            })
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    /// Retrieves a budget by its ID, scoped to the owner
    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_owned(&mut conn, user_id, budget_id).map(Budget::from)
    }

    /// Lists the owner's budgets, optionally filtering by active status
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(budgets::is_active.eq(active));
        }

        query
            .order(budgets::category.asc())
            .load::<BudgetDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Budget::from).collect())
            .map_err(Error::from)
    }

    /// Creates a new budget. The check-then-insert runs inside one writer
    /// transaction, with the partial unique index on (user, category,
    /// period) as the authoritative duplicate guard.
    async fn create(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;

        let mut budget_db: BudgetDB = new_budget.into();
        if budget_db.id.is_empty() {
            budget_db.id = Uuid::new_v4().to_string();
        }
        budget_db.user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                // Fast-path check for a friendlier message than the raw
                // unique-violation; the index still backs it up.
                let existing: i64 = budgets::table
                    .filter(budgets::user_id.eq(&budget_db.user_id))
                    .filter(budgets::category.eq(&budget_db.category))
                    .filter(budgets::period.eq(&budget_db.period))
                    .filter(budgets::is_active.eq(true))
                    .count()
                    .get_result(conn)?;
                if existing > 0 {
                    return Err(Error::Conflict(format!(
                        "An active {} budget for category '{}' already exists",
                        budget_db.period.to_lowercase(),
                        budget_db.category
                    )));
                }

                diesel::insert_into(budgets::table)
                    .values(&budget_db)
                    .execute(conn)?;

                Ok(Budget::from(budget_db))
            })
            .await
    }

    /// Updates an existing budget's cap, threshold and active flag
    async fn update(&self, user_id: &str, budget_update: BudgetUpdate) -> Result<Budget> {
        budget_update.validate()?;

        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &budget_update.id)?;

                existing.amount = budget_update.amount.to_string();
                existing.alert_threshold = budget_update.alert_threshold;
                existing.is_active = budget_update.is_active;
                existing.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(budgets::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                Ok(Budget::from(existing))
            })
            .await
    }

    /// Deletes a budget by its ID
    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let owner_id = user_id.to_string();
        let target_id = budget_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(&target_id))
                        .filter(budgets::user_id.eq(&owner_id)),
                )
                .execute(conn)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Budget with id {} not found",
                        target_id
                    )));
                }

                Ok(affected)
            })
            .await
    }
}
