use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::goals;
use crate::utils::parse_decimal;
use crate::{errors::ValidationError, Error};

use super::goals_model::{Goal, GoalDB, GoalUpdate, NewGoal};
use super::goals_traits::GoalRepositoryTrait;

/// Repository for managing goal data in the database
pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    /// Creates a new GoalRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_owned(conn: &mut SqliteConnection, owner_id: &str, goal_id: &str) -> Result<GoalDB> {
        goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(owner_id))
            .first::<GoalDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Goal with id {} not found", goal_id))
                }
                other => other.into(),
            })
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    /// Retrieves a goal by its ID, scoped to the owner
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_owned(&mut conn, user_id, goal_id).map(Goal::from)
    }

    /// Lists the owner's goals, nearest target date first
    fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;

        goals::table
            .filter(goals::user_id.eq(user_id))
            .order(goals::target_date.asc())
            .load::<GoalDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Goal::from).collect())
            .map_err(Error::from)
    }

    /// Creates a new goal owned by the given user
    async fn create(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate(chrono::Utc::now().date_naive())?;

        let mut goal_db: GoalDB = new_goal.into();
        if goal_db.id.is_empty() {
            goal_db.id = Uuid::new_v4().to_string();
        }
        goal_db.user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .execute(conn)?;
                Ok(Goal::from(goal_db))
            })
            .await
    }

    /// Updates a goal's editable fields. The saved amount and completion
    /// markers only move through contribute/withdraw.
    async fn update(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        goal_update.validate()?;

        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &goal_update.id)?;

                existing.name = goal_update.name;
                existing.target_amount = goal_update.target_amount.to_string();
                existing.target_date = goal_update.target_date;
                existing.category = goal_update.category;
                existing.priority = goal_update.priority;
                existing.linked_account_id = goal_update.linked_account_id;
                existing.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(goals::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                Ok(Goal::from(existing))
            })
            .await
    }

    /// Deletes a goal by its ID
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let owner_id = user_id.to_string();
        let target_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    goals::table
                        .filter(goals::id.eq(&target_id))
                        .filter(goals::user_id.eq(&owner_id)),
                )
                .execute(conn)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Goal with id {} not found",
                        target_id
                    )));
                }

                Ok(affected)
            })
            .await
    }

    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: Decimal,
    ) -> Result<(Goal, bool)> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Contribution amount must be greater than zero".to_string(),
            )));
        }

        let owner_id = user_id.to_string();
        let target_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &target_id)?;

                let current = parse_decimal(&existing.current_amount, "goal.current_amount");
                let target = parse_decimal(&existing.target_amount, "goal.target_amount");
                let next = current + amount;

                let now = chrono::Utc::now().naive_utc();
                // The completion transition happens at most once; a further
                // contribution on an already completed goal leaves the marker
                // untouched.
                let completed_now = !existing.is_completed && next >= target;
                if completed_now {
                    existing.is_completed = true;
                    existing.completed_at = Some(now);
                }
                existing.current_amount = next.to_string();
                existing.updated_at = now;

                diesel::update(goals::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                Ok((Goal::from(existing), completed_now))
            })
            .await
    }

    async fn withdraw(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Withdrawal amount must be greater than zero".to_string(),
            )));
        }

        let owner_id = user_id.to_string();
        let target_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &target_id)?;

                let current = parse_decimal(&existing.current_amount, "goal.current_amount");
                let target = parse_decimal(&existing.target_amount, "goal.target_amount");
                if amount > current {
                    return Err(Error::InsufficientBalance(format!(
                        "Cannot withdraw {} from goal {} holding {}",
                        amount, target_id, current
                    )));
                }

                let next = current - amount;
                if existing.is_completed && next < target {
                    existing.is_completed = false;
                    existing.completed_at = None;
                }
                existing.current_amount = next.to_string();
                existing.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(goals::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                Ok(Goal::from(existing))
            })
            .await
    }
}
