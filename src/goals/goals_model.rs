use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::goals_constants::*;
use crate::utils::parse_decimal;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    pub priority: String,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub linked_account_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Pace assessment for a goal, derived at read time and never persisted.
///
/// `expected_percent` is how far along the goal should be if savings were
/// linear from creation to the target date. The status compares the actual
/// percent against that expectation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress_percent: u32,
    pub expected_percent: u32,
    pub days_left: i64,
    pub status: String,
}

impl GoalProgress {
    /// Computes the derived progress fields for a goal as of a given date.
    pub fn compute(goal: Goal, as_of: NaiveDate) -> Self {
        let actual_ratio = if goal.target_amount > Decimal::ZERO {
            (goal.current_amount / goal.target_amount)
                .to_f64()
                .unwrap_or(0.0)
                .max(0.0)
        } else {
            0.0
        };

        let start = goal.created_at.date();
        let total_days = (goal.target_date - start).num_days();
        let elapsed_days = (as_of - start).num_days();
        // A target date on or before creation gives no window to pace
        // against; expected progress is zero and the pace reads on-track.
        let expected_ratio = if total_days > 0 {
            (elapsed_days as f64 / total_days as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let status = if goal.is_completed || actual_ratio >= 1.0 {
            GOAL_STATUS_COMPLETED
        } else if actual_ratio >= ON_TRACK_RATIO * expected_ratio {
            GOAL_STATUS_ON_TRACK
        } else if actual_ratio >= BEHIND_RATIO * expected_ratio {
            GOAL_STATUS_BEHIND
        } else {
            GOAL_STATUS_AT_RISK
        };

        let days_left = (goal.target_date - as_of).num_days().max(0);

        Self {
            goal,
            progress_percent: ((actual_ratio * 100.0).round() as u32).min(100),
            expected_percent: (expected_ratio * 100.0).round() as u32,
            days_left,
            status: status.to_string(),
        }
    }
}

/// Input model for creating a new goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Option<Decimal>,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    pub linked_account_id: Option<String>,
}

impl NewGoal {
    /// Validates the new goal data. `today` is the creation date; the target
    /// date must be strictly after it.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal name cannot be empty".to_string(),
            )));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal target amount must be greater than zero".to_string(),
            )));
        }
        if let Some(current) = self.current_amount {
            if current < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Goal current amount cannot be negative".to_string(),
                )));
            }
        }
        if self.target_date <= today {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal target date must be in the future".to_string(),
            )));
        }
        if let Some(priority) = &self.priority {
            if !GOAL_PRIORITIES.contains(&priority.as_str()) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown goal priority: {}",
                    priority
                ))));
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    pub priority: String,
    pub linked_account_id: Option<String>,
}

impl GoalUpdate {
    /// Validates the goal update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal name cannot be empty".to_string(),
            )));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal target amount must be greater than zero".to_string(),
            )));
        }
        if !GOAL_PRIORITIES.contains(&self.priority.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal priority: {}",
                self.priority
            ))));
        }
        Ok(())
    }
}

/// Database model for goals
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    pub priority: String,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub linked_account_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            target_amount: parse_decimal(&db.target_amount, "goal.target_amount"),
            current_amount: parse_decimal(&db.current_amount, "goal.current_amount"),
            target_date: db.target_date,
            category: db.category,
            priority: db.priority,
            is_completed: db.is_completed,
            completed_at: db.completed_at,
            linked_account_id: db.linked_account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewGoal> for GoalDB {
    fn from(domain: NewGoal) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: String::new(), // Filled by the repository from the caller
            name: domain.name,
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.unwrap_or(Decimal::ZERO).to_string(),
            target_date: domain.target_date,
            category: domain.category,
            priority: domain
                .priority
                .unwrap_or_else(|| GOAL_PRIORITY_MEDIUM.to_string()),
            is_completed: false,
            completed_at: None,
            linked_account_id: domain.linked_account_id,
            created_at: now,
            updated_at: now,
        }
    }
}
