use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::budgets_constants::*;
use crate::utils::parse_decimal;
use crate::{errors::ValidationError, Error, Result};

/// Start of the period window containing `as_of`.
///
/// Monthly starts on the 1st, yearly on Jan 1, weekly on the most recent
/// Sunday. Unknown periods fall back to monthly.
pub fn period_start(period: &str, as_of: NaiveDate) -> NaiveDate {
    match period {
        PERIOD_WEEKLY => as_of - Duration::days(as_of.weekday().num_days_from_sunday() as i64),
        PERIOD_YEARLY => NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap(),
        _ => NaiveDate::from_ymd_opt(as_of.year(), as_of.month(), 1).unwrap(),
    }
}

/// Derived, never-persisted view of where a budget stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: u32,
    pub status: String,
}

/// Classifies spending against the cap. Pure; reads nothing.
pub fn compute_status(amount: Decimal, alert_threshold: i32, spent: Decimal) -> BudgetStatus {
    let remaining = (amount - spent).max(Decimal::ZERO);
    let percent_used = if amount > Decimal::ZERO {
        (spent / amount * Decimal::from(100))
            .round()
            .to_u32()
            .unwrap_or(u32::MAX)
            .min(100)
    } else {
        0
    };
    let status = if percent_used >= 100 {
        BUDGET_STATUS_EXCEEDED
    } else if percent_used as i32 >= alert_threshold {
        BUDGET_STATUS_WARNING
    } else {
        BUDGET_STATUS_ON_TRACK
    };

    BudgetStatus {
        spent,
        remaining,
        percent_used,
        status: status.to_string(),
    }
}

/// Domain model representing a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: Decimal,
    pub period: String,
    pub start_date: NaiveDate,
    pub alert_threshold: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Budget combined with its derived status fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithStatus {
    #[serde(flatten)]
    pub budget: Budget,
    #[serde(flatten)]
    pub status: BudgetStatus,
}

/// Input model for creating a new budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub amount: Decimal,
    pub period: String,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub alert_threshold: Option<i32>,
}

impl NewBudget {
    /// Validates the new budget data
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount must be greater than zero".to_string(),
            )));
        }
        if !BUDGET_PERIODS.contains(&self.period.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown budget period: {}",
                self.period
            ))));
        }
        if let Some(threshold) = self.alert_threshold {
            if !(1..=100).contains(&threshold) {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Alert threshold must be between 1 and 100".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: String,
    pub amount: Decimal,
    pub alert_threshold: i32,
    pub is_active: bool,
}

impl BudgetUpdate {
    /// Validates the budget update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount must be greater than zero".to_string(),
            )));
        }
        if !(1..=100).contains(&self.alert_threshold) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Alert threshold must be between 1 and 100".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for budgets
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
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: String,
    pub period: String,
    pub start_date: NaiveDate,
    pub alert_threshold: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            amount: parse_decimal(&db.amount, "budget.amount"),
            period: db.period,
            start_date: db.start_date,
            alert_threshold: db.alert_threshold,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewBudget> for BudgetDB {
    fn from(domain: NewBudget) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: String::new(), // Filled by the repository from the caller
            category: domain.category,
            amount: domain.amount.to_string(),
            period: domain.period,
            start_date: domain.start_date.unwrap_or_else(|| now.date()),
            alert_threshold: domain.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn monthly_window_starts_on_the_first() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(
            period_start(PERIOD_MONTHLY, as_of),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn weekly_window_starts_on_sunday() {
        // 2024-03-20 is a Wednesday; the preceding Sunday is the 17th.
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(
            period_start(PERIOD_WEEKLY, as_of),
            NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()
        );
        // A Sunday is its own period start.
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(period_start(PERIOD_WEEKLY, sunday), sunday);
    }

    #[test]
    fn yearly_window_starts_on_jan_first() {
        let as_of = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert_eq!(
            period_start(PERIOD_YEARLY, as_of),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn status_thresholds() {
        let on_track = compute_status(dec!(500), 80, dec!(100));
        assert_eq!(on_track.status, BUDGET_STATUS_ON_TRACK);
        assert_eq!(on_track.percent_used, 20);
        assert_eq!(on_track.remaining, dec!(400));

        let warning = compute_status(dec!(500), 80, dec!(420));
        assert_eq!(warning.status, BUDGET_STATUS_WARNING);
        assert_eq!(warning.percent_used, 84);

        let exceeded = compute_status(dec!(500), 80, dec!(650));
        assert_eq!(exceeded.status, BUDGET_STATUS_EXCEEDED);
        assert_eq!(exceeded.percent_used, 100);
        assert_eq!(exceeded.remaining, Decimal::ZERO);
    }

    #[test]
    fn zero_cap_reports_zero_percent() {
        let status = compute_status(Decimal::ZERO, 80, dec!(10));
        assert_eq!(status.percent_used, 0);
        assert_eq!(status.status, BUDGET_STATUS_ON_TRACK);
    }
}
