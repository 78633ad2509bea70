use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bills::bills_constants::*;
use crate::utils::parse_decimal;
use crate::{errors::ValidationError, Error, Result};

/// Advances a due date by one frequency unit. Calendar-aware for the
/// month-based frequencies (Jan 31 + 1 month clamps to Feb 29/28).
pub fn advance_due_date(frequency: &str, due_date: NaiveDate) -> NaiveDate {
    match frequency {
        BILL_FREQUENCY_WEEKLY => due_date + Duration::days(7),
        BILL_FREQUENCY_BIWEEKLY => due_date + Duration::days(14),
        BILL_FREQUENCY_QUARTERLY => due_date + Months::new(3),
        BILL_FREQUENCY_YEARLY => due_date + Months::new(12),
        _ => due_date + Months::new(1),
    }
}

/// Domain model representing a bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub due_date: NaiveDate,
    pub frequency: String,
    pub status: String,
    pub paid_date: Option<NaiveDateTime>,
    pub linked_account_id: Option<String>,
    pub reminder_days: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status == BILL_STATUS_PAID
    }
}

/// Input model for creating a new bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub due_date: NaiveDate,
    pub frequency: String,
    pub linked_account_id: Option<String>,
    #[serde(default)]
    pub reminder_days: Option<i32>,
}

impl NewBill {
    /// Validates the new bill data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Bill name cannot be empty".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Bill amount must be greater than zero".to_string(),
            )));
        }
        if !BILL_FREQUENCIES.contains(&self.frequency.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown bill frequency: {}",
                self.frequency
            ))));
        }
        if let Some(days) = self.reminder_days {
            if days < 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Reminder days cannot be negative".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub due_date: NaiveDate,
    pub frequency: String,
    pub linked_account_id: Option<String>,
    pub reminder_days: i32,
}

impl BillUpdate {
    /// Validates the bill update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        let as_new = NewBill {
            id: None,
            name: self.name.clone(),
            amount: self.amount,
            category: self.category.clone(),
            due_date: self.due_date,
            frequency: self.frequency.clone(),
            linked_account_id: self.linked_account_id.clone(),
            reminder_days: Some(self.reminder_days),
        };
        as_new.validate()
    }
}

/// Database model for bills
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
#[diesel(table_name = crate::schema::bills)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BillDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub amount: String,
    pub category: String,
    pub due_date: NaiveDate,
    pub frequency: String,
    pub status: String,
    pub paid_date: Option<NaiveDateTime>,
    pub linked_account_id: Option<String>,
    pub reminder_days: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<BillDB> for Bill {
    fn from(db: BillDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            amount: parse_decimal(&db.amount, "bill.amount"),
            category: db.category,
            due_date: db.due_date,
            frequency: db.frequency,
            status: db.status,
            paid_date: db.paid_date,
            linked_account_id: db.linked_account_id,
            reminder_days: db.reminder_days,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewBill> for BillDB {
    fn from(domain: NewBill) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: String::new(), // Filled by the repository from the caller
            name: domain.name,
            amount: domain.amount.to_string(),
            category: domain.category,
            due_date: domain.due_date,
            frequency: domain.frequency,
            status: BILL_STATUS_PENDING.to_string(),
            paid_date: None,
            linked_account_id: domain.linked_account_id,
            reminder_days: domain.reminder_days.unwrap_or(DEFAULT_REMINDER_DAYS),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn steps_each_frequency() {
        let due = date(2024, 1, 15);
        assert_eq!(
            advance_due_date(BILL_FREQUENCY_WEEKLY, due),
            date(2024, 1, 22)
        );
        assert_eq!(
            advance_due_date(BILL_FREQUENCY_BIWEEKLY, due),
            date(2024, 1, 29)
        );
        assert_eq!(
            advance_due_date(BILL_FREQUENCY_MONTHLY, due),
            date(2024, 2, 15)
        );
        assert_eq!(
            advance_due_date(BILL_FREQUENCY_QUARTERLY, due),
            date(2024, 4, 15)
        );
        assert_eq!(
            advance_due_date(BILL_FREQUENCY_YEARLY, due),
            date(2025, 1, 15)
        );
    }

    #[test]
    fn month_add_clamps_to_month_end() {
        assert_eq!(
            advance_due_date(BILL_FREQUENCY_MONTHLY, date(2024, 1, 31)),
            date(2024, 2, 29)
        );
    }
}
