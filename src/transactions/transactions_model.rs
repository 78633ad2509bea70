use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::transactions_constants::{
    RECURRING_FREQUENCIES, TRANSACTION_TYPES, TRANSACTION_TYPE_EXPENSE, TRANSACTION_TYPE_INCOME,
};
use crate::utils::parse_decimal;
use crate::{errors::ValidationError, Error, Result};

/// Signed delta a transaction applies to its account balance.
///
/// Income adds, expense subtracts. Transfers are modeled as a single ledger
/// entry and contribute zero; a double-entry pair debiting one account and
/// crediting another is a known limitation of this design.
pub fn signed_effect(transaction_type: &str, amount: Decimal) -> Decimal {
    match transaction_type {
        TRANSACTION_TYPE_INCOME => amount,
        TRANSACTION_TYPE_EXPENSE => -amount,
        _ => Decimal::ZERO,
    }
}

/// Schedule attached to a recurring transaction template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    pub frequency: String,
    pub next_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Domain model representing a ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_rule: Option<RecurringRule>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_rule: Option<RecurringRule>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction amount must be greater than zero".to_string(),
            )));
        }
        if !TRANSACTION_TYPES.contains(&self.transaction_type.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type: {}",
                self.transaction_type
            ))));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        if self.is_recurring {
            match &self.recurring_rule {
                None => {
                    return Err(Error::Validation(ValidationError::MissingField(
                        "recurringRule".to_string(),
                    )))
                }
                Some(rule) if !RECURRING_FREQUENCIES.contains(&rule.frequency.as_str()) => {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Unknown recurring frequency: {}",
                        rule.frequency
                    ))));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_rule: Option<RecurringRule>,
}

impl TransactionUpdate {
    /// Validates the transaction update data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        let as_new = NewTransaction {
            id: None,
            account_id: self.account_id.clone(),
            transaction_type: self.transaction_type.clone(),
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.date,
            is_recurring: self.is_recurring,
            recurring_rule: self.recurring_rule.clone(),
        };
        as_new.validate()
    }
}

/// Search filters for transaction listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Slim expense row used by the budget and dashboard aggregations
#[derive(Debug, Clone, Queryable)]
pub struct ExpenseRow {
    pub category: String,
    pub date: NaiveDate,
    pub amount: String,
}

impl ExpenseRow {
    pub fn amount_decimal(&self) -> Decimal {
        parse_decimal(&self.amount, "transaction.amount")
    }
}

/// Database model for transactions
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub recurring_next_date: Option<NaiveDate>,
    pub recurring_end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let recurring_rule = match (db.recurring_frequency, db.recurring_next_date) {
            (Some(frequency), Some(next_date)) => Some(RecurringRule {
                frequency,
                next_date,
                end_date: db.recurring_end_date,
            }),
            _ => None,
        };
        Self {
            id: db.id,
            user_id: db.user_id,
            account_id: db.account_id,
            transaction_type: db.transaction_type,
            amount: parse_decimal(&db.amount, "transaction.amount"),
            category: db.category,
            description: db.description,
            date: db.date,
            is_recurring: db.is_recurring,
            recurring_rule,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let (frequency, next_date, end_date) = match domain.recurring_rule {
            Some(rule) => (Some(rule.frequency), Some(rule.next_date), rule.end_date),
            None => (None, None, None),
        };
        Self {
            id: domain.id.unwrap_or_default(),
            user_id: String::new(), // Filled by the repository from the caller
            account_id: domain.account_id,
            transaction_type: domain.transaction_type,
            amount: domain.amount.to_string(),
            category: domain.category,
            description: domain.description,
            date: domain.date,
            is_recurring: domain.is_recurring,
            recurring_frequency: frequency,
            recurring_next_date: next_date,
            recurring_end_date: end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::transactions_constants::*;
    use rust_decimal_macros::dec;

    #[test]
    fn effect_signs_follow_transaction_type() {
        assert_eq!(signed_effect(TRANSACTION_TYPE_INCOME, dec!(100)), dec!(100));
        assert_eq!(
            signed_effect(TRANSACTION_TYPE_EXPENSE, dec!(100)),
            dec!(-100)
        );
        assert_eq!(
            signed_effect(TRANSACTION_TYPE_TRANSFER, dec!(100)),
            Decimal::ZERO
        );
    }

    #[test]
    fn reverse_is_the_inverse_of_apply() {
        let balance = dec!(1000);
        for tx_type in TRANSACTION_TYPES {
            let applied = balance + signed_effect(tx_type, dec!(150.25));
            let reversed = applied - signed_effect(tx_type, dec!(150.25));
            assert_eq!(reversed, balance);
        }
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let tx = NewTransaction {
            id: None,
            account_id: "acc-1".to_string(),
            transaction_type: TRANSACTION_TYPE_EXPENSE.to_string(),
            amount: Decimal::ZERO,
            category: "Food".to_string(),
            description: None,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            is_recurring: false,
            recurring_rule: None,
        };
        assert!(tx.validate().is_err());
    }

    #[test]
    fn recurring_flag_requires_a_rule() {
        let tx = NewTransaction {
            id: None,
            account_id: "acc-1".to_string(),
            transaction_type: TRANSACTION_TYPE_EXPENSE.to_string(),
            amount: dec!(25),
            category: "Subscriptions".to_string(),
            description: None,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            is_recurring: true,
            recurring_rule: None,
        };
        assert!(tx.validate().is_err());
    }
}
