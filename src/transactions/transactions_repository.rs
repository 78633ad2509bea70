use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::{accounts, transactions};
use crate::transactions::transactions_constants::TRANSACTION_TYPE_EXPENSE;
use crate::utils::parse_decimal;
use crate::Error;

use super::transactions_model::{
    signed_effect, ExpenseRow, NewTransaction, Transaction, TransactionDB, TransactionFilter,
    TransactionUpdate,
};
use super::transactions_traits::TransactionRepositoryTrait;

/// Repository for managing transaction data and the coupled account balance
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_owned(
        conn: &mut SqliteConnection,
        owner_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionDB> {
        transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(owner_id))
            .first::<TransactionDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Transaction with id {} not found", transaction_id))
                }
                other => other.into(),
            })
    }

    /// Applies a signed delta to the owner's account balance. Runs inside the
    /// caller's writer-actor transaction so the balance never drifts from the
    /// transaction rows.
    fn adjust_balance(
        conn: &mut SqliteConnection,
        owner_id: &str,
        account_id: &str,
        delta: Decimal,
    ) -> Result<Decimal> {
        let balance_str: String = accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(owner_id))
            .select(accounts::balance)
            .first::<String>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Account with id {} not found", account_id))
                }
                other => other.into(),
            })?;

        let new_balance = parse_decimal(&balance_str, "account.balance") + delta;

        diesel::update(
            accounts::table
                .filter(accounts::id.eq(account_id))
                .filter(accounts::user_id.eq(owner_id)),
        )
        .set((
            accounts::balance.eq(new_balance.to_string()),
            accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .execute(conn)?;

        Ok(new_balance)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    /// Retrieves a transaction by its ID, scoped to the owner
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_owned(&mut conn, user_id, transaction_id).map(Transaction::from)
    }

    /// Searches the owner's transactions with optional filters
    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();

        if let Some(ref account_id) = filter.account_id {
            query = query.filter(transactions::account_id.eq(account_id));
        }
        if let Some(ref transaction_type) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(transaction_type));
        }
        if let Some(ref category) = filter.category {
            query = query.filter(transactions::category.eq(category));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transactions::date.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(transactions::date.le(to));
        }

        query
            .order(transactions::date.desc())
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(Error::from)
    }

    /// Lists the owner's transactions inside a date window
    fn list_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::date.ge(from))
            .filter(transactions::date.le(to))
            .order(transactions::date.asc())
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(Error::from)
    }

    /// Expense rows for the aggregation engines, one scan per window
    fn expenses_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExpenseRow>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::transaction_type.eq(TRANSACTION_TYPE_EXPENSE))
            .filter(transactions::date.ge(from))
            .filter(transactions::date.le(to))
            .select((
                transactions::category,
                transactions::date,
                transactions::amount,
            ))
            .load::<ExpenseRow>(&mut conn)
            .map_err(Error::from)
    }

    /// Recurring templates due on or before `as_of`
    fn find_due_recurring(&self, as_of: NaiveDate) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::is_recurring.eq(true))
            .filter(transactions::recurring_next_date.le(as_of))
            .filter(
                transactions::recurring_end_date
                    .is_null()
                    .or(transactions::recurring_end_date.ge(as_of)),
            )
            .order(transactions::recurring_next_date.asc())
            .load::<TransactionDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Transaction::from).collect())
            .map_err(Error::from)
    }

    /// Creates a transaction and applies its balance effect atomically
    async fn create(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;

        let mut transaction_db: TransactionDB = new_transaction.into();
        if transaction_db.id.is_empty() {
            transaction_db.id = Uuid::new_v4().to_string();
        }
        transaction_db.user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                // Reject before any mutation when the account is missing or
                // owned by someone else.
                accounts::table
                    .filter(accounts::id.eq(&transaction_db.account_id))
                    .filter(accounts::user_id.eq(&transaction_db.user_id))
                    .select(accounts::id)
                    .first::<String>(conn)
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => Error::NotFound(format!(
                            "Account with id {} not found",
                            transaction_db.account_id
                        )),
                        other => other.into(),
                    })?;

                diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .execute(conn)?;

                let effect = signed_effect(
                    &transaction_db.transaction_type,
                    parse_decimal(&transaction_db.amount, "transaction.amount"),
                );
                Self::adjust_balance(
                    conn,
                    &transaction_db.user_id,
                    &transaction_db.account_id,
                    effect,
                )?;

                Ok(Transaction::from(transaction_db))
            })
            .await
    }

    /// Updates a transaction: reverses the pre-update effect against the old
    /// account, applies the new effect against the (possibly different) new
    /// account, and persists the patch, all in one unit.
    async fn update(&self, user_id: &str, update: TransactionUpdate) -> Result<Transaction> {
        update.validate()?;

        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = Self::load_owned(conn, &owner_id, &update.id)?;

                let old_effect = signed_effect(
                    &existing.transaction_type,
                    parse_decimal(&existing.amount, "transaction.amount"),
                );
                Self::adjust_balance(conn, &owner_id, &existing.account_id, -old_effect)?;

                let new_effect = signed_effect(&update.transaction_type, update.amount);
                Self::adjust_balance(conn, &owner_id, &update.account_id, new_effect)?;

                let (frequency, next_date, end_date) = match &update.recurring_rule {
                    Some(rule) => (
                        Some(rule.frequency.clone()),
                        Some(rule.next_date),
                        rule.end_date,
                    ),
                    None => (None, None, None),
                };

                let patched = TransactionDB {
                    id: existing.id.clone(),
                    user_id: owner_id.clone(),
                    account_id: update.account_id.clone(),
                    transaction_type: update.transaction_type.clone(),
                    amount: update.amount.to_string(),
                    category: update.category.clone(),
                    description: update.description.clone(),
                    date: update.date,
                    is_recurring: update.is_recurring,
                    recurring_frequency: frequency,
                    recurring_next_date: next_date,
                    recurring_end_date: end_date,
                    created_at: existing.created_at,
                    updated_at: chrono::Utc::now().naive_utc(),
                };

                diesel::update(transactions::table.find(&patched.id))
                    .set(&patched)
                    .execute(conn)?;

                Ok(Transaction::from(patched))
            })
            .await
    }

    /// Deletes a transaction after reversing its balance effect
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let owner_id = user_id.to_string();
        let target_id = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = Self::load_owned(conn, &owner_id, &target_id)?;

                let effect = signed_effect(
                    &existing.transaction_type,
                    parse_decimal(&existing.amount, "transaction.amount"),
                );
                Self::adjust_balance(conn, &owner_id, &existing.account_id, -effect)?;

                diesel::delete(transactions::table.find(&existing.id)).execute(conn)?;

                Ok(Transaction::from(existing))
            })
            .await
    }

    /// Posts one occurrence of a recurring template and advances its schedule
    async fn post_recurring_occurrence(
        &self,
        template_id: &str,
        occurrence: NewTransaction,
        next_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<Transaction> {
        occurrence.validate()?;

        let template_id = template_id.to_string();
        self.writer
            .exec(move |conn| {
                let template = transactions::table
                    .find(&template_id)
                    .first::<TransactionDB>(conn)
                    .map_err(|e| match e {
                        diesel::result::Error::NotFound => Error::NotFound(format!(
                            "Recurring transaction {} not found",
                            template_id
                        )),
                        other => other.into(),
                    })?;

                // The next_date advance is the idempotence guard: a template
                // already advanced past as_of was posted by an earlier run.
                let due = template.is_recurring
                    && template
                        .recurring_next_date
                        .map(|d| d <= as_of)
                        .unwrap_or(false);
                if !due {
                    return Err(Error::Conflict(format!(
                        "Recurring transaction {} is not due on {}",
                        template_id, as_of
                    )));
                }

                let mut occurrence_db: TransactionDB = occurrence.into();
                occurrence_db.id = Uuid::new_v4().to_string();
                occurrence_db.user_id = template.user_id.clone();

                diesel::insert_into(transactions::table)
                    .values(&occurrence_db)
                    .execute(conn)?;

                let effect = signed_effect(
                    &occurrence_db.transaction_type,
                    parse_decimal(&occurrence_db.amount, "transaction.amount"),
                );
                Self::adjust_balance(
                    conn,
                    &template.user_id,
                    &occurrence_db.account_id,
                    effect,
                )?;

                diesel::update(transactions::table.find(&template.id))
                    .set((
                        transactions::recurring_next_date.eq(next_date),
                        transactions::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;

                Ok(Transaction::from(occurrence_db))
            })
            .await
    }
}
