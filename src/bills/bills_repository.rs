use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::bills::bills_constants::*;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::bills;
use crate::Error;

use super::bills_model::{advance_due_date, Bill, BillDB, BillUpdate, NewBill};
use super::bills_traits::BillRepositoryTrait;

/// Repository for managing bill data in the database
pub struct BillRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BillRepository {
    /// Creates a new BillRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_owned(conn: &mut SqliteConnection, owner_id: &str, bill_id: &str) -> Result<BillDB> {
        bills::table
            .filter(bills::id.eq(bill_id))
            .filter(bills::user_id.eq(owner_id))
            .first::<BillDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Bill with id {} not found", bill_id))
                }
                other => other.into(),
            })
    }
}

#[async_trait]
impl BillRepositoryTrait for BillRepository {
    /// Retrieves a bill by its ID, scoped to the owner
    fn get_by_id(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_owned(&mut conn, user_id, bill_id).map(Bill::from)
    }

    /// Lists the owner's bills, soonest due first
    fn list(&self, user_id: &str) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;

        bills::table
            .filter(bills::user_id.eq(user_id))
            .order(bills::due_date.asc())
            .load::<BillDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Bill::from).collect())
            .map_err(Error::from)
    }

    fn list_pending_due_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;

        bills::table
            .filter(bills::status.eq(BILL_STATUS_PENDING))
            .filter(bills::due_date.ge(from))
            .filter(bills::due_date.le(to))
            .order(bills::due_date.asc())
            .load::<BillDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Bill::from).collect())
            .map_err(Error::from)
    }

    fn list_pending_overdue(&self, as_of: NaiveDate) -> Result<Vec<Bill>> {
        let mut conn = get_connection(&self.pool)?;

        bills::table
            .filter(bills::status.eq(BILL_STATUS_PENDING))
            .filter(bills::due_date.lt(as_of))
            .order(bills::due_date.asc())
            .load::<BillDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Bill::from).collect())
            .map_err(Error::from)
    }

    /// Creates a new bill owned by the given user
    async fn create(&self, user_id: &str, new_bill: NewBill) -> Result<Bill> {
        new_bill.validate()?;

        let mut bill_db: BillDB = new_bill.into();
        if bill_db.id.is_empty() {
            bill_db.id = Uuid::new_v4().to_string();
        }
        bill_db.user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(bills::table)
                    .values(&bill_db)
                    .execute(conn)?;
                Ok(Bill::from(bill_db))
            })
            .await
    }

    /// Updates an existing bill's editable fields
    async fn update(&self, user_id: &str, bill_update: BillUpdate) -> Result<Bill> {
        bill_update.validate()?;

        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &bill_update.id)?;

                existing.name = bill_update.name;
                existing.amount = bill_update.amount.to_string();
                existing.category = bill_update.category;
                existing.due_date = bill_update.due_date;
                existing.frequency = bill_update.frequency;
                existing.linked_account_id = bill_update.linked_account_id;
                existing.reminder_days = bill_update.reminder_days;
                existing.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(bills::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                Ok(Bill::from(existing))
            })
            .await
    }

    /// Deletes a bill by its ID
    async fn delete(&self, user_id: &str, bill_id: &str) -> Result<usize> {
        let owner_id = user_id.to_string();
        let target_id = bill_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    bills::table
                        .filter(bills::id.eq(&target_id))
                        .filter(bills::user_id.eq(&owner_id)),
                )
                .execute(conn)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Bill with id {} not found",
                        target_id
                    )));
                }

                Ok(affected)
            })
            .await
    }

    /// Marks a bill paid; a recurring frequency spawns exactly one pending
    /// successor with the due date advanced, all other fields copied.
    async fn pay(&self, user_id: &str, bill_id: &str) -> Result<(Bill, Option<Bill>)> {
        let owner_id = user_id.to_string();
        let target_id = bill_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &target_id)?;

                if existing.status == BILL_STATUS_PAID {
                    return Err(Error::Conflict(format!(
                        "Bill {} has already been paid",
                        target_id
                    )));
                }

                let now = chrono::Utc::now().naive_utc();
                existing.status = BILL_STATUS_PAID.to_string();
                existing.paid_date = Some(now);
                existing.updated_at = now;

                diesel::update(bills::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                let successor = if existing.frequency != BILL_FREQUENCY_ONCE {
                    let clone = BillDB {
                        id: Uuid::new_v4().to_string(),
                        user_id: existing.user_id.clone(),
                        name: existing.name.clone(),
                        amount: existing.amount.clone(),
                        category: existing.category.clone(),
                        due_date: advance_due_date(&existing.frequency, existing.due_date),
                        frequency: existing.frequency.clone(),
                        status: BILL_STATUS_PENDING.to_string(),
                        paid_date: None,
                        linked_account_id: existing.linked_account_id.clone(),
                        reminder_days: existing.reminder_days,
                        created_at: now,
                        updated_at: now,
                    };
                    diesel::insert_into(bills::table)
                        .values(&clone)
                        .execute(conn)?;
                    Some(Bill::from(clone))
                } else {
                    None
                };

                Ok((Bill::from(existing), successor))
            })
            .await
    }

    /// Transitions a pending bill to overdue
    async fn mark_overdue(&self, bill_id: &str) -> Result<bool> {
        let target_id = bill_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    bills::table
                        .filter(bills::id.eq(&target_id))
                        .filter(bills::status.eq(BILL_STATUS_PENDING)),
                )
                .set((
                    bills::status.eq(BILL_STATUS_OVERDUE),
                    bills::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .execute(conn)?;

                Ok(affected > 0)
            })
            .await
    }
}
