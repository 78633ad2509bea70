use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::accounts;
use crate::Error;

use super::accounts_model::{Account, AccountDB, AccountUpdate, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_owned(
        conn: &mut SqliteConnection,
        owner_id: &str,
        account_id: &str,
    ) -> Result<AccountDB> {
        accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(owner_id))
            .first::<AccountDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Account with id {} not found", account_id))
                }
                other => other.into(),
            })
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    /// Retrieves an account by its ID, scoped to the owner
    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_owned(&mut conn, user_id, account_id).map(Account::from)
    }

    /// Lists the owner's accounts, optionally filtering by active status
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(active));
        }

        query
            .order((accounts::is_active.desc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)
            .map(|results| results.into_iter().map(Account::from).collect())
            .map_err(Error::from)
    }

    /// Creates a new account owned by the given user
    async fn create(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        let mut account_db: AccountDB = new_account.into();
        if account_db.id.is_empty() {
            account_db.id = Uuid::new_v4().to_string();
        }
        account_db.user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .execute(conn)?;
                Ok(Account::from(account_db))
            })
            .await
    }

    /// Updates an existing account (name, type, flags; never the balance)
    async fn update(&self, user_id: &str, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;

        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut existing = Self::load_owned(conn, &owner_id, &account_update.id)?;

                existing.name = account_update.name;
                existing.account_type = account_update.account_type;
                existing.include_in_total = account_update.include_in_total;
                existing.is_active = account_update.is_active;
                existing.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(accounts::table.find(&existing.id))
                    .set(&existing)
                    .execute(conn)?;

                Ok(Account::from(existing))
            })
            .await
    }

    /// Soft-deletes an account. Historical transactions keep referencing it.
    async fn deactivate(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let owner_id = user_id.to_string();
        let target_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = Self::load_owned(conn, &owner_id, &target_id)?;

                diesel::update(accounts::table.find(&existing.id))
                    .set((
                        accounts::is_active.eq(false),
                        accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;

                Self::load_owned(conn, &owner_id, &target_id).map(Account::from)
            })
            .await
    }

    /// Administrative balance set; normal mutation goes through the
    /// transaction write path.
    async fn set_balance(
        &self,
        user_id: &str,
        account_id: &str,
        balance: Decimal,
    ) -> Result<Account> {
        let owner_id = user_id.to_string();
        let target_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = Self::load_owned(conn, &owner_id, &target_id)?;

                diesel::update(accounts::table.find(&existing.id))
                    .set((
                        accounts::balance.eq(balance.to_string()),
                        accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;

                Self::load_owned(conn, &owner_id, &target_id).map(Account::from)
            })
            .await
    }
}
