use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    /// Retrieves an account by its ID
    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(user_id, account_id)
    }

    /// Lists all of the user's accounts
    fn get_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id, None)
    }

    /// Lists only active accounts
    fn get_active_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id, Some(true))
    }

    /// Creates a new account
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        debug!("Creating account '{}' for user {}", new_account.name, user_id);
        self.repository.create(user_id, new_account).await
    }

    /// Updates an existing account
    async fn update_account(
        &self,
        user_id: &str,
        account_update: AccountUpdate,
    ) -> Result<Account> {
        self.repository.update(user_id, account_update).await
    }

    /// Soft-deletes an account by marking it inactive
    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<Account> {
        self.repository.deactivate(user_id, account_id).await
    }

    /// Sets the balance directly, bypassing the transaction effect path
    async fn set_account_balance(
        &self,
        user_id: &str,
        account_id: &str,
        balance: Decimal,
    ) -> Result<Account> {
        self.repository.set_balance(user_id, account_id, balance).await
    }
}
