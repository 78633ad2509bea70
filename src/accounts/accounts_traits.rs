use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::accounts::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait for account repository operations. Every query is scoped to one
/// user; a row owned by someone else behaves exactly like a missing row.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account>;
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
    async fn create(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;
    async fn update(&self, user_id: &str, account_update: AccountUpdate) -> Result<Account>;
    async fn deactivate(&self, user_id: &str, account_id: &str) -> Result<Account>;
    async fn set_balance(
        &self,
        user_id: &str,
        account_id: &str,
        balance: Decimal,
    ) -> Result<Account>;
}

/// Trait for account service operations
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    fn get_account(&self, user_id: &str, account_id: &str) -> Result<Account>;
    fn get_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
    fn get_active_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
    async fn create_account(&self, user_id: &str, new_account: NewAccount) -> Result<Account>;
    async fn update_account(&self, user_id: &str, account_update: AccountUpdate)
        -> Result<Account>;
    async fn delete_account(&self, user_id: &str, account_id: &str) -> Result<Account>;
    async fn set_account_balance(
        &self,
        user_id: &str,
        account_id: &str,
        balance: Decimal,
    ) -> Result<Account>;
}
