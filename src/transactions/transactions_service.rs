use log::{debug, error};
use std::sync::Arc;

use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::notifications::PushNotifierTrait;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};

/// Service for managing transactions and the coupled balance mutations
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    notifier: Arc<dyn PushNotifierTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance with injected dependencies
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        notifier: Arc<dyn PushNotifierTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
            notifier,
        }
    }

    async fn push(&self, user_id: &str, event: &str, transaction: &Transaction) {
        let payload = serde_json::json!({
            "transactionId": transaction.id,
            "accountId": transaction.account_id,
            "type": transaction.transaction_type,
            "amount": transaction.amount,
        });
        // Fire-and-forget: a push failure never fails the mutation.
        if let Err(e) = self.notifier.notify(user_id, event, payload).await {
            error!("Push notification '{}' failed: {}", event, e);
        }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(user_id, transaction_id)
    }

    /// Searches transactions with optional filters
    fn search_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.repository.search(user_id, filter)
    }

    /// Creates a transaction; the account balance moves in the same unit
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        // Ownership check before any mutation.
        self.account_repository
            .get_by_id(user_id, &new_transaction.account_id)?;

        debug!(
            "Creating {} transaction of {} for user {}",
            new_transaction.transaction_type, new_transaction.amount, user_id
        );
        let created = self.repository.create(user_id, new_transaction).await?;
        self.push(user_id, "transaction:created", &created).await;
        Ok(created)
    }

    /// Updates a transaction; old effect reversed, new effect applied
    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        update.validate()?;
        self.account_repository
            .get_by_id(user_id, &update.account_id)?;

        let updated = self.repository.update(user_id, update).await?;
        self.push(user_id, "transaction:updated", &updated).await;
        Ok(updated)
    }

    /// Deletes a transaction after reversing its balance effect
    async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Transaction> {
        let deleted = self.repository.delete(user_id, transaction_id).await?;
        self.push(user_id, "transaction:deleted", &deleted).await;
        Ok(deleted)
    }
}
