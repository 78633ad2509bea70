use log::{debug, error};
use std::sync::Arc;

use crate::errors::Result;
use crate::notifications::PushNotifierTrait;

use super::bills_model::{Bill, BillUpdate, NewBill};
use super::bills_traits::{BillRepositoryTrait, BillServiceTrait};

/// Service for managing bills
pub struct BillService {
    repository: Arc<dyn BillRepositoryTrait>,
    notifier: Arc<dyn PushNotifierTrait>,
}

impl BillService {
    /// Creates a new BillService instance
    pub fn new(repository: Arc<dyn BillRepositoryTrait>, notifier: Arc<dyn PushNotifierTrait>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    async fn push(&self, user_id: &str, event: &str, bill: &Bill) {
        let payload = serde_json::json!({
            "billId": bill.id,
            "name": bill.name,
            "amount": bill.amount,
            "dueDate": bill.due_date,
            "status": bill.status,
        });
        // Fire-and-forget: a push failure never fails the mutation.
        if let Err(e) = self.notifier.notify(user_id, event, payload).await {
            error!("Push notification '{}' failed: {}", event, e);
        }
    }
}

#[async_trait::async_trait]
impl BillServiceTrait for BillService {
    fn get_bill(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        self.repository.get_by_id(user_id, bill_id)
    }

    fn get_bills(&self, user_id: &str) -> Result<Vec<Bill>> {
        self.repository.list(user_id)
    }

    async fn create_bill(&self, user_id: &str, new_bill: NewBill) -> Result<Bill> {
        let created = self.repository.create(user_id, new_bill).await?;
        self.push(user_id, "bill:created", &created).await;
        Ok(created)
    }

    async fn update_bill(&self, user_id: &str, bill_update: BillUpdate) -> Result<Bill> {
        let updated = self.repository.update(user_id, bill_update).await?;
        self.push(user_id, "bill:updated", &updated).await;
        Ok(updated)
    }

    async fn delete_bill(&self, user_id: &str, bill_id: &str) -> Result<usize> {
        self.repository.delete(user_id, bill_id).await
    }

    /// Pays a bill; for recurring frequencies the repository spawns the next
    /// occurrence inside the same write.
    async fn pay_bill(&self, user_id: &str, bill_id: &str) -> Result<Bill> {
        let (paid, successor) = self.repository.pay(user_id, bill_id).await?;
        if let Some(next) = &successor {
            debug!(
                "Bill '{}' paid, next occurrence due {}",
                paid.name, next.due_date
            );
        }
        self.push(user_id, "bill:paid", &paid).await;
        Ok(paid)
    }
}
