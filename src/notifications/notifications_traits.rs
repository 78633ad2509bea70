use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::info;

use crate::errors::Result;
use crate::notifications::notifications_model::{NewNotification, Notification};

/// Trait for notification repository operations
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>>;
    fn unread_count(&self, user_id: &str) -> Result<i64>;
    /// Whether a notification of the given type for the given source entity
    /// has been created since `since`.
    fn exists_since(
        &self,
        user_id: &str,
        notification_type: &str,
        source_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool>;
    async fn create(&self, user_id: &str, notification: NewNotification) -> Result<Notification>;
    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification>;
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;
    async fn clear(&self, user_id: &str) -> Result<usize>;
}

/// Trait for notification service operations
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    fn get_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>>;
    fn get_unread_count(&self, user_id: &str) -> Result<i64>;
    fn has_recent(
        &self,
        user_id: &str,
        notification_type: &str,
        source_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool>;
    /// Stores the notification and forwards it to the push collaborator.
    async fn emit(&self, user_id: &str, notification: NewNotification) -> Result<Notification>;
    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification>;
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;
    async fn clear_notifications(&self, user_id: &str) -> Result<usize>;
}

/// Seam to the external push-notification collaborator. Delivery is
/// fire-and-forget: a failure here must never fail the mutation that
/// produced the event.
#[async_trait]
pub trait PushNotifierTrait: Send + Sync {
    async fn notify(&self, user_id: &str, event: &str, payload: serde_json::Value) -> Result<()>;
}

/// Default notifier that only logs the event
pub struct LogPushNotifier;

#[async_trait]
impl PushNotifierTrait for LogPushNotifier {
    async fn notify(&self, user_id: &str, event: &str, payload: serde_json::Value) -> Result<()> {
        info!("push[{}] {}: {}", user_id, event, payload);
        Ok(())
    }
}
