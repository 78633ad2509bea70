use chrono::NaiveDateTime;
use log::error;
use std::sync::Arc;

use crate::errors::Result;

use super::notifications_model::{NewNotification, Notification};
use super::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait, PushNotifierTrait,
};

/// Service for managing notification records and pushing them out
pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
    notifier: Arc<dyn PushNotifierTrait>,
}

impl NotificationService {
    /// Creates a new NotificationService instance
    pub fn new(
        repository: Arc<dyn NotificationRepositoryTrait>,
        notifier: Arc<dyn PushNotifierTrait>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }
}

#[async_trait::async_trait]
impl NotificationServiceTrait for NotificationService {
    fn get_notifications(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        self.repository.list(user_id, unread_only)
    }

    fn get_unread_count(&self, user_id: &str) -> Result<i64> {
        self.repository.unread_count(user_id)
    }

    fn has_recent(
        &self,
        user_id: &str,
        notification_type: &str,
        source_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool> {
        self.repository
            .exists_since(user_id, notification_type, source_id, since)
    }

    /// Stores the notification, then forwards it to the push collaborator.
    /// Push failures are logged and swallowed.
    async fn emit(&self, user_id: &str, notification: NewNotification) -> Result<Notification> {
        let stored = self.repository.create(user_id, notification).await?;

        let payload = serde_json::json!({
            "notificationId": stored.id,
            "title": stored.title,
            "message": stored.message,
            "priority": stored.priority,
            "data": stored.data,
        });
        if let Err(e) = self
            .notifier
            .notify(user_id, &stored.notification_type, payload)
            .await
        {
            error!(
                "Push delivery for notification {} failed: {}",
                stored.id, e
            );
        }

        Ok(stored)
    }

    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
        self.repository.mark_read(user_id, notification_id).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.repository.mark_all_read(user_id).await
    }

    async fn clear_notifications(&self, user_id: &str) -> Result<usize> {
        self.repository.clear(user_id).await
    }
}
