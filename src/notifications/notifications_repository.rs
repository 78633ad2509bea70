use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::notifications;
use crate::Error;

use super::notifications_model::{NewNotification, Notification, NotificationDB};
use super::notifications_traits::NotificationRepositoryTrait;

/// Repository for managing notification data in the database
pub struct NotificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    /// Lists the user's notifications, newest first
    fn list(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .into_boxed();

        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }

        query
            .order(notifications::created_at.desc())
            .load::<NotificationDB>(&mut conn)
            .map(|rows| rows.into_iter().map(Notification::from).collect())
            .map_err(Error::from)
    }

    fn unread_count(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(Error::from)
    }

    fn exists_since(
        &self,
        user_id: &str,
        notification_type: &str,
        source_id: &str,
        since: NaiveDateTime,
    ) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::notification_type.eq(notification_type))
            .filter(notifications::source_id.eq(source_id))
            .filter(notifications::created_at.ge(since))
            .count()
            .get_result(&mut conn)?;

        Ok(count > 0)
    }

    /// Creates a new notification record
    async fn create(&self, user_id: &str, notification: NewNotification) -> Result<Notification> {
        let mut notification_db: NotificationDB = notification.into();
        notification_db.id = Uuid::new_v4().to_string();
        notification_db.user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(notifications::table)
                    .values(&notification_db)
                    .execute(conn)?;
                Ok(Notification::from(notification_db))
            })
            .await
    }

    /// Marks one notification as read
    async fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
        let owner_id = user_id.to_string();
        let target_id = notification_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    notifications::table
                        .filter(notifications::id.eq(&target_id))
                        .filter(notifications::user_id.eq(&owner_id)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)?;

                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Notification with id {} not found",
                        target_id
                    )));
                }

                notifications::table
                    .find(&target_id)
                    .first::<NotificationDB>(conn)
                    .map(Notification::from)
                    .map_err(Error::from)
            })
            .await
    }

    /// Marks all of the user's notifications as read
    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(&owner_id))
                        .filter(notifications::is_read.eq(false)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .map_err(Error::from)
            })
            .await
    }

    /// Deletes all of the user's notifications
    async fn clear(&self, user_id: &str) -> Result<usize> {
        let owner_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(notifications::table.filter(notifications::user_id.eq(&owner_id)))
                    .execute(conn)
                    .map_err(Error::from)
            })
            .await
    }
}
