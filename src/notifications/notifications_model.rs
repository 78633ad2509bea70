use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::notifications::notifications_constants::PRIORITY_MEDIUM;

/// Domain model representing a notification record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub priority: String,
    pub data: Option<serde_json::Value>,
    pub source_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub notification_type: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: Option<String>,
    pub data: Option<serde_json::Value>,
    /// Id of the entity that produced the notification, when there is one.
    /// Used by the recurrence tick to avoid duplicate same-day reminders.
    pub source_id: Option<String>,
}

/// Database model for notifications
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub priority: String,
    pub data: Option<String>,
    pub source_id: Option<String>,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        let data = db
            .data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());
        Self {
            id: db.id,
            user_id: db.user_id,
            notification_type: db.notification_type,
            title: db.title,
            message: db.message,
            is_read: db.is_read,
            priority: db.priority,
            data,
            source_id: db.source_id,
            created_at: db.created_at,
        }
    }
}

impl From<NewNotification> for NotificationDB {
    fn from(domain: NewNotification) -> Self {
        Self {
            id: String::new(), // Filled by the repository
            user_id: String::new(),
            notification_type: domain.notification_type,
            title: domain.title,
            message: domain.message,
            is_read: false,
            priority: domain
                .priority
                .unwrap_or_else(|| PRIORITY_MEDIUM.to_string()),
            data: domain.data.map(|v| v.to_string()),
            source_id: domain.source_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
