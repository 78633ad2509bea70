// Module declarations
pub(crate) mod notifications_constants;
pub(crate) mod notifications_model;
pub(crate) mod notifications_repository;
pub(crate) mod notifications_service;
pub(crate) mod notifications_traits;

// Re-export the public interface
pub use notifications_constants::*;
pub use notifications_model::{NewNotification, Notification, NotificationDB};
pub use notifications_repository::NotificationRepository;
pub use notifications_service::NotificationService;
pub use notifications_traits::{
    LogPushNotifier, NotificationRepositoryTrait, NotificationServiceTrait, PushNotifierTrait,
};
