/// Notification event kinds produced by the engines
pub const NOTIFICATION_TYPE_RECURRING_TRANSACTION: &str = "RECURRING_TRANSACTION_POSTED";
pub const NOTIFICATION_TYPE_BILL_REMINDER: &str = "BILL_REMINDER";
pub const NOTIFICATION_TYPE_BILL_OVERDUE: &str = "BILL_OVERDUE";
pub const NOTIFICATION_TYPE_GOAL_COMPLETED: &str = "GOAL_COMPLETED";

/// Notification priorities
pub const PRIORITY_LOW: &str = "LOW";
pub const PRIORITY_MEDIUM: &str = "MEDIUM";
pub const PRIORITY_HIGH: &str = "HIGH";
