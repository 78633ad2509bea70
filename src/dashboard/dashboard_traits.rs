use chrono::NaiveDate;

use crate::dashboard::dashboard_model::DashboardData;
use crate::errors::Result;

/// Trait for dashboard aggregation operations
pub trait DashboardServiceTrait: Send + Sync {
    /// Computes the full dashboard snapshot for a user as of the given date.
    /// Pure read: two identical calls without writes in between return the
    /// same snapshot.
    fn get_dashboard_snapshot(&self, user_id: &str, as_of: NaiveDate) -> Result<DashboardData>;
}
