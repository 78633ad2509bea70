/// Budget periods
pub const PERIOD_WEEKLY: &str = "WEEKLY";
pub const PERIOD_MONTHLY: &str = "MONTHLY";
pub const PERIOD_YEARLY: &str = "YEARLY";

pub const BUDGET_PERIODS: [&str; 3] = [PERIOD_WEEKLY, PERIOD_MONTHLY, PERIOD_YEARLY];

/// Derived budget statuses
pub const BUDGET_STATUS_ON_TRACK: &str = "ON_TRACK";
pub const BUDGET_STATUS_WARNING: &str = "WARNING";
pub const BUDGET_STATUS_EXCEEDED: &str = "EXCEEDED";

/// Alert threshold applied when none is given, in percent
pub const DEFAULT_ALERT_THRESHOLD: i32 = 80;
