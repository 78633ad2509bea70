/// Goal priorities
pub const GOAL_PRIORITY_LOW: &str = "LOW";
pub const GOAL_PRIORITY_MEDIUM: &str = "MEDIUM";
pub const GOAL_PRIORITY_HIGH: &str = "HIGH";

pub const GOAL_PRIORITIES: [&str; 3] = [GOAL_PRIORITY_LOW, GOAL_PRIORITY_MEDIUM, GOAL_PRIORITY_HIGH];

/// Derived pace statuses, never persisted
pub const GOAL_STATUS_COMPLETED: &str = "completed";
pub const GOAL_STATUS_ON_TRACK: &str = "onTrack";
pub const GOAL_STATUS_BEHIND: &str = "behind";
pub const GOAL_STATUS_AT_RISK: &str = "atRisk";

/// Pace thresholds relative to the expected progress for the elapsed time
pub const ON_TRACK_RATIO: f64 = 0.9;
pub const BEHIND_RATIO: f64 = 0.5;
