/// Bill frequencies
pub const BILL_FREQUENCY_ONCE: &str = "ONCE";
pub const BILL_FREQUENCY_WEEKLY: &str = "WEEKLY";
pub const BILL_FREQUENCY_BIWEEKLY: &str = "BIWEEKLY";
pub const BILL_FREQUENCY_MONTHLY: &str = "MONTHLY";
pub const BILL_FREQUENCY_QUARTERLY: &str = "QUARTERLY";
pub const BILL_FREQUENCY_YEARLY: &str = "YEARLY";

pub const BILL_FREQUENCIES: [&str; 6] = [
    BILL_FREQUENCY_ONCE,
    BILL_FREQUENCY_WEEKLY,
    BILL_FREQUENCY_BIWEEKLY,
    BILL_FREQUENCY_MONTHLY,
    BILL_FREQUENCY_QUARTERLY,
    BILL_FREQUENCY_YEARLY,
];

/// Bill statuses. Paying a pending or overdue bill moves it to PAID and, for
/// recurring frequencies, spawns the next PENDING occurrence.
pub const BILL_STATUS_PENDING: &str = "PENDING";
pub const BILL_STATUS_PAID: &str = "PAID";
pub const BILL_STATUS_OVERDUE: &str = "OVERDUE";

/// Days before the due date a reminder fires, when none is set on the bill
pub const DEFAULT_REMINDER_DAYS: i32 = 3;
