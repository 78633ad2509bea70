/// Transaction types
///
/// Each constant represents one of the supported ledger entry kinds.
/// Money coming in. Increases the account balance.
pub const TRANSACTION_TYPE_INCOME: &str = "INCOME";

/// Money going out. Decreases the account balance.
pub const TRANSACTION_TYPE_EXPENSE: &str = "EXPENSE";

/// Movement between accounts, recorded as a single entry with no balance
/// effect on the referenced account.
pub const TRANSACTION_TYPE_TRANSFER: &str = "TRANSFER";

/// All supported transaction types
pub const TRANSACTION_TYPES: [&str; 3] = [
    TRANSACTION_TYPE_INCOME,
    TRANSACTION_TYPE_EXPENSE,
    TRANSACTION_TYPE_TRANSFER,
];

/// Recurring frequencies for transactions
pub const FREQUENCY_DAILY: &str = "DAILY";
pub const FREQUENCY_WEEKLY: &str = "WEEKLY";
pub const FREQUENCY_MONTHLY: &str = "MONTHLY";
pub const FREQUENCY_YEARLY: &str = "YEARLY";

pub const RECURRING_FREQUENCIES: [&str; 4] = [
    FREQUENCY_DAILY,
    FREQUENCY_WEEKLY,
    FREQUENCY_MONTHLY,
    FREQUENCY_YEARLY,
];
