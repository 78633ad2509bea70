use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::transactions::{FREQUENCY_DAILY, FREQUENCY_WEEKLY, FREQUENCY_YEARLY};

/// Advances a recurring transaction's schedule by one frequency step.
/// Month-based steps are calendar-aware (Jan 31 + 1 month clamps to the end
/// of February). An unknown frequency falls back to monthly.
pub fn advance_next_date(frequency: &str, next_date: NaiveDate) -> NaiveDate {
    match frequency {
        FREQUENCY_DAILY => next_date + Duration::days(1),
        FREQUENCY_WEEKLY => next_date + Duration::days(7),
        FREQUENCY_YEARLY => next_date + Months::new(12),
        _ => next_date + Months::new(1),
    }
}

/// Outcome of one daily scheduler tick. Failures are counted, never fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceTickSummary {
    pub processed_transactions: u32,
    pub failed_transactions: u32,
    pub processed_bills: u32,
    pub failed_bills: u32,
}
