use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;

use super::dashboard_model::{aggregate, previous_month_start, DashboardData, TREND_WINDOW_DAYS};
use super::dashboard_traits::DashboardServiceTrait;

/// Service computing the aggregated dashboard snapshot
pub struct DashboardService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl DashboardService {
    /// Creates a new DashboardService instance with injected dependencies
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            transaction_repository,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_dashboard_snapshot(&self, user_id: &str, as_of: NaiveDate) -> Result<DashboardData> {
        // Active accounts flagged for inclusion make up the total balance.
        let total_balance: Decimal = self
            .account_repository
            .list(user_id, Some(true))?
            .iter()
            .filter(|account| account.include_in_total)
            .map(|account| account.balance)
            .sum();

        // One scan covers the month-over-month comparison and the trend.
        let trend_start = as_of - Duration::days(TREND_WINDOW_DAYS - 1);
        let window_start = previous_month_start(as_of).min(trend_start);
        let transactions = self
            .transaction_repository
            .list_in_range(user_id, window_start, as_of)?;

        Ok(aggregate(&transactions, as_of, total_balance))
    }
}
