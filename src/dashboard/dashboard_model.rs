use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::transactions::{Transaction, TRANSACTION_TYPE_EXPENSE, TRANSACTION_TYPE_INCOME};

/// How many trailing days the daily flow chart covers, today included
pub const TREND_WINDOW_DAYS: i64 = 30;

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Expense total for one category within the current month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: String,
    pub amount: Decimal,
}

/// Income and expense totals for one day of the trend window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Aggregated snapshot served to the dashboard, computed fresh per request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub as_of: NaiveDate,
    pub total_balance: Decimal,
    pub current_month: MonthlyFlow,
    pub previous_month: MonthlyFlow,
    /// Month-over-month change in percent; None when the previous month had
    /// no flow to compare against.
    pub income_change_percent: Option<Decimal>,
    pub expense_change_percent: Option<Decimal>,
    pub spending_by_category: Vec<CategorySpending>,
    pub daily_trend: Vec<DailyFlow>,
}

pub(crate) fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub(crate) fn previous_month_start(date: NaiveDate) -> NaiveDate {
    month_start(month_start(date) - Duration::days(1))
}

pub(crate) fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some(((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(1))
}

/// Folds one pass over the window's transactions into the monthly, category
/// and daily aggregates.
pub(crate) fn aggregate(
    transactions: &[Transaction],
    as_of: NaiveDate,
    total_balance: Decimal,
) -> DashboardData {
    let current_start = month_start(as_of);
    let previous_start = previous_month_start(as_of);
    let trend_start = as_of - Duration::days(TREND_WINDOW_DAYS - 1);

    let mut current_month = MonthlyFlow::default();
    let mut previous_month = MonthlyFlow::default();
    let mut by_category: HashMap<String, Decimal> = HashMap::new();
    let mut by_day: HashMap<NaiveDate, (Decimal, Decimal)> = HashMap::new();

    for tx in transactions {
        let (is_income, is_expense) = (
            tx.transaction_type == TRANSACTION_TYPE_INCOME,
            tx.transaction_type == TRANSACTION_TYPE_EXPENSE,
        );
        if !is_income && !is_expense {
            continue;
        }

        let bucket = if tx.date >= current_start && tx.date <= as_of {
            Some(&mut current_month)
        } else if tx.date >= previous_start && tx.date < current_start {
            Some(&mut previous_month)
        } else {
            None
        };
        if let Some(flow) = bucket {
            if is_income {
                flow.income += tx.amount;
            } else {
                flow.expense += tx.amount;
            }
        }

        if is_expense && tx.date >= current_start && tx.date <= as_of {
            *by_category.entry(tx.category.clone()).or_default() += tx.amount;
        }

        if tx.date >= trend_start && tx.date <= as_of {
            let day = by_day.entry(tx.date).or_default();
            if is_income {
                day.0 += tx.amount;
            } else {
                day.1 += tx.amount;
            }
        }
    }

    current_month.net = current_month.income - current_month.expense;
    previous_month.net = previous_month.income - previous_month.expense;

    let mut spending_by_category: Vec<CategorySpending> = by_category
        .into_iter()
        .map(|(category, amount)| CategorySpending { category, amount })
        .collect();
    spending_by_category.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));

    // Every day of the window appears, spent or not.
    let daily_trend = (0..TREND_WINDOW_DAYS)
        .map(|offset| {
            let date = trend_start + Duration::days(offset);
            let (income, expense) = by_day.get(&date).copied().unwrap_or_default();
            DailyFlow {
                date,
                income,
                expense,
            }
        })
        .collect();

    DashboardData {
        as_of,
        total_balance,
        income_change_percent: percent_change(current_month.income, previous_month.income),
        expense_change_percent: percent_change(current_month.expense, previous_month.expense),
        current_month,
        previous_month,
        spending_by_category,
        daily_trend,
    }
}
