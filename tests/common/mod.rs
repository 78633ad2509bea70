#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use fintrack_core::accounts::{
    Account, AccountRepository, AccountRepositoryTrait, NewAccount, ACCOUNT_TYPE_CHECKING,
};
use fintrack_core::assistant::{AssistantService, TextGeneratorTrait};
use fintrack_core::bills::{BillRepository, BillRepositoryTrait, BillService, BillServiceTrait};
use fintrack_core::budgets::{
    BudgetRepository, BudgetRepositoryTrait, BudgetService, BudgetServiceTrait,
};
use fintrack_core::dashboard::{DashboardService, DashboardServiceTrait};
use fintrack_core::db;
use fintrack_core::goals::{GoalRepository, GoalRepositoryTrait, GoalService, GoalServiceTrait};
use fintrack_core::notifications::{
    LogPushNotifier, NotificationRepository, NotificationService, NotificationServiceTrait,
};
use fintrack_core::recurrence::RecurrenceService;
use fintrack_core::transactions::{
    NewTransaction, Transaction, TransactionRepository, TransactionRepositoryTrait,
    TransactionService, TransactionServiceTrait, TRANSACTION_TYPE_EXPENSE,
    TRANSACTION_TYPE_INCOME,
};
use fintrack_core::Result;

/// Fully wired service graph over a throwaway on-disk database
pub struct TestContext {
    _data_dir: TempDir,
    pub accounts: Arc<dyn AccountRepositoryTrait>,
    pub transactions: Arc<dyn TransactionRepositoryTrait>,
    pub bills: Arc<dyn BillRepositoryTrait>,
    pub goals: Arc<dyn GoalRepositoryTrait>,
    pub budgets: Arc<dyn BudgetRepositoryTrait>,
    pub notifications: Arc<dyn NotificationServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub bill_service: Arc<dyn BillServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub recurrence: Arc<RecurrenceService>,
}

impl TestContext {
    pub fn new() -> Self {
        let data_dir = TempDir::new().expect("temp dir");
        let db_path = data_dir
            .path()
            .join("app.db")
            .to_str()
            .expect("utf-8 path")
            .to_string();

        let pool = db::create_pool(&db_path).expect("pool");
        db::run_migrations(&pool).expect("migrations");
        let writer = db::spawn_writer(pool.as_ref().clone());

        let accounts: Arc<dyn AccountRepositoryTrait> =
            Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
        let transactions: Arc<dyn TransactionRepositoryTrait> =
            Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
        let bills: Arc<dyn BillRepositoryTrait> =
            Arc::new(BillRepository::new(pool.clone(), writer.clone()));
        let goals: Arc<dyn GoalRepositoryTrait> =
            Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
        let budgets: Arc<dyn BudgetRepositoryTrait> =
            Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));

        let notifier = Arc::new(LogPushNotifier);
        let notification_repository =
            Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));
        let notifications: Arc<dyn NotificationServiceTrait> = Arc::new(NotificationService::new(
            notification_repository,
            notifier.clone(),
        ));

        let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(
            TransactionService::new(transactions.clone(), accounts.clone(), notifier.clone()),
        );
        let bill_service: Arc<dyn BillServiceTrait> =
            Arc::new(BillService::new(bills.clone(), notifier.clone()));
        let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(
            goals.clone(),
            accounts.clone(),
            notifications.clone(),
        ));
        let budget_service: Arc<dyn BudgetServiceTrait> =
            Arc::new(BudgetService::new(budgets.clone(), transactions.clone()));
        let dashboard_service: Arc<dyn DashboardServiceTrait> =
            Arc::new(DashboardService::new(accounts.clone(), transactions.clone()));
        let recurrence = Arc::new(RecurrenceService::new(
            transactions.clone(),
            bills.clone(),
            notifications.clone(),
        ));

        Self {
            _data_dir: data_dir,
            accounts,
            transactions,
            bills,
            goals,
            budgets,
            notifications,
            transaction_service,
            bill_service,
            goal_service,
            budget_service,
            dashboard_service,
            recurrence,
        }
    }

    pub fn assistant(&self, generator: Arc<dyn TextGeneratorTrait>) -> AssistantService {
        AssistantService::new(self.dashboard_service.clone(), generator)
    }

    pub async fn seed_account(&self, user_id: &str, balance: Decimal) -> Account {
        self.accounts
            .create(
                user_id,
                NewAccount {
                    id: None,
                    name: "Main checking".to_string(),
                    account_type: ACCOUNT_TYPE_CHECKING.to_string(),
                    balance: Some(balance),
                    currency: "USD".to_string(),
                    include_in_total: true,
                    is_active: true,
                },
            )
            .await
            .expect("seed account")
    }

    pub async fn spend(
        &self,
        user_id: &str,
        account_id: &str,
        amount: Decimal,
        category: &str,
        date: chrono::NaiveDate,
    ) -> Result<Transaction> {
        self.transaction_service
            .create_transaction(
                user_id,
                NewTransaction {
                    id: None,
                    account_id: account_id.to_string(),
                    transaction_type: TRANSACTION_TYPE_EXPENSE.to_string(),
                    amount,
                    category: category.to_string(),
                    description: None,
                    date,
                    is_recurring: false,
                    recurring_rule: None,
                },
            )
            .await
    }

    pub async fn earn(
        &self,
        user_id: &str,
        account_id: &str,
        amount: Decimal,
        date: chrono::NaiveDate,
    ) -> Result<Transaction> {
        self.transaction_service
            .create_transaction(
                user_id,
                NewTransaction {
                    id: None,
                    account_id: account_id.to_string(),
                    transaction_type: TRANSACTION_TYPE_INCOME.to_string(),
                    amount,
                    category: "Salary".to_string(),
                    description: None,
                    date,
                    is_recurring: false,
                    recurring_rule: None,
                },
            )
            .await
    }

    pub fn balance_of(&self, user_id: &str, account_id: &str) -> Decimal {
        self.accounts
            .get_by_id(user_id, account_id)
            .expect("account")
            .balance
    }
}

pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
