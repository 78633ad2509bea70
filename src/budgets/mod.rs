// Module declarations
pub(crate) mod budgets_constants;
pub(crate) mod budgets_model;
pub(crate) mod budgets_repository;
pub(crate) mod budgets_service;
pub(crate) mod budgets_traits;

// Re-export the public interface
pub use budgets_constants::*;
pub use budgets_model::{
    compute_status, period_start, Budget, BudgetDB, BudgetStatus, BudgetUpdate, BudgetWithStatus,
    NewBudget,
};
pub use budgets_repository::BudgetRepository;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
