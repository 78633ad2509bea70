// Module declarations
pub(crate) mod bills_constants;
pub(crate) mod bills_model;
pub(crate) mod bills_repository;
pub(crate) mod bills_service;
pub(crate) mod bills_traits;

// Re-export the public interface
pub use bills_constants::*;
pub use bills_model::{advance_due_date, Bill, BillDB, BillUpdate, NewBill};
pub use bills_repository::BillRepository;
pub use bills_service::BillService;
pub use bills_traits::{BillRepositoryTrait, BillServiceTrait};
