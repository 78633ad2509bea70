pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod accounts;
pub mod assistant;
pub mod bills;
pub mod budgets;
pub mod dashboard;
pub mod goals;
pub mod notifications;
pub mod recurrence;
pub mod transactions;

pub use errors::{Error, Result};
