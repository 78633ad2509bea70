// Module declarations
pub(crate) mod recurrence_model;
pub(crate) mod recurrence_service;

// Re-export the public interface
pub use recurrence_model::{advance_next_date, RecurrenceTickSummary};
pub use recurrence_service::RecurrenceService;
