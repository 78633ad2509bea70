// Module declarations
pub(crate) mod goals_constants;
pub(crate) mod goals_model;
pub(crate) mod goals_repository;
pub(crate) mod goals_service;
pub(crate) mod goals_traits;

// Re-export the public interface
pub use goals_constants::*;
pub use goals_model::{Goal, GoalDB, GoalProgress, GoalUpdate, NewGoal};
pub use goals_repository::GoalRepository;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
