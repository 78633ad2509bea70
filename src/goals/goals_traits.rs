use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalProgress, GoalUpdate, NewGoal};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn list(&self, user_id: &str) -> Result<Vec<Goal>>;
    async fn create(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize>;
    /// Adds to the saved amount. The boolean is true when this call moved the
    /// goal from incomplete to completed.
    async fn contribute(&self, user_id: &str, goal_id: &str, amount: Decimal)
        -> Result<(Goal, bool)>;
    /// Removes from the saved amount. Clears the completion marker when the
    /// result drops below the target.
    async fn withdraw(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalProgress>;
    fn get_goals(&self, user_id: &str) -> Result<Vec<GoalProgress>>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
    async fn contribute(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal>;
    async fn withdraw(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal>;
}
