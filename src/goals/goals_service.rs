use log::{debug, error};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::notifications::{
    NewNotification, NotificationServiceTrait, NOTIFICATION_TYPE_GOAL_COMPLETED, PRIORITY_HIGH,
};

use super::goals_model::{Goal, GoalProgress, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

/// Service for managing savings goals
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl GoalService {
    /// Creates a new GoalService instance with injected dependencies
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        notifications: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
            notifications,
        }
    }

    async fn announce_completion(&self, user_id: &str, goal: &Goal) {
        let notification = NewNotification {
            notification_type: NOTIFICATION_TYPE_GOAL_COMPLETED.to_string(),
            title: "Goal reached".to_string(),
            message: format!("You reached your goal '{}'", goal.name),
            priority: Some(PRIORITY_HIGH.to_string()),
            data: Some(serde_json::json!({
                "goalId": goal.id,
                "targetAmount": goal.target_amount,
            })),
            source_id: Some(goal.id.clone()),
        };
        // The contribution already committed; a notification failure is
        // logged, not surfaced.
        if let Err(e) = self.notifications.emit(user_id, notification).await {
            error!("Failed to emit goal completion notification: {}", e);
        }
    }
}

#[async_trait::async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalProgress> {
        let goal = self.repository.get_by_id(user_id, goal_id)?;
        Ok(GoalProgress::compute(goal, chrono::Utc::now().date_naive()))
    }

    fn get_goals(&self, user_id: &str) -> Result<Vec<GoalProgress>> {
        let today = chrono::Utc::now().date_naive();
        Ok(self
            .repository
            .list(user_id)?
            .into_iter()
            .map(|goal| GoalProgress::compute(goal, today))
            .collect())
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        // A linked account must resolve under the same user.
        if let Some(account_id) = &new_goal.linked_account_id {
            self.account_repository.get_by_id(user_id, account_id)?;
        }
        self.repository.create(user_id, new_goal).await
    }

    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        if let Some(account_id) = &goal_update.linked_account_id {
            self.account_repository.get_by_id(user_id, account_id)?;
        }
        self.repository.update(user_id, goal_update).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        self.repository.delete(user_id, goal_id).await
    }

    /// Adds to a goal; emits a notification when this contribution completes it
    async fn contribute(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal> {
        let (goal, completed_now) = self.repository.contribute(user_id, goal_id, amount).await?;
        if completed_now {
            debug!("Goal '{}' completed for user {}", goal.name, user_id);
            self.announce_completion(user_id, &goal).await;
        }
        Ok(goal)
    }

    async fn withdraw(&self, user_id: &str, goal_id: &str, amount: Decimal) -> Result<Goal> {
        self.repository.withdraw(user_id, goal_id, amount).await
    }
}
