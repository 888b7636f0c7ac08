use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalBalanceUpdate, GoalId, NewGoal};
use async_trait::async_trait;

/// Boundary to the remote Goal Service.
///
/// Implementations must report any non-success response as
/// [`Error::Service`](crate::Error::Service) and any failure to get a response
/// as [`Error::Transport`](crate::Error::Transport).
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    /// `GET /goals/`
    async fn list_goals(&self) -> Result<Vec<Goal>>;

    /// `POST /goals/`
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;

    /// `PUT /goals/{id}`
    async fn update_balance(&self, goal_id: &GoalId, update: GoalBalanceUpdate) -> Result<Goal>;
}
