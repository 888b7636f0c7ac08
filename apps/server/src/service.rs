//! In-memory Goal Service.
//!
//! Holds goals in process memory only. Suggested deposits are recomputed on
//! every read and write so they always reflect the current date.

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use planit_core::errors::{Error, Result, ValidationError};
use planit_core::goals::goals_validation::FIELD_CURRENT_AMOUNT;
use planit_core::goals::{
    recommended_monthly_contribution, validate_new_goal, Goal, GoalBalanceUpdate, GoalId,
    GoalServiceTrait, NewGoal,
};
use planit_core::utils::time_utils::today_in;

pub struct InMemoryGoalService {
    goals: RwLock<Vec<Goal>>,
    timezone: Tz,
    fixed_today: Option<NaiveDate>,
}

impl InMemoryGoalService {
    pub fn new(timezone: Tz) -> Self {
        Self {
            goals: RwLock::new(Vec::new()),
            timezone,
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| today_in(self.timezone))
    }

    fn with_suggestion(mut goal: Goal, today: NaiveDate) -> Goal {
        goal.suggested_monthly_deposit =
            Some(recommended_monthly_contribution(&goal, today).monthly_amount);
        goal
    }
}

#[async_trait]
impl GoalServiceTrait for InMemoryGoalService {
    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let today = self.today();
        let goals = self.goals.read().await;
        Ok(goals
            .iter()
            .cloned()
            .map(|g| Self::with_suggestion(g, today))
            .collect())
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let today = self.today();
        validate_new_goal(&new_goal, today)?;

        let goal = Self::with_suggestion(
            Goal {
                id: GoalId::generate(),
                title: new_goal.title.trim().to_string(),
                target_amount: new_goal.target_amount,
                current_amount: new_goal.current_amount,
                target_date: new_goal.target_date,
                suggested_monthly_deposit: None,
            },
            today,
        );
        tracing::info!("Created goal {} ({})", goal.id, goal.title);
        self.goals.write().await.push(goal.clone());
        Ok(goal)
    }

    async fn update_balance(&self, goal_id: &GoalId, update: GoalBalanceUpdate) -> Result<Goal> {
        if update.current_amount < Decimal::ZERO {
            return Err(ValidationError::Negative(FIELD_CURRENT_AMOUNT).into());
        }

        let today = self.today();
        let mut goals = self.goals.write().await;
        let goal = goals
            .iter_mut()
            .find(|g| &g.id == goal_id)
            .ok_or_else(|| Error::GoalNotFound(goal_id.clone()))?;

        goal.current_amount = update.current_amount;
        *goal = Self::with_suggestion(goal.clone(), today);
        tracing::debug!("Goal {} balance set to {}", goal.id, goal.current_amount);
        Ok(goal.clone())
    }
}
