//! Goals module - domain models, metrics, local store and reconciliation.

mod goals_metrics;
mod goals_model;
mod goals_reconciler;
mod goals_store;
mod goals_traits;
pub mod goals_validation;


pub use goals_metrics::{
    goal_summary, progress_percent, recommended_monthly_contribution, remaining_amount,
};
pub use goals_model::{
    ContributionPlan, DepositSource, Goal, GoalBalanceUpdate, GoalId, GoalSummary, NewGoal,
    NewGoalForm,
};
pub use goals_reconciler::GoalReconciler;
pub use goals_store::{format_amount, BalanceSubmission, EditState, GoalStore};
pub use goals_traits::GoalServiceTrait;
pub use goals_validation::{parse_balance_draft, validate_new_goal};
