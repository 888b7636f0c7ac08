//! Derived goal metrics.
//!
//! Pure functions over a goal snapshot. Nothing here reads the clock: `today`
//! is always passed in.

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::goals_model::{ContributionPlan, DepositSource, Goal, GoalSummary};
use crate::constants::MONEY_DECIMAL_PLACES;
use crate::utils::time_utils::months_remaining;

const ONE_HUNDRED: Decimal = dec!(100);

/// Share of the target already saved, as a whole percentage.
///
/// Returns 0 for a non-positive target instead of dividing by it. Over-saving
/// yields values above 100.
pub fn progress_percent(goal: &Goal) -> u64 {
    if goal.target_amount <= Decimal::ZERO {
        return 0;
    }

    let current = goal.current_amount.max(Decimal::ZERO);
    match current
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(goal.target_amount))
    {
        Some(percent) => percent
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .unwrap_or(u64::MAX),
        None => u64::MAX,
    }
}

/// Amount still missing to reach the target. Never negative.
pub fn remaining_amount(goal: &Goal) -> Decimal {
    goal.target_amount
        .checked_sub(goal.current_amount)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Contribution needed per remaining month to close the gap by the target
/// date.
pub fn recommended_monthly_contribution(goal: &Goal, today: NaiveDate) -> ContributionPlan {
    let remaining = remaining_amount(goal);
    let months_left = months_remaining(today, goal.target_date);

    let monthly_amount = if remaining.is_zero() {
        Decimal::ZERO
    } else {
        (remaining / Decimal::from(months_left))
            .round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    };

    ContributionPlan {
        monthly_amount,
        remaining_amount: remaining,
        months_left,
        is_overdue: goal.target_date < today,
    }
}

/// Display summary for one goal. The service-supplied deposit wins over the
/// local estimate.
pub fn goal_summary(goal: &Goal, today: NaiveDate) -> GoalSummary {
    let plan = recommended_monthly_contribution(goal, today);
    let (monthly_deposit, deposit_source) = match goal.suggested_monthly_deposit {
        Some(deposit) => (deposit, DepositSource::Service),
        None => (plan.monthly_amount, DepositSource::Estimated),
    };

    GoalSummary {
        goal_id: goal.id.clone(),
        progress_percent: progress_percent(goal),
        monthly_deposit,
        deposit_source,
        months_left: plan.months_left,
        is_overdue: plan.is_overdue,
        is_reached: plan.remaining_amount.is_zero(),
    }
}
