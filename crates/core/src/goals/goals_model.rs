//! Goals domain models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque goal identifier assigned by the Goal Service.
///
/// Services in the wild hand out either integer or string ids, so both are
/// accepted on the wire and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn new(id: impl Into<String>) -> Self {
        GoalId(id.into())
    }

    /// Fresh random id, for services that assign their own.
    pub fn generate() -> Self {
        GoalId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GoalId {
    fn from(id: &str) -> Self {
        GoalId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for GoalId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawGoalId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawGoalId::deserialize(deserializer)? {
            RawGoalId::Text(id) => GoalId(id),
            RawGoalId::Signed(id) => GoalId(id.to_string()),
            RawGoalId::Unsigned(id) => GoalId(id.to_string()),
        })
    }
}

/// Domain model representing a savings goal as returned by the Goal Service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    /// Contribution per remaining month, as computed by the service. Absent
    /// when the service does not supply one.
    #[serde(
        rename = "suggestion_monthly_deposit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_monthly_deposit: Option<Decimal>,
}

/// Input model for creating a new goal. Balance always starts at zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
}

impl NewGoal {
    pub fn new(title: impl Into<String>, target_amount: Decimal, target_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            target_amount,
            current_amount: Decimal::ZERO,
            target_date,
        }
    }
}

/// Full replacement of a goal's current balance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GoalBalanceUpdate {
    pub current_amount: Decimal,
}

/// Raw create-form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGoalForm {
    pub title: String,
    pub target_amount: String,
    pub target_date: String,
}

impl NewGoalForm {
    pub fn new(
        title: impl Into<String>,
        target_amount: impl Into<String>,
        target_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            target_amount: target_amount.into(),
            target_date: target_date.into(),
        }
    }
}

/// Where a displayed monthly deposit came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositSource {
    Service,
    Estimated,
}

/// Output of the monthly contribution calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPlan {
    pub monthly_amount: Decimal,
    pub remaining_amount: Decimal,
    pub months_left: u32,
    /// Target date has already passed. The whole remainder is due now.
    pub is_overdue: bool,
}

/// Everything a goal card needs, derived from one goal snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub goal_id: GoalId,
    pub progress_percent: u64,
    pub monthly_deposit: Decimal,
    pub deposit_source: DepositSource,
    pub months_left: u32,
    pub is_overdue: bool,
    pub is_reached: bool,
}
