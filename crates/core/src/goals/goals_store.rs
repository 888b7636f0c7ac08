//! Local cache of fetched goals plus per-goal balance edit sessions.
//!
//! Each goal is in exactly one [`EditState`]:
//!
//! ```text
//! Viewing --begin_edit--> Editing --begin_submit--> Submitting
//!    ^                      |  ^                        |
//!    +-----cancel_edit------+  +------fail_submit-------+
//!    ^                                                  |
//!    +------------------complete_submit-----------------+
//! ```
//!
//! The store never talks to the network. [`GoalReconciler`] drives the
//! `Submitting` leg.
//!
//! [`GoalReconciler`]: super::GoalReconciler

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use rust_decimal::Decimal;

use super::goals_model::{Goal, GoalBalanceUpdate, GoalId};
use super::goals_validation::parse_balance_draft;
use crate::errors::{Error, Result};

/// Local edit state of one goal's balance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    /// Balance editor is open. `error` holds the last validation or service
    /// failure, if any.
    Editing {
        draft: String,
        error: Option<String>,
    },
    /// The parsed draft is with the Goal Service.
    Submitting { draft: String, amount: Decimal },
}

impl EditState {
    pub fn name(&self) -> &'static str {
        match self {
            EditState::Viewing => "Viewing",
            EditState::Editing { .. } => "Editing",
            EditState::Submitting { .. } => "Submitting",
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditState::Viewing => None,
            EditState::Editing { draft, .. } | EditState::Submitting { draft, .. } => Some(draft),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EditState::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, EditState::Submitting { .. })
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated balance update, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSubmission {
    pub goal_id: GoalId,
    pub update: GoalBalanceUpdate,
}

/// Owned, single-writer goal cache.
#[derive(Debug, Default)]
pub struct GoalStore {
    goals: Vec<Goal>,
    edits: HashMap<GoalId, EditState>,
    create_in_flight: bool,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Goals in the order the service listed them.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, goal_id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == goal_id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Current edit state. Goals without an open session are `Viewing`.
    pub fn edit_state(&self, goal_id: &GoalId) -> EditState {
        self.edits.get(goal_id).cloned().unwrap_or_default()
    }

    /// Replaces the whole collection with an authoritative list.
    ///
    /// Duplicate ids keep their first position and last value. Edit sessions
    /// for goals that disappeared are dropped; the rest survive untouched.
    pub fn replace_all(&mut self, goals: Vec<Goal>) {
        let mut deduped: Vec<Goal> = Vec::with_capacity(goals.len());
        for goal in goals {
            if let Some(existing) = deduped.iter_mut().find(|g| g.id == goal.id) {
                warn!("Goal service listed goal '{}' more than once", goal.id);
                *existing = goal;
            } else {
                deduped.push(goal);
            }
        }

        self.edits.retain(|id, state| {
            let keep = deduped.iter().any(|g| &g.id == id);
            if !keep {
                debug!("Dropping {} session for vanished goal '{}'", state, id);
            }
            keep
        });
        self.goals = deduped;
    }

    /// `Viewing -> Editing`, seeding the draft with the committed balance.
    /// Re-opening an editor that is already open keeps its draft.
    pub fn begin_edit(&mut self, goal_id: &GoalId) -> Result<()> {
        let seed = self
            .get(goal_id)
            .map(|g| format_amount(g.current_amount))
            .ok_or_else(|| Error::GoalNotFound(goal_id.clone()))?;

        match self.edit_state(goal_id) {
            EditState::Viewing => {
                self.edits.insert(
                    goal_id.clone(),
                    EditState::Editing {
                        draft: seed,
                        error: None,
                    },
                );
                Ok(())
            }
            EditState::Editing { .. } => Ok(()),
            EditState::Submitting { .. } => Err(Error::SubmissionInProgress(goal_id.clone())),
        }
    }

    /// `Editing -> Editing`. Any text is accepted; validation waits for
    /// submit.
    pub fn update_draft(&mut self, goal_id: &GoalId, text: impl Into<String>) -> Result<()> {
        match self.edits.get_mut(goal_id) {
            Some(EditState::Editing { draft, error }) => {
                *draft = text.into();
                *error = None;
                Ok(())
            }
            other => Err(invalid_transition(goal_id, other.map(|s| &*s), "Editing")),
        }
    }

    /// `Editing -> Viewing`, discarding the draft. Closing an editor that is
    /// not open is a no-op; there is no way out of `Submitting`.
    pub fn cancel_edit(&mut self, goal_id: &GoalId) -> Result<()> {
        match self.edits.get(goal_id) {
            None | Some(EditState::Viewing) => Ok(()),
            Some(EditState::Editing { .. }) => {
                self.edits.remove(goal_id);
                Ok(())
            }
            Some(EditState::Submitting { .. }) => {
                Err(Error::SubmissionInProgress(goal_id.clone()))
            }
        }
    }

    /// `Editing -> Submitting` if the draft is a finite, non-negative number.
    ///
    /// On a bad draft the goal stays in `Editing`, the error is recorded on the
    /// session and returned.
    pub fn begin_submit(&mut self, goal_id: &GoalId) -> Result<BalanceSubmission> {
        let (draft, error) = match self.edits.get_mut(goal_id) {
            Some(EditState::Editing { draft, error }) => (draft, error),
            Some(EditState::Submitting { .. }) => {
                return Err(Error::SubmissionInProgress(goal_id.clone()))
            }
            other => return Err(invalid_transition(goal_id, other.map(|s| &*s), "Submitting")),
        };

        match parse_balance_draft(draft) {
            Ok(amount) => {
                let draft = std::mem::take(draft);
                self.edits.insert(
                    goal_id.clone(),
                    EditState::Submitting { draft, amount },
                );
                debug!("Goal '{}' submitting balance {}", goal_id, amount);
                Ok(BalanceSubmission {
                    goal_id: goal_id.clone(),
                    update: GoalBalanceUpdate {
                        current_amount: amount,
                    },
                })
            }
            Err(validation) => {
                *error = Some(validation.to_string());
                Err(validation.into())
            }
        }
    }

    /// `Submitting -> Viewing` with the service's copy of the goal.
    pub fn complete_submit(&mut self, goal_id: &GoalId, updated: Goal) -> Result<()> {
        match self.edits.get(goal_id) {
            Some(EditState::Submitting { .. }) => {}
            other => return Err(invalid_transition(goal_id, other, "Viewing")),
        }

        self.edits.remove(goal_id);
        match self.goals.iter_mut().find(|g| &g.id == goal_id) {
            Some(slot) => *slot = updated,
            None => self.goals.push(updated),
        }
        Ok(())
    }

    /// `Submitting -> Editing`, giving the user back their exact draft.
    pub fn fail_submit(&mut self, goal_id: &GoalId, message: impl Into<String>) -> Result<()> {
        match self.edits.remove(goal_id) {
            Some(EditState::Submitting { draft, .. }) => {
                self.edits.insert(
                    goal_id.clone(),
                    EditState::Editing {
                        draft,
                        error: Some(message.into()),
                    },
                );
                Ok(())
            }
            other => {
                let err = invalid_transition(goal_id, other.as_ref(), "Editing");
                if let Some(state) = other {
                    self.edits.insert(goal_id.clone(), state);
                }
                Err(err)
            }
        }
    }

    pub fn is_creating(&self) -> bool {
        self.create_in_flight
    }

    /// Marks a create request as outstanding. Only one at a time.
    pub fn begin_create(&mut self) -> Result<()> {
        if self.create_in_flight {
            return Err(Error::CreateInProgress);
        }
        self.create_in_flight = true;
        Ok(())
    }

    pub fn finish_create(&mut self) {
        self.create_in_flight = false;
    }
}

/// Renders a committed amount as editable text (`1500.50` becomes `1500.5`).
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

fn invalid_transition(goal_id: &GoalId, from: Option<&EditState>, to: &str) -> Error {
    Error::InvalidTransition {
        goal_id: goal_id.clone(),
        from: from.map(EditState::name).unwrap_or("Viewing").to_string(),
        to: to.to_string(),
    }
}
