//! Synchronises the local goal store with the Goal Service.
//!
//! Balance updates are never applied optimistically: the store keeps showing
//! the committed value until the service confirms, then the whole list is
//! fetched again so service-derived fields stay consistent.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, warn};
use tokio::sync::RwLock;

use super::goals_model::{Goal, GoalId, NewGoalForm};
use super::goals_store::GoalStore;
use super::goals_traits::GoalServiceTrait;
use crate::constants::DEFAULT_REQUEST_TIMEOUT;
use crate::errors::{Error, Result};

/// Drives goal mutations through the Goal Service and folds the results back
/// into the shared [`GoalStore`].
#[derive(Clone)]
pub struct GoalReconciler {
    service: Arc<dyn GoalServiceTrait>,
    store: Arc<RwLock<GoalStore>>,
    request_timeout: Duration,
}

impl GoalReconciler {
    pub fn new(service: Arc<dyn GoalServiceTrait>, store: Arc<RwLock<GoalStore>>) -> Self {
        Self {
            service,
            store,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the bound applied to every service call.
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn store(&self) -> Arc<RwLock<GoalStore>> {
        self.store.clone()
    }

    /// Runs a service call under the request timeout.
    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(self.request_timeout)),
        }
    }

    /// Fetches the full goal list and replaces the store's copy.
    /// Returns the number of goals now held.
    pub async fn refresh(&self) -> Result<usize> {
        let goals = self.bounded(self.service.list_goals()).await?;
        let mut store = self.store.write().await;
        store.replace_all(goals);
        debug!("Goal store refreshed with {} goals", store.len());
        Ok(store.len())
    }

    pub async fn begin_edit(&self, goal_id: &GoalId) -> Result<()> {
        self.store.write().await.begin_edit(goal_id)
    }

    pub async fn update_draft(&self, goal_id: &GoalId, text: impl Into<String>) -> Result<()> {
        self.store.write().await.update_draft(goal_id, text)
    }

    pub async fn cancel_edit(&self, goal_id: &GoalId) -> Result<()> {
        self.store.write().await.cancel_edit(goal_id)
    }

    /// Submits the open draft for `goal_id`.
    ///
    /// Validation failures return before any request is made. Service,
    /// transport and timeout failures put the goal back into `Editing` with
    /// the original draft. On success the store holds the service's copy and
    /// one full refresh has been attempted.
    pub async fn submit_balance(&self, goal_id: &GoalId) -> Result<Goal> {
        let submission = self.store.write().await.begin_submit(goal_id)?;
        let mut pending = PendingGuard::new(&self.store, Pending::Submit(goal_id.clone()));

        let outcome = self
            .bounded(
                self.service
                    .update_balance(&submission.goal_id, submission.update),
            )
            .await
            .and_then(|goal| {
                if &goal.id == goal_id {
                    Ok(goal)
                } else {
                    Err(Error::Unexpected(format!(
                        "Goal service answered update of '{}' with goal '{}'",
                        goal_id, goal.id
                    )))
                }
            });

        match outcome {
            Ok(updated) => {
                self.store
                    .write()
                    .await
                    .complete_submit(goal_id, updated.clone())?;
                pending.disarm();
                if let Err(e) = self.refresh().await {
                    warn!(
                        "Balance of goal '{}' saved but refreshing goals failed: {}",
                        goal_id, e
                    );
                }
                Ok(updated)
            }
            Err(e) => {
                warn!("Failed to update balance of goal '{}': {}", goal_id, e);
                self.store
                    .write()
                    .await
                    .fail_submit(goal_id, e.to_string())?;
                pending.disarm();
                Err(e)
            }
        }
    }

    /// Validates the create form and, if it passes, creates the goal and
    /// refreshes the list.
    pub async fn create_goal(&self, form: &NewGoalForm, today: NaiveDate) -> Result<Goal> {
        let new_goal = form.validate(today)?;
        self.store.write().await.begin_create()?;
        let mut pending = PendingGuard::new(&self.store, Pending::Create);

        debug!("Creating goal '{}'", new_goal.title);
        let created = self.bounded(self.service.create_goal(new_goal)).await;
        self.store.write().await.finish_create();
        pending.disarm();

        match created {
            Ok(goal) => {
                if let Err(e) = self.refresh().await {
                    warn!(
                        "Goal '{}' created but refreshing goals failed: {}",
                        goal.id, e
                    );
                }
                Ok(goal)
            }
            Err(e) => {
                warn!("Failed to create goal: {}", e);
                Err(e)
            }
        }
    }
}

/// Store work started before a service call that must be undone if the
/// calling future is dropped before the result is folded back.
enum Pending {
    Submit(GoalId),
    Create,
}

struct PendingGuard {
    store: Arc<RwLock<GoalStore>>,
    pending: Option<Pending>,
}

impl PendingGuard {
    fn new(store: &Arc<RwLock<GoalStore>>, pending: Pending) -> Self {
        Self {
            store: store.clone(),
            pending: Some(pending),
        }
    }

    fn disarm(&mut self) {
        self.pending = None;
    }
}

fn roll_back(store: &mut GoalStore, pending: &Pending) {
    match pending {
        Pending::Submit(goal_id) => {
            if let Err(e) = store.fail_submit(goal_id, ABANDONED_SUBMIT) {
                warn!("Could not reopen editor for goal '{}': {}", goal_id, e);
            }
        }
        Pending::Create => store.finish_create(),
    }
}

const ABANDONED_SUBMIT: &str = "Balance update was abandoned before the service answered";

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        warn!("Goal service call dropped before completion, rolling back");

        match self.store.try_write() {
            Ok(mut store) => roll_back(&mut store, &pending),
            Err(_) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let store = self.store.clone();
                    handle.spawn(async move {
                        roll_back(&mut *store.write().await, &pending);
                    });
                }
                Err(_) => warn!("No runtime to roll back abandoned goal service call"),
            },
        }
    }
}
