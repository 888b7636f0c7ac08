//! Planit Goal Client - HTTP implementation of the Goal Service boundary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use planit_core::goals::{GoalReconciler, GoalStore};
//! use planit_goal_client::{GoalClientConfig, GoalServiceClient};
//!
//! let config = GoalClientConfig::from_env()?;
//! let client = GoalServiceClient::new(&config)?;
//! let store = Arc::new(tokio::sync::RwLock::new(GoalStore::new()));
//! let reconciler = GoalReconciler::new(Arc::new(client), store)
//!     .with_timeout(config.request_timeout);
//! reconciler.refresh().await?;
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::GoalServiceClient;
pub use config::GoalClientConfig;
pub use error::{GoalClientError, Result};
pub use types::ApiErrorResponse;
