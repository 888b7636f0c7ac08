//! Core error types for Planit.
//!
//! This module defines transport-agnostic error types. HTTP-specific errors
//! (from reqwest, axum, etc.) are converted to these types by the crates that
//! talk to the Goal Service.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::goals::GoalId;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the goals domain.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The Goal Service answered with a non-success status.
    #[error("Goal service rejected the request ({status}): {message}")]
    Service { status: u16, message: String },

    /// No response was received from the Goal Service.
    #[error("Goal service unreachable: {0}")]
    Transport(String),

    #[error("Goal service did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Goal '{0}' not found")]
    GoalNotFound(GoalId),

    #[error("A balance update for goal '{0}' is already being submitted")]
    SubmissionInProgress(GoalId),

    #[error("A goal is already being created")]
    CreateInProgress,

    #[error("Invalid edit transition from {from} to {to} for goal '{goal_id}'")]
    InvalidTransition {
        goal_id: GoalId,
        from: String,
        to: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Create a service error from status and message
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// True for failures that came back from (or never came back from) the
    /// Goal Service. These all take the `Submitting -> Editing` path.
    pub fn is_reconciliation_failure(&self) -> bool {
        matches!(
            self,
            Error::Service { .. } | Error::Transport(_) | Error::Timeout(_)
        )
    }

    /// The field a validation error is attributed to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Validation(e) => Some(e.field()),
            _ => None,
        }
    }
}

/// Validation errors for user input, always attributable to one field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("Field '{field}' is not a valid number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("Field '{field}' is too large to be an amount: {value:?}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Field '{0}' must be greater than zero")]
    NotPositive(&'static str),

    #[error("Field '{0}' must not be negative")]
    Negative(&'static str),

    #[error("Field '{field}' is not a valid date (expected YYYY-MM-DD): {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Field '{field}' must not be in the past: {date}")]
    DateInPast { field: &'static str, date: NaiveDate },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field)
            | ValidationError::NotPositive(field)
            | ValidationError::Negative(field) => field,
            ValidationError::NotANumber { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::DateInPast { field, .. } => field,
        }
    }
}
