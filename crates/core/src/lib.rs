//! Planit Core - Savings goal entities, metrics and client-side state.
//!
//! This crate contains the goal domain logic for Planit. It is
//! transport-agnostic and defines the [`goals::GoalServiceTrait`] boundary
//! that the `goal-client` crate implements over HTTP.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::ValidationError;
