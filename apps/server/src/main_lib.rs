use std::sync::Arc;

use planit_core::goals::GoalServiceTrait;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, service::InMemoryGoalService};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait>,
}

impl AppState {
    pub fn new(goal_service: Arc<dyn GoalServiceTrait>) -> Self {
        Self { goal_service }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("PLANIT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    tracing::info!("Goal service evaluating dates in {}", config.timezone);
    let goal_service: Arc<dyn GoalServiceTrait> =
        Arc::new(InMemoryGoalService::new(config.timezone));
    Arc::new(AppState::new(goal_service))
}
