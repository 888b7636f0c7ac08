use std::sync::Arc;

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use planit_core::goals::{Goal, GoalBalanceUpdate, GoalId, NewGoal};

async fn get_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.list_goals().await?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    ApiJson(goal): ApiJson<NewGoal>,
) -> ApiResult<Json<Goal>> {
    let g = state.goal_service.create_goal(goal).await?;
    Ok(Json(g))
}

async fn update_goal_balance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<GoalBalanceUpdate>,
) -> ApiResult<Json<Goal>> {
    let g = state
        .goal_service
        .update_balance(&GoalId::new(id), update)
        .await?;
    Ok(Json(g))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals/", get(get_goals).post(create_goal))
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", put(update_goal_balance))
}
