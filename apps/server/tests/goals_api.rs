use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use planit_core::goals::Goal;
use planit_server::{api::app_router, config::Config, service::InMemoryGoalService, AppState};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let service = InMemoryGoalService::new(chrono_tz::UTC).with_fixed_today(today);
    let state = Arc::new(AppState::new(Arc::new(service)));
    app_router(state, &Config::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_apartment(app: &Router) -> Goal {
    let (status, body) = send(
        app,
        "POST",
        "/goals/",
        Some(json!({
            "title": "Dream Apartment",
            "target_amount": 120000,
            "current_amount": 0,
            "target_date": "2025-11-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn healthz_works() {
    let app = test_app();
    let (status, _) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_then_list_goals() {
    let app = test_app();
    let created = create_apartment(&app).await;
    assert_eq!(created.title, "Dream Apartment");
    assert_eq!(created.current_amount, dec!(0));
    assert_eq!(created.suggested_monthly_deposit, Some(dec!(12000)));

    let (status, body) = send(&app, "GET", "/goals/", None).await;
    assert_eq!(status, StatusCode::OK);
    let goals: Vec<Goal> = serde_json::from_value(body).unwrap();
    assert_eq!(goals, vec![created]);
}

#[tokio::test]
async fn create_rejects_zero_target_with_field() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/goals/",
        Some(json!({
            "title": "Car",
            "target_amount": 0,
            "current_amount": 0,
            "target_date": "2026-01-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);
    assert_eq!(body["field"], "target_amount");

    let (_, body) = send(&app, "GET", "/goals/", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_balance_recomputes_suggestion() {
    let app = test_app();
    let created = create_apartment(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/goals/{}", created.id),
        Some(json!({ "current_amount": 20000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated: Goal = serde_json::from_value(body).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.current_amount, dec!(20000));
    assert_eq!(updated.suggested_monthly_deposit, Some(dec!(10000)));
}

#[tokio::test]
async fn update_unknown_goal_is_not_found() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/goals/does-not-exist",
        Some(json!({ "current_amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn update_rejects_negative_balance() {
    let app = test_app();
    let created = create_apartment(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/goals/{}", created.id),
        Some(json!({ "current_amount": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "current_amount");
}

#[tokio::test]
async fn malformed_body_gets_structured_error() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/goals/")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn missing_field_gets_structured_error() {
    let app = test_app();
    let created = create_apartment(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/goals/{}", created.id),
        Some(json!({ "balance": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);
    assert!(body["message"].is_string());
}

