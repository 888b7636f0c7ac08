//! End-to-end tests: GoalServiceClient and GoalReconciler against the
//! in-memory Goal Service served over a real socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use planit_core::goals::{
    EditState, GoalBalanceUpdate, GoalId, GoalReconciler, GoalServiceTrait, GoalStore, NewGoal,
    NewGoalForm,
};
use planit_core::Error;
use planit_goal_client::{GoalClientConfig, GoalServiceClient};
use planit_server::{api::app_router, config::Config, service::InMemoryGoalService, AppState};
use rust_decimal_macros::dec;
use tokio::sync::RwLock;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

async fn spawn_server() -> SocketAddr {
    let service = InMemoryGoalService::new(chrono_tz::UTC).with_fixed_today(today());
    let state = Arc::new(AppState::new(Arc::new(service)));
    let router = app_router(state, &Config::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> GoalServiceClient {
    let config = GoalClientConfig::new(format!("http://{}", addr))
        .with_timeout(Duration::from_secs(5));
    GoalServiceClient::new(&config).unwrap()
}

#[tokio::test]
async fn create_and_list_over_http() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let created = client
        .create_goal(NewGoal::new(
            "Dream Apartment",
            dec!(120000),
            NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(created.suggested_monthly_deposit, Some(dec!(12000)));

    let goals = client.list_goals().await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].id, created.id);
}

#[tokio::test]
async fn unknown_goal_is_a_service_error() {
    let addr = spawn_server().await;
    let client = client_for(addr);

    let result = client
        .update_balance(
            &GoalId::new("missing"),
            GoalBalanceUpdate {
                current_amount: dec!(1),
            },
        )
        .await;

    match result {
        Err(Error::Service { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("missing"), "{}", message);
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn closed_port_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let result = client.list_goals().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn success_status_with_garbage_body_is_unexpected() {
    let router = axum::Router::new().route(
        "/goals/",
        axum::routing::get(|| async { "<html>maintenance</html>" }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let result = client_for(addr).list_goals().await;
    assert!(matches!(result, Err(Error::Unexpected(_))), "{:?}", result);
}

#[tokio::test]
async fn reconciler_full_flow_over_http() {
    let addr = spawn_server().await;
    let client = client_for(addr);
    let store = Arc::new(RwLock::new(GoalStore::new()));
    let reconciler = GoalReconciler::new(Arc::new(client), store.clone())
        .with_timeout(Duration::from_secs(5));

    let form = NewGoalForm::new("Dream Apartment", "120000", "2025-11-15");
    let created = reconciler.create_goal(&form, today()).await.unwrap();
    assert_eq!(store.read().await.len(), 1);

    // Bad draft stays local.
    reconciler.begin_edit(&created.id).await.unwrap();
    reconciler.update_draft(&created.id, "abc").await.unwrap();
    assert!(matches!(
        reconciler.submit_balance(&created.id).await,
        Err(Error::Validation(_))
    ));

    reconciler.update_draft(&created.id, "20000").await.unwrap();
    let updated = reconciler.submit_balance(&created.id).await.unwrap();
    assert_eq!(updated.current_amount, dec!(20000));

    let store = store.read().await;
    assert_eq!(store.edit_state(&created.id), EditState::Viewing);
    let goal = store.get(&created.id).unwrap();
    assert_eq!(goal.current_amount, dec!(20000));
    assert_eq!(goal.suggested_monthly_deposit, Some(dec!(10000)));
}

#[tokio::test]
async fn reconciler_keeps_draft_when_service_is_down() {
    let addr = spawn_server().await;
    let client = client_for(addr);
    let store = Arc::new(RwLock::new(GoalStore::new()));
    let reconciler = GoalReconciler::new(Arc::new(client), store.clone());
    let form = NewGoalForm::new("Car", "15000", "2026-01-01");
    let created = reconciler.create_goal(&form, today()).await.unwrap();

    // Point a second reconciler, sharing the same store, at a dead port.
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);
    let offline = GoalReconciler::new(Arc::new(client_for(dead_addr)), store.clone());

    offline.begin_edit(&created.id).await.unwrap();
    offline.update_draft(&created.id, "2500.75").await.unwrap();
    let result = offline.submit_balance(&created.id).await;
    assert!(matches!(result, Err(Error::Transport(_))));

    let state = store.read().await.edit_state(&created.id);
    assert_eq!(state.draft(), Some("2500.75"));
    assert!(state.error().is_some());
}
