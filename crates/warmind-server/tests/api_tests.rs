//! Integration tests for the control API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Workers spawned by activation point at an
//! unreachable roster, so they idle on fetch failures until
//! deactivated; the API surface is what is under test here.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use warmind_client::{LocationClient, Roster};
use warmind_engine::{DecisionWeights, EngineConfig};
use warmind_server::registry::Registry;
use warmind_server::router::build_router;
use warmind_server::state::AppState;
use warmind_types::LocationId;

/// State over a roster nothing listens on; worker fetches fail fast.
fn make_app() -> Router {
    let mut roster = BTreeMap::new();
    roster.insert(
        LocationId::from("village_1"),
        String::from("http://127.0.0.1:1"),
    );
    let state = Arc::new(AppState {
        registry: Registry::new(),
        client: LocationClient::new(
            Roster::new(roster),
            Duration::from_millis(100),
            Duration::from_millis(200),
        ),
        engine: EngineConfig::default(),
        weights: DecisionWeights::default(),
    });
    build_router(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_healthy() {
    let app = make_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn status_starts_inactive_for_both_factions() {
    let app = make_app();
    let response = app.oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let runs = json["runs"].as_array().unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|run| run["active"] == false));
}

#[tokio::test]
async fn activate_starts_a_run() {
    let app = make_app();

    let response = app
        .clone()
        .oneshot(post_json("/activate", r#"{"faction": "northern"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "activated");
    assert_eq!(json["faction"], "northern");

    let status = app.oneshot(get("/status/northern")).await.unwrap();
    let json = body_json(status).await;
    assert_eq!(json["active"], true);
    assert!(json["run_id"].is_string());
}

#[tokio::test]
async fn second_activation_conflicts() {
    let app = make_app();

    let first = app
        .clone()
        .oneshot(post_json("/activate", r#"{"faction": "southern"}"#))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_json("/activate", r#"{"faction": "southern"}"#))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn factions_activate_independently() {
    let app = make_app();
    for faction in ["northern", "southern"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/activate",
                &format!(r#"{{"faction": "{faction}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn unknown_faction_is_a_bad_request() {
    let app = make_app();

    let activate = app
        .clone()
        .oneshot(post_json("/activate", r#"{"faction": "eastern"}"#))
        .await
        .unwrap();
    assert_eq!(activate.status(), StatusCode::BAD_REQUEST);

    let deactivate = app
        .clone()
        .oneshot(post_json("/deactivate", r#"{"faction": "eastern"}"#))
        .await
        .unwrap();
    assert_eq!(deactivate.status(), StatusCode::BAD_REQUEST);

    let status = app.oneshot(get("/status/eastern")).await.unwrap();
    assert_eq!(status.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failed_activation_changes_nothing() {
    let app = make_app();
    app.clone()
        .oneshot(post_json("/activate", r#"{"faction": "eastern"}"#))
        .await
        .unwrap();

    let response = app.oneshot(get("/status")).await.unwrap();
    let json = body_json(response).await;
    let runs = json["runs"].as_array().unwrap();
    assert!(runs.iter().all(|run| run["active"] == false));
}

#[tokio::test]
async fn deactivate_is_idempotent() {
    let app = make_app();
    app.clone()
        .oneshot(post_json("/activate", r#"{"faction": "northern"}"#))
        .await
        .unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/deactivate", r#"{"faction": "northern"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "deactivated");
    }

    let status = app.oneshot(get("/status/northern")).await.unwrap();
    let json = body_json(status).await;
    assert_eq!(json["active"], false);
}

#[tokio::test]
async fn reactivation_after_deactivate_succeeds() {
    let app = make_app();
    for _ in 0..2 {
        let activate = app
            .clone()
            .oneshot(post_json("/activate", r#"{"faction": "southern"}"#))
            .await
            .unwrap();
        assert_eq!(activate.status(), StatusCode::OK);

        let deactivate = app
            .clone()
            .oneshot(post_json("/deactivate", r#"{"faction": "southern"}"#))
            .await
            .unwrap();
        assert_eq!(deactivate.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn concurrent_activation_has_exactly_one_winner() {
    let app = make_app();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.oneshot(post_json("/activate", r#"{"faction": "northern"}"#))
                .await
                .unwrap()
                .status()
        }));
    }

    let mut ok = 0;
    let mut conflict = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => conflict += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(conflict, 7);
}
